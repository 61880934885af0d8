//! Temporary file naming.
//!
//! Every file this crate creates lives directly under a temp root and is named
//! `<root>/raycast-ocr-<infix><id>.<ext>`. The prefix doubles as the gate that
//! decides which paths `cleanup` may delete.

use std::env;
use std::path::{Path, PathBuf};

use nanoid::nanoid;

/// Sentinel prefix for every generated file name.
pub const TEMP_PREFIX: &str = "raycast-ocr-";

/// Where temporary artifacts are created and which paths count as ours.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TempLocation {
    root: PathBuf,
}

impl TempLocation {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The OS temp directory (`$TMPDIR` on macOS).
    pub fn system() -> Self {
        Self::new(env::temp_dir())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `<root>/raycast-ocr-`: every path we hand out starts with this string.
    pub fn sentinel(&self) -> PathBuf {
        self.root.join(TEMP_PREFIX)
    }

    /// Generates a fresh, unique path. Nothing is created on disk.
    pub fn unique_path(&self, infix: &str, extension: &str) -> PathBuf {
        self.root
            .join(format!("{TEMP_PREFIX}{infix}{}.{extension}", nanoid!()))
    }
}

impl Default for TempLocation {
    fn default() -> Self {
        Self::system()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_path_layout() {
        let location = TempLocation::new("/tmp");
        let path = location.unique_path("screenshot-", "png");

        assert_eq!(path.parent(), Some(Path::new("/tmp")));
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("raycast-ocr-screenshot-"));
        assert!(name.ends_with(".png"));
        assert!(path
            .to_string_lossy()
            .starts_with(&*location.sentinel().to_string_lossy()));
    }

    #[test]
    fn test_unique_paths_differ() {
        let location = TempLocation::new("/tmp");
        assert_ne!(
            location.unique_path("", "png"),
            location.unique_path("", "png")
        );
    }
}
