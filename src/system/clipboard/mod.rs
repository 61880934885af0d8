//! Clipboard image resolution.
//!
//! A copied image file is returned as-is. Anything else goes through an
//! AppleScript export of the raw clipboard image into a temporary PNG.

mod export;
mod system;

pub use export::{export_clipboard_image, OUTPUT_PATH_ENV};
pub use system::SystemClipboard;

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::command::{CommandError, CommandRunner};
use crate::paths::TempLocation;

/// Extensions accepted when the clipboard holds a file reference.
pub const SUPPORTED_IMAGE_EXTENSIONS: [&str; 7] =
    ["png", "jpg", "jpeg", "gif", "bmp", "tiff", "heic"];

#[derive(Error, Debug)]
pub enum ClipboardError {
    #[error(transparent)]
    Command(#[from] CommandError),
    #[error("Clipboard I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("Clipboard unavailable: {0}")]
    Unavailable(String),
}

/// What the clipboard currently holds, as far as we care.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClipboardContent {
    /// Path of a copied file, if any.
    pub file: Option<PathBuf>,
}

/// Host clipboard access.
#[async_trait]
pub trait ClipboardReader: Send + Sync {
    async fn read(&self) -> Result<ClipboardContent, ClipboardError>;
}

/// Case-insensitive extension check against [`SUPPORTED_IMAGE_EXTENSIONS`].
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            SUPPORTED_IMAGE_EXTENSIONS
                .iter()
                .any(|supported| supported.eq_ignore_ascii_case(ext))
        })
}

/// Finds an image on the clipboard.
///
/// Returns the copied file's own path when it is an image, otherwise the path
/// of a freshly exported temp PNG. Returns `None` when neither works; failures
/// are logged, never raised.
pub async fn resolve_image_path(
    reader: &dyn ClipboardReader,
    runner: &dyn CommandRunner,
    osascript: &Path,
    location: &TempLocation,
) -> Option<PathBuf> {
    match reader.read().await {
        Ok(content) => match content.file {
            Some(file) if is_supported_image(&file) => {
                info!(path = %file.display(), "Using image file from clipboard");
                return Some(file);
            }
            Some(file) => {
                debug!(path = %file.display(), "Clipboard file is not a supported image");
            }
            None => debug!("Clipboard holds no file reference"),
        },
        Err(e) => warn!(error = %e, "Failed to read clipboard, trying image export"),
    }

    match export_clipboard_image(runner, osascript, location).await {
        Ok(Some(path)) => {
            info!(path = %path.display(), "Exported clipboard image");
            Some(path)
        }
        Ok(None) => {
            debug!("Clipboard holds no image data");
            None
        }
        Err(e) => {
            warn!(error = %e, "Clipboard image export failed");
            None
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Clipboard returning fixed content, or an error when `content` is `None`.
    pub(crate) struct FakeClipboard {
        pub(crate) content: Option<ClipboardContent>,
    }

    impl FakeClipboard {
        pub(crate) fn with_file(path: &str) -> Self {
            Self {
                content: Some(ClipboardContent {
                    file: Some(PathBuf::from(path)),
                }),
            }
        }

        pub(crate) fn empty() -> Self {
            Self {
                content: Some(ClipboardContent::default()),
            }
        }

        pub(crate) fn broken() -> Self {
            Self { content: None }
        }
    }

    #[async_trait]
    impl ClipboardReader for FakeClipboard {
        async fn read(&self) -> Result<ClipboardContent, ClipboardError> {
            self.content
                .clone()
                .ok_or_else(|| ClipboardError::Unavailable("no host clipboard".to_string()))
        }
    }
}
