//! Safe removal of temporary files created by this crate.

use std::io;
use std::path::{Component, Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

use crate::paths::TempLocation;

/// Why a path was refused by [`check_cleanup_path`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CleanupRejection {
    #[error("path does not start with {sentinel}")]
    NotPrefixed { sentinel: String },
    #[error("path contains a parent directory segment")]
    Traversal,
    #[error("path could not be resolved: {0}")]
    Unresolvable(String),
    #[error("resolved path {0} is not directly inside the temp root")]
    OutsideRoot(PathBuf),
}

/// What [`cleanup`] did. Never an error: cleanup is advisory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleanupOutcome {
    Removed,
    Rejected(CleanupRejection),
    Failed(io::ErrorKind),
}

/// String-level checks: sentinel prefix and `..` segments. Touches no files.
pub fn check_path_text(path: &Path, location: &TempLocation) -> Result<(), CleanupRejection> {
    let sentinel = location.sentinel();
    let sentinel = sentinel.to_string_lossy();
    if !path.to_string_lossy().starts_with(&*sentinel) {
        return Err(CleanupRejection::NotPrefixed {
            sentinel: sentinel.into_owned(),
        });
    }

    if path.components().any(|c| matches!(c, Component::ParentDir)) {
        return Err(CleanupRejection::Traversal);
    }

    Ok(())
}

/// True when `canonical_path` is an entry directly inside `canonical_root`.
pub fn is_directly_under_root(canonical_path: &Path, canonical_root: &Path) -> bool {
    canonical_path.parent() == Some(canonical_root)
}

/// Decides whether `path` may be deleted. Resolves symlinks but never mutates
/// the filesystem.
pub fn check_cleanup_path(path: &Path, location: &TempLocation) -> Result<(), CleanupRejection> {
    check_path_text(path, location)?;

    let canonical_path = path
        .canonicalize()
        .map_err(|e| CleanupRejection::Unresolvable(e.to_string()))?;
    let canonical_root = location
        .root()
        .canonicalize()
        .map_err(|e| CleanupRejection::Unresolvable(e.to_string()))?;

    if !is_directly_under_root(&canonical_path, &canonical_root) {
        return Err(CleanupRejection::OutsideRoot(canonical_path));
    }

    Ok(())
}

/// Deletes a temp file if it passes [`check_cleanup_path`].
///
/// Failures are logged and reported in the outcome, never raised.
pub async fn cleanup(path: &Path, location: &TempLocation) -> CleanupOutcome {
    if let Err(rejection) = check_cleanup_path(path, location) {
        // A cancelled screenshot leaves no file behind
        if matches!(rejection, CleanupRejection::Unresolvable(_)) {
            debug!(path = %path.display(), reason = %rejection, "Nothing to delete");
        } else {
            warn!(path = %path.display(), reason = %rejection, "Refusing to delete file");
        }
        return CleanupOutcome::Rejected(rejection);
    }

    match tokio::fs::remove_file(path).await {
        Ok(()) => {
            debug!(path = %path.display(), "Removed temporary file");
            CleanupOutcome::Removed
        }
        Err(e) => {
            warn!(error = %e, path = %path.display(), "Failed to remove temporary file");
            CleanupOutcome::Failed(e.kind())
        }
    }
}
