//! Acquire an image for OCR: from the clipboard or an interactive screenshot,
//! persisted as a temporary file that [`cleanup`] later removes.
//!
//! macOS only at runtime: the default collaborators drive `osascript` and
//! `screencapture`.

mod config;
pub mod paths;
mod source;
mod system;

use std::path::{Path, PathBuf};

use tracing_subscriber::EnvFilter;

pub use config::{config_path, load_config, load_config_from, Config, ConfigError, LogLevel};
pub use paths::{TempLocation, TEMP_PREFIX};
pub use source::ImageSource;
pub use system::{
    check_cleanup_path, check_path_text, is_directly_under_root, is_supported_image,
    CleanupOutcome, CleanupRejection, ClipboardContent, ClipboardError, ClipboardReader,
    CommandError, CommandOutput, CommandRunner, CommandSpec, ScreenshotError, SystemClipboard,
    SystemCommandRunner, ToolPaths, OUTPUT_PATH_ENV, SUPPORTED_IMAGE_EXTENSIONS,
};

/// Installs the global tracing subscriber. `RUST_LOG` wins over `level`.
/// Output goes to stderr so stdout stays free for results.
pub fn init_tracing(level: LogLevel) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_filter())),
        )
        .with_writer(std::io::stderr)
        .init();
}

// The functions below honour the user's config file, same as the binary.

/// Path of an image on the clipboard, or `None`. Never fails.
pub async fn resolve_clipboard_image_path() -> Option<PathBuf> {
    ImageSource::configured().resolve_clipboard_image_path().await
}

/// Interactive region capture into a new temp PNG.
pub async fn capture_screenshot() -> Result<PathBuf, ScreenshotError> {
    ImageSource::configured().capture_screenshot().await
}

/// Deletes a file previously handed out by this crate. Never fails.
pub async fn cleanup(path: &Path) -> CleanupOutcome {
    ImageSource::configured().cleanup(path).await
}
