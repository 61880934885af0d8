//! Interactive region capture using the macOS `screencapture` command

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use super::command::{CommandError, CommandRunner, CommandSpec};
use crate::paths::TempLocation;

#[derive(Error, Debug)]
pub enum ScreenshotError {
    #[error("Failed to execute screencapture command: {0}")]
    Launch(#[from] CommandError),
}

/// Lets the user select a screen region and saves it to a new temp PNG.
///
/// Waits until the selection is finished or cancelled. The path is returned
/// either way; after a cancel (Escape) the file simply does not exist, so the
/// caller must handle a missing file. Only a failure to start `screencapture`
/// is an error.
pub async fn capture_screenshot(
    runner: &dyn CommandRunner,
    screencapture: &Path,
    location: &TempLocation,
) -> Result<PathBuf, ScreenshotError> {
    let destination = location.unique_path("screenshot-", "png");
    debug!(path = %destination.display(), "Starting interactive screenshot region selection");

    // -i: interactive mode (crosshair for region selection)
    let spec = CommandSpec::new(screencapture)
        .arg("-i")
        .arg(&destination);
    let output = runner.run(&spec).await?;

    if !output.success() {
        // Exit code 1 typically means user cancelled (Escape key)
        debug!(
            code = ?output.status,
            stderr = %output.stderr.trim(),
            "screencapture exited without success"
        );
    } else if destination.exists() {
        info!(path = %destination.display(), "Screenshot captured");
    } else {
        debug!(path = %destination.display(), "Screenshot selection cancelled by user");
    }

    Ok(destination)
}
