//! The real clipboard: file references through AppleScript.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::{ClipboardContent, ClipboardError, ClipboardReader};
use crate::system::command::{CommandRunner, CommandSpec};

/// Asks Finder's pasteboard entry for a file URL. Fails when no file is copied.
const FILE_REFERENCE_SCRIPT: &str = "POSIX path of (the clipboard as «class furl»)";

pub struct SystemClipboard {
    runner: Arc<dyn CommandRunner>,
    osascript: PathBuf,
}

impl SystemClipboard {
    pub fn new(runner: Arc<dyn CommandRunner>, osascript: PathBuf) -> Self {
        Self { runner, osascript }
    }

    async fn read_file_reference(&self) -> Result<Option<PathBuf>, ClipboardError> {
        let spec = CommandSpec::new(&self.osascript)
            .arg("-e")
            .arg(FILE_REFERENCE_SCRIPT);
        let output = self.runner.run(&spec).await?;

        let path = output.stdout.trim();
        if !output.success() || path.is_empty() {
            debug!(code = ?output.status, "No file reference on clipboard");
            return Ok(None);
        }
        Ok(Some(PathBuf::from(path)))
    }
}

#[async_trait]
impl ClipboardReader for SystemClipboard {
    async fn read(&self) -> Result<ClipboardContent, ClipboardError> {
        let file = self.read_file_reference().await?;
        Ok(ClipboardContent { file })
    }
}
