//! Bundles the collaborators each operation needs.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::{load_config, Config};
use crate::paths::TempLocation;
use crate::system::{
    self, CleanupOutcome, ClipboardReader, CommandRunner, ScreenshotError, SystemClipboard,
    SystemCommandRunner, ToolPaths,
};

/// Entry point for acquiring images. Cheap to clone.
#[derive(Clone)]
pub struct ImageSource {
    runner: Arc<dyn CommandRunner>,
    clipboard: Arc<dyn ClipboardReader>,
    location: TempLocation,
    tools: ToolPaths,
}

impl ImageSource {
    pub fn new(
        runner: Arc<dyn CommandRunner>,
        clipboard: Arc<dyn ClipboardReader>,
        location: TempLocation,
        tools: ToolPaths,
    ) -> Self {
        Self {
            runner,
            clipboard,
            location,
            tools,
        }
    }

    /// Real processes and clipboard, paths taken from `config`.
    pub fn from_config(config: &Config) -> Self {
        let runner: Arc<dyn CommandRunner> = Arc::new(SystemCommandRunner);
        let tools = config.tool_paths();
        let clipboard = Arc::new(SystemClipboard::new(
            runner.clone(),
            tools.osascript.clone(),
        ));
        Self::new(runner, clipboard, config.temp_location(), tools)
    }

    /// [`ImageSource::from_config`] with the user's config file.
    pub fn configured() -> Self {
        Self::from_config(&load_config())
    }

    pub fn location(&self) -> &TempLocation {
        &self.location
    }

    /// See [`system::resolve_image_path`].
    pub async fn resolve_clipboard_image_path(&self) -> Option<PathBuf> {
        system::resolve_image_path(
            self.clipboard.as_ref(),
            self.runner.as_ref(),
            &self.tools.osascript,
            &self.location,
        )
        .await
    }

    /// See [`system::capture_screenshot`].
    pub async fn capture_screenshot(&self) -> Result<PathBuf, ScreenshotError> {
        system::capture_screenshot(self.runner.as_ref(), &self.tools.screencapture, &self.location)
            .await
    }

    /// See [`system::cleanup`].
    pub async fn cleanup(&self, path: &Path) -> CleanupOutcome {
        system::cleanup(path, &self.location).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::clipboard::testing::FakeClipboard;
    use crate::system::command::testing::{exited, FakeRunner};
    use std::fs;
    use tempfile::TempDir;

    fn fake_source(dir: &TempDir, stdout: &'static str) -> ImageSource {
        ImageSource::new(
            Arc::new(FakeRunner::new(move |_| Ok(exited(0, stdout)))),
            Arc::new(FakeClipboard::empty()),
            TempLocation::new(dir.path()),
            ToolPaths::default(),
        )
    }

    #[tokio::test]
    async fn test_exported_clipboard_image_can_be_cleaned_up() {
        let dir = TempDir::new().unwrap();
        let source = fake_source(&dir, "success");

        let path = source.resolve_clipboard_image_path().await.unwrap();
        fs::write(&path, b"\x89PNG").unwrap();

        assert_eq!(source.cleanup(&path).await, CleanupOutcome::Removed);
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_configured_temp_root_is_used_for_cleanup() {
        let dir = TempDir::new().unwrap();
        let config = Config {
            temp_dir: Some(dir.path().to_path_buf()),
            ..Config::default()
        };
        let path = config.temp_location().unique_path("screenshot-", "png");
        fs::write(&path, b"\x89PNG").unwrap();

        let source = ImageSource::from_config(&config);
        assert_eq!(source.location().root(), dir.path());
        assert_eq!(source.cleanup(&path).await, CleanupOutcome::Removed);
        assert!(!path.exists());

        let elsewhere = ImageSource::from_config(&Config::default());
        fs::write(&path, b"\x89PNG").unwrap();
        assert!(matches!(
            elsewhere.cleanup(&path).await,
            CleanupOutcome::Rejected(_)
        ));
        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_screenshot_path_can_be_cleaned_up() {
        let dir = TempDir::new().unwrap();
        let source = fake_source(&dir, "");

        let path = source.capture_screenshot().await.unwrap();
        assert!(path.starts_with(source.location().root()));
        fs::write(&path, b"\x89PNG").unwrap();

        assert_eq!(source.cleanup(&path).await, CleanupOutcome::Removed);
    }
}
