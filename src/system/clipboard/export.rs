//! Raw clipboard image export through AppleScript.

use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::ClipboardError;
use crate::paths::TempLocation;
use crate::system::command::{CommandRunner, CommandSpec};

/// Environment variable carrying the destination path into the script.
pub const OUTPUT_PATH_ENV: &str = "RAYCAST_OCR_OUTPUT_PATH";

const SUCCESS_STATUS: &str = "success";

/// Writes the clipboard as PNG to the path named by `RAYCAST_OCR_OUTPUT_PATH`.
/// Prints `success` or `error`; AppleScript errors never escape the script.
const EXPORT_SCRIPT: &str = r#"on run
	set outputPath to system attribute "RAYCAST_OCR_OUTPUT_PATH"
	try
		set imageData to the clipboard as «class PNGf»
		set fileRef to open for access (POSIX file outputPath) with write permission
		try
			set eof of fileRef to 0
			write imageData to fileRef
			close access fileRef
		on error
			close access fileRef
			return "error"
		end try
		return "success"
	on error
		return "error"
	end try
end run
"#;

/// Script file on disk, removed when dropped.
struct ScriptFile {
    path: PathBuf,
}

impl ScriptFile {
    async fn create(path: PathBuf, body: &str) -> io::Result<Self> {
        // Guard first, so a half-written file is still removed.
        let script = Self { path };
        tokio::fs::write(&script.path, body).await?;
        Ok(script)
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ScriptFile {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => debug!(path = %self.path.display(), "Removed script file"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => debug!(error = %e, path = %self.path.display(), "Failed to remove script file"),
        }
    }
}

/// Exports the clipboard image to a new temp PNG.
///
/// `Ok(None)` means the clipboard held no image. The script file is gone when
/// this returns, whatever the outcome.
pub async fn export_clipboard_image(
    runner: &dyn CommandRunner,
    osascript: &Path,
    location: &TempLocation,
) -> Result<Option<PathBuf>, ClipboardError> {
    let destination = location.unique_path("", "png");
    let script = ScriptFile::create(location.unique_path("script-", "applescript"), EXPORT_SCRIPT)
        .await?;

    let spec = CommandSpec::new(osascript)
        .arg(script.path())
        .env(OUTPUT_PATH_ENV, &destination);
    let output = runner.run(&spec).await;
    drop(script);
    let output = output?;

    let status = output.stdout.trim();
    if status == SUCCESS_STATUS {
        return Ok(Some(destination));
    }

    debug!(
        status = %status,
        code = ?output.status,
        stderr = %output.stderr.trim(),
        "Clipboard export reported no image"
    );
    // The script may have opened the destination before failing.
    if let Err(e) = tokio::fs::remove_file(&destination).await {
        if e.kind() != io::ErrorKind::NotFound {
            debug!(error = %e, path = %destination.display(), "Failed to remove partial export");
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::command::testing::{exited, FakeRunner};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_script_reads_path_from_environment() {
        assert!(EXPORT_SCRIPT.contains(&format!("system attribute \"{OUTPUT_PATH_ENV}\"")));
        assert!(EXPORT_SCRIPT.contains("«class PNGf»"));
    }

    #[tokio::test]
    async fn test_script_exists_during_run_and_not_after() {
        let dir = TempDir::new().unwrap();
        let location = TempLocation::new(dir.path());
        let runner = FakeRunner::new(|spec| {
            let script_path = PathBuf::from(&spec.args[0]);
            let body = fs::read_to_string(&script_path).unwrap();
            assert_eq!(body, EXPORT_SCRIPT);

            let destination = spec.env_value(OUTPUT_PATH_ENV).unwrap();
            assert!(!body.contains(&*destination.to_string_lossy()));
            fs::write(destination, b"\x89PNG").unwrap();
            Ok(exited(0, "success\n"))
        });

        let destination = export_clipboard_image(&runner, Path::new("osascript"), &location)
            .await
            .unwrap()
            .expect("destination");

        let calls = runner.calls();
        let script_path = PathBuf::from(&calls[0].args[0]);
        assert!(script_path
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("raycast-ocr-script-"));
        assert!(!script_path.exists());
        assert!(destination.exists());
    }

    #[tokio::test]
    async fn test_failure_status_removes_partial_destination() {
        let dir = TempDir::new().unwrap();
        let location = TempLocation::new(dir.path());
        let runner = FakeRunner::new(|spec| {
            fs::write(spec.env_value(OUTPUT_PATH_ENV).unwrap(), b"").unwrap();
            Ok(exited(0, "error"))
        });

        let result = export_clipboard_image(&runner, Path::new("osascript"), &location).await;

        assert!(matches!(result, Ok(None)));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_nonzero_exit_is_not_success() {
        let dir = TempDir::new().unwrap();
        let location = TempLocation::new(dir.path());
        let runner = FakeRunner::new(|_| Ok(exited(1, "")));

        let result = export_clipboard_image(&runner, Path::new("osascript"), &location).await;
        assert!(matches!(result, Ok(None)));
    }
}
