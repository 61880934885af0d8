//! System interactions (clipboard, screenshot, external commands, temp files)

pub(crate) mod clipboard;
pub(crate) mod command;
mod screenshot;
mod temp_files;

pub use clipboard::{
    is_supported_image, resolve_image_path, ClipboardContent, ClipboardError, ClipboardReader,
    SystemClipboard, OUTPUT_PATH_ENV, SUPPORTED_IMAGE_EXTENSIONS,
};
pub use command::{
    CommandError, CommandOutput, CommandRunner, CommandSpec, SystemCommandRunner, ToolPaths,
};
pub use screenshot::{capture_screenshot, ScreenshotError};
pub use temp_files::{
    check_cleanup_path, check_path_text, cleanup, is_directly_under_root, CleanupOutcome,
    CleanupRejection,
};
