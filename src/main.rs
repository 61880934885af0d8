use std::path::Path;
use std::process::ExitCode;

use ocr_capture_lib::{CleanupOutcome, ImageSource};
use tracing::error;

const USAGE: &str = "Usage: ocr-capture <clipboard|screenshot|cleanup PATH>";

#[tokio::main]
async fn main() -> ExitCode {
    let config = ocr_capture_lib::load_config();
    ocr_capture_lib::init_tracing(config.log_level());
    let source = ImageSource::from_config(&config);

    let mut args = std::env::args().skip(1);
    let Some(command) = args.next() else {
        eprintln!("{USAGE}");
        return ExitCode::from(2);
    };

    match command.as_str() {
        "clipboard" => match source.resolve_clipboard_image_path().await {
            Some(path) => {
                println!("{}", path.display());
                ExitCode::SUCCESS
            }
            None => {
                eprintln!("No image on the clipboard");
                ExitCode::FAILURE
            }
        },
        "screenshot" => match source.capture_screenshot().await {
            Ok(path) => {
                println!("{}", path.display());
                ExitCode::SUCCESS
            }
            Err(e) => {
                error!(error = %e, "Screenshot capture failed");
                ExitCode::FAILURE
            }
        },
        "cleanup" => {
            let Some(path) = args.next() else {
                eprintln!("{USAGE}");
                return ExitCode::from(2);
            };
            if let CleanupOutcome::Rejected(reason) = source.cleanup(Path::new(&path)).await {
                eprintln!("Not removed: {reason}");
            }
            ExitCode::SUCCESS
        }
        _ => {
            eprintln!("{USAGE}");
            ExitCode::from(2)
        }
    }
}
