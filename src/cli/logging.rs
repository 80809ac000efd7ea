//! Logging initialization

use std::path::PathBuf;

/// Initialize logging based on debug flag
/// Returns the log file path if debug logging is enabled
pub fn init_logging(debug: bool) -> Option<PathBuf> {
    if !debug {
        // Silent by default so the dashboard owns the terminal
        return None;
    }

    // Kept on disk after exit so the log can be inspected
    let kept = tempfile::Builder::new()
        .prefix("helmdeck-")
        .suffix(".log")
        .tempfile()
        .and_then(|f| f.keep().map_err(|e| e.error));
    let (file, log_path) = match kept {
        Ok(kept) => kept,
        Err(e) => {
            eprintln!("Failed to create log file: {}", e);
            return None;
        }
    };

    tracing_subscriber::fmt()
        .with_writer(file)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("helmdeck=debug")),
        )
        .with_ansi(false)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    Some(log_path)
}
