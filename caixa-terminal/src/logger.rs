//! Logging Infrastructure
//!
//! Console logging by default, daily rolling file when a log directory exists.

use std::path::Path;

/// Initialize the logger from `LOG_LEVEL` and `LOG_DIR`
pub fn init_logger() {
    let level = std::env::var("LOG_LEVEL").ok();
    let dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(level.as_deref(), dir.as_deref());
}

/// Initialize the logger with optional file output
pub fn init_logger_with_file(log_level: Option<&str>, log_dir: Option<&str>) {
    let level = log_level.unwrap_or("info");

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level.parse().unwrap_or(tracing::Level::INFO))
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    if let Some(dir) = log_dir {
        let log_path = Path::new(dir);
        if log_path.is_dir() {
            let file_appender = tracing_appender::rolling::daily(log_path, "caixa");
            subscriber.with_ansi(false).with_writer(file_appender).init();
            return;
        }
    }

    // Keep stdout for the prompt
    subscriber.with_writer(std::io::stderr).init();
}
