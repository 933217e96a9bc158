use std::fs::{self, File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log file used while the TUI owns the terminal
pub const LOG_FILE_NAME: &str = "happu.log";

/// Install the global subscriber. `RUST_LOG` overrides the `warn` default.
pub fn init(interactive: bool, log_dir: Option<&Path>) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(!interactive)
                .with_writer(writer(interactive, log_dir)),
        )
        .init();
}

/// Subcommands log to stderr. The TUI draws on the same tty, so it appends
/// to `happu.log` under `log_dir` instead, and discards logs when that file
/// cannot be opened.
pub fn writer(interactive: bool, log_dir: Option<&Path>) -> BoxMakeWriter {
    if !interactive {
        return BoxMakeWriter::new(std::io::stderr);
    }

    match log_dir.map(open_log_file) {
        Some(Ok(file)) => BoxMakeWriter::new(Mutex::new(file)),
        _ => BoxMakeWriter::new(std::io::sink),
    }
}

fn open_log_file(dir: &Path) -> std::io::Result<File> {
    fs::create_dir_all(dir)?;
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join(LOG_FILE_NAME))
}
