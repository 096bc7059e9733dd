//! Tracing setup
//!
//! The terminal UI owns stdout and stderr, so log output goes to a file.
//! Filtering follows `FITDEX_LOG` (same syntax as `RUST_LOG`).

use std::fs::{self, File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable holding the log filter
pub const LOG_ENV: &str = "FITDEX_LOG";

/// Filter used when `FITDEX_LOG` is unset or invalid
const DEFAULT_FILTER: &str = "fitdex=info";

/// Installs the global subscriber writing to `path`
///
/// Returns `false` (and installs nothing) when the file cannot be opened.
pub fn init_tracing(path: &Path) -> bool {
    let Ok(file) = open_log_file(path) else {
        return false;
    };

    let env_filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .compact()
                .with_ansi(false)
                .with_target(true)
                .with_writer(Mutex::new(file)),
        )
        .try_init()
        .is_ok()
}

fn open_log_file(path: &Path) -> std::io::Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}
