//! File logging bootstrap.
//!
//! The interactive menu owns stdout, so diagnostics go to a log file
//! under the platform data directory instead of the terminal.
//!
//! # Invariants
//! - Initialization is idempotent: only the first call takes effect.
//! - Initialization never panics; failures come back as a readable
//!   string and the program runs on without logging.

use flexi_logger::{FileSpec, Logger, LoggerHandle};
use once_cell::sync::OnceCell;
use std::path::Path;

const LOG_FILE_BASENAME: &str = "pendata";

static LOGGER: OnceCell<LoggerHandle> = OnceCell::new();

/// Starts file logging at `level` into `log_dir`.
pub fn init(level: &str, log_dir: &Path) -> std::result::Result<(), String> {
    if LOGGER.get().is_some() {
        return Ok(());
    }

    let handle = Logger::try_with_str(level)
        .map_err(|e| format!("unsupported log level {:?}: {}", level, e))?
        .log_to_file(
            FileSpec::default()
                .directory(log_dir)
                .basename(LOG_FILE_BASENAME),
        )
        .start()
        .map_err(|e| format!("could not start logging: {}", e))?;

    let _ = LOGGER.set(handle);
    Ok(())
}
