//! File logging setup.

use std::fs::File;
use std::path::Path;

use simplelog::{Config, LevelFilter, WriteLogger};

use crate::error::LoggingError;

/// Install a `simplelog` file logger as the global `log` backend.
///
/// Can only succeed once per process.
pub fn init_file_logger(path: impl AsRef<Path>, level: LevelFilter) -> Result<(), LoggingError> {
    let log_file = File::create(path)?;
    WriteLogger::init(level, Config::default(), log_file)?;
    log::info!("file logger installed at level {level}");
    Ok(())
}
