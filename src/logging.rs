//! Log sink setup.  Both front ends own the terminal in raw mode, so log
//! records go to a file instead of stderr.

use std::fs::OpenOptions;

use env_logger::{Builder, Target};

use crate::config::RuntimeConfig;
use crate::error::Result;

/// Install the global logger.  Returns an error if the log file cannot be
/// opened; calling it twice is harmless (the second install is ignored).
pub fn init(config: &RuntimeConfig) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_path)?;

    let _ = Builder::new()
        .parse_filters(&config.log_filter)
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init();

    log::debug!("logging to {}", config.log_path.display());
    Ok(())
}
