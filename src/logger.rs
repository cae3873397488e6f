//! Process-wide `env_logger` setup

use std::sync::Once;

use env_logger::Builder;
use log::LevelFilter;

/// Guards the one-time logger installation
static INIT: Once = Once::new();

/// Installs an `env_logger` at `Info`, overridable through `RUST_LOG`.
///
/// Safe to call more than once and from several threads; only the first call
/// installs the logger, and an already installed logger is left in place.
pub fn initialize_logger() {
    INIT.call_once_force(|_| {
        let mut builder = Builder::new();

        builder
            .filter_level(LevelFilter::Info)
            .filter_module("quadmap", LevelFilter::Info)
            .filter_module("probe_profile", LevelFilter::Info)
            .format_timestamp_millis()
            .parse_default_env();

        if builder.try_init().is_err() {
            log::debug!("logger already installed");
        }
    });
}

#[cfg(test)]
mod tests {
    use log::{debug, info};

    use super::*;

    #[test]
    fn test_logging_levels() {
        initialize_logger();
        initialize_logger();
        debug!("Debug message in test");
        info!("Info message in test");
    }
}
