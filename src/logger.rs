//! Logger setup shared by the binaries.

use std::sync::Once;

use env_logger::Builder;
use log::LevelFilter;

/// Guards the one-time logger installation
static INIT: Once = Once::new();

/// Installs an `env_logger` backend, `Info` by default and overridable through `RUST_LOG`.
///
/// Calling it more than once is harmless.
pub fn initialize_logger() {
    INIT.call_once_force(|_| {
        let mut builder = Builder::new();

        builder
            .filter_level(LevelFilter::Info)
            .format_timestamp_millis()
            .parse_default_env();

        // Another logger may already be installed by the embedding program.
        if builder.try_init().is_err() {
            log::debug!("logger already installed, keeping the existing one");
        }
    });
}
