//! Tracing setup for the binary
//!
//! The subscriber is installed before the config file is read, so messages
//! from loading it are not lost. The file's `[logging] level` is applied
//! afterwards unless `RUST_LOG` or `--verbose` already fixed the filter.

use anyhow::Result;
use tracing_subscriber::{EnvFilter, Registry, fmt, prelude::*, reload};

use crate::config::LoggingConfig;

type FilterHandle = reload::Handle<EnvFilter, Registry>;

/// Adjusts the installed filter once configuration is known.
pub struct LogControl {
    handle: Option<FilterHandle>,
}

impl LogControl {
    /// Switch to the configured level. Does nothing when the filter came
    /// from `RUST_LOG` or `--verbose`.
    pub fn apply(&self, logging: &LoggingConfig) -> Result<()> {
        if let Some(handle) = &self.handle {
            handle.reload(EnvFilter::try_new(logging.level.trim())?)?;
        }
        Ok(())
    }

    /// Directives of the reloadable filter, if there is one
    pub fn current_filter(&self) -> Option<String> {
        self.handle
            .as_ref()
            .and_then(|handle| handle.with_current(|filter| filter.to_string()).ok())
    }
}

/// Install the global subscriber, logging to stderr.
pub fn init_tracing(verbose: bool) -> LogControl {
    let (filter, control) = filter_layer(verbose, EnvFilter::try_from_default_env().ok());

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    control
}

/// `RUST_LOG` wins, then `--verbose`; otherwise start at the default level
/// and leave the filter open to reloading.
fn filter_layer(
    verbose: bool,
    from_env: Option<EnvFilter>,
) -> (reload::Layer<EnvFilter, Registry>, LogControl) {
    let (filter, reloadable) = match from_env {
        Some(filter) => (filter, false),
        None if verbose => (EnvFilter::new("debug"), false),
        None => (EnvFilter::new(LoggingConfig::default().level), true),
    };

    let (layer, handle) = reload::Layer::new(filter);
    let control = LogControl {
        handle: reloadable.then_some(handle),
    };
    (layer, control)
}
