//! Logging abstraction
//!
//! Call sites use the `log_*!` macros. They forward to `tracing`, so every
//! message carries the span of the worker that emitted it.
//!
//! [`init`] installs the process subscriber:
//! - an `EnvFilter` built from `RUST_LOG`, falling back to the configured level
//! - a console layer (optional)
//! - a non-blocking file layer when a log directory is configured, one file per run

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::LoggingConfig;

#[doc(hidden)]
pub use tracing as __tracing;

/// Flushes the file writer when dropped. Hold it until the process exits.
#[must_use = "dropping the guard stops the file writer"]
pub struct LogGuard {
    _file: Option<tracing_appender::non_blocking::WorkerGuard>,
}

/// Errors raised while installing the subscriber
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Invalid log filter '{directive}': {source}")]
    Filter {
        directive: String,
        source: tracing_subscriber::filter::ParseError,
    },

    #[error("Failed to create log directory: {0}")]
    Directory(#[from] std::io::Error),

    #[error("A global subscriber is already installed")]
    AlreadyInstalled,
}

/// Install the global subscriber described by `config`.
pub fn init(config: &LoggingConfig) -> Result<LogGuard, LoggingError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.level).map_err(|source| LoggingError::Filter {
            directive: config.level.clone(),
            source,
        })?,
    };

    let console = config
        .console
        .then(|| fmt::layer().with_target(false).with_thread_names(true));

    let (file, guard) = match &config.directory {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let name = format!("waypoint_pilot_{}.log", std::process::id());
            let appender = tracing_appender::rolling::never(dir, name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_ansi(false)
                .with_thread_names(true)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file)
        .try_init()
        .map_err(|_| LoggingError::AlreadyInstalled)?;

    Ok(LogGuard { _file: guard })
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        $crate::core::logging::__tracing::error!($($arg)*)
    };
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        $crate::core::logging::__tracing::warn!($($arg)*)
    };
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        $crate::core::logging::__tracing::info!($($arg)*)
    };
}

#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        $crate::core::logging::__tracing::debug!($($arg)*)
    };
}

#[macro_export]
macro_rules! log_trace {
    ($($arg:tt)*) => {
        $crate::core::logging::__tracing::trace!($($arg)*)
    };
}
