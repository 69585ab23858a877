//! Pre-configured logging for a named logger: one console sink and one file
//! sink named after the current date, each with its own minimum severity.
//!
//! ```no_run
//! use daylog::{LogConfigBuilder, LoggerRegistry, Severity};
//!
//! let registry = LoggerRegistry::new();
//! let logger = LogConfigBuilder::new("app")
//!     .with_console_level(Severity::Info)
//!     .with_file_level(Severity::Error)
//!     .with_log_directory("/tmp/logs")
//!     .configure(&registry)?;
//!
//! daylog::info!(logger, "only on the console");
//! daylog::error!(logger, "console and /tmp/logs/<today>.log");
//! # Ok::<(), daylog::Error>(())
//! ```
//!
//! Every line has the form
//! `<timestamp> <LEVEL> <logger> [<file>:<line> [<module>]] - <message>`.

mod config;
mod error;
mod logging;
mod macros;
mod utils;

use std::sync::Arc;

pub use config::{
    data_dir, default_log_dir, parse_backup_count, BuilderOptions, DEFAULT_BACKUP_COUNT,
    DEFAULT_DATETIME_FORMAT, DEFAULT_DATE_FORMAT,
};
pub use error::{Error, Result};
pub use logging::{
    install, Clock, ConsoleSink, ConsoleTarget, DefaultFormatter, Destination, FileSink,
    FixedClock, FormatterConfig, FormatterFactory, LevelSetting, LogConfigBuilder, LogDirectory,
    LogFormatter, LogSink, Logger, LoggerRegistry, MemoryBuffer, Record, Severity, SinkConfig,
    SystemClock,
};

/// Configures `options.logger_name` in `registry` and returns the logger.
///
/// Creates the log directory when missing and opens today's file for
/// appending. Calling it again for the same name replaces the previous sinks.
///
/// # Errors
///
/// A configuration error ([`Error::is_config`]) for invalid options, raised
/// before anything touches the filesystem, or [`Error::Io`] when the
/// directory or file cannot be created. The logger is left untouched in
/// both cases.
pub fn configure(registry: &LoggerRegistry, options: BuilderOptions) -> Result<Arc<Logger>> {
    LogConfigBuilder::from_options(options).configure(registry)
}
