mod builder;
mod clock;
mod files;
mod formatters;
mod level;
mod logger;
mod registry;
mod sinks;

use std::fmt;

use chrono::{DateTime, Local};

pub use builder::{FormatterFactory, LogConfigBuilder};
pub use clock::{Clock, FixedClock, SystemClock};
pub use files::LogDirectory;
pub use formatters::{DefaultFormatter, FormatterConfig};
pub use level::{LevelSetting, Severity};
pub use logger::{install, Logger};
pub use registry::LoggerRegistry;
pub use sinks::{ConsoleSink, ConsoleTarget, Destination, FileSink, MemoryBuffer, SinkConfig};

/// A single log event as handed to the sinks.
#[derive(Clone, Copy, Debug)]
pub struct Record<'a> {
    pub level: Severity,
    pub timestamp: DateTime<Local>,
    pub logger: &'a str,
    pub args: fmt::Arguments<'a>,
    pub file: Option<&'a str>,
    pub line: Option<u32>,
    pub module_path: Option<&'a str>,
}

pub trait LogFormatter: Sync + Send {
    fn format(&self, record: &Record) -> String;
}

pub trait LogSink: Sync + Send {
    fn config(&self) -> &SinkConfig;
    fn write_log(&self, record: &Record) -> crate::Result<()>;
    fn flush(&self);

    fn accepts(&self, level: Severity) -> bool {
        level >= self.config().minimum_level
    }
}
