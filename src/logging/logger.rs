use std::{
    fmt,
    path::PathBuf,
    sync::{Arc, PoisonError, RwLock},
};

use log::{LevelFilter, Log};

use crate::error::{Error, Result};

use super::{
    clock::{Clock, SystemClock},
    level::Severity,
    sinks::{Destination, SinkConfig},
    LogSink, Record,
};

struct Attached {
    sinks: Vec<Box<dyn LogSink>>,
    clock: Arc<dyn Clock>,
}

/// A named channel that fans records out to its attached sinks.
pub struct Logger {
    name: String,
    attached: RwLock<Attached>,
}

impl Logger {
    /// A logger with no sinks; every record is dropped until it is configured.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attached: RwLock::new(Attached {
                sinks: Vec::new(),
                clock: Arc::new(SystemClock),
            }),
        }
    }

    /// A logger with a fixed set of sinks, for setups that bypass the dated
    /// file (e.g. a stderr-only diagnostics channel).
    pub fn with_sinks(name: impl Into<String>, sinks: Vec<Box<dyn LogSink>>) -> Self {
        let logger = Self::new(name);
        logger.replace_sinks(sinks, Arc::new(SystemClock));
        logger
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Swaps the whole sink set in one step. Previous sinks are flushed and dropped.
    pub(crate) fn replace_sinks(&self, sinks: Vec<Box<dyn LogSink>>, clock: Arc<dyn Clock>) {
        let previous = {
            let mut attached = self.attached.write().unwrap_or_else(PoisonError::into_inner);
            std::mem::replace(&mut *attached, Attached { sinks, clock })
        };

        for sink in previous.sinks {
            sink.flush();
        }
    }

    pub fn is_enabled(&self, level: Severity) -> bool {
        let attached = self.attached.read().unwrap_or_else(PoisonError::into_inner);
        attached.sinks.iter().any(|sink| sink.accepts(level))
    }

    pub fn log(&self, level: Severity, args: fmt::Arguments) {
        self.log_at(level, args, None, None, None)
    }

    pub fn log_at(
        &self,
        level: Severity,
        args: fmt::Arguments,
        file: Option<&str>,
        line: Option<u32>,
        module_path: Option<&str>,
    ) {
        self.log_as(&self.name, level, args, file, line, module_path)
    }

    /// Like `log_at`, but the line carries `name` instead of the logger's own
    /// name. Used for facade records, which are labelled by their target.
    fn log_as(
        &self,
        name: &str,
        level: Severity,
        args: fmt::Arguments,
        file: Option<&str>,
        line: Option<u32>,
        module_path: Option<&str>,
    ) {
        let attached = self.attached.read().unwrap_or_else(PoisonError::into_inner);
        if !attached.sinks.iter().any(|sink| sink.accepts(level)) {
            return;
        }

        let record = Record {
            level,
            timestamp: attached.clock.now(),
            logger: name,
            args,
            file,
            line,
            module_path,
        };

        for sink in attached.sinks.iter().filter(|sink| sink.accepts(level)) {
            if let Err(err) = sink.write_log(&record) {
                eprintln!("daylog: logger '{}' failed writing record: {}", self.name, err);
            }
        }
    }

    pub fn debug(&self, args: fmt::Arguments) {
        self.log(Severity::Debug, args)
    }

    pub fn info(&self, args: fmt::Arguments) {
        self.log(Severity::Info, args)
    }

    pub fn warning(&self, args: fmt::Arguments) {
        self.log(Severity::Warning, args)
    }

    pub fn error(&self, args: fmt::Arguments) {
        self.log(Severity::Error, args)
    }

    pub fn critical(&self, args: fmt::Arguments) {
        self.log(Severity::Critical, args)
    }

    pub fn flush(&self) {
        let attached = self.attached.read().unwrap_or_else(PoisonError::into_inner);
        for sink in attached.sinks.iter() {
            sink.flush();
        }
    }

    pub fn sink_configs(&self) -> Vec<SinkConfig> {
        let attached = self.attached.read().unwrap_or_else(PoisonError::into_inner);
        attached.sinks.iter().map(|sink| sink.config().clone()).collect()
    }

    /// Path of the attached dated file, if the logger has been configured.
    pub fn file_path(&self) -> Option<PathBuf> {
        self.sink_configs()
            .into_iter()
            .find_map(|config| match config.destination {
                Destination::File(path) => Some(path),
                Destination::Console(_) => None,
            })
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("sinks", &self.sink_configs())
            .finish()
    }
}

/// Target of the crate's own diagnostics.
const DIAGNOSTICS_TARGET: &str = "daylog";

struct LogBridge {
    logger: Arc<Logger>,
}

impl LogBridge {
    // daylog's own records only reach a logger that is itself named "daylog".
    fn accepts_target(&self, target: &str) -> bool {
        let own = target == DIAGNOSTICS_TARGET
            || target
                .strip_prefix(DIAGNOSTICS_TARGET)
                .is_some_and(|rest| rest.starts_with("::"));

        !own || self.logger.name() == DIAGNOSTICS_TARGET
    }
}

impl Log for LogBridge {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        self.accepts_target(metadata.target()) && self.logger.is_enabled(metadata.level().into())
    }

    fn log(&self, record: &log::Record) {
        if !self.accepts_target(record.target()) {
            return;
        }

        self.logger.log_as(
            record.target(),
            record.level().into(),
            *record.args(),
            record.file(),
            record.line(),
            record.module_path(),
        );
    }

    fn flush(&self) {
        self.logger.flush()
    }
}

/// Routes the `log` facade (`log::info!` and friends) into `logger` for the
/// rest of the process. Lines are labelled with the record's target. Sink
/// levels are checked per record, so later reconfiguration through the
/// registry is picked up.
pub fn install(logger: Arc<Logger>) -> Result<()> {
    log::set_boxed_logger(Box::new(LogBridge { logger })).map_err(|_| Error::AlreadyInstalled)?;
    log::set_max_level(LevelFilter::Trace);

    Ok(())
}
