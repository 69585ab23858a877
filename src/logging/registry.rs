use std::{
    collections::HashMap,
    sync::{Arc, Mutex, PoisonError},
};

use crate::error::Result;

use super::{builder::LogConfigBuilder, logger::Logger};

/// Named loggers of one process (or one test).
///
/// Configuring a name that already exists replaces its sinks, so handles
/// obtained earlier keep working and never see a record twice.
#[derive(Default)]
pub struct LoggerRegistry {
    loggers: Mutex<HashMap<String, Arc<Logger>>>,
}

impl LoggerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<Arc<Logger>> {
        let loggers = self.loggers.lock().unwrap_or_else(PoisonError::into_inner);
        loggers.get(name).cloned()
    }

    /// Returns the named logger, creating an unconfigured one if needed.
    pub fn get_or_create(&self, name: &str) -> Arc<Logger> {
        let mut loggers = self.loggers.lock().unwrap_or_else(PoisonError::into_inner);
        loggers
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(Logger::new(name)))
            .clone()
    }

    pub fn names(&self) -> Vec<String> {
        let loggers = self.loggers.lock().unwrap_or_else(PoisonError::into_inner);
        let mut names: Vec<String> = loggers.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn remove(&self, name: &str) -> Option<Arc<Logger>> {
        let mut loggers = self.loggers.lock().unwrap_or_else(PoisonError::into_inner);
        loggers.remove(name)
    }

    /// Builds both sinks and attaches them to the named logger. The registry
    /// stays locked for the whole call, so concurrent configuration of one
    /// name is serialised. On error the logger is left exactly as it was.
    pub fn configure(&self, builder: &LogConfigBuilder) -> Result<Arc<Logger>> {
        let resolved = builder.resolve()?;

        let logger = {
            let mut loggers = self.loggers.lock().unwrap_or_else(PoisonError::into_inner);
            let sinks = builder.build_sinks(&resolved)?;

            let logger = loggers
                .entry(resolved.name.clone())
                .or_insert_with(|| Arc::new(Logger::new(resolved.name.as_str())))
                .clone();
            logger.replace_sinks(sinks, builder.clock());
            logger
        };

        log::debug!(
            target: "daylog",
            "configured logger '{}' console={} file={} path={}",
            resolved.name,
            resolved.console_level,
            resolved.file_level,
            resolved.file_path.display(),
        );

        Ok(logger)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::{ConsoleTarget, FixedClock, MemoryBuffer, Severity};
    use crate::utils::local_date;

    fn builder(dir: &std::path::Path, buffer: &MemoryBuffer) -> LogConfigBuilder {
        LogConfigBuilder::new("app")
            .with_log_directory(dir)
            .with_console_target(ConsoleTarget::Memory(buffer.clone()))
            .with_clock(FixedClock::new(local_date(2023, 10, 1).unwrap()))
    }

    #[test]
    fn test_configure_registers_logger() {
        let root = tempfile::tempdir().unwrap();
        let registry = LoggerRegistry::new();

        let logger = builder(root.path(), &MemoryBuffer::new())
            .configure(&registry)
            .unwrap();

        assert_eq!(registry.names(), ["app"]);
        assert!(Arc::ptr_eq(&logger, &registry.get("app").unwrap()));
        assert_eq!(
            logger.file_path().unwrap(),
            root.path().join("2023-10-01.log")
        );
    }

    #[test]
    fn test_reconfigure_replaces_sinks() {
        let root = tempfile::tempdir().unwrap();
        let buffer = MemoryBuffer::new();
        let registry = LoggerRegistry::new();

        let first = builder(root.path(), &buffer).configure(&registry).unwrap();
        let second = builder(root.path(), &buffer).configure(&registry).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.sink_configs().len(), 2);

        first.info(format_args!("only once"));

        assert_eq!(buffer.lines().len(), 1);
        let contents = std::fs::read_to_string(root.path().join("2023-10-01.log")).unwrap();
        assert_eq!(contents.lines().count(), 1);
    }

    #[test]
    fn test_failed_reconfigure_keeps_previous_sinks() {
        let root = tempfile::tempdir().unwrap();
        let buffer = MemoryBuffer::new();
        let registry = LoggerRegistry::new();

        let logger = builder(root.path(), &buffer)
            .with_console_level(Severity::Debug)
            .configure(&registry)
            .unwrap();

        let err = builder(root.path(), &MemoryBuffer::new())
            .with_file_level("NOPE")
            .configure(&registry)
            .unwrap_err();
        assert!(err.is_config());

        logger.debug(format_args!("still here"));
        assert_eq!(buffer.lines().len(), 1);
    }

    #[test]
    fn test_failed_first_configure_registers_nothing() {
        let root = tempfile::tempdir().unwrap();
        let blocker = root.path().join("blocker");
        std::fs::write(&blocker, "not a directory").unwrap();

        let registry = LoggerRegistry::new();
        let err = builder(&blocker.join("logs"), &MemoryBuffer::new())
            .configure(&registry)
            .unwrap_err();

        assert!(!err.is_config());
        assert!(registry.get("app").is_none());
    }

    #[test]
    fn test_concurrent_configure_attaches_one_sink_set() {
        let root = tempfile::tempdir().unwrap();
        let buffer = MemoryBuffer::new();
        let registry = LoggerRegistry::new();

        std::thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    builder(root.path(), &buffer)
                        .with_file_level(Severity::Debug)
                        .configure(&registry)
                        .unwrap();
                });
            }
        });

        let logger = registry.get("app").unwrap();
        assert_eq!(registry.names(), ["app"]);
        assert_eq!(logger.sink_configs().len(), 2);

        logger.info(format_args!("exactly once"));

        assert_eq!(buffer.lines().len(), 1);
        let contents = std::fs::read_to_string(root.path().join("2023-10-01.log")).unwrap();
        assert_eq!(contents.lines().count(), 1);
    }

    #[test]
    fn test_get_or_create_and_remove() {
        let registry = LoggerRegistry::new();
        let logger = registry.get_or_create("worker");
        assert!(Arc::ptr_eq(&logger, &registry.get_or_create("worker")));
        assert!(registry.remove("worker").is_some());
        assert!(registry.get("worker").is_none());
    }
}
