use std::{path::PathBuf, sync::Arc};

use crate::{
    config::BuilderOptions,
    error::{Error, Result},
    utils::{check_datetime_format, log_file_name, parse_date_stem, render_date_stem},
};

use super::{
    clock::{Clock, SystemClock},
    files::LogDirectory,
    formatters::{DefaultFormatter, FormatterConfig},
    level::{LevelSetting, Severity},
    logger::Logger,
    registry::LoggerRegistry,
    sinks::{ConsoleSink, ConsoleTarget, FileSink},
    LogFormatter, LogSink,
};

pub type FormatterFactory = Box<dyn Fn(FormatterConfig) -> Box<dyn LogFormatter> + Send + Sync>;

/// Everything `configure` needs once the options have been validated.
pub(crate) struct Resolved {
    pub name: String,
    pub console_level: Severity,
    pub file_level: Severity,
    pub directory: LogDirectory,
    pub file_path: PathBuf,
}

pub struct LogConfigBuilder {
    options: BuilderOptions,
    formatter_builder: FormatterFactory,
    clock: Arc<dyn Clock>,
}

impl LogConfigBuilder {
    pub fn new(logger_name: impl Into<String>) -> Self {
        Self::from_options(BuilderOptions {
            logger_name: logger_name.into(),
            ..BuilderOptions::default()
        })
    }

    pub fn from_options(options: BuilderOptions) -> Self {
        Self {
            options,
            formatter_builder: Box::new(|config| Box::new(DefaultFormatter::new(config))),
            clock: Arc::new(SystemClock),
        }
    }

    pub fn options(&self) -> &BuilderOptions {
        &self.options
    }

    pub fn with_console_level(mut self, level: impl Into<LevelSetting>) -> Self {
        self.options.console_level = level.into();
        self
    }

    pub fn with_file_level(mut self, level: impl Into<LevelSetting>) -> Self {
        self.options.file_level = level.into();
        self
    }

    pub fn with_log_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.options.log_directory = directory.into();
        self
    }

    pub fn with_date_format(mut self, date_format: impl Into<String>) -> Self {
        self.options.date_format = date_format.into();
        self
    }

    /// `None` keeps every dated file.
    pub fn with_backup_count(mut self, backup_count: Option<usize>) -> Self {
        self.options.backup_count = backup_count;
        self
    }

    pub fn with_console_target(mut self, target: ConsoleTarget) -> Self {
        self.options.console_target = target;
        self
    }

    pub fn with_datetime_format(mut self, datetime_format: impl Into<String>) -> Self {
        self.options.datetime_format = datetime_format.into();
        self
    }

    pub fn with_ansi(mut self, use_ansi: bool) -> Self {
        self.options.use_ansi = Some(use_ansi);
        self
    }

    pub fn with_location(mut self, include_location: bool) -> Self {
        self.options.include_location = include_location;
        self
    }

    pub fn with_formatter<F>(self, formatter_builder: F) -> Self
    where
        F: Fn(FormatterConfig) -> Box<dyn LogFormatter> + Send + Sync + 'static,
    {
        Self {
            formatter_builder: Box::new(formatter_builder),
            ..self
        }
    }

    pub fn with_clock(self, clock: impl Clock + 'static) -> Self {
        Self {
            clock: Arc::new(clock),
            ..self
        }
    }

    /// Validates every option without touching the filesystem.
    pub(crate) fn resolve(&self) -> Result<Resolved> {
        let name = self.options.logger_name.trim();
        if name.is_empty() {
            return Err(Error::invalid_option("logger_name", "must not be empty"));
        }

        let console_level = self.options.console_level.resolve()?;
        let file_level = self.options.file_level.resolve()?;

        check_datetime_format(&self.options.datetime_format)?;

        if self.options.backup_count == Some(0) {
            return Err(Error::invalid_option(
                "backup_count",
                "must be at least 1, use no limit to keep every file",
            ));
        }

        let stem = render_date_stem(&self.options.date_format, &self.clock.now())?;
        if self.options.backup_count.is_some()
            && parse_date_stem(&self.options.date_format, &stem).is_none()
        {
            return Err(Error::invalid_option(
                "date_format",
                format!(
                    "'{}' cannot be read back from '{}', so old files could not be pruned",
                    self.options.date_format, stem
                ),
            ));
        }

        let directory = LogDirectory::new(&self.options.log_directory);
        let file_path = directory.join(log_file_name(&stem));

        Ok(Resolved {
            name: name.to_string(),
            console_level,
            file_level,
            directory,
            file_path,
        })
    }

    /// The dated file the logger would write to if configured right now.
    pub fn file_path(&self) -> Result<PathBuf> {
        self.resolve().map(|resolved| resolved.file_path)
    }

    fn formatter(&self, use_ansi: bool) -> Box<dyn LogFormatter> {
        (self.formatter_builder)(FormatterConfig {
            datetime_format: self.options.datetime_format.clone(),
            use_ansi,
            include_location: self.options.include_location,
        })
    }

    /// Creates the directory, opens today's file, applies retention and builds
    /// both sinks. Nothing is attached to any logger here.
    pub(crate) fn build_sinks(&self, resolved: &Resolved) -> Result<Vec<Box<dyn LogSink>>> {
        resolved.directory.ensure_exists()?;

        let file_sink = FileSink::open(
            &resolved.file_path,
            resolved.file_level,
            self.formatter(false),
        )?;

        if let Some(keep) = self.options.backup_count {
            resolved
                .directory
                .prune(&self.options.date_format, keep, &resolved.file_path)?;
        }

        let target = self.options.console_target.clone();
        let use_ansi = self
            .options
            .use_ansi
            .unwrap_or_else(|| target.is_terminal());
        let console_sink = ConsoleSink::new(target, resolved.console_level, self.formatter(use_ansi));

        let sinks: Vec<Box<dyn LogSink>> = vec![Box::new(console_sink), Box::new(file_sink)];
        Ok(sinks)
    }

    pub(crate) fn clock(&self) -> Arc<dyn Clock> {
        self.clock.clone()
    }

    pub fn configure(&self, registry: &LoggerRegistry) -> Result<Arc<Logger>> {
        registry.configure(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::{FixedClock, MemoryBuffer, Record};
    use crate::utils::local_date;

    fn builder(dir: &std::path::Path) -> LogConfigBuilder {
        LogConfigBuilder::new("app")
            .with_log_directory(dir)
            .with_console_target(ConsoleTarget::Memory(MemoryBuffer::new()))
            .with_clock(FixedClock::new(local_date(2023, 10, 1).unwrap()))
    }

    #[test]
    fn test_file_path_uses_date_format() {
        let root = tempfile::tempdir().unwrap();

        let path = builder(root.path()).file_path().unwrap();
        assert_eq!(path, root.path().join("2023-10-01.log"));

        let path = builder(root.path())
            .with_date_format("%d.%m.%Y")
            .file_path()
            .unwrap();
        assert_eq!(path, root.path().join("01.10.2023.log"));
    }

    #[test]
    fn test_resolve_rejects_bad_options_before_io() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("never");

        let cases = [
            builder(&dir).with_file_level("LOUD"),
            builder(&dir).with_console_level("chatty"),
            builder(&dir).with_date_format("%Y/%m/%d"),
            builder(&dir).with_datetime_format(""),
            builder(&dir).with_backup_count(Some(0)),
            builder(&dir).with_date_format("%A"),
            LogConfigBuilder::new("  ").with_log_directory(&dir),
        ];

        for case in cases {
            let err = case.resolve().err().unwrap();
            assert!(err.is_config(), "{}", err);
        }
        assert!(!dir.exists());
    }

    #[test]
    fn test_unsortable_date_format_allowed_without_retention() {
        let root = tempfile::tempdir().unwrap();
        let path = builder(root.path())
            .with_date_format("%A")
            .with_backup_count(None)
            .file_path()
            .unwrap();
        assert_eq!(path, root.path().join("Sunday.log"));
    }

    #[test]
    fn test_monthly_files_are_pruned() {
        let root = tempfile::tempdir().unwrap();
        for month in 1..=4 {
            std::fs::write(root.path().join(format!("2023-{:02}.log", month)), "old\n").unwrap();
        }

        let registry = LoggerRegistry::new();
        builder(root.path())
            .with_date_format("%Y-%m")
            .with_backup_count(Some(2))
            .configure(&registry)
            .unwrap();

        let mut names: Vec<String> = std::fs::read_dir(root.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(names, ["2023-04.log", "2023-10.log"]);
    }

    #[test]
    fn test_build_sinks_orders_console_then_file() {
        let root = tempfile::tempdir().unwrap();
        let builder = builder(root.path())
            .with_console_level(Severity::Warning)
            .with_file_level("debug");

        let resolved = builder.resolve().unwrap();
        let sinks = builder.build_sinks(&resolved).unwrap();

        assert_eq!(sinks.len(), 2);
        assert_eq!(sinks[0].config().minimum_level, Severity::Warning);
        assert_eq!(sinks[1].config().minimum_level, Severity::Debug);
        assert!(root.path().join("2023-10-01.log").is_file());
    }

    #[test]
    fn test_custom_formatter_is_used_for_both_sinks() {
        struct Bare;

        impl LogFormatter for Bare {
            fn format(&self, record: &Record) -> String {
                format!("{}|{}", record.level, record.args)
            }
        }

        let root = tempfile::tempdir().unwrap();
        let buffer = MemoryBuffer::new();
        let registry = LoggerRegistry::new();
        let logger = builder(root.path())
            .with_console_target(ConsoleTarget::Memory(buffer.clone()))
            .with_formatter(|_| -> Box<dyn LogFormatter> { Box::new(Bare) })
            .configure(&registry)
            .unwrap();

        logger.info(format_args!("plain"));

        assert_eq!(buffer.lines(), ["INFO|plain"]);
        let contents = std::fs::read_to_string(root.path().join("2023-10-01.log")).unwrap();
        assert_eq!(contents, "INFO|plain\n");
    }
}
