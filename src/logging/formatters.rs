use yansi::Paint;

use super::{level::Severity, LogFormatter, Record};

#[derive(Debug, Clone)]
pub struct FormatterConfig {
    pub datetime_format: String,
    pub use_ansi: bool,
    pub include_location: bool,
}

impl FormatterConfig {
    pub fn new() -> Self {
        Self {
            datetime_format: "%Y-%m-%d %H:%M:%S".to_string(),
            use_ansi: false,
            include_location: true,
        }
    }
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Renders `<timestamp> <LEVEL> <logger> [<file>:<line> [<module>]] - <message>`.
pub struct DefaultFormatter {
    config: FormatterConfig,
}

impl DefaultFormatter {
    pub fn new(config: FormatterConfig) -> Self {
        Self { config }
    }

    fn timestamp(&self, record: &Record) -> String {
        let time = record
            .timestamp
            .format(&self.config.datetime_format)
            .to_string();

        if self.config.use_ansi {
            time.bright_black().to_string()
        } else {
            time
        }
    }

    fn format_level(&self, level: Severity) -> String {
        let name = level.as_str();
        if !self.config.use_ansi {
            return name.to_string();
        }

        match level {
            Severity::Critical => name.white().on_red().bold().to_string(),
            Severity::Error => name.red().to_string(),
            Severity::Warning => name.yellow().to_string(),
            Severity::Info => name.green().to_string(),
            Severity::Debug => name.blue().to_string(),
        }
    }

    fn location(&self, record: &Record) -> Option<String> {
        if !self.config.include_location {
            return None;
        }

        let file = match (record.file, record.line) {
            (Some(file), Some(line)) => format!("{}:{}", file, line),
            (Some(file), None) => file.to_string(),
            _ => return None,
        };

        match record.module_path {
            Some(module) => Some(format!("{} {}", file, module)),
            None => Some(file),
        }
    }
}

impl LogFormatter for DefaultFormatter {
    fn format(&self, record: &Record) -> String {
        let head = format!(
            "{} {} {}",
            self.timestamp(record),
            self.format_level(record.level),
            record.logger,
        );

        match self.location(record) {
            Some(location) => format!("{} {} - {}", head, location, record.args),
            None => format!("{} - {}", head, record.args),
        }
    }
}
