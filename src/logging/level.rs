use std::{fmt, str::FromStr};

use crate::error::Error;

/// Ordered severity of a record, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl Severity {
    pub const ALL: [Severity; 5] = [
        Severity::Debug,
        Severity::Info,
        Severity::Warning,
        Severity::Error,
        Severity::Critical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
            Severity::Critical => "CRITICAL",
        }
    }

    /// Conventional numeric value (10 for DEBUG up to 50 for CRITICAL).
    pub fn as_number(&self) -> u8 {
        match self {
            Severity::Debug => 10,
            Severity::Info => 20,
            Severity::Warning => 30,
            Severity::Error => 40,
            Severity::Critical => 50,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let level = match trimmed.to_ascii_uppercase().as_str() {
            "DEBUG" | "10" => Severity::Debug,
            "INFO" | "20" => Severity::Info,
            "WARNING" | "WARN" | "30" => Severity::Warning,
            "ERROR" | "40" => Severity::Error,
            "CRITICAL" | "FATAL" | "50" => Severity::Critical,
            _ => return Err(Error::InvalidLevel(trimmed.to_string())),
        };

        Ok(level)
    }
}

impl From<log::Level> for Severity {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => Severity::Error,
            log::Level::Warn => Severity::Warning,
            log::Level::Info => Severity::Info,
            log::Level::Debug | log::Level::Trace => Severity::Debug,
        }
    }
}

/// A level as handed to the builder: either already typed or a raw name that
/// is only validated when the logger is configured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LevelSetting {
    Parsed(Severity),
    Raw(String),
}

impl LevelSetting {
    pub fn resolve(&self) -> Result<Severity, Error> {
        match self {
            LevelSetting::Parsed(level) => Ok(*level),
            LevelSetting::Raw(raw) => raw.parse(),
        }
    }
}

impl From<Severity> for LevelSetting {
    fn from(level: Severity) -> Self {
        LevelSetting::Parsed(level)
    }
}

impl From<&str> for LevelSetting {
    fn from(raw: &str) -> Self {
        LevelSetting::Raw(raw.to_string())
    }
}

impl From<String> for LevelSetting {
    fn from(raw: String) -> Self {
        LevelSetting::Raw(raw)
    }
}
