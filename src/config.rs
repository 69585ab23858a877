use std::path::PathBuf;

use crate::{
    error::{Error, Result},
    logging::{ConsoleTarget, LevelSetting, Severity},
};

pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";
pub const DEFAULT_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const DEFAULT_BACKUP_COUNT: usize = 14;

/// Everything `configure` needs. Every field has a usable default.
#[derive(Debug, Clone)]
pub struct BuilderOptions {
    pub logger_name: String,
    pub console_level: LevelSetting,
    pub file_level: LevelSetting,
    pub log_directory: PathBuf,
    /// strftime pattern for the file stem, `%Y-%m-%d` gives `2024-05-17.log`.
    pub date_format: String,
    pub backup_count: Option<usize>,
    pub console_target: ConsoleTarget,
    pub datetime_format: String,
    /// `None` colours the console only when it is a terminal.
    pub use_ansi: Option<bool>,
    pub include_location: bool,
}

impl Default for BuilderOptions {
    fn default() -> Self {
        Self {
            logger_name: "app".to_string(),
            console_level: Severity::Info.into(),
            file_level: Severity::Info.into(),
            log_directory: default_log_dir(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            backup_count: Some(DEFAULT_BACKUP_COUNT),
            console_target: ConsoleTarget::Stdout,
            datetime_format: DEFAULT_DATETIME_FORMAT.to_string(),
            use_ansi: None,
            include_location: true,
        }
    }
}

impl BuilderOptions {
    /// Defaults overridden by `DAYLOG_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut options = Self::default();

        if let Some(name) = lookup("DAYLOG_NAME") {
            options.logger_name = name;
        }
        if let Some(level) = lookup("DAYLOG_CONSOLE_LEVEL") {
            options.console_level = level.into();
        }
        if let Some(level) = lookup("DAYLOG_FILE_LEVEL") {
            options.file_level = level.into();
        }
        if let Some(dir) = lookup("DAYLOG_DIR") {
            options.log_directory = PathBuf::from(dir);
        }
        if let Some(format) = lookup("DAYLOG_DATE_FORMAT") {
            options.date_format = format;
        }
        if let Some(count) = lookup("DAYLOG_BACKUP_COUNT") {
            options.backup_count = parse_backup_count(&count)?;
        }

        Ok(options)
    }
}

/// `none`/`unlimited` disable retention, anything else must be a positive count.
pub fn parse_backup_count(value: &str) -> Result<Option<usize>> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("none") || value.eq_ignore_ascii_case("unlimited") {
        return Ok(None);
    }

    match value.parse::<usize>() {
        Ok(count) if count > 0 => Ok(Some(count)),
        _ => Err(Error::invalid_option(
            "backup_count",
            format!("'{}' is not a positive number or 'none'", value),
        )),
    }
}

pub fn home_dir() -> Option<PathBuf> {
    #[cfg(not(target_os = "windows"))]
    let home = std::env::var_os("HOME");
    #[cfg(target_os = "windows")]
    let home = std::env::var_os("USERPROFILE");

    home.filter(|home| !home.is_empty()).map(PathBuf::from)
}

pub fn data_dir() -> Option<PathBuf> {
    let data_dir = std::env::var_os("XDG_DATA_HOME")
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .or_else(|| home_dir().map(|home| home.join(".local").join("share")))?;

    Some(data_dir.join("daylog"))
}

// NOTE: without a home directory there is no sensible per-user location, so
// logs go next to the working directory instead.
pub fn default_log_dir() -> PathBuf {
    data_dir()
        .map(|dir| dir.join("logs"))
        .unwrap_or_else(|| PathBuf::from("logs"))
}
