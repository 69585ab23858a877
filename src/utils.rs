use chrono::{
    format::{self, Item, Parsed, StrftimeItems},
    DateTime, Local, NaiveDateTime, NaiveTime,
};

use crate::error::{Error, Result};

pub const LOG_FILE_EXTENSION: &str = "log";

fn check_strftime(option: &'static str, format: &str) -> Result<()> {
    if format.is_empty() {
        return Err(Error::invalid_option(option, "format must not be empty"));
    }

    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(Error::invalid_option(
            option,
            format!("'{}' is not a valid strftime format", format),
        ));
    }

    Ok(())
}

/// Formats `now` with `date_format` into a bare file stem, rejecting formats
/// that are invalid or that would escape the log directory.
pub fn render_date_stem(date_format: &str, now: &DateTime<Local>) -> Result<String> {
    check_strftime("date_format", date_format)?;

    let stem = now.format(date_format).to_string();
    if stem.is_empty() || stem == "." || stem == ".." {
        return Err(Error::invalid_option(
            "date_format",
            format!("'{}' renders an unusable file name '{}'", date_format, stem),
        ));
    }

    if stem.contains(['/', '\\']) {
        return Err(Error::invalid_option(
            "date_format",
            format!("'{}' renders a path separator in '{}'", date_format, stem),
        ));
    }

    Ok(stem)
}

pub fn check_datetime_format(datetime_format: &str) -> Result<()> {
    check_strftime("datetime_format", datetime_format)
}

/// Recovers the moment a dated stem stands for, if it was produced by `date_format`.
///
/// Coarse formats such as `%Y-%m` or `%Y` leave the finer fields unset; those
/// default to the first day of the period at midnight.
pub fn parse_date_stem(date_format: &str, stem: &str) -> Option<NaiveDateTime> {
    let mut parsed = Parsed::new();
    format::parse(&mut parsed, stem, StrftimeItems::new(date_format)).ok()?;

    if parsed.to_naive_date().is_err() {
        if parsed.month.is_none() {
            parsed.set_month(1).ok()?;
        }
        if parsed.day.is_none() {
            parsed.set_day(1).ok()?;
        }
    }
    let date = parsed.to_naive_date().ok()?;

    let time = match parsed.hour_mod_12 {
        Some(_) => {
            if parsed.minute.is_none() {
                parsed.set_minute(0).ok()?;
            }
            parsed.to_naive_time().ok()?
        }
        None => NaiveTime::from_hms_opt(0, 0, 0)?,
    };

    Some(date.and_time(time))
}

pub fn log_file_name(stem: &str) -> String {
    format!("{}.{}", stem, LOG_FILE_EXTENSION)
}

#[cfg(test)]
pub(crate) fn local_date(year: i32, month: u32, day: u32) -> Option<DateTime<Local>> {
    use chrono::TimeZone;

    Local
        .with_ymd_and_hms(year, month, day, 12, 0, 0)
        .single()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_default_format() {
        let now = local_date(2023, 10, 1).unwrap();
        assert_eq!(render_date_stem("%Y-%m-%d", &now).unwrap(), "2023-10-01");
    }

    #[test]
    fn test_render_rejects_invalid_formats() {
        let now = local_date(2023, 10, 1).unwrap();

        assert!(render_date_stem("", &now).is_err());
        assert!(render_date_stem("%Q", &now).is_err());
        assert!(render_date_stem("%Y/%m/%d", &now).is_err());
        assert!(render_date_stem(".", &now).is_err());
    }

    #[test]
    fn test_parse_date_stem() {
        let parsed = parse_date_stem("%Y-%m-%d", "2023-11-05").unwrap();
        assert_eq!(parsed.format("%Y-%m-%d").to_string(), "2023-11-05");

        assert!(parse_date_stem("%Y-%m-%d", "file1").is_none());
        assert!(parse_date_stem("%Y-%m-%d", "2023-13-40").is_none());
    }

    #[test]
    fn test_parse_date_stem_with_time_fields() {
        let parsed = parse_date_stem("%Y%m%d-%H%M", "20231105-0730").unwrap();
        assert_eq!(parsed.format("%H").to_string(), "07");

        let parsed = parse_date_stem("%Y-%m-%d_%H", "2023-11-05_19").unwrap();
        assert_eq!(parsed.format("%Y-%m-%d %H:%M").to_string(), "2023-11-05 19:00");
    }

    #[test]
    fn test_parse_coarse_date_stems() {
        let parsed = parse_date_stem("%Y-%m", "2024-03").unwrap();
        assert_eq!(parsed.format("%Y-%m-%d %H:%M").to_string(), "2024-03-01 00:00");

        let parsed = parse_date_stem("%Y", "2024").unwrap();
        assert_eq!(parsed.format("%Y-%m-%d").to_string(), "2024-01-01");

        assert!(parse_date_stem("%Y-%m", "2024-13").is_none());
        assert!(parse_date_stem("%Y-%m", "2024-03-01").is_none());
        assert!(parse_date_stem("%A", "Monday").is_none());
    }
}
