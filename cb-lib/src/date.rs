//! display formatting for the timestamps attached to a resource.
//!
//! the backend hands out ISO-8601 strings. they are rendered as
//! `MM/DD/YYYY HH.MM` in a fixed offset that the caller provides, so the
//! output never depends on the settings of the machine running the client.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Offset, TimeZone, Utc};

/// chrono pattern rendered before the hour / minute separator is swapped
pub const DISPLAY_FORMAT: &str = "%m/%d/%Y %H:%M";

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const OFFSET_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f%#z",
    "%Y-%m-%d %H:%M:%S%.f%#z",
    "%Y-%m-%dT%H:%M%#z",
    "%Y-%m-%d %H:%M%#z",
];

#[derive(Debug, thiserror::Error)]
pub enum DateFormatError {
    #[error("\"{0}\" is not a recognized ISO-8601 timestamp")]
    Invalid(String),

    #[error("\"{0}\" cannot be placed in the configured offset")]
    OutOfRange(String),

    #[error("\"{0}\" is not a valid utc offset")]
    InvalidOffset(String),
}

#[derive(Debug, Clone)]
pub struct DisplayDate {
    offset: FixedOffset,
}

impl Default for DisplayDate {
    fn default() -> Self {
        DisplayDate::utc()
    }
}

impl DisplayDate {
    pub fn utc() -> Self {
        DisplayDate {
            offset: Utc.fix()
        }
    }

    pub fn with_offset(offset: FixedOffset) -> Self {
        DisplayDate { offset }
    }

    pub fn offset(&self) -> &FixedOffset {
        &self.offset
    }

    /// parses an ISO-8601 timestamp, surrounding whitespace is ignored.
    ///
    /// values carrying an offset keep it. values without one, including a
    /// bare date at midnight, are placed in the configured offset.
    pub fn parse(&self, given: &str) -> Result<DateTime<FixedOffset>, DateFormatError> {
        let given = given.trim();

        if let Ok(dt) = DateTime::parse_from_rfc3339(given) {
            return Ok(dt);
        }

        // the offset patterns do not take a zulu suffix
        let zoned = match given.strip_suffix('Z').or_else(|| given.strip_suffix('z')) {
            Some(rest) => format!("{rest}+00:00"),
            None => given.to_owned(),
        };

        for fmt in OFFSET_FORMATS {
            if let Ok(dt) = DateTime::parse_from_str(&zoned, fmt) {
                return Ok(dt);
            }
        }

        for fmt in NAIVE_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(given, fmt) {
                return self.local(given, &naive);
            }
        }

        if let Ok(date) = NaiveDate::parse_from_str(given, "%Y-%m-%d") {
            let Some(naive) = date.and_hms_opt(0, 0, 0) else {
                return Err(DateFormatError::OutOfRange(given.to_owned()));
            };

            return self.local(given, &naive);
        }

        Err(DateFormatError::Invalid(given.to_owned()))
    }

    fn local(&self, given: &str, naive: &NaiveDateTime) -> Result<DateTime<FixedOffset>, DateFormatError> {
        self.offset.from_local_datetime(naive)
            .single()
            .ok_or_else(|| DateFormatError::OutOfRange(given.to_owned()))
    }

    /// renders the given timestamp as `MM/DD/YYYY HH.MM`.
    ///
    /// `None`, empty and blank strings have no value to render and return
    /// `Ok(None)`.
    pub fn format(&self, given: Option<&str>) -> Result<Option<String>, DateFormatError> {
        let Some(value) = given.map(str::trim).filter(|v| !v.is_empty()) else {
            return Ok(None);
        };

        let parsed = self.parse(value)?;
        let rendered = parsed.with_timezone(&self.offset)
            .format(DISPLAY_FORMAT)
            .to_string();

        // only the hour / minute colon, the pattern has no other
        Ok(Some(rendered.replacen(':', ".", 1)))
    }
}

/// parses a utc offset in the form of `Z`, `UTC`, `+HH:MM`, `-HH:MM`,
/// `+HHMM` or `+HH`
pub fn parse_offset(given: &str) -> Result<FixedOffset, DateFormatError> {
    let invalid = || DateFormatError::InvalidOffset(given.to_owned());
    let trimmed = given.trim();

    if trimmed.eq_ignore_ascii_case("z") || trimmed.eq_ignore_ascii_case("utc") {
        return Ok(Utc.fix());
    }

    let (sign, rest) = if let Some(rest) = trimmed.strip_prefix('+') {
        (1, rest)
    } else if let Some(rest) = trimmed.strip_prefix('-') {
        (-1, rest)
    } else {
        return Err(invalid());
    };

    let (hours, minutes) = if let Some((h, m)) = rest.split_once(':') {
        (h, m)
    } else if rest.len() == 4 && rest.is_ascii() {
        rest.split_at(2)
    } else {
        (rest, "00")
    };

    let digits = |v: &str| v.len() == 2 && v.bytes().all(|b| b.is_ascii_digit());

    if !digits(hours) || !digits(minutes) {
        return Err(invalid());
    }

    let hours: i32 = hours.parse().map_err(|_| invalid())?;
    let minutes: i32 = minutes.parse().map_err(|_| invalid())?;

    if hours > 23 || minutes > 59 {
        return Err(invalid());
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
        .ok_or_else(invalid)
}
