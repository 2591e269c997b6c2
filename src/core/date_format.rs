use std::fmt::Write as _;

use chrono::format::{Item, StrftimeItems};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{GanttError, GanttResult};

pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Configured chrono pattern used for every string form of a bar time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DateFormat(String);

impl Default for DateFormat {
    fn default() -> Self {
        Self(DEFAULT_DATE_FORMAT.to_owned())
    }
}

impl DateFormat {
    #[must_use]
    pub fn new(pattern: impl Into<String>) -> Self {
        Self(pattern.into())
    }

    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.0
    }

    /// Formats `time`; an unusable pattern falls back to chrono's default form.
    #[must_use]
    pub fn format(&self, time: NaiveDateTime) -> String {
        let mut out = String::new();
        if !self.has_valid_items() || write!(out, "{}", time.format(&self.0)).is_err() {
            return time.to_string();
        }
        out
    }

    /// Parses a full timestamp, falling back to a date-only reading at
    /// midnight for patterns without a time component.
    pub fn parse(&self, input: &str) -> GanttResult<NaiveDateTime> {
        if let Ok(time) = NaiveDateTime::parse_from_str(input, &self.0) {
            return Ok(time);
        }
        NaiveDate::parse_from_str(input, &self.0)
            .map(|date| date.and_time(NaiveTime::MIN))
            .map_err(|_| GanttError::DateParse {
                input: input.to_owned(),
                format: self.0.clone(),
            })
    }

    /// Truncates `time` to the resolution the pattern can express.
    ///
    /// Times that do not survive a format/parse round trip are returned as is.
    #[must_use]
    pub fn normalize(&self, time: NaiveDateTime) -> NaiveDateTime {
        self.parse(&self.format(time)).unwrap_or(time)
    }

    /// Checks that the pattern can express a round trip of a known instant.
    #[must_use]
    pub fn is_usable(&self) -> bool {
        if !self.has_valid_items() {
            return false;
        }
        let sample = NaiveDate::from_ymd_opt(2000, 1, 2)
            .and_then(|date| date.and_hms_opt(3, 4, 5))
            .unwrap_or_default();
        self.parse(&self.format(sample)).is_ok()
    }

    fn has_valid_items(&self) -> bool {
        !StrftimeItems::new(&self.0).any(|item| matches!(item, Item::Error))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Timelike;

    use super::*;

    #[test]
    fn default_pattern_truncates_to_minutes() {
        let format = DateFormat::default();
        let time = NaiveDate::from_ymd_opt(2024, 6, 1)
            .and_then(|d| d.and_hms_opt(9, 30, 42))
            .expect("time");
        let normalized = format.normalize(time);
        assert_eq!(format.format(normalized), "2024-06-01 09:30");
        assert_eq!(normalized.second(), 0);
    }

    #[test]
    fn date_only_pattern_parses_to_midnight() {
        let format = DateFormat::new("%Y-%m-%d");
        let parsed = format.parse("2024-06-01").expect("parse");
        assert_eq!(parsed.time(), NaiveTime::MIN);
        assert!(format.is_usable());
    }

    #[test]
    fn invalid_pattern_is_not_usable() {
        assert!(!DateFormat::new("%Y-%Q").is_usable());
    }

    #[test]
    fn garbage_input_is_a_parse_error() {
        let err = DateFormat::default()
            .parse("not a date")
            .expect_err("must fail");
        assert!(matches!(err, GanttError::DateParse { .. }));
    }
}
