use chrono::{NaiveDate, Weekday};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum HolidayError {
    #[error("cannot parse date from string '{input}'")]
    Parse { input: String },

    #[error("cannot convert type '{0}' to date")]
    UnsupportedKeyType(String),

    #[error("country {0} not available")]
    UnknownCountry(String),

    /// A computed moving holiday landed on the wrong weekday. This is a rule
    /// bug, never a caller mistake.
    #[error("{holiday} computed as {date} ({actual}) but must fall on {expected}")]
    InternalConsistency {
        holiday: String,
        date: NaiveDate,
        expected: Weekday,
        actual: Weekday
    },

    #[error("year {0} is outside the supported calendar range")]
    YearOutOfRange(i32)
}

impl HolidayError {
    pub fn parse(input: &str) -> HolidayError {
        HolidayError::Parse { input: input.to_owned() }
    }
}
