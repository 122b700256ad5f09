use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::time::calendar::holidayerror::HolidayError;

pub trait RecurringHoliday: Send + Sync + fmt::Debug {

    fn name(&self) -> &str;

    fn get_holiday(&self, year: i32) -> Result<Vec<NaiveDate>, HolidayError>;

    /// Substitute dates falling in `year`, for calendars that observe
    /// holidays on another day.
    fn get_observed(&self, _year: i32) -> Result<Vec<NaiveDate>, HolidayError> {
        Ok(Vec::new())
    }

    fn is_holiday(&self, d: &NaiveDate) -> Result<bool, HolidayError> {
        let holidays = self.get_holiday(d.year())?;
        Ok(holidays.contains(d))
    }
}

/// Inclusive range of years in which a holiday is in force.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct YearRange {
    #[serde(default)]
    since: Option<i32>,
    #[serde(default)]
    until: Option<i32>
}

impl YearRange {
    pub const ALWAYS: YearRange = YearRange { since: None, until: None };

    pub fn new(since: Option<i32>, until: Option<i32>) -> YearRange {
        YearRange { since, until }
    }

    pub fn since(year: i32) -> YearRange {
        YearRange { since: Some(year), until: None }
    }

    pub fn until(year: i32) -> YearRange {
        YearRange { since: None, until: Some(year) }
    }

    pub fn first_year(&self) -> Option<i32> {
        self.since
    }

    pub fn last_year(&self) -> Option<i32> {
        self.until
    }

    #[inline]
    pub fn contains(&self, year: i32) -> bool {
        self.since.is_none_or(|since| year >= since) && self.until.is_none_or(|until| year <= until)
    }
}
