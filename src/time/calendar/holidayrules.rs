use std::fmt;

use chrono::NaiveDate;

use super::holidayerror::HolidayError;
use super::holidaymap::HolidayMap;

/// A country's holiday rules: a pure function of the year.
pub trait HolidayRules: Send + Sync + fmt::Debug {

    fn country(&self) -> &str;

    fn include_sundays(&self) -> bool {
        false
    }

    /// Every (date, name) pair of `year` in insertion order. Observed
    /// substitutes are only produced when `observed` is set.
    fn holidays(&self, year: i32, observed: bool) -> Result<Vec<(NaiveDate, String)>, HolidayError>;

    /// Merges the holidays of `year` into `map`. Nothing is inserted when the
    /// computation fails.
    fn populate(&self, year: i32, map: &mut HolidayMap) -> Result<(), HolidayError> {
        let holidays = self.holidays(year, map.observed())?;
        for (d, name) in holidays.iter() {
            map.insert(*d, name);
        }
        Ok(())
    }
}
