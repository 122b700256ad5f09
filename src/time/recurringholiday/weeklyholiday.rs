use chrono::{
    Datelike,
    NaiveDate,
    Weekday
};

use crate::time::calendar::holidayerror::HolidayError;
use crate::time::utility::{
    SEVEN_DAYS,
    weekday_on_or_after,
    ymd
};
use super::recurringholiday::{RecurringHoliday, YearRange};

/// Every occurrence of a weekday in the year.
#[derive(Clone, Debug)]
pub struct WeeklyHoliday {
    name: String,
    weekday: Weekday,
    years: YearRange
}

impl WeeklyHoliday {
    pub fn new(name: &str, weekday: Weekday) -> WeeklyHoliday {
        WeeklyHoliday {
            name: name.to_owned(),
            weekday,
            years: YearRange::ALWAYS
        }
    }

    pub fn with_years(mut self, years: YearRange) -> WeeklyHoliday {
        self.years = years;
        self
    }

    pub fn weekday(&self) -> Weekday {
        self.weekday
    }
}

impl RecurringHoliday for WeeklyHoliday {
    fn name(&self) -> &str {
        &self.name
    }

    fn get_holiday(&self, year: i32) -> Result<Vec<NaiveDate>, HolidayError> {
        if !self.years.contains(year) {
            return Ok(Vec::new());
        }

        let mut holidays = Vec::with_capacity(53);
        let mut current = weekday_on_or_after(ymd(year, 1, 1)?, self.weekday);
        while let Some(d) = current.filter(|d| d.year() == year) {
            holidays.push(d);
            current = d.checked_add_days(SEVEN_DAYS);
        }
        Ok(holidays)
    }

    fn is_holiday(&self, d: &NaiveDate) -> Result<bool, HolidayError> {
        Ok(self.years.contains(d.year()) && d.weekday() == self.weekday)
    }
}
