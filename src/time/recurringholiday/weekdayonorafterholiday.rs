use chrono::{
    NaiveDate,
    Weekday
};

use crate::time::calendar::holidayerror::HolidayError;
use crate::time::utility::weekday_on_or_after;
use super::recurringholiday::{RecurringHoliday, YearRange};

/// The first given weekday on or after a fixed month and day, e.g. the
/// Friday between June 19th and June 25th.
#[derive(Clone, Debug)]
pub struct WeekdayOnOrAfterHoliday {
    name: String,
    month: u32,
    day: u32,
    weekday: Weekday,
    years: YearRange
}

impl WeekdayOnOrAfterHoliday {
    pub fn new(name: &str, month: u32, day: u32, weekday: Weekday) -> WeekdayOnOrAfterHoliday {
        WeekdayOnOrAfterHoliday {
            name: name.to_owned(),
            month,
            day,
            weekday,
            years: YearRange::ALWAYS
        }
    }

    /// `None` when no year has such a month and day.
    pub fn checked(name: &str, month: u32, day: u32, weekday: Weekday) -> Option<WeekdayOnOrAfterHoliday> {
        NaiveDate::from_ymd_opt(2000, month, day).map(|_| WeekdayOnOrAfterHoliday::new(name, month, day, weekday))
    }

    pub fn with_years(mut self, years: YearRange) -> WeekdayOnOrAfterHoliday {
        self.years = years;
        self
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn weekday(&self) -> Weekday {
        self.weekday
    }
}

impl RecurringHoliday for WeekdayOnOrAfterHoliday {
    fn name(&self) -> &str {
        &self.name
    }

    fn get_holiday(&self, year: i32) -> Result<Vec<NaiveDate>, HolidayError> {
        if !self.years.contains(year) {
            return Ok(Vec::new());
        }

        Ok(NaiveDate::from_ymd_opt(year, self.month, self.day)
            .and_then(|anchor| weekday_on_or_after(anchor, self.weekday))
            .into_iter()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Datelike;

    use super::*;

    #[test]
    fn midsummer_eve_is_a_friday_in_range() {
        let midsummer_eve = WeekdayOnOrAfterHoliday::new("Midsommarafton", 6, 19, Weekday::Fri);
        for year in 1900..2100 {
            let dates = midsummer_eve.get_holiday(year).unwrap();
            assert_eq!(dates.len(), 1);
            assert_eq!(dates[0].weekday(), Weekday::Fri);
            assert_eq!(dates[0].month(), 6);
            assert!((19..=25).contains(&dates[0].day()), "{}", dates[0]);
        }
    }

    #[test]
    fn all_saints_may_fall_in_november() {
        let all_saints = WeekdayOnOrAfterHoliday::new("Alla helgons dag", 10, 31, Weekday::Sat);
        assert_eq!(all_saints.get_holiday(2018).unwrap(), vec![NaiveDate::from_ymd_opt(2018, 11, 3).unwrap()]);
        assert_eq!(all_saints.get_holiday(2020).unwrap(), vec![NaiveDate::from_ymd_opt(2020, 10, 31).unwrap()]);
    }

    #[test]
    fn gated() {
        let midsummer_day = WeekdayOnOrAfterHoliday::new("Midsommardagen", 6, 20, Weekday::Sat)
            .with_years(YearRange::since(1953));
        assert!(midsummer_day.get_holiday(1952).unwrap().is_empty());
        assert!(WeekdayOnOrAfterHoliday::checked("x", 4, 31, Weekday::Mon).is_none());
    }
}
