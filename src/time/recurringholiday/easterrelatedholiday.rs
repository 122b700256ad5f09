use chrono::{
    Datelike,
    NaiveDate,
    TimeDelta,
    Weekday
};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::time::calendar::holidayerror::HolidayError;
use super::recurringholiday::{RecurringHoliday, YearRange};

#[derive(PartialEq, Eq, Clone, Copy, Debug, Serialize, Deserialize)]
pub enum EasterType {
    Western,
    Orthodox
}

/// Easter Sunday of `year` as a Gregorian date; `None` outside 1583..=4099.
pub fn easter_sunday(easter_type: EasterType, year: i32) -> Option<NaiveDate> {
    if !(1583..=4099).contains(&year) {
        return None;
    }

    let g = year % 19;

    // days after March 21; may be slightly negative for Western Easter
    let p = match easter_type {
        EasterType::Orthodox => {
            let i = (19 * g + 15) % 30;
            let j = (year + year / 4 + i) % 7;
            let e = if year <= 1600 {
                10
            } else {
                10 + year / 100 - 16 - (year / 100 - 16) / 4
            };
            i - j + e
        },
        EasterType::Western => {
            let c = year / 100;
            let c_div_4 = c / 4;
            let h = (c - c_div_4 - (8 * c + 13) / 25 + 19 * g + 15) % 30;
            let h_div_28 = h / 28;
            let i = h - h_div_28 * (1 - h_div_28 * (29 / (h + 1)) * ((21 - g) / 11));
            let j = (year + year / 4 + i + 2 - c + c_div_4) % 7;
            i - j
        }
    };

    let day = 1 + (p + 27 + (p + 6) / 40) % 31;
    let month = 3 + (p + 26) / 30;

    NaiveDate::from_ymd_opt(year, month as u32, day as u32)
}

#[derive(Clone, Debug)]
pub struct EasterRelatedHoliday {
    name: String,
    easter_type: EasterType,
    shift_days: i64,
    expected_weekday: Option<Weekday>,
    years: YearRange
}

impl EasterRelatedHoliday {
    pub fn new(name: &str, easter_type: EasterType, shift_days: i64) -> EasterRelatedHoliday {
        EasterRelatedHoliday {
            name: name.to_owned(),
            easter_type,
            shift_days,
            expected_weekday: None,
            years: YearRange::ALWAYS
        }
    }

    /// Every computed date is checked against `weekday`.
    pub fn expecting(mut self, weekday: Weekday) -> EasterRelatedHoliday {
        self.expected_weekday = Some(weekday);
        self
    }

    pub fn with_years(mut self, years: YearRange) -> EasterRelatedHoliday {
        self.years = years;
        self
    }

    pub fn easter_type(&self) -> EasterType {
        self.easter_type
    }

    pub fn shift_days(&self) -> i64 {
        self.shift_days
    }

    pub fn expected_weekday(&self) -> Option<Weekday> {
        self.expected_weekday
    }

    /// The shifted date for `year`, validated against the expected weekday
    /// whether or not the holiday is in force that year.
    pub fn compute(&self, year: i32) -> Result<Option<NaiveDate>, HolidayError> {
        let Some(easter_day) = easter_sunday(self.easter_type, year) else {
            debug!("no {:?} Easter for {}, skipping {}", self.easter_type, year, self.name);
            return Ok(None);
        };

        let d = TimeDelta::try_days(self.shift_days)
            .and_then(|shift| easter_day.checked_add_signed(shift))
            .ok_or(HolidayError::YearOutOfRange(year))?;

        if let Some(expected) = self.expected_weekday {
            if d.weekday() != expected {
                return Err(HolidayError::InternalConsistency {
                    holiday: self.name.clone(),
                    date: d,
                    expected,
                    actual: d.weekday()
                });
            }
        }

        Ok(Some(d))
    }
}

impl RecurringHoliday for EasterRelatedHoliday {
    fn name(&self) -> &str {
        &self.name
    }

    fn get_holiday(&self, year: i32) -> Result<Vec<NaiveDate>, HolidayError> {
        let d = self.compute(year)?;
        if self.years.contains(year) {
            Ok(d.into_iter().collect())
        } else {
            Ok(Vec::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn western_easter() {
        assert_eq!(easter_sunday(EasterType::Western, 2018), Some(date(2018, 4, 1)));
        assert_eq!(easter_sunday(EasterType::Western, 2004), Some(date(2004, 4, 11)));
        assert_eq!(easter_sunday(EasterType::Western, 2005), Some(date(2005, 3, 27)));
        assert_eq!(easter_sunday(EasterType::Western, 2024), Some(date(2024, 3, 31)));
        // earliest and latest possible dates
        assert_eq!(easter_sunday(EasterType::Western, 1818), Some(date(1818, 3, 22)));
        assert_eq!(easter_sunday(EasterType::Western, 2285), Some(date(2285, 3, 22)));
        assert_eq!(easter_sunday(EasterType::Western, 1943), Some(date(1943, 4, 25)));
        assert_eq!(easter_sunday(EasterType::Western, 2038), Some(date(2038, 4, 25)));
    }

    #[test]
    fn orthodox_easter() {
        assert_eq!(easter_sunday(EasterType::Orthodox, 2024), Some(date(2024, 5, 5)));
        assert_eq!(easter_sunday(EasterType::Orthodox, 2018), Some(date(2018, 4, 8)));
    }

    #[test]
    fn out_of_range_years() {
        assert_eq!(easter_sunday(EasterType::Western, 1582), None);
        assert_eq!(easter_sunday(EasterType::Western, 4100), None);
        let good_friday = EasterRelatedHoliday::new("Långfredagen", EasterType::Western, -2);
        assert!(good_friday.get_holiday(1500).unwrap().is_empty());
    }

    #[test]
    fn shifted_and_gated() {
        let whit_monday = EasterRelatedHoliday::new("Annandag pingst", EasterType::Western, 50)
            .expecting(Weekday::Mon)
            .with_years(YearRange::until(2004));
        assert_eq!(whit_monday.get_holiday(2004).unwrap(), vec![date(2004, 5, 31)]);
        assert!(whit_monday.get_holiday(2005).unwrap().is_empty());
        // still computed and validated after the sunset year
        assert_eq!(whit_monday.compute(2005).unwrap(), Some(date(2005, 5, 16)));
    }

    #[test]
    fn huge_shift_is_an_error() {
        let far = EasterRelatedHoliday::new("Far away", EasterType::Western, 200_000_000_000);
        assert_eq!(far.get_holiday(2018), Err(HolidayError::YearOutOfRange(2018)));
        let near_limit = EasterRelatedHoliday::new("Far away", EasterType::Western, -100_000_000);
        assert_eq!(near_limit.compute(2018), Err(HolidayError::YearOutOfRange(2018)));
    }

    #[test]
    fn wrong_weekday_is_an_internal_error() {
        let broken = EasterRelatedHoliday::new("Skärtorsdagen", EasterType::Western, -2)
            .expecting(Weekday::Thu);
        assert_eq!(
            broken.get_holiday(2018),
            Err(HolidayError::InternalConsistency {
                holiday: "Skärtorsdagen".to_owned(),
                date: date(2018, 3, 30),
                expected: Weekday::Thu,
                actual: Weekday::Fri
            })
        );
    }
}
