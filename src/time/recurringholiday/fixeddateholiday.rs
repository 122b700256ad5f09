use std::collections::HashMap;

use chrono::{
    Datelike,
    NaiveDate,
    Weekday
};

use crate::time::calendar::holidayerror::HolidayError;
use super::recurringholiday::{RecurringHoliday, YearRange};
use super::weekendadjustment::{
    WeekendAdjustment,
    WeekendAdjustmentRule
};

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
enum WeekendAdjustmentShiftCheck {
    MayShiftToPreviousYear = 1,
    MayShiftToNextYear = -1,
    None
}

#[derive(Clone, Debug)]
pub struct FixedDateHoliday {
    name: String,
    month: u32,
    day: u32,
    years: YearRange,
    weekend_adjustment_rules: WeekendAdjustmentRule,
    shift_check: WeekendAdjustmentShiftCheck
}

impl FixedDateHoliday {
    pub fn new(name: &str, month: u32, day: u32) -> FixedDateHoliday {
        FixedDateHoliday {
            name: name.to_owned(),
            month,
            day,
            years: YearRange::ALWAYS,
            weekend_adjustment_rules: WeekendAdjustmentRule::default(),
            shift_check: WeekendAdjustmentShiftCheck::None
        }
    }

    /// `None` when no year has such a month and day.
    pub fn checked(name: &str, month: u32, day: u32) -> Option<FixedDateHoliday> {
        // 2000 is a leap year, so Feb 29 passes
        NaiveDate::from_ymd_opt(2000, month, day).map(|_| FixedDateHoliday::new(name, month, day))
    }

    pub fn with_years(mut self, years: YearRange) -> FixedDateHoliday {
        self.years = years;
        self
    }

    pub fn with_weekend_adjustment(mut self, weekend_adjustment_map: &HashMap<Weekday, WeekendAdjustment>) -> FixedDateHoliday {
        let rules = WeekendAdjustmentRule::new(weekend_adjustment_map);
        let max_shift = rules.max_shift_days();
        self.shift_check = if max_shift > 0 {
            if self.month == 1 && self.day <= max_shift {
                WeekendAdjustmentShiftCheck::MayShiftToPreviousYear
            } else if self.month == 12 && self.day > 31 - max_shift {
                WeekendAdjustmentShiftCheck::MayShiftToNextYear
            } else {
                WeekendAdjustmentShiftCheck::None
            }
        } else {
            WeekendAdjustmentShiftCheck::None
        };
        self.weekend_adjustment_rules = rules;
        self
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn years(&self) -> YearRange {
        self.years
    }

    fn unadjusted(&self, year: i32) -> Option<NaiveDate> {
        if self.years.contains(year) {
            NaiveDate::from_ymd_opt(year, self.month, self.day)
        } else {
            None
        }
    }

    fn observed_impl(&self, year: i32) -> Option<NaiveDate> {
        self.unadjusted(year).and_then(|d| self.weekend_adjustment_rules.adjust(d))
    }
}

impl RecurringHoliday for FixedDateHoliday {
    fn name(&self) -> &str {
        &self.name
    }

    fn get_holiday(&self, year: i32) -> Result<Vec<NaiveDate>, HolidayError> {
        Ok(self.unadjusted(year).into_iter().collect())
    }

    fn get_observed(&self, year: i32) -> Result<Vec<NaiveDate>, HolidayError> {
        let mut observed = Vec::new();

        if let Some(d1) = self.observed_impl(year) {
            if d1.year() == year {
                observed.push(d1);
            }
        }

        // The holiday of an adjacent year may be observed in this one
        if self.shift_check != WeekendAdjustmentShiftCheck::None {
            if let Some(d2) = self.observed_impl(year + self.shift_check as i32) {
                if d2.year() == year {
                    observed.push(d2);
                }
            }
        }

        Ok(observed)
    }
}
