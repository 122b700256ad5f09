use std::sync::Arc;

use chrono::{NaiveDate, Weekday};

use crate::time::calendar::holidayerror::HolidayError;
use crate::time::calendar::holidaymap::OBSERVED_MARKER;
use crate::time::calendar::holidayrules::HolidayRules;
use super::easterrelatedholiday::EasterRelatedHoliday;
use super::recurringholiday::RecurringHoliday;
use super::weeklyholiday::WeeklyHoliday;

/// An ordered list of recurring holidays applied as one rule set.
///
/// Sundays come first when enabled, then each holiday in the order it was
/// added. Checks are Easter-relative dates that are validated every year
/// but never emitted.
#[derive(Clone, Debug)]
pub struct RuleBook {
    country: String,
    sundays: Option<WeeklyHoliday>,
    holidays: Vec<Arc<dyn RecurringHoliday>>,
    checks: Vec<EasterRelatedHoliday>
}

impl RuleBook {
    pub fn new(country: &str) -> RuleBook {
        RuleBook {
            country: country.to_owned(),
            sundays: None,
            holidays: Vec::new(),
            checks: Vec::new()
        }
    }

    pub fn with_sundays(mut self, name: &str) -> RuleBook {
        self.sundays = Some(WeeklyHoliday::new(name, Weekday::Sun));
        self
    }

    pub fn with_holiday<H: RecurringHoliday + 'static>(mut self, holiday: H) -> RuleBook {
        self.holidays.push(Arc::new(holiday));
        self
    }

    pub fn push(&mut self, holiday: Arc<dyn RecurringHoliday>) {
        self.holidays.push(holiday);
    }

    pub fn with_check(mut self, check: EasterRelatedHoliday) -> RuleBook {
        self.checks.push(check);
        self
    }
}

impl HolidayRules for RuleBook {
    fn country(&self) -> &str {
        &self.country
    }

    fn include_sundays(&self) -> bool {
        self.sundays.is_some()
    }

    fn holidays(&self, year: i32, observed: bool) -> Result<Vec<(NaiveDate, String)>, HolidayError> {
        for check in self.checks.iter() {
            check.compute(year)?;
        }

        let mut holidays = Vec::new();

        if let Some(sundays) = &self.sundays {
            let name = sundays.name();
            holidays.extend(sundays.get_holiday(year)?.into_iter().map(|d| (d, name.to_owned())));
        }

        for holiday in self.holidays.iter() {
            let name = holiday.name();
            holidays.extend(holiday.get_holiday(year)?.into_iter().map(|d| (d, name.to_owned())));
            if observed {
                let observed_name = format!("{} ({})", name, OBSERVED_MARKER);
                holidays.extend(holiday.get_observed(year)?.into_iter().map(|d| (d, observed_name.clone())));
            }
        }

        Ok(holidays)
    }
}
