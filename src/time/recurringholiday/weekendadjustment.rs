use std::collections::HashMap;

use chrono::{
    Datelike,
    NaiveDate,
    TimeDelta,
    Weekday
};
use serde::{
    Serialize,
    Deserialize
};


#[derive(PartialEq, Eq, Clone, Copy, Debug, Serialize, Deserialize)]
pub enum WeekendAdjustment {
    Unadjusted = 0,
    NextWeekday = 1,
    PreviousWeekday = -1
}

/// Observed-day shift per weekday, indexed by `num_days_from_monday()`.
#[derive(Clone, Debug, Default)]
pub struct WeekendAdjustmentRule {
    rule: [Option<TimeDelta>; 7]
}

impl WeekendAdjustmentRule {
    /// Consecutive adjusted weekdays are skipped over together, so with
    /// Saturday and Sunday both moving forward a Saturday shifts by two days.
    pub fn new(adjustment_map: &HashMap<Weekday, WeekendAdjustment>) -> WeekendAdjustmentRule {
        let mut rule: [Option<TimeDelta>; 7] = [None; 7];

        for (&weekday, &adj) in adjustment_map {
            if adj == WeekendAdjustment::Unadjusted {
                continue;
            }

            let step = if adj == WeekendAdjustment::NextWeekday {
                Weekday::succ
            } else {
                Weekday::pred
            };

            let mut to_weekday = weekday;
            let mut shift_days = 0i64;
            while adjustment_map.contains_key(&to_weekday) && shift_days.abs() < 7 {
                to_weekday = step(&to_weekday);
                shift_days += adj as i64;
            }

            rule[weekday.num_days_from_monday() as usize] = Some(TimeDelta::days(shift_days));
        }

        WeekendAdjustmentRule { rule }
    }

    pub fn is_empty(&self) -> bool {
        self.rule.iter().all(Option::is_none)
    }

    /// Largest shift in days, used to decide whether an observed date may
    /// cross a year boundary.
    pub fn max_shift_days(&self) -> u32 {
        self.rule
            .iter()
            .flatten()
            .map(|shift| shift.num_days().unsigned_abs() as u32)
            .max()
            .unwrap_or(0)
    }

    /// The observed date of `d`, or `None` when `d` needs no adjustment.
    #[inline]
    pub fn adjust(&self, d: NaiveDate) -> Option<NaiveDate> {
        let idx = d.weekday().num_days_from_monday() as usize;
        self.rule[idx].and_then(|shift| d.checked_add_signed(shift))
    }
}
