use chrono::{
    Datelike,
    Days,
    NaiveDate,
    Weekday
};

use crate::time::calendar::holidayerror::HolidayError;

pub const SEVEN_DAYS: Days = Days::new(7);

pub fn ymd (year: i32, month: u32, day: u32) -> Result<NaiveDate, HolidayError> {
    NaiveDate::from_ymd_opt(year, month, day).ok_or(HolidayError::YearOutOfRange(year))
}

/// First `weekday` falling on or after `d`.
pub fn weekday_on_or_after (d: NaiveDate, weekday: Weekday) -> Option<NaiveDate> {
    let days_ahead = (weekday.num_days_from_monday() + 7 - d.weekday().num_days_from_monday()) % 7;
    d.checked_add_days(Days::new(days_ahead as u64))
}
