use std::collections::HashMap;
use std::sync::Arc;

use chrono::Weekday;
use serde::{de::Unexpected, Deserialize};

use crate::manager::managererror::{ManagerError, parse_json_value};
use super::easterrelatedholiday::{EasterRelatedHoliday, EasterType};
use super::fixeddateholiday::FixedDateHoliday;
use super::recurringholiday::{RecurringHoliday, YearRange};
use super::rulebook::RuleBook;
use super::weekdayonorafterholiday::WeekdayOnOrAfterHoliday;
use super::weekendadjustment::WeekendAdjustment;
use super::weeklyholiday::WeeklyHoliday;

fn invalid_month_day(month: u32, day: u32) -> ManagerError {
    ManagerError::json_invalid_value(
        Unexpected::Other(&format!("month {} day {}", month, day)),
        &"an existing month and day"
    )
}

fn default_easter_type() -> EasterType {
    EasterType::Western
}

#[derive(Deserialize)]
struct FixedDateHolidayJsonProp {
    name: String,
    month: u32,
    day: u32,
    #[serde(default)]
    weekend_adjustment_map: HashMap<Weekday, WeekendAdjustment>,
    #[serde(flatten)]
    years: YearRange
}

fn fixed_date_holiday_from_json(json: serde_json::Value) -> Result<Arc<dyn RecurringHoliday>, ManagerError> {
    let json_prop: FixedDateHolidayJsonProp = parse_json_value(json)?;
    let holiday = FixedDateHoliday::checked(&json_prop.name, json_prop.month, json_prop.day)
        .ok_or_else(|| invalid_month_day(json_prop.month, json_prop.day))?
        .with_years(json_prop.years)
        .with_weekend_adjustment(&json_prop.weekend_adjustment_map);
    Ok(Arc::new(holiday))
}

#[derive(Deserialize)]
struct EasterRelatedHolidayJsonProp {
    name: String,
    #[serde(default = "default_easter_type")]
    easter_type: EasterType,
    shift_days: i64,
    #[serde(default)]
    weekday: Option<Weekday>,
    #[serde(flatten)]
    years: YearRange
}

/// Offsets further than this from Easter Sunday leave the Easter year.
const MAX_EASTER_SHIFT_DAYS: i64 = 366;

fn easter_related_holiday_from_json(json: serde_json::Value) -> Result<Arc<dyn RecurringHoliday>, ManagerError> {
    let json_prop: EasterRelatedHolidayJsonProp = parse_json_value(json)?;
    if json_prop.shift_days.abs() > MAX_EASTER_SHIFT_DAYS {
        return Err(ManagerError::json_invalid_value(
            Unexpected::Signed(json_prop.shift_days),
            &"a shift of at most 366 days from Easter Sunday"
        ));
    }
    let mut holiday = EasterRelatedHoliday::new(&json_prop.name, json_prop.easter_type, json_prop.shift_days)
        .with_years(json_prop.years);
    if let Some(weekday) = json_prop.weekday {
        holiday = holiday.expecting(weekday);
    }
    Ok(Arc::new(holiday))
}

#[derive(Deserialize)]
struct WeekdayOnOrAfterHolidayJsonProp {
    name: String,
    month: u32,
    day: u32,
    weekday: Weekday,
    #[serde(flatten)]
    years: YearRange
}

fn weekday_on_or_after_from_json(json: serde_json::Value) -> Result<Arc<dyn RecurringHoliday>, ManagerError> {
    let json_prop: WeekdayOnOrAfterHolidayJsonProp = parse_json_value(json)?;
    let holiday = WeekdayOnOrAfterHoliday::checked(&json_prop.name, json_prop.month, json_prop.day, json_prop.weekday)
        .ok_or_else(|| invalid_month_day(json_prop.month, json_prop.day))?
        .with_years(json_prop.years);
    Ok(Arc::new(holiday))
}

#[derive(Deserialize)]
struct WeeklyHolidayJsonProp {
    name: String,
    weekday: Weekday,
    #[serde(flatten)]
    years: YearRange
}

fn weekly_holiday_from_json(json: serde_json::Value) -> Result<Arc<dyn RecurringHoliday>, ManagerError> {
    let json_prop: WeeklyHolidayJsonProp = parse_json_value(json)?;
    Ok(Arc::new(WeeklyHoliday::new(&json_prop.name, json_prop.weekday).with_years(json_prop.years)))
}

#[derive(Deserialize)]
enum HolidayType {
    FixedDate,
    EasterRelated,
    WeekdayOnOrAfter,
    Weekly
}

#[derive(Deserialize)]
struct HolidayTypedObject {
    holiday_type: HolidayType
}

pub fn get_recurring_holiday_from_json(json: serde_json::Value) -> Result<Arc<dyn RecurringHoliday>, ManagerError> {
    let holiday_type_obj: HolidayTypedObject = parse_json_value(json.clone())?;
    match holiday_type_obj.holiday_type {
        HolidayType::FixedDate        => fixed_date_holiday_from_json(json),
        HolidayType::EasterRelated    => easter_related_holiday_from_json(json),
        HolidayType::WeekdayOnOrAfter => weekday_on_or_after_from_json(json),
        HolidayType::Weekly           => weekly_holiday_from_json(json)
    }
}

/// A rule book applying the described holidays in order.
pub fn rule_book_from_json(country: &str, json_vec: &[serde_json::Value]) -> Result<RuleBook, ManagerError> {
    let mut rule_book = RuleBook::new(country);
    for json in json_vec.iter() {
        rule_book.push(get_recurring_holiday_from_json(json.clone())?);
    }
    Ok(rule_book)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use serde_json::json;

    use crate::time::calendar::holidayrules::HolidayRules;
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn typed_holidays() {
        let fixed = get_recurring_holiday_from_json(json!({
            "holiday_type": "FixedDate",
            "name": "Independence Day",
            "month": 7,
            "day": 4,
            "weekend_adjustment_map": {"Sat": "PreviousWeekday", "Sun": "NextWeekday"},
            "since": 1870
        })).unwrap();
        assert_eq!(fixed.name(), "Independence Day");
        assert_eq!(fixed.get_holiday(2015).unwrap(), vec![date(2015, 7, 4)]);
        assert_eq!(fixed.get_observed(2015).unwrap(), vec![date(2015, 7, 3)]);
        assert!(fixed.get_holiday(1869).unwrap().is_empty());

        let easter = get_recurring_holiday_from_json(json!({
            "holiday_type": "EasterRelated",
            "name": "Långfredagen",
            "shift_days": -2,
            "weekday": "Fri"
        })).unwrap();
        assert_eq!(easter.get_holiday(2018).unwrap(), vec![date(2018, 3, 30)]);

        let midsummer = get_recurring_holiday_from_json(json!({
            "holiday_type": "WeekdayOnOrAfter",
            "name": "Midsommarafton",
            "month": 6,
            "day": 19,
            "weekday": "Fri"
        })).unwrap();
        assert_eq!(midsummer.get_holiday(2018).unwrap(), vec![date(2018, 6, 22)]);

        let weekly = get_recurring_holiday_from_json(json!({
            "holiday_type": "Weekly",
            "name": "Lördag",
            "weekday": "Sat",
            "until": 2017
        })).unwrap();
        assert_eq!(weekly.get_holiday(2017).unwrap().len(), 52);
        assert!(weekly.get_holiday(2018).unwrap().is_empty());
    }

    #[test]
    fn invalid_holidays() {
        assert!(get_recurring_holiday_from_json(json!({
            "holiday_type": "FixedDate", "name": "Never", "month": 2, "day": 30
        })).is_err());
        assert!(get_recurring_holiday_from_json(json!({
            "holiday_type": "LastWeekday", "name": "Unknown", "month": 5, "weekday": "Mon"
        })).is_err());
        assert!(get_recurring_holiday_from_json(json!({"name": "Untyped"})).is_err());
        assert!(matches!(
            get_recurring_holiday_from_json(json!({
                "holiday_type": "EasterRelated", "name": "Far away", "shift_days": 200000000000_i64
            })),
            Err(ManagerError::JsonParseError(_))
        ));
    }

    #[test]
    fn rule_book_keeps_order() {
        let rule_book = rule_book_from_json("XX", &[
            json!({"holiday_type": "FixedDate", "name": "B", "month": 1, "day": 1}),
            json!({"holiday_type": "FixedDate", "name": "A", "month": 1, "day": 1})
        ]).unwrap();
        assert_eq!(rule_book.country(), "XX");
        assert_eq!(
            rule_book.holidays(2018, false).unwrap(),
            vec![(date(2018, 1, 1), "B".to_owned()), (date(2018, 1, 1), "A".to_owned())]
        );
    }
}
