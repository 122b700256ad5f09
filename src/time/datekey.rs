use std::fmt;
use std::str::FromStr;

use chrono::{
    DateTime,
    Datelike,
    NaiveDate,
    NaiveDateTime,
    TimeZone,
    Utc
};
use serde_json::Value;

use crate::time::calendar::holidayerror::HolidayError;

/// Formats carrying a time of day. Tried before the date-only formats so
/// that the time part is truncated rather than rejected as trailing input.
const DATE_TIME_FORMATS: [&str; 8] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M"
];

/// Tried in order; the first format that fits wins. Year-first comes before
/// month-first, so "2018/03/04" is March 4th and "03/04/2018" is also March
/// 4th; a day-first reading only applies to dotted dates ("04.03.2018").
/// A match only counts when the year is written with four digits, so short
/// years never reach these formats.
const DATE_FORMATS: [&str; 12] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%m/%d/%Y",
    "%m-%d-%Y",
    "%d.%m.%Y",
    "%B %d, %Y",
    "%B %d %Y",
    "%d %B %Y",
    "%d %B, %Y",
    "%A, %B %d, %Y",
    "%a %b %d %Y"
];

/// Two-digit years land within this many years of the current one.
const TWO_DIGIT_YEAR_WINDOW: i32 = 50;

/// Any of the representations a holiday lookup accepts as a key.
#[derive(Clone, Debug, PartialEq)]
pub enum DateKey {
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Text(String),
    /// Seconds since the Unix epoch, read as UTC.
    Timestamp(f64)
}

impl DateKey {
    pub fn normalize(&self) -> Result<NaiveDate, HolidayError> {
        match self {
            DateKey::Date(d) => Ok(*d),
            DateKey::DateTime(dt) => Ok(dt.date()),
            DateKey::Text(text) => parse_date(text),
            DateKey::Timestamp(seconds) => date_from_timestamp(*seconds)
        }
    }
}

pub fn parse_date(text: &str) -> Result<NaiveDate, HolidayError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(HolidayError::parse(text));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(trimmed) {
        return Ok(dt.date_naive());
    }

    DATE_TIME_FORMATS
        .iter()
        .filter_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .map(|dt| dt.date())
        .find(|d| has_full_year(trimmed, d))
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .filter_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
                .find(|d| has_full_year(trimmed, d))
        })
        .or_else(|| parse_numeric_date(trimmed))
        .ok_or_else(|| HolidayError::parse(text))
}

/// chrono's `%Y` takes one to four digits; only the four-digit spelling of
/// the parsed year is accepted.
fn has_full_year(text: &str, d: &NaiveDate) -> bool {
    d.year() >= 0 && text.contains(&format!("{:04}", d.year()))
}

fn is_digits(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}

/// Purely numeric dates: "20180330", "180330", "12/25/18", "30.03.18".
///
/// Compact digits are year first. With separators, a first field above 31
/// is a two-digit year and one above 12 is the day; dotted dates are day
/// first, everything else month first. Two-digit years go to the century
/// that puts them closest to the current year.
fn parse_numeric_date(text: &str) -> Option<NaiveDate> {
    if is_digits(text) {
        return match text.len() {
            8 => NaiveDate::parse_from_str(text, "%Y%m%d").ok(),
            6 => {
                let short_year: i32 = text[0..2].parse().ok()?;
                let month: u32 = text[2..4].parse().ok()?;
                let day: u32 = text[4..6].parse().ok()?;
                NaiveDate::from_ymd_opt(expand_two_digit_year(short_year, Utc::now().year()), month, day)
            },
            _ => None
        };
    }

    let separator = text.chars().find(|c| matches!(c, '/' | '-' | '.'))?;
    let fields: Vec<&str> = text.split(separator).collect();
    if fields.len() != 3 || fields.iter().any(|f| f.len() > 2 || !is_digits(f)) {
        return None;
    }
    let values: Vec<u32> = fields.iter().map(|f| f.parse().ok()).collect::<Option<_>>()?;

    let (year_field, month, day) = if values[0] > 31 {
        (fields[0], values[1], values[2])
    } else if separator == '.' || values[0] > 12 {
        (fields[2], values[1], values[0])
    } else {
        (fields[2], values[0], values[1])
    };
    if year_field.len() != 2 {
        return None;
    }

    let short_year: i32 = year_field.parse().ok()?;
    NaiveDate::from_ymd_opt(expand_two_digit_year(short_year, Utc::now().year()), month, day)
}

fn expand_two_digit_year(short_year: i32, current_year: i32) -> i32 {
    let mut year = short_year + current_year - current_year.rem_euclid(100);
    if year >= current_year + TWO_DIGIT_YEAR_WINDOW {
        year -= 100;
    } else if year < current_year - TWO_DIGIT_YEAR_WINDOW {
        year += 100;
    }
    year
}

fn date_from_timestamp(seconds: f64) -> Result<NaiveDate, HolidayError> {
    if !seconds.is_finite() {
        return Err(HolidayError::parse(&seconds.to_string()));
    }
    DateTime::from_timestamp(seconds.floor() as i64, 0)
        .map(|dt| dt.date_naive())
        .ok_or_else(|| HolidayError::parse(&seconds.to_string()))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object"
    }
}

impl TryFrom<&Value> for DateKey {
    type Error = HolidayError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(text) => Ok(DateKey::Text(text.clone())),
            Value::Number(number) => number
                .as_f64()
                .map(DateKey::Timestamp)
                .ok_or_else(|| HolidayError::UnsupportedKeyType(json_kind(value).to_owned())),
            other => Err(HolidayError::UnsupportedKeyType(json_kind(other).to_owned()))
        }
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateKey::Date(d) => write!(f, "{}", d),
            DateKey::DateTime(dt) => write!(f, "{}", dt),
            DateKey::Text(text) => write!(f, "{}", text),
            DateKey::Timestamp(seconds) => write!(f, "{}", seconds)
        }
    }
}

/// Reads a command-line style argument. Text that parses as a date stays
/// text, so "20180330" is a date; any other number is a Unix timestamp.
impl FromStr for DateKey {
    type Err = HolidayError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        if parse_date(text).is_ok() {
            return Ok(DateKey::Text(text.to_owned()));
        }
        match text.trim().parse::<f64>() {
            Ok(seconds) if seconds.is_finite() => Ok(DateKey::Timestamp(seconds)),
            _ => Err(HolidayError::parse(text))
        }
    }
}

impl From<NaiveDate> for DateKey {
    fn from(d: NaiveDate) -> Self {
        DateKey::Date(d)
    }
}

impl From<&NaiveDate> for DateKey {
    fn from(d: &NaiveDate) -> Self {
        DateKey::Date(*d)
    }
}

impl From<NaiveDateTime> for DateKey {
    fn from(dt: NaiveDateTime) -> Self {
        DateKey::DateTime(dt)
    }
}

/// Zoned datetimes keep their local calendar date.
impl<Tz: TimeZone> From<DateTime<Tz>> for DateKey {
    fn from(dt: DateTime<Tz>) -> Self {
        DateKey::DateTime(dt.naive_local())
    }
}

impl From<&str> for DateKey {
    fn from(text: &str) -> Self {
        DateKey::Text(text.to_owned())
    }
}

impl From<String> for DateKey {
    fn from(text: String) -> Self {
        DateKey::Text(text)
    }
}

impl From<&String> for DateKey {
    fn from(text: &String) -> Self {
        DateKey::Text(text.clone())
    }
}

impl From<i64> for DateKey {
    fn from(seconds: i64) -> Self {
        DateKey::Timestamp(seconds as f64)
    }
}

impl From<i32> for DateKey {
    fn from(seconds: i32) -> Self {
        DateKey::Timestamp(seconds as f64)
    }
}

impl From<f64> for DateKey {
    fn from(seconds: f64) -> Self {
        DateKey::Timestamp(seconds)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, NaiveTime};
    use serde_json::json;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn iso_strings() {
        assert_eq!(parse_date("2018-03-30").unwrap(), date(2018, 3, 30));
        assert_eq!(parse_date(" 2018-03-30 ").unwrap(), date(2018, 3, 30));
        assert_eq!(parse_date("2018-03-30 23:59:59").unwrap(), date(2018, 3, 30));
        assert_eq!(parse_date("2018-03-30T08:15:00").unwrap(), date(2018, 3, 30));
        assert_eq!(parse_date("2018-03-30T23:30:00+02:00").unwrap(), date(2018, 3, 30));
        assert_eq!(parse_date("20180330").unwrap(), date(2018, 3, 30));
    }

    #[test]
    fn slashed_dates_are_month_first() {
        assert_eq!(parse_date("1/1/2014").unwrap(), date(2014, 1, 1));
        assert_eq!(parse_date("07/04/2015").unwrap(), date(2015, 7, 4));
        assert_eq!(parse_date("12/25/2015").unwrap(), date(2015, 12, 25));
    }

    #[test]
    fn two_digit_years() {
        assert_eq!(parse_date("12/25/18").unwrap(), date(2018, 12, 25));
        assert_eq!(parse_date("01/06/18").unwrap(), date(2018, 1, 6));
        assert_eq!(parse_date("03/30/18").unwrap(), date(2018, 3, 30));
        assert_eq!(parse_date("30.03.18").unwrap(), date(2018, 3, 30));
        assert_eq!(parse_date("25/12/18").unwrap(), date(2018, 12, 25));
        assert_eq!(parse_date("180330").unwrap(), date(2018, 3, 30));
        // day first once the first field cannot be a month
        assert_eq!(parse_date("18-03-30").unwrap(), date(2030, 3, 18));
        for text in ["1/6/8", "12/25/018", "March 30, 18", "12/25/18 10:00", "1803301"] {
            assert_eq!(parse_date(text), Err(HolidayError::parse(text)), "{:?}", text);
        }
    }

    #[test]
    fn two_digit_year_window() {
        assert_eq!(expand_two_digit_year(18, 2026), 2018);
        assert_eq!(expand_two_digit_year(75, 2026), 2075);
        assert_eq!(expand_two_digit_year(76, 2026), 1976);
        assert_eq!(expand_two_digit_year(99, 2026), 1999);
        assert_eq!(expand_two_digit_year(0, 1990), 2000);
        assert_eq!(expand_two_digit_year(40, 1990), 1940);
    }

    #[test]
    fn month_names() {
        assert_eq!(parse_date("March 30, 2018").unwrap(), date(2018, 3, 30));
        assert_eq!(parse_date("30 March 2018").unwrap(), date(2018, 3, 30));
        assert_eq!(parse_date("Dec 24 2018").unwrap(), date(2018, 12, 24));
    }

    #[test]
    fn malformed_strings() {
        for text in ["", "   ", "abc", "2018-13-01", "2018-02-30", "not a date 2018"] {
            assert_eq!(parse_date(text), Err(HolidayError::parse(text)), "{:?}", text);
        }
    }

    #[test]
    fn timestamps_are_utc() {
        assert_eq!(DateKey::from(1388597445_i64).normalize().unwrap(), date(2014, 1, 1));
        assert_eq!(DateKey::from(0.5).normalize().unwrap(), date(1970, 1, 1));
        assert_eq!(DateKey::from(-1_i64).normalize().unwrap(), date(1969, 12, 31));
        assert!(DateKey::from(f64::NAN).normalize().is_err());
        assert!(DateKey::from(f64::MAX).normalize().is_err());
    }

    #[test]
    fn datetimes_are_truncated() {
        let dt = date(2018, 12, 24).and_time(NaiveTime::from_hms_opt(18, 0, 0).unwrap());
        assert_eq!(DateKey::from(dt).normalize().unwrap(), date(2018, 12, 24));

        let offset = FixedOffset::east_opt(3600).unwrap();
        let zoned = offset.with_ymd_and_hms(2018, 12, 31, 23, 30, 0).unwrap();
        assert_eq!(DateKey::from(zoned).normalize().unwrap(), date(2018, 12, 31));
    }

    #[test]
    fn keys_from_arguments() {
        assert_eq!("1388597445".parse::<DateKey>().unwrap(), DateKey::Timestamp(1388597445.0));
        assert_eq!("1388597445".parse::<DateKey>().unwrap().normalize().unwrap(), date(2014, 1, 1));
        assert_eq!("-86400.5".parse::<DateKey>().unwrap(), DateKey::Timestamp(-86400.5));
        assert_eq!("20180330".parse::<DateKey>().unwrap(), DateKey::Text("20180330".to_owned()));
        assert_eq!("12/25/18".parse::<DateKey>().unwrap(), DateKey::Text("12/25/18".to_owned()));
        assert_eq!("tomorrow".parse::<DateKey>(), Err(HolidayError::parse("tomorrow")));
        assert_eq!("NaN".parse::<DateKey>(), Err(HolidayError::parse("NaN")));
    }

    #[test]
    fn json_keys() {
        assert_eq!(DateKey::try_from(&json!("2018-01-06")).unwrap(), DateKey::Text("2018-01-06".to_owned()));
        assert_eq!(DateKey::try_from(&json!(86400)).unwrap(), DateKey::Timestamp(86400.0));
        assert_eq!(
            DateKey::try_from(&json!(true)),
            Err(HolidayError::UnsupportedKeyType("bool".to_owned()))
        );
        assert_eq!(
            DateKey::try_from(&json!({"a": 1})),
            Err(HolidayError::UnsupportedKeyType("object".to_owned()))
        );
        assert!(DateKey::try_from(&Value::Null).is_err());
    }
}
