use std::collections::{BTreeMap, HashMap};

use serde_json::Value;

use crate::time::datekey::DateKey;
use super::holidayerror::HolidayError;
use super::holidaymap::DEFAULT_HOLIDAY_NAME;

/// What can be appended to a holiday set in one call.
#[derive(Clone, Debug, PartialEq)]
pub enum HolidayUpdate {
    /// Date and name pairs.
    Mapping(Vec<(DateKey, String)>),
    /// Dates labeled with the default name.
    Dates(Vec<DateKey>),
    /// A single date labeled with the default name.
    Single(DateKey)
}

impl HolidayUpdate {
    pub fn mapping<K, V, I>(pairs: I) -> HolidayUpdate
    where
        K: Into<DateKey>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)> {
        HolidayUpdate::Mapping(pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }

    pub fn dates<K, I>(dates: I) -> HolidayUpdate
    where
        K: Into<DateKey>,
        I: IntoIterator<Item = K> {
        HolidayUpdate::Dates(dates.into_iter().map(Into::into).collect())
    }

    /// Flattens into the (key, name) pairs to set, in order.
    pub fn into_entries(self) -> Vec<(DateKey, String)> {
        match self {
            HolidayUpdate::Mapping(pairs) => pairs,
            HolidayUpdate::Dates(dates) => dates
                .into_iter()
                .map(|key| (key, DEFAULT_HOLIDAY_NAME.to_owned()))
                .collect(),
            HolidayUpdate::Single(key) => vec![(key, DEFAULT_HOLIDAY_NAME.to_owned())]
        }
    }
}

impl<K: Into<DateKey>, V: Into<String>, S> From<HashMap<K, V, S>> for HolidayUpdate {
    fn from(map: HashMap<K, V, S>) -> Self {
        HolidayUpdate::mapping(map)
    }
}

impl<K: Into<DateKey>, V: Into<String>> From<BTreeMap<K, V>> for HolidayUpdate {
    fn from(map: BTreeMap<K, V>) -> Self {
        HolidayUpdate::mapping(map)
    }
}

impl<K: Into<DateKey>> From<Vec<K>> for HolidayUpdate {
    fn from(dates: Vec<K>) -> Self {
        HolidayUpdate::dates(dates)
    }
}

impl From<DateKey> for HolidayUpdate {
    fn from(key: DateKey) -> Self {
        HolidayUpdate::Single(key)
    }
}

impl From<chrono::NaiveDate> for HolidayUpdate {
    fn from(d: chrono::NaiveDate) -> Self {
        HolidayUpdate::Single(d.into())
    }
}

impl From<chrono::NaiveDateTime> for HolidayUpdate {
    fn from(dt: chrono::NaiveDateTime) -> Self {
        HolidayUpdate::Single(dt.into())
    }
}

impl From<&str> for HolidayUpdate {
    fn from(text: &str) -> Self {
        HolidayUpdate::Single(text.into())
    }
}

impl From<String> for HolidayUpdate {
    fn from(text: String) -> Self {
        HolidayUpdate::Single(text.into())
    }
}

impl From<i64> for HolidayUpdate {
    fn from(seconds: i64) -> Self {
        HolidayUpdate::Single(seconds.into())
    }
}

/// Objects map date strings to names, arrays list dates, anything else is
/// taken as a single date.
impl TryFrom<&Value> for HolidayUpdate {
    type Error = HolidayError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(object) => {
                let mut pairs = Vec::with_capacity(object.len());
                for (key, name) in object.iter() {
                    let name = name
                        .as_str()
                        .ok_or_else(|| HolidayError::UnsupportedKeyType(format!("holiday name {}", name)))?;
                    pairs.push((DateKey::Text(key.clone()), name.to_owned()));
                }
                Ok(HolidayUpdate::Mapping(pairs))
            },
            Value::Array(items) => {
                let dates = items
                    .iter()
                    .map(DateKey::try_from)
                    .collect::<Result<Vec<DateKey>, HolidayError>>()?;
                Ok(HolidayUpdate::Dates(dates))
            },
            other => Ok(HolidayUpdate::Single(DateKey::try_from(other)?))
        }
    }
}
