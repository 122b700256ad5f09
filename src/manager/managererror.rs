use serde::{
    de::{self, Error},
    Deserialize
};
use thiserror::Error;

use crate::time::calendar::holidayerror::HolidayError;

#[derive(Debug, Error)]
pub enum ManagerError {
    #[error(transparent)]
    IOError(#[from] std::io::Error),
    #[error(transparent)]
    JsonParseError(#[from] serde_json::Error),
    #[error("key '{0}' not found")]
    NameNotFoundError(String),
    #[error(transparent)]
    Holiday(#[from] HolidayError)
}

impl ManagerError {
    pub fn json_missing_field(field: &'static str) -> ManagerError {
        ManagerError::JsonParseError(serde_json::Error::missing_field(field))
    }

    pub fn json_invalid_length(len: usize, exp: &dyn de::Expected) -> ManagerError {
        ManagerError::JsonParseError(serde_json::Error::invalid_length(len, exp))
    }

    pub fn json_invalid_value(unexp: de::Unexpected, exp: &dyn de::Expected) -> ManagerError {
        ManagerError::JsonParseError(serde_json::Error::invalid_value(unexp, exp))
    }

    pub fn map_elem_not_found(name: &str) -> ManagerError {
        ManagerError::NameNotFoundError(name.to_owned())
    }
}

pub fn parse_json_value<T>(json_value: serde_json::Value) -> Result<T, ManagerError>
where
    T: for<'a> Deserialize<'a> {
    Ok(serde_json::from_value(json_value)?)
}
