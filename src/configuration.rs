use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use log::info;
use serde::Deserialize;

use crate::manager::manager::{IManager, Manager, ManagerBuilder};
use crate::manager::managererror::{ManagerError, parse_json_value};
use crate::time::calendar::holidaysetfactory::HolidaySetFactory;
use crate::time::calendar::holidaysetmanager::{
    CombinedHolidaySetLoader,
    ConfiguredHolidaySet,
    HolidaySetLoader
};

#[derive(Deserialize)]
struct ConfigurationJsonProp {
    #[serde(default)]
    holiday_sets: Vec<serde_json::Value>,
    #[serde(default)]
    combined_holiday_sets: Vec<serde_json::Value>
}

/// Named holiday sets described by a JSON document of the form
/// `{"holiday_sets": [...], "combined_holiday_sets": [...]}`.
pub struct Configuration {
    holiday_set_manager: Manager<ConfiguredHolidaySet>
}

impl Configuration {
    pub fn from_json_value(json_value: serde_json::Value, factory: &HolidaySetFactory) -> Result<Configuration, ManagerError> {
        let json_prop: ConfigurationJsonProp = parse_json_value(json_value)?;
        let mut builder = ManagerBuilder::new();
        HolidaySetLoader.insert_obj_from_json_vec(&mut builder, &json_prop.holiday_sets, factory)?;
        CombinedHolidaySetLoader.insert_obj_from_json_vec(&mut builder, &json_prop.combined_holiday_sets, &())?;
        Ok(Configuration { holiday_set_manager: builder.build() })
    }

    /// Reads a configuration file, resolving countries in the default
    /// registry.
    pub fn from_reader<P: AsRef<Path>>(file_path: P) -> Result<Configuration, ManagerError> {
        let file = File::open(file_path.as_ref())?;
        let json_value: serde_json::Value = serde_json::from_reader(BufReader::new(file))?;
        let configuration = Configuration::from_json_value(json_value, &HolidaySetFactory::default())?;
        info!(
            "loaded {} holiday sets from {}",
            configuration.holiday_set_manager.len(),
            file_path.as_ref().display()
        );
        Ok(configuration)
    }

    pub fn holiday_set_manager(&self) -> &Manager<ConfiguredHolidaySet> {
        &self.holiday_set_manager
    }

    /// A fresh copy of the named set.
    pub fn holiday_set(&self, name: &str) -> Result<ConfiguredHolidaySet, ManagerError> {
        self.holiday_set_manager.get(name)
    }
}
