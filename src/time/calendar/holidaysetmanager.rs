use std::sync::Arc;

use serde::Deserialize;

use crate::manager::manager::{IManager, ManagerBuilder};
use crate::manager::managererror::{ManagerError, parse_json_value};
use crate::manager::namedobject::NamedJsonObject;
use crate::time::recurringholiday::recurringholidaymanager::rule_book_from_json;
use super::combinedholidayset::{CombinedHolidaySet, Constituent};
use super::holidaycalendar::HolidayCalendar;
use super::holidayerror::HolidayError;
use super::holidaymap::HolidayMap;
use super::holidayrules::HolidayRules;
use super::holidayset::{HolidaySet, HolidaySetOptions};
use super::holidaysetfactory::HolidaySetFactory;
use super::holidayupdate::HolidayUpdate;

/// A holiday set loaded from configuration, either kind.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfiguredHolidaySet {
    Single(HolidaySet),
    Combined(CombinedHolidaySet)
}

impl HolidayCalendar for ConfiguredHolidaySet {
    fn holiday_map(&self) -> &HolidayMap {
        match self {
            ConfiguredHolidaySet::Single(holiday_set) => holiday_set.holiday_map(),
            ConfiguredHolidaySet::Combined(combined) => combined.holiday_map()
        }
    }

    fn holiday_map_mut(&mut self) -> &mut HolidayMap {
        match self {
            ConfiguredHolidaySet::Single(holiday_set) => holiday_set.holiday_map_mut(),
            ConfiguredHolidaySet::Combined(combined) => combined.holiday_map_mut()
        }
    }

    fn populate(&mut self, year: i32) -> Result<(), HolidayError> {
        match self {
            ConfiguredHolidaySet::Single(holiday_set) => holiday_set.populate(year),
            ConfiguredHolidaySet::Combined(combined) => combined.populate(year)
        }
    }

    fn constituents(&self) -> Vec<Constituent> {
        match self {
            ConfiguredHolidaySet::Single(holiday_set) => holiday_set.constituents(),
            ConfiguredHolidaySet::Combined(combined) => combined.constituents()
        }
    }

    fn include_sundays(&self) -> bool {
        match self {
            ConfiguredHolidaySet::Single(holiday_set) => holiday_set.include_sundays(),
            ConfiguredHolidaySet::Combined(combined) => combined.include_sundays()
        }
    }
}

impl From<HolidaySet> for ConfiguredHolidaySet {
    fn from(holiday_set: HolidaySet) -> Self {
        ConfiguredHolidaySet::Single(holiday_set)
    }
}

impl From<CombinedHolidaySet> for ConfiguredHolidaySet {
    fn from(combined: CombinedHolidaySet) -> Self {
        ConfiguredHolidaySet::Combined(combined)
    }
}

#[derive(Deserialize)]
struct HolidaySetJsonProp {
    #[serde(default)]
    country: Option<String>,
    #[serde(default)]
    rules: Option<Vec<serde_json::Value>>,
    #[serde(flatten)]
    options: HolidaySetOptions,
    #[serde(default)]
    additional_holidays: Option<serde_json::Value>
}

/// Loads holiday sets built from a registered country or from a list of
/// typed recurring holidays.
///
/// With `rules` the country tag is `country` when given, else the set's
/// name. Sundays are then described by a `Weekly` rule; `include_sundays`
/// only applies to registered countries.
pub struct HolidaySetLoader;

impl IManager<ConfiguredHolidaySet, HolidaySetFactory> for HolidaySetLoader {
    fn insert_obj_from_json(
        &self,
        builder: &mut ManagerBuilder<ConfiguredHolidaySet>,
        json_value: serde_json::Value,
        factory: &HolidaySetFactory
    ) -> Result<(), ManagerError> {
        let named_obj = NamedJsonObject::from_json(&json_value)?;
        let json_prop: HolidaySetJsonProp = parse_json_value(json_value)?;

        let rules: Arc<dyn HolidayRules> = match (&json_prop.rules, &json_prop.country) {
            (Some(rules), country) => {
                let country = country.as_deref().unwrap_or(named_obj.name());
                Arc::new(rule_book_from_json(country, rules)?)
            },
            (None, Some(country)) => factory.rules(country, &json_prop.options)?,
            (None, None) => return Err(ManagerError::json_missing_field("country"))
        };

        let mut holiday_set = HolidaySet::new(Some(rules), &json_prop.options)?;
        if let Some(additional_holidays) = &json_prop.additional_holidays {
            holiday_set.update(HolidayUpdate::try_from(additional_holidays)?)?;
        }

        builder.insert(named_obj.name().to_owned(), holiday_set.into());
        Ok(())
    }
}

#[derive(Deserialize)]
struct CombinedHolidaySetJsonProp {
    holiday_sets: Vec<String>
}

/// Loads unions of holiday sets already in the builder.
///
/// A union may name another union declared later in the file, so entries
/// whose members are missing are retried each round until every entry is
/// loaded or a round makes no progress. In the latter case the last error
/// is returned.
pub struct CombinedHolidaySetLoader;

impl IManager<ConfiguredHolidaySet, ()> for CombinedHolidaySetLoader {
    fn insert_obj_from_json(
        &self,
        builder: &mut ManagerBuilder<ConfiguredHolidaySet>,
        json_value: serde_json::Value,
        _supports: &()
    ) -> Result<(), ManagerError> {
        let named_obj = NamedJsonObject::from_json(&json_value)?;
        let json_prop: CombinedHolidaySetJsonProp = parse_json_value(json_value)?;

        let names = &json_prop.holiday_sets;
        if names.len() < 2 {
            return Err(ManagerError::json_invalid_length(names.len(), &"at least two holiday set names"));
        }

        let mut combined = builder.get(&names[0])?;
        for name in names[1..].iter() {
            let member = builder.get(name)?;
            combined = combined.union(&member)?.into();
        }

        builder.insert(named_obj.name().to_owned(), combined);
        Ok(())
    }

    fn insert_obj_from_json_vec(
        &self,
        builder: &mut ManagerBuilder<ConfiguredHolidaySet>,
        json_vec: &[serde_json::Value],
        supports: &()
    ) -> Result<(), ManagerError> {
        let mut remain_indices: Vec<usize> = (0..json_vec.len()).collect();
        let mut result: Result<(), ManagerError> = Ok(());

        loop {
            let mut new_remain_indices: Vec<usize> = Vec::new();

            for &index in remain_indices.iter() {
                result = self.insert_obj_from_json(builder, json_vec[index].clone(), supports);
                if result.is_err() {
                    new_remain_indices.push(index);
                }
            }

            if new_remain_indices.is_empty() {
                return Ok(());
            }
            if remain_indices == new_remain_indices {
                return result;
            }

            remain_indices = new_remain_indices;
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn builder_with_sweden() -> ManagerBuilder<ConfiguredHolidaySet> {
        let mut builder = ManagerBuilder::new();
        HolidaySetLoader
            .insert_obj_from_json(
                &mut builder,
                json!({"name": "SE", "country": "Sweden", "years": [2018], "include_sundays": false}),
                &HolidaySetFactory::default()
            )
            .unwrap();
        builder
    }

    #[test]
    fn country_set() {
        let builder = builder_with_sweden();
        let mut sweden = builder.get("SE").unwrap();
        assert_eq!(sweden.len(), 16);
        assert!(!sweden.include_sundays());
        assert_eq!(sweden.get("2018-12-24").unwrap().as_deref(), Some("Julafton"));
    }

    #[test]
    fn rules_set_with_additional_holidays() {
        let mut builder = ManagerBuilder::new();
        HolidaySetLoader
            .insert_obj_from_json(
                &mut builder,
                json!({
                    "name": "Office",
                    "rules": [{"holiday_type": "FixedDate", "name": "Founders Day", "month": 3, "day": 14}],
                    "years": [2018],
                    "additional_holidays": {"2018-12-27": "Klämdag"}
                }),
                &HolidaySetFactory::default()
            )
            .unwrap();
        let mut office = builder.get("Office").unwrap();
        assert_eq!(office.holiday_map().countries().to_vec(), vec!["Office".to_owned()]);
        assert_eq!(office.get("2018-03-14").unwrap().as_deref(), Some("Founders Day"));
        assert_eq!(office.get("2018-12-27").unwrap().as_deref(), Some("Klämdag"));
        assert_eq!(office.len(), 2);
    }

    #[test]
    fn holiday_set_needs_a_source() {
        let mut builder = ManagerBuilder::new();
        let result = HolidaySetLoader.insert_obj_from_json(
            &mut builder,
            json!({"name": "Nothing"}),
            &HolidaySetFactory::default()
        );
        assert!(matches!(result, Err(ManagerError::JsonParseError(_))));

        let result = HolidaySetLoader.insert_obj_from_json(
            &mut builder,
            json!({"name": "Atlantis", "country": "Atlantis"}),
            &HolidaySetFactory::default()
        );
        assert!(matches!(result, Err(ManagerError::Holiday(HolidayError::UnknownCountry(_)))));
    }

    #[test]
    fn unions_load_in_any_order() {
        let mut builder = builder_with_sweden();
        HolidaySetLoader
            .insert_obj_from_json(
                &mut builder,
                json!({"name": "Extra", "rules": [], "additional_holidays": ["2018-12-27"]}),
                &HolidaySetFactory::default()
            )
            .unwrap();

        let combined = [
            json!({"name": "Outer", "holiday_sets": ["Inner", "SE"]}),
            json!({"name": "Inner", "holiday_sets": ["SE", "Extra"]})
        ];
        CombinedHolidaySetLoader.insert_obj_from_json_vec(&mut builder, &combined, &()).unwrap();

        let mut inner = builder.get("Inner").unwrap();
        assert_eq!(inner.get("2018-12-27").unwrap().as_deref(), Some("Holiday"));
        assert_eq!(inner.get("2018-12-24").unwrap().as_deref(), Some("Julafton"));
        assert!(matches!(builder.get("Outer").unwrap(), ConfiguredHolidaySet::Combined(_)));
    }

    #[test]
    fn unresolved_unions_fail() {
        let mut builder = builder_with_sweden();
        let combined = [json!({"name": "Broken", "holiday_sets": ["SE", "Missing"]})];
        let result = CombinedHolidaySetLoader.insert_obj_from_json_vec(&mut builder, &combined, &());
        assert!(matches!(result, Err(ManagerError::NameNotFoundError(name)) if name == "Missing"));

        let single = [json!({"name": "Lonely", "holiday_sets": ["SE"]})];
        assert!(CombinedHolidaySetLoader.insert_obj_from_json_vec(&mut builder, &single, &()).is_err());
    }
}
