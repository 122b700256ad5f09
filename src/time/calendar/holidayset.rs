use std::collections::BTreeSet;
use std::sync::Arc;

use serde::Deserialize;

use super::combinedholidayset::Constituent;
use super::holidaycalendar::HolidayCalendar;
use super::holidayerror::HolidayError;
use super::holidaymap::HolidayMap;
use super::holidayrules::HolidayRules;
use super::holidaysetfactory::HolidaySetFactory;

fn default_true() -> bool {
    true
}

/// How a holiday set is built. Defaults: no years up front, Sundays
/// included, expanding and observed.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct HolidaySetOptions {
    #[serde(default)]
    pub years: BTreeSet<i32>,
    #[serde(default = "default_true")]
    pub include_sundays: bool,
    #[serde(default = "default_true")]
    pub expand: bool,
    #[serde(default = "default_true")]
    pub observed: bool,
    #[serde(default)]
    pub province: Option<String>
}

impl Default for HolidaySetOptions {
    fn default() -> Self {
        HolidaySetOptions {
            years: BTreeSet::new(),
            include_sundays: true,
            expand: true,
            observed: true,
            province: None
        }
    }
}

impl HolidaySetOptions {
    pub fn for_years<I: IntoIterator<Item = i32>>(years: I) -> HolidaySetOptions {
        HolidaySetOptions {
            years: years.into_iter().collect(),
            ..HolidaySetOptions::default()
        }
    }

    pub fn include_sundays(mut self, include_sundays: bool) -> HolidaySetOptions {
        self.include_sundays = include_sundays;
        self
    }

    pub fn expand(mut self, expand: bool) -> HolidaySetOptions {
        self.expand = expand;
        self
    }

    pub fn observed(mut self, observed: bool) -> HolidaySetOptions {
        self.observed = observed;
        self
    }

    pub fn province(mut self, province: &str) -> HolidaySetOptions {
        self.province = Some(province.to_owned());
        self
    }
}

/// Holidays of one rule set, or a bare set of caller-supplied dates when
/// there are no rules.
#[derive(Clone, Debug)]
pub struct HolidaySet {
    map: HolidayMap,
    rules: Option<Arc<dyn HolidayRules>>
}

impl HolidaySet {
    pub fn new(rules: Option<Arc<dyn HolidayRules>>, options: &HolidaySetOptions) -> Result<HolidaySet, HolidayError> {
        let countries = rules.iter().map(|r| r.country().to_owned()).collect();
        let provinces = options.province.iter().cloned().collect();
        let map = HolidayMap::new(options.expand, options.observed)
            .with_countries(countries)
            .with_provinces(provinces);

        let mut holiday_set = HolidaySet { map, rules };
        for &year in options.years.iter() {
            holiday_set.populate_year(year)?;
        }
        Ok(holiday_set)
    }

    pub fn custom(options: &HolidaySetOptions) -> Result<HolidaySet, HolidayError> {
        HolidaySet::new(None, options)
    }

    /// Looks the country up in the built-in registry.
    pub fn for_country(country: &str, options: &HolidaySetOptions) -> Result<HolidaySet, HolidayError> {
        HolidaySetFactory::default().create(country, options)
    }

    pub fn rules(&self) -> Option<&Arc<dyn HolidayRules>> {
        self.rules.as_ref()
    }
}

impl HolidayCalendar for HolidaySet {
    fn holiday_map(&self) -> &HolidayMap {
        &self.map
    }

    fn holiday_map_mut(&mut self) -> &mut HolidayMap {
        &mut self.map
    }

    fn populate(&mut self, year: i32) -> Result<(), HolidayError> {
        match &self.rules {
            Some(rules) => rules.populate(year, &mut self.map),
            None => Ok(())
        }
    }

    fn constituents(&self) -> Vec<Constituent> {
        vec![Constituent::new(self.rules.clone(), self.map.manual_entries().to_vec())]
    }

    fn include_sundays(&self) -> bool {
        self.rules.as_ref().is_some_and(|rules| rules.include_sundays())
    }
}

impl PartialEq for HolidaySet {
    fn eq(&self, other: &Self) -> bool {
        self.map == other.map && self.include_sundays() == other.include_sundays()
    }
}
