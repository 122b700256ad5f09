use std::collections::HashMap;
use std::sync::Arc;

use log::debug;

use crate::time::calendars::sweden::sweden_rules;
use super::holidayerror::HolidayError;
use super::holidayrules::HolidayRules;
use super::holidayset::{HolidaySet, HolidaySetOptions};

pub type HolidayRulesConstructor = fn(&HolidaySetOptions) -> Arc<dyn HolidayRules>;

/// Registry from country identifier to rule set constructor.
///
/// The default registry knows Sweden under "SE" and "Sweden".
#[derive(Clone, Debug)]
pub struct HolidaySetFactory {
    constructors: HashMap<String, HolidayRulesConstructor>
}

impl HolidaySetFactory {
    /// An empty registry.
    pub fn new() -> HolidaySetFactory {
        HolidaySetFactory { constructors: HashMap::new() }
    }

    pub fn register(&mut self, country: &str, constructor: HolidayRulesConstructor) {
        self.constructors.insert(country.to_owned(), constructor);
    }

    pub fn is_registered(&self, country: &str) -> bool {
        self.constructors.contains_key(country)
    }

    /// Registered identifiers, sorted.
    pub fn countries(&self) -> Vec<&str> {
        let mut countries: Vec<&str> = self.constructors.keys().map(String::as_str).collect();
        countries.sort_unstable();
        countries
    }

    pub fn rules(&self, country: &str, options: &HolidaySetOptions) -> Result<Arc<dyn HolidayRules>, HolidayError> {
        self.constructors
            .get(country)
            .map(|constructor| constructor(options))
            .ok_or_else(|| HolidayError::UnknownCountry(country.to_owned()))
    }

    pub fn create(&self, country: &str, options: &HolidaySetOptions) -> Result<HolidaySet, HolidayError> {
        let rules = self.rules(country, options)?;
        debug!("creating holiday set for {}", country);
        HolidaySet::new(Some(rules), options)
    }
}

impl Default for HolidaySetFactory {
    fn default() -> Self {
        let mut factory = HolidaySetFactory::new();
        factory.register("SE", sweden_rules);
        factory.register("Sweden", sweden_rules);
        factory
    }
}
