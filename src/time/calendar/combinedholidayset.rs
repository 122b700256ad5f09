use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{Datelike, NaiveDate};

use super::holidaycalendar::HolidayCalendar;
use super::holidayerror::HolidayError;
use super::holidaymap::HolidayMap;
use super::holidayrules::HolidayRules;

/// One source of a combined holiday set: a rule set, the entries callers
/// set on it by hand, or both.
#[derive(Clone, Debug)]
pub struct Constituent {
    rules: Option<Arc<dyn HolidayRules>>,
    manual_entries: Vec<(NaiveDate, String)>
}

impl Constituent {
    pub fn new(rules: Option<Arc<dyn HolidayRules>>, manual_entries: Vec<(NaiveDate, String)>) -> Constituent {
        Constituent { rules, manual_entries }
    }

    pub fn rules(&self) -> Option<&Arc<dyn HolidayRules>> {
        self.rules.as_ref()
    }

    pub fn manual_entries(&self) -> &[(NaiveDate, String)] {
        &self.manual_entries
    }

    pub fn include_sundays(&self) -> bool {
        self.rules.as_ref().is_some_and(|rules| rules.include_sundays())
    }

    /// Computes this constituent's entries of `year` into `map`, the way the
    /// constituent would hold them on its own.
    pub fn populate_into(&self, year: i32, map: &mut HolidayMap) -> Result<(), HolidayError> {
        if let Some(rules) = &self.rules {
            rules.populate(year, map)?;
        }
        for (d, name) in self.manual_entries.iter().filter(|(d, _)| d.year() == year) {
            map.insert(*d, name);
        }
        Ok(())
    }
}

/// Tags of a union: whichever side has them, or both when they differ.
fn combine_tags(t1: &[String], t2: &[String]) -> Vec<String> {
    if t1.is_empty() {
        t2.to_vec()
    } else if t2.is_empty() || t1 == t2 {
        t1.to_vec()
    } else {
        t1.iter().chain(t2.iter()).cloned().collect()
    }
}

/// Union of several holiday sets.
///
/// A year is populated by walking the constituents from last to first. Each
/// one is computed on its own into a scratch map whose labels are then merged
/// in, so a name from an earlier constituent extends the label of a later one
/// rather than replacing it.
#[derive(Clone, Debug)]
pub struct CombinedHolidaySet {
    map: HolidayMap,
    constituents: Vec<Constituent>
}

impl CombinedHolidaySet {
    pub fn new<I: IntoIterator<Item = i32>>(
        constituents: Vec<Constituent>,
        years: I,
        expand: bool,
        observed: bool,
        countries: Vec<String>,
        provinces: Vec<String>
    ) -> Result<CombinedHolidaySet, HolidayError> {
        let map = HolidayMap::new(expand, observed)
            .with_countries(countries)
            .with_provinces(provinces);
        let mut combined = CombinedHolidaySet { map, constituents };
        for year in years {
            combined.populate_year(year)?;
        }
        Ok(combined)
    }

    /// Years and flags of both sides are OR-ed; years holding entries set by
    /// hand are populated as well.
    pub fn from_pair<C1, C2>(c1: &C1, c2: &C2) -> Result<CombinedHolidaySet, HolidayError>
    where
        C1: HolidayCalendar,
        C2: HolidayCalendar {
        let (m1, m2) = (c1.holiday_map(), c2.holiday_map());

        let mut constituents = c1.constituents();
        constituents.extend(c2.constituents());

        let mut years: BTreeSet<i32> = m1.years() | m2.years();
        years.extend(
            constituents
                .iter()
                .flat_map(|c| c.manual_entries().iter().map(|(d, _)| d.year()))
        );

        CombinedHolidaySet::new(
            constituents,
            years,
            m1.expand() || m2.expand(),
            m1.observed() || m2.observed(),
            combine_tags(m1.countries(), m2.countries()),
            combine_tags(m1.provinces(), m2.provinces())
        )
    }

    /// The sets this union was built from, as stored.
    pub fn members(&self) -> &[Constituent] {
        &self.constituents
    }
}

impl HolidayCalendar for CombinedHolidaySet {
    fn holiday_map(&self) -> &HolidayMap {
        &self.map
    }

    fn holiday_map_mut(&mut self) -> &mut HolidayMap {
        &mut self.map
    }

    fn populate(&mut self, year: i32) -> Result<(), HolidayError> {
        for constituent in self.constituents.iter().rev() {
            let mut scratch = HolidayMap::new(false, self.map.observed());
            constituent.populate_into(year, &mut scratch)?;
            for (d, label) in scratch.iter() {
                self.map.insert(*d, label);
            }
        }
        Ok(())
    }

    /// Entries set by hand on the union come first: they were applied last.
    fn constituents(&self) -> Vec<Constituent> {
        let mut constituents = Vec::with_capacity(self.constituents.len() + 1);
        if !self.map.manual_entries().is_empty() {
            constituents.push(Constituent::new(None, self.map.manual_entries().to_vec()));
        }
        constituents.extend(self.constituents.iter().cloned());
        constituents
    }

    fn include_sundays(&self) -> bool {
        self.constituents.iter().any(Constituent::include_sundays)
    }
}

impl PartialEq for CombinedHolidaySet {
    fn eq(&self, other: &Self) -> bool {
        self.map == other.map && self.include_sundays() == other.include_sundays()
    }
}
