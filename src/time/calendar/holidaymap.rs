use std::collections::{
    BTreeMap,
    BTreeSet,
    btree_map::Entry
};

use chrono::{Datelike, NaiveDate};
use log::trace;

pub const HOLIDAY_SEPARATOR: &str = ", ";
pub const DEFAULT_HOLIDAY_NAME: &str = "Holiday";
pub const OBSERVED_MARKER: &str = "Observed";

/// Label produced by setting `name` on a date already labeled `existing`,
/// or `None` when `existing` stays as it is.
///
/// Names are prepended ("new, old"). When either label is a substring of the
/// other the existing label wins, which makes repeated and overlapping names
/// idempotent.
pub fn merge_label(existing: &str, name: &str) -> Option<String> {
    if existing.contains(name) || name.contains(existing) {
        None
    } else {
        Some(format!("{}{}{}", name, HOLIDAY_SEPARATOR, existing))
    }
}

/// Date to label store together with the configuration it was populated
/// with. Keys are plain calendar dates; key normalization and lazy year
/// population live in [`HolidayCalendar`](super::holidaycalendar::HolidayCalendar).
#[derive(Clone, Debug, Default)]
pub struct HolidayMap {
    entries: BTreeMap<NaiveDate, String>,
    // entries set by callers rather than rules, in the order they were set
    manual_entries: Vec<(NaiveDate, String)>,
    years: BTreeSet<i32>,
    expand: bool,
    observed: bool,
    countries: Vec<String>,
    provinces: Vec<String>
}

impl HolidayMap {
    pub fn new(expand: bool, observed: bool) -> HolidayMap {
        HolidayMap {
            expand,
            observed,
            ..HolidayMap::default()
        }
    }

    pub fn with_countries(mut self, countries: Vec<String>) -> HolidayMap {
        self.countries = countries;
        self
    }

    pub fn with_provinces(mut self, provinces: Vec<String>) -> HolidayMap {
        self.provinces = provinces;
        self
    }

    /// Adds `name` to the label of `d` following [`merge_label`].
    pub fn insert(&mut self, d: NaiveDate, name: &str) {
        match self.entries.entry(d) {
            Entry::Occupied(mut occupied) => {
                if let Some(merged) = merge_label(occupied.get(), name) {
                    trace!("{}: '{}' merged into '{}'", d, name, occupied.get());
                    occupied.insert(merged);
                }
            },
            Entry::Vacant(vacant) => {
                let name = if name.is_empty() { DEFAULT_HOLIDAY_NAME } else { name };
                vacant.insert(name.to_owned());
            }
        }
    }

    pub(crate) fn insert_manual(&mut self, d: NaiveDate, name: &str) {
        self.insert(d, name);
        self.manual_entries.push((d, name.to_owned()));
    }

    pub fn get(&self, d: &NaiveDate) -> Option<&str> {
        self.entries.get(d).map(String::as_str)
    }

    pub fn contains(&self, d: &NaiveDate) -> bool {
        self.entries.contains_key(d)
    }

    pub fn remove(&mut self, d: &NaiveDate) -> Option<String> {
        self.manual_entries.retain(|(manual, _)| manual != d);
        self.entries.remove(d)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NaiveDate, &str)> + '_ {
        self.entries.iter().map(|(d, label)| (d, label.as_str()))
    }

    pub fn in_year(&self, year: i32) -> impl Iterator<Item = (&NaiveDate, &str)> + '_ {
        self.iter().filter(move |(d, _)| d.year() == year)
    }

    pub fn years(&self) -> &BTreeSet<i32> {
        &self.years
    }

    pub fn is_populated(&self, year: i32) -> bool {
        self.years.contains(&year)
    }

    /// Returns false if the year was already marked.
    pub(crate) fn mark_populated(&mut self, year: i32) -> bool {
        self.years.insert(year)
    }

    pub(crate) fn unmark_populated(&mut self, year: i32) {
        self.years.remove(&year);
    }

    /// Drops every entry and populated year, returning the years.
    pub(crate) fn reset(&mut self) -> BTreeSet<i32> {
        self.entries.clear();
        std::mem::take(&mut self.years)
    }

    pub fn manual_entries(&self) -> &[(NaiveDate, String)] {
        &self.manual_entries
    }

    pub(crate) fn replay_manual_entries(&mut self) {
        let manual_entries = std::mem::take(&mut self.manual_entries);
        for (d, name) in manual_entries.iter() {
            self.insert(*d, name);
        }
        self.manual_entries = manual_entries;
    }

    /// Removes entries whose label marks them as observed substitutes.
    pub(crate) fn remove_observed(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, label| !label.contains(OBSERVED_MARKER));
        before - self.entries.len()
    }

    pub fn expand(&self) -> bool {
        self.expand
    }

    pub fn set_expand(&mut self, expand: bool) {
        self.expand = expand;
    }

    pub fn observed(&self) -> bool {
        self.observed
    }

    pub(crate) fn set_observed_flag(&mut self, observed: bool) {
        self.observed = observed;
    }

    pub fn countries(&self) -> &[String] {
        &self.countries
    }

    pub fn provinces(&self) -> &[String] {
        &self.provinces
    }
}

/// Equal entries and equal configuration. How the entries came about
/// (rules or callers) does not matter.
impl PartialEq for HolidayMap {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
            && self.years == other.years
            && self.expand == other.expand
            && self.observed == other.observed
            && self.countries == other.countries
            && self.provinces == other.provinces
    }
}
