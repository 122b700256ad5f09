use chrono::{Datelike, NaiveDate};
use log::debug;

use crate::time::datekey::DateKey;
use super::combinedholidayset::{CombinedHolidaySet, Constituent};
use super::holidayerror::HolidayError;
use super::holidaymap::{HolidayMap, HOLIDAY_SEPARATOR};
use super::holidayupdate::HolidayUpdate;

/// Dictionary-like access to holidays keyed by anything date-like.
///
/// Implementors own a [`HolidayMap`] and know how to compute the entries of
/// one year. Every lookup normalizes its key first, which populates the
/// key's year when the map is expanding and the year is missing.
pub trait HolidayCalendar {
    fn holiday_map(&self) -> &HolidayMap;

    fn holiday_map_mut(&mut self) -> &mut HolidayMap;

    /// Merges the rule entries of `year` into the map. Called through
    /// [`populate_year`](HolidayCalendar::populate_year).
    fn populate(&mut self, year: i32) -> Result<(), HolidayError>;

    /// The rule sources this calendar is built from, flattened.
    fn constituents(&self) -> Vec<Constituent>;

    fn include_sundays(&self) -> bool;

    /// Populates `year` once. Returns false when it was already populated.
    fn populate_year(&mut self, year: i32) -> Result<bool, HolidayError> {
        if !self.holiday_map_mut().mark_populated(year) {
            return Ok(false);
        }
        debug!("populating holidays for {}", year);
        if let Err(error) = self.populate(year) {
            self.holiday_map_mut().unmark_populated(year);
            return Err(error);
        }
        Ok(true)
    }

    fn normalize<K: Into<DateKey>>(&mut self, key: K) -> Result<NaiveDate, HolidayError> {
        let d = key.into().normalize()?;
        let map = self.holiday_map();
        if map.expand() && !map.is_populated(d.year()) {
            debug!("expanding to {}", d.year());
            self.populate_year(d.year())?;
        }
        Ok(d)
    }

    fn contains<K: Into<DateKey>>(&mut self, key: K) -> Result<bool, HolidayError> {
        let d = self.normalize(key)?;
        Ok(self.holiday_map().contains(&d))
    }

    fn get<K: Into<DateKey>>(&mut self, key: K) -> Result<Option<String>, HolidayError> {
        let d = self.normalize(key)?;
        Ok(self.holiday_map().get(&d).map(str::to_owned))
    }

    fn get_or<K: Into<DateKey>>(&mut self, key: K, default: &str) -> Result<String, HolidayError> {
        Ok(self.get(key)?.unwrap_or_else(|| default.to_owned()))
    }

    /// The individual names on a date; empty when it is not a holiday.
    fn get_list<K: Into<DateKey>>(&mut self, key: K) -> Result<Vec<String>, HolidayError> {
        Ok(self
            .get(key)?
            .map(|label| {
                label
                    .split(HOLIDAY_SEPARATOR)
                    .filter(|name| !name.is_empty())
                    .map(str::to_owned)
                    .collect()
            })
            .unwrap_or_default())
    }

    fn set<K: Into<DateKey>>(&mut self, key: K, name: &str) -> Result<(), HolidayError> {
        let d = self.normalize(key)?;
        self.holiday_map_mut().insert_manual(d, name);
        Ok(())
    }

    fn update<U: Into<HolidayUpdate>>(&mut self, source: U) -> Result<(), HolidayError> {
        for (key, name) in source.into().into_entries() {
            self.set(key, &name)?;
        }
        Ok(())
    }

    fn append<U: Into<HolidayUpdate>>(&mut self, source: U) -> Result<(), HolidayError> {
        self.update(source)
    }

    fn pop<K: Into<DateKey>>(&mut self, key: K) -> Result<Option<String>, HolidayError> {
        let d = self.normalize(key)?;
        Ok(self.holiday_map_mut().remove(&d))
    }

    /// Annotates each key with its label, `None` for ordinary days.
    fn annotate<K, I>(&mut self, keys: I) -> Result<Vec<(NaiveDate, Option<String>)>, HolidayError>
    where
        K: Into<DateKey>,
        I: IntoIterator<Item = K> {
        keys.into_iter()
            .map(|key| -> Result<(NaiveDate, Option<String>), HolidayError> {
                let d = self.normalize(key)?;
                Ok((d, self.holiday_map().get(&d).map(str::to_owned)))
            })
            .collect()
    }

    fn set_expand(&mut self, expand: bool) {
        self.holiday_map_mut().set_expand(expand);
    }

    /// Switching on recomputes every populated year so observed entries
    /// appear; switching off drops them.
    fn set_observed(&mut self, observed: bool) -> Result<(), HolidayError> {
        let map = self.holiday_map_mut();
        map.set_observed_flag(observed);
        if map.is_empty() {
            return Ok(());
        }

        if observed {
            self.repopulate()
        } else {
            let removed = map.remove_observed();
            debug!("removed {} observed holidays", removed);
            Ok(())
        }
    }

    /// Clears the entries and populates every known year again, then
    /// reapplies the entries set by callers.
    fn repopulate(&mut self) -> Result<(), HolidayError> {
        let years = self.holiday_map_mut().reset();
        for year in years {
            self.populate_year(year)?;
        }
        self.holiday_map_mut().replay_manual_entries();
        Ok(())
    }

    fn union<C: HolidayCalendar>(&self, other: &C) -> Result<CombinedHolidaySet, HolidayError>
    where
        Self: Sized {
        CombinedHolidaySet::from_pair(self, other)
    }

    fn len(&self) -> usize {
        self.holiday_map().len()
    }

    fn is_empty(&self) -> bool {
        self.holiday_map().is_empty()
    }
}
