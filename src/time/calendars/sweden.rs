use std::sync::Arc;

use chrono::{NaiveDate, Weekday};

use crate::time::calendar::holidayerror::HolidayError;
use crate::time::calendar::holidayrules::HolidayRules;
use crate::time::calendar::holidayset::HolidaySetOptions;
use crate::time::recurringholiday::easterrelatedholiday::{EasterRelatedHoliday, EasterType};
use crate::time::recurringholiday::fixeddateholiday::FixedDateHoliday;
use crate::time::recurringholiday::recurringholiday::YearRange;
use crate::time::recurringholiday::rulebook::RuleBook;
use crate::time::recurringholiday::weekdayonorafterholiday::WeekdayOnOrAfterHoliday;
use crate::time::utility::ymd;

pub const COUNTRY_CODE: &str = "SE";
pub const SUNDAY_NAME: &str = "Söndag";

fn easter(name: &str, shift_days: i64, weekday: Weekday) -> EasterRelatedHoliday {
    EasterRelatedHoliday::new(name, EasterType::Western, shift_days).expecting(weekday)
}

/// Swedish public holidays, optionally with every Sunday of the year.
///
/// The order of the rules is the order names end up in merged labels, so
/// a Sunday Easter reads "Påskdagen, Söndag".
#[derive(Clone, Debug)]
pub struct Sweden {
    rule_book: RuleBook
}

impl Sweden {
    pub fn new(include_sundays: bool) -> Sweden {
        let mut rule_book = RuleBook::new(COUNTRY_CODE);
        if include_sundays {
            rule_book = rule_book.with_sundays(SUNDAY_NAME);
        }

        let rule_book = rule_book
            .with_holiday(FixedDateHoliday::new("Nyårsdagen", 1, 1))
            .with_holiday(FixedDateHoliday::new("Trettondedag jul", 1, 6))
            .with_holiday(FixedDateHoliday::new("Första maj", 5, 1).with_years(YearRange::since(1939)))
            .with_holiday(FixedDateHoliday::new("Sveriges nationaldag", 6, 6).with_years(YearRange::since(2005)))
            .with_holiday(FixedDateHoliday::new("Julafton", 12, 24))
            .with_holiday(FixedDateHoliday::new("Juldagen", 12, 25))
            .with_holiday(FixedDateHoliday::new("Annandag jul", 12, 26))
            .with_holiday(FixedDateHoliday::new("Nyårsafton", 12, 31))
            // validated only
            .with_check(easter("Skärtorsdagen", -3, Weekday::Thu))
            .with_check(easter("Påskafton", -1, Weekday::Sat))
            .with_holiday(easter("Långfredagen", -2, Weekday::Fri))
            .with_holiday(easter("Påskdagen", 0, Weekday::Sun))
            .with_holiday(easter("Annandag påsk", 1, Weekday::Mon))
            .with_holiday(easter("Kristi himmelsfärdsdag", 39, Weekday::Thu))
            .with_holiday(easter("Pingstdagen", 49, Weekday::Sun))
            .with_holiday(easter("Annandag pingst", 50, Weekday::Mon).with_years(YearRange::until(2004)))
            .with_holiday(WeekdayOnOrAfterHoliday::new("Midsommarafton", 6, 19, Weekday::Fri))
            .with_holiday(
                WeekdayOnOrAfterHoliday::new("Midsommardagen", 6, 20, Weekday::Sat).with_years(YearRange::since(1953))
            )
            .with_holiday(FixedDateHoliday::new("Midsommardagen", 6, 24).with_years(YearRange::until(1952)))
            .with_holiday(WeekdayOnOrAfterHoliday::new("Alla helgons dag", 10, 31, Weekday::Sat))
            .with_holiday(FixedDateHoliday::new("Jungfru Marie bebådelsedag", 3, 25).with_years(YearRange::until(1953)));

        Sweden { rule_book }
    }

    pub fn rule_book(&self) -> &RuleBook {
        &self.rule_book
    }
}

impl HolidayRules for Sweden {
    fn country(&self) -> &str {
        COUNTRY_CODE
    }

    fn include_sundays(&self) -> bool {
        self.rule_book.include_sundays()
    }

    fn holidays(&self, year: i32, observed: bool) -> Result<Vec<(NaiveDate, String)>, HolidayError> {
        ymd(year, 1, 1)?;
        self.rule_book.holidays(year, observed)
    }
}

/// Registry constructor for Sweden.
pub fn sweden_rules(options: &HolidaySetOptions) -> Arc<dyn HolidayRules> {
    Arc::new(Sweden::new(options.include_sundays))
}

#[cfg(test)]
mod tests {
    use crate::time::calendar::holidaymap::HolidayMap;
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn populated(year: i32, include_sundays: bool) -> HolidayMap {
        let mut map = HolidayMap::new(false, false);
        Sweden::new(include_sundays).populate(year, &mut map).unwrap();
        map
    }

    #[test]
    fn holidays_of_2018() {
        let map = populated(2018, false);
        let expected = [
            (date(2018, 1, 1), "Nyårsdagen"),
            (date(2018, 1, 6), "Trettondedag jul"),
            (date(2018, 3, 30), "Långfredagen"),
            (date(2018, 4, 1), "Påskdagen"),
            (date(2018, 4, 2), "Annandag påsk"),
            (date(2018, 5, 1), "Första maj"),
            (date(2018, 5, 10), "Kristi himmelsfärdsdag"),
            (date(2018, 5, 20), "Pingstdagen"),
            (date(2018, 6, 6), "Sveriges nationaldag"),
            (date(2018, 6, 22), "Midsommarafton"),
            (date(2018, 6, 23), "Midsommardagen"),
            (date(2018, 11, 3), "Alla helgons dag"),
            (date(2018, 12, 24), "Julafton"),
            (date(2018, 12, 25), "Juldagen"),
            (date(2018, 12, 26), "Annandag jul"),
            (date(2018, 12, 31), "Nyårsafton")
        ];
        let actual: Vec<(NaiveDate, &str)> = map.iter().map(|(d, label)| (*d, label)).collect();
        assert_eq!(actual, expected.to_vec());
    }

    #[test]
    fn sundays_merge_behind_holiday_names() {
        let map = populated(2018, true);
        assert_eq!(map.len(), 66);
        assert_eq!(map.get(&date(2018, 4, 1)), Some("Påskdagen, Söndag"));
        assert_eq!(map.get(&date(2018, 5, 20)), Some("Pingstdagen, Söndag"));
        assert_eq!(map.get(&date(2018, 1, 7)), Some("Söndag"));
    }

    #[test]
    fn first_of_may_since_1939() {
        assert!(!populated(1938, false).contains(&date(1938, 5, 1)));
        assert_eq!(populated(1939, false).get(&date(1939, 5, 1)), Some("Första maj"));
    }

    #[test]
    fn national_day_replaces_whit_monday() {
        let map_2004 = populated(2004, false);
        assert_eq!(map_2004.get(&date(2004, 5, 31)), Some("Annandag pingst"));
        assert!(!map_2004.contains(&date(2004, 6, 6)));

        let map_2005 = populated(2005, false);
        assert!(!map_2005.contains(&date(2005, 5, 16)));
        assert_eq!(map_2005.get(&date(2005, 6, 6)), Some("Sveriges nationaldag"));
    }

    #[test]
    fn midsummer_day_reform_of_1953() {
        assert_eq!(populated(1952, false).get(&date(1952, 6, 24)), Some("Midsommardagen"));
        assert_eq!(populated(1953, false).get(&date(1953, 6, 20)), Some("Midsommardagen"));
        assert!(!populated(1953, false).contains(&date(1953, 6, 24)));
        // both fall on June 24th
        assert_eq!(
            populated(1938, false).get(&date(1938, 6, 24)),
            Some("Midsommardagen, Midsommarafton")
        );
    }

    #[test]
    fn lady_day_until_1953() {
        assert_eq!(
            populated(1953, false).get(&date(1953, 3, 25)),
            Some("Jungfru Marie bebådelsedag")
        );
        assert!(!populated(1954, false).contains(&date(1954, 3, 25)));
        assert_eq!(populated(1954, false).len(), 16);
    }

    #[test]
    fn no_easter_outside_algorithm_range() {
        let map = populated(1500, false);
        assert!(map.contains(&date(1500, 1, 1)));
        let moving = ["Långfredagen", "Påskdagen", "Annandag påsk", "Kristi himmelsfärdsdag", "Pingstdagen"];
        assert!(map.iter().all(|(_, label)| moving.iter().all(|name| !label.contains(name))));
    }

    #[test]
    fn year_out_of_range() {
        let mut map = HolidayMap::new(false, false);
        assert_eq!(
            Sweden::new(false).populate(i32::MAX, &mut map),
            Err(HolidayError::YearOutOfRange(i32::MAX))
        );
        assert!(map.is_empty());
    }

    #[test]
    fn registry_constructor() {
        let rules = sweden_rules(&HolidaySetOptions::default().include_sundays(false));
        assert_eq!(rules.country(), "SE");
        assert!(!rules.include_sundays());
    }
}
