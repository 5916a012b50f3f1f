//! Age and age-bucket resolution

use chrono::{Datelike, NaiveDate};

use super::types::{AgeCategory, AgeProfile};

/// Whole years between `birth_date` and `today`, bucketed.
///
/// A missing birth date, or one after `today`, resolves to an unknown age in
/// the adult bucket.
pub fn resolve_age(birth_date: Option<NaiveDate>, today: NaiveDate) -> AgeProfile {
    let age = birth_date.and_then(|birth| {
        let mut years = today.year() - birth.year();
        if (today.month(), today.day()) < (birth.month(), birth.day()) {
            years -= 1;
        }
        u32::try_from(years).ok()
    });

    AgeProfile { age, category: AgeCategory::from_age(age) }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::resolve_age;
    use crate::gifts::types::AgeCategory;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
    }

    #[test]
    fn missing_birth_date_is_unknown_adult() {
        let profile = resolve_age(None, date(2024, 6, 1));
        assert_eq!(profile.age, None);
        assert_eq!(profile.category, AgeCategory::Adult);
    }

    #[test]
    fn birthday_not_yet_reached_subtracts_a_year() {
        let today = date(2024, 6, 15);
        assert_eq!(resolve_age(Some(date(1990, 6, 16)), today).age, Some(33));
        assert_eq!(resolve_age(Some(date(1990, 6, 15)), today).age, Some(34));
        assert_eq!(resolve_age(Some(date(1990, 7, 1)), today).age, Some(33));
    }

    #[test]
    fn category_boundaries_are_strict() {
        let today = date(2024, 3, 10);
        let cases = [
            (12, AgeCategory::Child),
            (13, AgeCategory::Young),
            (29, AgeCategory::Young),
            (30, AgeCategory::Adult),
            (64, AgeCategory::Adult),
            (65, AgeCategory::Senior),
        ];

        for (years, expected) in cases {
            let birth = date(2024 - years, 3, 10);
            let profile = resolve_age(Some(birth), today);
            assert_eq!(profile.age, Some(years as u32));
            assert_eq!(profile.category, expected, "age {years}");
        }
    }

    #[test]
    fn newborn_is_a_child_and_future_dates_are_unknown() {
        let today = date(2024, 3, 10);
        let newborn = resolve_age(Some(today), today);
        assert_eq!(newborn.age, Some(0));
        assert_eq!(newborn.category, AgeCategory::Child);

        let future = resolve_age(Some(date(2025, 1, 1)), today);
        assert_eq!(future.age, None);
        assert_eq!(future.category, AgeCategory::Adult);
    }

    #[test]
    fn leap_day_birthdays_count_from_march_first_in_common_years() {
        let birth = date(2000, 2, 29);
        assert_eq!(resolve_age(Some(birth), date(2023, 2, 28)).age, Some(22));
        assert_eq!(resolve_age(Some(birth), date(2023, 3, 1)).age, Some(23));
    }
}
