//! Age calculations for a baby's birth date.
//!
//! All functions take "now" explicitly so they stay pure; screens pass
//! `chrono::Local::now().date_naive()`.

use chrono::{Datelike, NaiveDate};

/// Whole calendar months elapsed between `birth_date` and `now`.
///
/// A birthday that has not been reached yet this month does not count, so
/// 2024-01-31 -> 2024-03-01 is one month. Birth dates in the future yield 0.
pub fn age_in_months(birth_date: NaiveDate, now: NaiveDate) -> u32 {
    let mut months = (now.year() - birth_date.year()) * 12
        + (now.month() as i32 - birth_date.month() as i32);

    if now.day() < birth_date.day() {
        months -= 1;
    }

    months.max(0) as u32
}

/// Days elapsed since birth, never negative
pub fn age_in_days(birth_date: NaiveDate, now: NaiveDate) -> u32 {
    (now - birth_date).num_days().max(0) as u32
}

/// Whole years elapsed since birth, with the same tie-break as months
pub fn age_in_years(birth_date: NaiveDate, now: NaiveDate) -> u32 {
    age_in_months(birth_date, now) / 12
}

/// Human-readable age: "5 months", "1 year", "2 years, 3 months"
pub fn format_age(age_in_months: u32) -> String {
    if age_in_months < 12 {
        return plural(age_in_months, "month");
    }

    let years = age_in_months / 12;
    let remaining_months = age_in_months % 12;

    if remaining_months == 0 {
        plural(years, "year")
    } else {
        format!("{}, {}", plural(years, "year"), plural(remaining_months, "month"))
    }
}

fn plural(count: u32, unit: &str) -> String {
    if count == 1 {
        format!("{} {}", count, unit)
    } else {
        format!("{} {}s", count, unit)
    }
}
