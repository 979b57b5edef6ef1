//! Calendar domain logic for the baby care tracker.
//!
//! This module contains the month-grid generation and date arithmetic shared
//! by every calendar-style widget (birthday picker, vaccination calendar,
//! daily-routine calendar). The UI only lays out the cells returned here,
//! chunked into rows of seven.

use chrono::{Datelike, Local, Months, NaiveDate};
use log::debug;
use serde::{Deserialize, Serialize};
use shared::{CalendarCell, CurrentDateResponse};

use crate::domain::error::{CareError, CareResult};

pub const WEEKDAY_HEADERS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Inclusive range of selectable dates. Either end may be open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DateBounds {
    pub min: Option<NaiveDate>,
    pub max: Option<NaiveDate>,
}

impl DateBounds {
    pub fn new(min: Option<NaiveDate>, max: Option<NaiveDate>) -> Self {
        Self { min, max }
    }

    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.min.map_or(true, |min| date >= min) && self.max.map_or(true, |max| date <= max)
    }

    /// Ok if `date` is selectable, `InvalidDateRange` otherwise
    pub fn check(&self, date: NaiveDate) -> CareResult<()> {
        if self.contains(date) {
            Ok(())
        } else {
            Err(CareError::InvalidDateRange {
                date,
                min: self.min,
                max: self.max,
            })
        }
    }

    /// Pull a date inside the range
    pub fn clamp(&self, date: NaiveDate) -> NaiveDate {
        let date = self.min.map_or(date, |min| date.max(min));
        self.max.map_or(date, |max| date.min(max))
    }
}

/// Calendar service that handles all calendar-related date logic
#[derive(Debug, Clone, Copy, Default)]
pub struct CalendarService;

impl CalendarService {
    pub fn new() -> Self {
        Self
    }

    /// Build the grid for the month containing `view_date`.
    ///
    /// Produces `first_day_of_month` leading blanks followed by one cell per
    /// day. Selection is compared by year/month/day only.
    pub fn build_month_grid(
        &self,
        view_date: NaiveDate,
        selected: Option<NaiveDate>,
        bounds: &DateBounds,
        today: NaiveDate,
    ) -> Vec<CalendarCell> {
        self.build_month_grid_marked(view_date, selected, bounds, today, |_| false)
    }

    /// Same as [`build_month_grid`](Self::build_month_grid), flagging days for
    /// which `has_entries` returns true.
    pub fn build_month_grid_marked<F>(
        &self,
        view_date: NaiveDate,
        selected: Option<NaiveDate>,
        bounds: &DateBounds,
        today: NaiveDate,
        has_entries: F,
    ) -> Vec<CalendarCell>
    where
        F: Fn(NaiveDate) -> bool,
    {
        let year = view_date.year();
        let month = view_date.month();
        let days_in_month = self.days_in_month(month, year);
        let first_day = self.first_day_of_month(month, year);

        debug!(
            "Building grid for {}/{}: {} leading blanks, {} days",
            month, year, first_day, days_in_month
        );

        let mut cells = Vec::with_capacity((first_day + days_in_month) as usize);
        cells.extend((0..first_day).map(|_| CalendarCell::blank()));

        for day in 1..=days_in_month {
            let Some(date) = NaiveDate::from_ymd_opt(year, month, day) else {
                continue;
            };
            cells.push(CalendarCell {
                day: Some(day),
                date: Some(date),
                is_today: date == today,
                is_selected: selected == Some(date),
                is_disabled: !bounds.contains(date),
                has_entries: has_entries(date),
            });
        }

        cells
    }

    /// Chunk a grid into rows of seven for rendering
    pub fn rows(&self, cells: &[CalendarCell]) -> Vec<Vec<CalendarCell>> {
        cells.chunks(7).map(|row| row.to_vec()).collect()
    }

    /// Get the number of days in a given month and year
    pub fn days_in_month(&self, month: u32, year: i32) -> u32 {
        match month {
            2 => if self.is_leap_year(year) { 29 } else { 28 },
            4 | 6 | 9 | 11 => 30,
            _ => 31,
        }
    }

    /// Check if a year is a leap year
    pub fn is_leap_year(&self, year: i32) -> bool {
        year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
    }

    /// Get the first day of month (0 = Sunday, 1 = Monday, etc.)
    pub fn first_day_of_month(&self, month: u32, year: i32) -> u32 {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|date| date.weekday().num_days_from_sunday())
            .unwrap_or(0)
    }

    /// Get the human-readable name for a month number
    pub fn month_name(&self, month: u32) -> &'static str {
        match month {
            1 => "January", 2 => "February", 3 => "March", 4 => "April",
            5 => "May", 6 => "June", 7 => "July", 8 => "August",
            9 => "September", 10 => "October", 11 => "November", 12 => "December",
            _ => "Invalid Month",
        }
    }

    /// Short display form, e.g. "05 Mar 2024"
    pub fn format_date_for_display(&self, date: NaiveDate) -> String {
        date.format("%d %b %Y").to_string()
    }

    /// Header title for a viewed month, e.g. "March 2024"
    pub fn month_title(&self, view_date: NaiveDate) -> String {
        format!("{} {}", self.month_name(view_date.month()), view_date.year())
    }

    /// Navigate to the previous month, clamping the day to the month length
    pub fn previous_month(&self, view_date: NaiveDate) -> NaiveDate {
        view_date.checked_sub_months(Months::new(1)).unwrap_or(view_date)
    }

    /// Navigate to the next month, clamping the day to the month length
    pub fn next_month(&self, view_date: NaiveDate) -> NaiveDate {
        view_date.checked_add_months(Months::new(1)).unwrap_or(view_date)
    }

    /// Whether the month before `view_date` has any day on or after `min`
    pub fn can_navigate_previous(&self, view_date: NaiveDate, bounds: &DateBounds) -> bool {
        match (bounds.min, first_of_month(view_date).pred_opt()) {
            (Some(min), Some(last_of_previous)) => last_of_previous >= min,
            (_, None) => false,
            (None, _) => true,
        }
    }

    /// Whether the month after `view_date` has any day on or before `max`
    pub fn can_navigate_next(&self, view_date: NaiveDate, bounds: &DateBounds) -> bool {
        let first_of_next = first_of_month(self.next_month(view_date));
        if first_of_next <= view_date {
            return false;
        }
        bounds.max.map_or(true, |max| first_of_next <= max)
    }

    /// Move the view to another year/month, keeping the day where possible
    pub fn with_year_month(&self, view_date: NaiveDate, year: i32, month: u32) -> CareResult<NaiveDate> {
        if !(1..=12).contains(&month) {
            return Err(CareError::InvalidMonth(month));
        }
        let day = view_date.day().min(self.days_in_month(month, year));
        NaiveDate::from_ymd_opt(year, month, day).ok_or(CareError::InvalidYear(year))
    }

    /// Get current date information
    pub fn get_current_date(&self) -> CurrentDateResponse {
        let today = Local::now().date_naive();
        CurrentDateResponse {
            month: today.month(),
            year: today.year(),
            day: today.day(),
            formatted_date: self.format_date_for_display(today),
            iso_date: today.format("%Y-%m-%d").to_string(),
        }
    }
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}
