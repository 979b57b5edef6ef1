//! # Date Picker State Module
//!
//! Interaction state for the modal date picker used by the birthday,
//! vaccination and visit forms.
//!
//! ## States
//! - `Closed` (initial)
//! - `OpenCalendar`: month grid with day selection
//! - `OpenYearSelector` / `OpenMonthSelector`: jump the viewed month
//!
//! ## Invariants
//! - `confirm` is the only transition that emits a date to the caller.
//! - `cancel` restores the tentative selection and the view to the value the
//!   picker was opened with; the caller's value is never touched.
//! - Disabled and blank cells are never selectable.

use chrono::{Datelike, Months, NaiveDate};
use log::{debug, error, info, warn};
use shared::CalendarCell;

use crate::config::PickerConfig;
use crate::domain::age::age_in_years;
use crate::domain::calendar::{CalendarService, DateBounds};
use crate::domain::error::{CareError, CareResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerMode {
    Closed,
    OpenCalendar,
    OpenYearSelector,
    OpenMonthSelector,
}

/// Receiver for a confirmed date.
///
/// A failing `on_change` never takes the picker down: the error is logged and
/// handed to `on_error`.
pub trait DateChangeHandler {
    fn on_change(&mut self, date: NaiveDate) -> anyhow::Result<()>;

    fn on_error(&mut self, _error: &anyhow::Error) {}
}

/// Entry in the month selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthOption {
    pub month: u32,
    pub name: &'static str,
    /// The whole month lies outside the picker bounds for the viewed year
    pub is_disabled: bool,
}

/// Birthday picker range: `earliest_birth_date..=today`
pub fn birthday_bounds(config: &PickerConfig, today: NaiveDate) -> DateBounds {
    DateBounds::new(Some(config.earliest_birth_date), Some(today))
}

/// Vaccination picker range around today
pub fn vaccination_bounds(config: &PickerConfig, today: NaiveDate) -> DateBounds {
    years_around(today, config.vaccination_years_back, config.vaccination_years_ahead)
}

/// Doctor visit picker range around today
pub fn visit_bounds(config: &PickerConfig, today: NaiveDate) -> DateBounds {
    years_around(today, config.visit_years_back, config.visit_years_ahead)
}

/// A span too large for a calendar date leaves that end of the range open
fn years_around(today: NaiveDate, back: u32, ahead: u32) -> DateBounds {
    let span = |years: u32| years.checked_mul(12).map(Months::new);
    DateBounds::new(
        span(back).and_then(|months| today.checked_sub_months(months)),
        span(ahead).and_then(|months| today.checked_add_months(months)),
    )
}

/// Picker button text: "05 Mar 2024 (2 years)", or the placeholder
pub fn format_value(value: Option<NaiveDate>, placeholder: &str, today: NaiveDate) -> String {
    match value {
        Some(date) => format!(
            "{} ({} years)",
            CalendarService::new().format_date_for_display(date),
            age_in_years(date, today)
        ),
        None => placeholder.to_string(),
    }
}

#[derive(Debug, Clone)]
pub struct DatePickerState {
    mode: PickerMode,
    bounds: DateBounds,
    /// Value supplied by the caller at open time
    value: Option<NaiveDate>,
    /// What `cancel` restores to
    seed: NaiveDate,
    temp_date: NaiveDate,
    view_date: NaiveDate,
    calendar: CalendarService,
}

impl DatePickerState {
    pub fn new(bounds: DateBounds, value: Option<NaiveDate>, today: NaiveDate) -> Self {
        let seed = value.unwrap_or(today);
        Self {
            mode: PickerMode::Closed,
            bounds,
            value,
            seed,
            temp_date: seed,
            view_date: seed,
            calendar: CalendarService::new(),
        }
    }

    pub fn mode(&self) -> PickerMode {
        self.mode
    }

    pub fn is_open(&self) -> bool {
        self.mode != PickerMode::Closed
    }

    pub fn bounds(&self) -> &DateBounds {
        &self.bounds
    }

    pub fn value(&self) -> Option<NaiveDate> {
        self.value
    }

    /// Tentative selection, distinct from the committed value until confirmed
    pub fn temp_date(&self) -> NaiveDate {
        self.temp_date
    }

    pub fn view_date(&self) -> NaiveDate {
        self.view_date
    }

    /// Closed -> OpenCalendar, seeding the selection and view from `value`
    /// (or `today` when the caller has no value yet).
    pub fn open(&mut self, value: Option<NaiveDate>, today: NaiveDate) {
        if self.is_open() {
            debug!("Date picker already open, ignoring open");
            return;
        }

        self.value = value;
        self.seed = value.unwrap_or(today);
        self.temp_date = self.seed;
        self.view_date = self.seed;
        self.mode = PickerMode::OpenCalendar;
        debug!("Date picker opened at {}", self.seed);
    }

    pub fn pick_year(&mut self) {
        if self.mode == PickerMode::OpenCalendar {
            self.mode = PickerMode::OpenYearSelector;
        }
    }

    pub fn pick_month(&mut self) {
        if self.mode == PickerMode::OpenCalendar {
            self.mode = PickerMode::OpenMonthSelector;
        }
    }

    /// Leave a selector without changing the view
    pub fn close_selector(&mut self) {
        if matches!(self.mode, PickerMode::OpenYearSelector | PickerMode::OpenMonthSelector) {
            self.mode = PickerMode::OpenCalendar;
        }
    }

    /// Jump the view to `year` and return to the calendar
    pub fn select_year(&mut self, year: i32) -> CareResult<()> {
        if self.mode != PickerMode::OpenYearSelector {
            debug!("Year selection ignored in mode {:?}", self.mode);
            return Ok(());
        }
        if !self.available_years().contains(&year) {
            return Err(CareError::InvalidYear(year));
        }

        self.view_date = self.calendar.with_year_month(self.view_date, year, self.view_date.month())?;
        self.mode = PickerMode::OpenCalendar;
        Ok(())
    }

    /// Jump the view to `month` (1-12) and return to the calendar.
    ///
    /// Months reported disabled by [`month_options`](Self::month_options) are
    /// rejected and the selector stays open.
    pub fn select_month(&mut self, month: u32) -> CareResult<()> {
        if self.mode != PickerMode::OpenMonthSelector {
            debug!("Month selection ignored in mode {:?}", self.mode);
            return Ok(());
        }

        let view_date = self.calendar.with_year_month(self.view_date, self.view_date.year(), month)?;
        let is_disabled = self
            .month_options()
            .iter()
            .any(|option| option.month == month && option.is_disabled);
        if is_disabled {
            warn!("Rejected month {} of {}: no selectable day", month, view_date.year());
            return Err(CareError::InvalidDateRange {
                date: view_date,
                min: self.bounds.min,
                max: self.bounds.max,
            });
        }

        self.view_date = view_date;
        self.mode = PickerMode::OpenCalendar;
        Ok(())
    }

    /// Tap on a grid cell. Blank or disabled cells are a no-op.
    ///
    /// Returns whether the tentative selection changed.
    pub fn select_day(&mut self, cell: &CalendarCell) -> bool {
        if self.mode != PickerMode::OpenCalendar || !cell.is_selectable() {
            return false;
        }
        match cell.date {
            Some(date) if self.bounds.contains(date) => {
                self.temp_date = date;
                true
            }
            _ => false,
        }
    }

    /// Set the tentative selection directly, rejecting out-of-range dates
    pub fn select_date(&mut self, date: NaiveDate) -> CareResult<()> {
        if let Err(err) = self.bounds.check(date) {
            warn!("Rejected date picker selection: {}", err);
            return Err(err);
        }
        self.temp_date = date;
        Ok(())
    }

    pub fn can_go_previous(&self) -> bool {
        self.calendar.can_navigate_previous(self.view_date, &self.bounds)
    }

    pub fn can_go_next(&self) -> bool {
        self.calendar.can_navigate_next(self.view_date, &self.bounds)
    }

    /// Show the previous month if any of it is selectable
    pub fn previous_month(&mut self) -> bool {
        if self.mode != PickerMode::OpenCalendar || !self.can_go_previous() {
            return false;
        }
        self.view_date = self.calendar.previous_month(self.view_date);
        true
    }

    /// Show the next month if any of it is selectable
    pub fn next_month(&mut self) -> bool {
        if self.mode != PickerMode::OpenCalendar || !self.can_go_next() {
            return false;
        }
        self.view_date = self.calendar.next_month(self.view_date);
        true
    }

    /// Grid for the viewed month with the tentative selection highlighted
    pub fn grid(&self, today: NaiveDate) -> Vec<CalendarCell> {
        self.calendar
            .build_month_grid(self.view_date, Some(self.temp_date), &self.bounds, today)
    }

    /// Title above the grid, e.g. "March 2024"
    pub fn title(&self) -> String {
        self.calendar.month_title(self.view_date)
    }

    /// Year selector entries, newest first
    pub fn available_years(&self) -> Vec<i32> {
        let view_year = self.view_date.year();
        let min_year = self.bounds.min.map_or(view_year - 100, |min| min.year());
        let max_year = self.bounds.max.map_or(view_year + 100, |max| max.year());
        (min_year..=max_year).rev().collect()
    }

    /// Month selector entries for the viewed year
    pub fn month_options(&self) -> Vec<MonthOption> {
        let year = self.view_date.year();
        (1..=12)
            .map(|month| {
                let first = NaiveDate::from_ymd_opt(year, month, 1);
                let last = NaiveDate::from_ymd_opt(year, month, self.calendar.days_in_month(month, year));
                let is_disabled = match (first, last) {
                    (Some(first), Some(last)) => {
                        self.bounds.max.is_some_and(|max| first > max)
                            || self.bounds.min.is_some_and(|min| last < min)
                    }
                    _ => true,
                };
                MonthOption {
                    month,
                    name: self.calendar.month_name(month),
                    is_disabled,
                }
            })
            .collect()
    }

    /// OpenCalendar -> Closed, emitting the tentative selection.
    ///
    /// Returns the emitted date, or `None` when the picker was not showing
    /// the calendar.
    pub fn confirm<H: DateChangeHandler>(&mut self, handler: &mut H) -> Option<NaiveDate> {
        if self.mode != PickerMode::OpenCalendar {
            debug!("Confirm ignored in mode {:?}", self.mode);
            return None;
        }

        let date = self.temp_date;
        self.mode = PickerMode::Closed;
        self.value = Some(date);
        self.seed = date;
        info!("Date picker confirmed {}", date);

        if let Err(err) = handler.on_change(date) {
            error!("Date change handler failed for {}: {:#}", date, err);
            handler.on_error(&err);
        }

        Some(date)
    }

    /// Close without emitting; restore the selection and view
    pub fn cancel(&mut self) {
        if !self.is_open() {
            return;
        }
        self.mode = PickerMode::Closed;
        self.temp_date = self.seed;
        self.view_date = self.seed;
        debug!("Date picker cancelled, restored {}", self.seed);
    }
}
