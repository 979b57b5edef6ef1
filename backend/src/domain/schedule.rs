//! # Schedule Book
//!
//! Vaccinations and doctor visits for one baby, held in memory.
//!
//! ## Responsibilities
//! - Record and remove vaccinations and visits
//! - Split them into upcoming and past relative to a given day
//! - Report which days carry an item, for calendar markers
//!
//! An item dated today counts as upcoming.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use shared::{CalendarCell, DoctorVisit, Vaccination};
use std::collections::BTreeSet;
use uuid::Uuid;

use crate::domain::calendar::{CalendarService, DateBounds};
use crate::domain::commands::schedule::{ScheduleVaccinationCommand, ScheduleVisitCommand};
use crate::domain::error::{CareError, CareResult};

/// Times offered as one-tap choices in the visit form
pub const QUICK_VISIT_TIMES: [(u32, u32); 3] = [(9, 0), (12, 0), (15, 0)];

pub fn quick_visit_times() -> Vec<NaiveTime> {
    QUICK_VISIT_TIMES
        .iter()
        .filter_map(|&(hour, minute)| NaiveTime::from_hms_opt(hour, minute, 0))
        .collect()
}

pub fn combine_visit_time(date: NaiveDate, time: NaiveTime) -> NaiveDateTime {
    date.and_time(time)
}

/// Everything scheduled on one day
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySchedule {
    pub vaccinations: Vec<Vaccination>,
    pub visits: Vec<DoctorVisit>,
}

impl DaySchedule {
    pub fn is_empty(&self) -> bool {
        self.vaccinations.is_empty() && self.visits.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ScheduleBook {
    vaccinations: Vec<Vaccination>,
    visits: Vec<DoctorVisit>,
}

impl ScheduleBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule_vaccination(&mut self, command: ScheduleVaccinationCommand) -> Vaccination {
        let vaccination = Vaccination {
            id: format!("vaccination::{}", Uuid::new_v4()),
            name: command.name.trim().to_string(),
            date: command.date,
            notes: command.notes,
        };
        info!("Scheduled vaccination {} '{}' on {}", vaccination.id, vaccination.name, vaccination.date);
        self.vaccinations.push(vaccination.clone());
        vaccination
    }

    pub fn schedule_visit(&mut self, command: ScheduleVisitCommand) -> DoctorVisit {
        let visit = DoctorVisit {
            id: format!("visit::{}", Uuid::new_v4()),
            reason: command.reason.trim().to_string(),
            doctor: command.doctor.trim().to_string(),
            date_time: combine_visit_time(command.date, command.time),
            notes: command.notes,
        };
        info!("Scheduled visit {} '{}' at {}", visit.id, visit.reason, visit.date_time);
        self.visits.push(visit.clone());
        visit
    }

    pub fn remove_vaccination(&mut self, id: &str) -> CareResult<Vaccination> {
        let index = self
            .vaccinations
            .iter()
            .position(|v| v.id == id)
            .ok_or_else(|| not_found(id))?;
        info!("Removed vaccination {}", id);
        Ok(self.vaccinations.remove(index))
    }

    pub fn remove_visit(&mut self, id: &str) -> CareResult<DoctorVisit> {
        let index = self
            .visits
            .iter()
            .position(|v| v.id == id)
            .ok_or_else(|| not_found(id))?;
        info!("Removed visit {}", id);
        Ok(self.visits.remove(index))
    }

    pub fn upcoming_vaccinations(&self, today: NaiveDate) -> Vec<Vaccination> {
        let mut upcoming: Vec<_> = self.vaccinations.iter().filter(|v| v.date >= today).cloned().collect();
        upcoming.sort_by_key(|v| v.date);
        upcoming
    }

    pub fn past_vaccinations(&self, today: NaiveDate) -> Vec<Vaccination> {
        let mut past: Vec<_> = self.vaccinations.iter().filter(|v| v.date < today).cloned().collect();
        past.sort_by_key(|v| v.date);
        past
    }

    pub fn upcoming_visits(&self, today: NaiveDate) -> Vec<DoctorVisit> {
        let mut upcoming: Vec<_> = self.visits.iter().filter(|v| v.date() >= today).cloned().collect();
        upcoming.sort_by_key(|v| v.date_time);
        upcoming
    }

    pub fn past_visits(&self, today: NaiveDate) -> Vec<DoctorVisit> {
        let mut past: Vec<_> = self.visits.iter().filter(|v| v.date() < today).cloned().collect();
        past.sort_by_key(|v| v.date_time);
        past
    }

    /// Items on `date`, visits ordered by time of day
    pub fn items_on(&self, date: NaiveDate) -> DaySchedule {
        let vaccinations = self.vaccinations.iter().filter(|v| v.date == date).cloned().collect();
        let mut visits: Vec<_> = self.visits.iter().filter(|v| v.date() == date).cloned().collect();
        visits.sort_by_key(|v| v.date_time);
        DaySchedule { vaccinations, visits }
    }

    pub fn marked_dates(&self) -> BTreeSet<NaiveDate> {
        self.vaccinations
            .iter()
            .map(|v| v.date)
            .chain(self.visits.iter().map(|v| v.date()))
            .collect()
    }

    /// Month grid with markers on days that carry an item
    pub fn month_grid(
        &self,
        calendar: &CalendarService,
        view_date: NaiveDate,
        selected: Option<NaiveDate>,
        bounds: &DateBounds,
        today: NaiveDate,
    ) -> Vec<CalendarCell> {
        let marked = self.marked_dates();
        calendar.build_month_grid_marked(view_date, selected, bounds, today, |date| marked.contains(&date))
    }
}

fn not_found(id: &str) -> CareError {
    warn!("Schedule item {} not found", id);
    CareError::ScheduleItemNotFound(id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn vaccination(name: &str, on: NaiveDate) -> ScheduleVaccinationCommand {
        ScheduleVaccinationCommand {
            name: name.to_string(),
            date: on,
            notes: String::new(),
        }
    }

    fn visit(reason: &str, on: NaiveDate, at: NaiveTime) -> ScheduleVisitCommand {
        ScheduleVisitCommand {
            reason: reason.to_string(),
            doctor: "Dr. Patel".to_string(),
            date: on,
            time: at,
            notes: String::new(),
        }
    }

    #[test]
    fn test_quick_visit_times() {
        assert_eq!(quick_visit_times(), vec![time(9, 0), time(12, 0), time(15, 0)]);
    }

    #[test]
    fn test_schedule_visit_combines_date_and_time() {
        let mut book = ScheduleBook::new();
        let visit = book.schedule_visit(visit("  Checkup ", date(2024, 6, 3), time(15, 0)));
        assert_eq!(visit.reason, "Checkup");
        assert_eq!(visit.date_time, date(2024, 6, 3).and_hms_opt(15, 0, 0).unwrap());
        assert!(visit.id.starts_with("visit::"));
    }

    #[test]
    fn test_upcoming_and_past_split() {
        let today = date(2024, 6, 10);
        let mut book = ScheduleBook::new();
        book.schedule_vaccination(vaccination("MMR", date(2024, 9, 1)));
        book.schedule_vaccination(vaccination("DTaP", date(2024, 6, 10)));
        book.schedule_vaccination(vaccination("HepB", date(2024, 2, 1)));
        book.schedule_vaccination(vaccination("Rotavirus", date(2024, 4, 1)));

        let upcoming: Vec<_> = book.upcoming_vaccinations(today).into_iter().map(|v| v.name).collect();
        let past: Vec<_> = book.past_vaccinations(today).into_iter().map(|v| v.name).collect();
        assert_eq!(upcoming, vec!["DTaP", "MMR"]);
        assert_eq!(past, vec!["HepB", "Rotavirus"]);
    }

    #[test]
    fn test_visits_sorted_by_date_time() {
        let today = date(2024, 6, 10);
        let mut book = ScheduleBook::new();
        book.schedule_visit(visit("Afternoon", date(2024, 6, 12), time(15, 0)));
        book.schedule_visit(visit("Morning", date(2024, 6, 12), time(9, 0)));
        book.schedule_visit(visit("Earlier", date(2024, 5, 1), time(12, 0)));

        let upcoming: Vec<_> = book.upcoming_visits(today).into_iter().map(|v| v.reason).collect();
        assert_eq!(upcoming, vec!["Morning", "Afternoon"]);
        assert_eq!(book.past_visits(today).len(), 1);
    }

    #[test]
    fn test_remove_items() {
        let mut book = ScheduleBook::new();
        let shot = book.schedule_vaccination(vaccination("MMR", date(2024, 9, 1)));
        let checkup = book.schedule_visit(visit("Checkup", date(2024, 9, 1), time(9, 0)));

        assert_eq!(book.remove_vaccination(&shot.id), Ok(shot.clone()));
        assert_eq!(
            book.remove_vaccination(&shot.id),
            Err(CareError::ScheduleItemNotFound(shot.id.clone()))
        );
        assert_eq!(book.remove_visit(&checkup.id).map(|v| v.id), Ok(checkup.id.clone()));
        assert!(book.marked_dates().is_empty());
    }

    #[test]
    fn test_items_on_and_markers() {
        let mut book = ScheduleBook::new();
        book.schedule_vaccination(vaccination("MMR", date(2024, 6, 12)));
        book.schedule_visit(visit("Checkup", date(2024, 6, 12), time(12, 0)));
        book.schedule_visit(visit("Follow-up", date(2024, 6, 20), time(9, 0)));

        let day = book.items_on(date(2024, 6, 12));
        assert_eq!(day.vaccinations.len(), 1);
        assert_eq!(day.visits.len(), 1);
        assert!(book.items_on(date(2024, 6, 13)).is_empty());

        let marked: Vec<_> = book.marked_dates().into_iter().collect();
        assert_eq!(marked, vec![date(2024, 6, 12), date(2024, 6, 20)]);

        let cells = book.month_grid(
            &CalendarService::new(),
            date(2024, 6, 1),
            None,
            &DateBounds::unbounded(),
            date(2024, 6, 10),
        );
        let days: Vec<_> = cells.iter().filter(|c| c.has_entries).filter_map(|c| c.day).collect();
        assert_eq!(days, vec![12, 20]);
    }
}
