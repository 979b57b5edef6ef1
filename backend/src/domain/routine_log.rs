//! In-memory daily routine log for one baby.
//!
//! A day's record is created on its first entry and entries are kept sorted
//! by time (sleep by start time). Entries leave a record only through
//! [`RoutineLog::remove_entry`]; a record left empty stays in place so the
//! day keeps its slot until the session ends.

use chrono::{Duration, NaiveDate, NaiveTime};
use log::{debug, info, warn};
use shared::{
    CalendarCell, Concern, DailyRoutineRecord, DailySummary, DiaperEvent, DiaperType, FeedingEvent,
    RoutineEntryKind, SleepEvent, TimelineEntry, TimelineFilter,
};
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::domain::calendar::{CalendarService, DateBounds};
use crate::domain::commands::routine::{LogDiaperCommand, LogFeedingCommand, LogSleepCommand};
use crate::domain::concerns::RoutineConcernEvaluator;
use crate::domain::error::{CareError, CareResult};

/// Minutes between two times of day, wrapping past midnight.
///
/// An end before the start is read as an overnight sleep (22:00 -> 06:15 is
/// 495 minutes), not clamped to a zero-length nap. Equal times give 0.
pub fn sleep_duration_minutes(start: NaiveTime, end: NaiveTime) -> u32 {
    let mut minutes = (end - start).num_minutes();
    if minutes < 0 {
        minutes += Duration::days(1).num_minutes();
    }
    minutes as u32
}

/// "1h 30m"
pub fn format_sleep_duration(minutes: u32) -> String {
    format!("{}h {}m", minutes / 60, minutes % 60)
}

#[derive(Debug, Clone, Default)]
pub struct RoutineLog {
    records: BTreeMap<NaiveDate, DailyRoutineRecord>,
    evaluator: RoutineConcernEvaluator,
}

impl RoutineLog {
    pub fn new(evaluator: RoutineConcernEvaluator) -> Self {
        Self {
            records: BTreeMap::new(),
            evaluator,
        }
    }

    pub fn record_for(&self, date: NaiveDate) -> Option<&DailyRoutineRecord> {
        self.records.get(&date)
    }

    /// The day's record, or an empty one when nothing was logged
    pub fn record_or_empty(&self, date: NaiveDate) -> DailyRoutineRecord {
        self.records
            .get(&date)
            .cloned()
            .unwrap_or_else(|| DailyRoutineRecord::empty(date))
    }

    pub fn has_entries(&self, date: NaiveDate) -> bool {
        self.records.get(&date).is_some_and(|record| !record.is_empty())
    }

    pub fn log_feeding(&mut self, command: LogFeedingCommand) -> FeedingEvent {
        let event = FeedingEvent {
            id: new_entry_id(RoutineEntryKind::Feeding),
            time: command.time,
            feeding_type: command.feeding_type,
            duration_minutes: command.duration_minutes,
            amount_ml: command.amount_ml,
            notes: command.notes,
        };
        info!("Logging feeding {} on {} at {}", event.id, command.date, event.time);

        let record = self.record_mut(command.date);
        record.feeding.push(event.clone());
        record.feeding.sort_by_key(|e| e.time);
        event
    }

    pub fn log_sleep(&mut self, command: LogSleepCommand) -> SleepEvent {
        let event = SleepEvent {
            id: new_entry_id(RoutineEntryKind::Sleep),
            start_time: command.start_time,
            end_time: command.end_time,
            duration_minutes: sleep_duration_minutes(command.start_time, command.end_time),
            quality: command.quality,
            location: command.location,
            notes: command.notes,
        };
        info!(
            "Logging sleep {} on {} from {} to {} ({} min)",
            event.id, command.date, event.start_time, event.end_time, event.duration_minutes
        );

        let record = self.record_mut(command.date);
        record.sleep.push(event.clone());
        record.sleep.sort_by_key(|e| e.start_time);
        event
    }

    pub fn log_diaper(&mut self, command: LogDiaperCommand) -> DiaperEvent {
        let is_wet = command.diaper_type == DiaperType::Wet;
        let event = DiaperEvent {
            id: new_entry_id(RoutineEntryKind::Diaper),
            time: command.time,
            diaper_type: command.diaper_type,
            consistency: if is_wet { None } else { command.consistency },
            color: if is_wet { None } else { command.color },
            notes: command.notes,
        };
        info!("Logging diaper {} on {} at {}", event.id, command.date, event.time);

        let record = self.record_mut(command.date);
        record.diapers.push(event.clone());
        record.diapers.sort_by_key(|e| e.time);
        event
    }

    /// Remove one entry from a day, returning its kind
    pub fn remove_entry(&mut self, date: NaiveDate, entry_id: &str) -> CareResult<RoutineEntryKind> {
        let kind = RoutineEntryKind::parse_id(entry_id)
            .map_err(|_| CareError::EntryNotFound(entry_id.to_string()))?;
        let record = self
            .records
            .get_mut(&date)
            .ok_or_else(|| CareError::EntryNotFound(entry_id.to_string()))?;

        let removed = match kind {
            RoutineEntryKind::Feeding => remove_by_id(&mut record.feeding, entry_id, |e| &e.id),
            RoutineEntryKind::Sleep => remove_by_id(&mut record.sleep, entry_id, |e| &e.id),
            RoutineEntryKind::Diaper => remove_by_id(&mut record.diapers, entry_id, |e| &e.id),
        };

        if removed {
            info!("Removed routine entry {} from {}", entry_id, date);
            Ok(kind)
        } else {
            warn!("Routine entry {} not found on {}", entry_id, date);
            Err(CareError::EntryNotFound(entry_id.to_string()))
        }
    }

    /// All of a day's entries in time order, limited to `filter`
    pub fn timeline(&self, date: NaiveDate, filter: TimelineFilter) -> Vec<TimelineEntry> {
        let Some(record) = self.records.get(&date) else {
            return Vec::new();
        };

        let mut entries: Vec<TimelineEntry> = record
            .feeding
            .iter()
            .cloned()
            .map(TimelineEntry::Feeding)
            .chain(record.sleep.iter().cloned().map(TimelineEntry::Sleep))
            .chain(record.diapers.iter().cloned().map(TimelineEntry::Diaper))
            .filter(|entry| filter.accepts(entry.kind()))
            .collect();

        // Stable sort keeps feeding, sleep, diaper order for equal times
        entries.sort_by_key(|entry| entry.time());
        entries
    }

    pub fn summary(&self, date: NaiveDate) -> DailySummary {
        let Some(record) = self.records.get(&date) else {
            return DailySummary::default();
        };

        DailySummary {
            feeding_count: record.feeding.len(),
            feeding_minutes: record.feeding.iter().map(|e| e.duration_minutes).sum(),
            bottle_ml: record.feeding.iter().filter_map(|e| e.amount_ml).sum(),
            sleep_count: record.sleep.len(),
            sleep_minutes: record.sleep.iter().map(|e| e.duration_minutes).sum(),
            wet_diapers: record
                .diapers
                .iter()
                .filter(|e| matches!(e.diaper_type, DiaperType::Wet | DiaperType::Both))
                .count(),
            soiled_diapers: record
                .diapers
                .iter()
                .filter(|e| e.diaper_type.is_bowel_movement())
                .count(),
        }
    }

    /// Concerns for `date`, looking back one day for bowel movements
    pub fn concerns_for(&self, date: NaiveDate, baby_age_in_days: Option<u32>) -> Vec<Concern> {
        let today = self.record_or_empty(date);
        let yesterday = date.pred_opt().and_then(|d| self.records.get(&d));
        self.evaluator.evaluate(&today, yesterday, baby_age_in_days)
    }

    /// Month grid for the routine calendar with data dots on logged days
    pub fn month_grid(
        &self,
        calendar: &CalendarService,
        view_date: NaiveDate,
        selected: NaiveDate,
        today: NaiveDate,
    ) -> Vec<CalendarCell> {
        debug!("Building routine calendar for {}", calendar.month_title(view_date));
        calendar.build_month_grid_marked(
            view_date,
            Some(selected),
            &DateBounds::unbounded(),
            today,
            |date| self.has_entries(date),
        )
    }

    /// Days with at least one entry, oldest first
    pub fn logged_dates(&self) -> Vec<NaiveDate> {
        self.records
            .iter()
            .filter(|(_, record)| !record.is_empty())
            .map(|(date, _)| *date)
            .collect()
    }

    fn record_mut(&mut self, date: NaiveDate) -> &mut DailyRoutineRecord {
        self.records.entry(date).or_insert_with(|| {
            debug!("Creating routine record for {}", date);
            DailyRoutineRecord::empty(date)
        })
    }
}

fn new_entry_id(kind: RoutineEntryKind) -> String {
    kind.generate_id(&Uuid::new_v4().to_string())
}

fn remove_by_id<T>(entries: &mut Vec<T>, id: &str, id_of: impl Fn(&T) -> &String) -> bool {
    let before = entries.len();
    entries.retain(|entry| id_of(entry) != id);
    entries.len() != before
}
