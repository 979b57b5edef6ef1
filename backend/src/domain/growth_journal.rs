//! # Growth Journal Module
//!
//! Per-day journal of measurements, mood, notes and milestones.
//!
//! ## Responsibilities
//! - Keep at most one entry per date; saving a day replaces it
//! - Mark journal days on the month calendar
//! - Write milestone achievements back into the day they were reached
//! - Feed journal milestones to the milestone tracker

use chrono::{Datelike, NaiveDate};
use log::{debug, info, warn};
use shared::{CalendarCell, GrowthData, JournalEntry, JournalEntryType, MilestoneAchievement};
use std::collections::BTreeMap;

use crate::domain::calendar::{CalendarService, DateBounds};
use crate::domain::commands::journal::SaveJournalEntryCommand;
use crate::domain::error::{CareError, CareResult};
use crate::domain::milestone_tracker::MilestoneTracker;

#[derive(Debug, Clone, Default)]
pub struct GrowthJournal {
    entries: BTreeMap<NaiveDate, JournalEntry>,
}

impl GrowthJournal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the day's entry, replacing any previous one for that date.
    ///
    /// Blank milestone titles are dropped, repeated ones kept once, and a
    /// growth record with no measurement is stored as `None`.
    pub fn save_entry(&mut self, command: SaveJournalEntryCommand) -> JournalEntry {
        let mut milestones: Vec<String> = Vec::new();
        for title in command.milestones.iter().map(|m| m.trim()).filter(|m| !m.is_empty()) {
            if !milestones.iter().any(|existing| existing == title) {
                milestones.push(title.to_string());
            }
        }

        let mut entry_types: Vec<JournalEntryType> = Vec::new();
        for entry_type in command.entry_types {
            if !entry_types.contains(&entry_type) {
                entry_types.push(entry_type);
            }
        }

        let entry = JournalEntry {
            date: command.date,
            entry_types,
            growth_data: command.growth_data.filter(|data| !data.is_empty()),
            milestones,
            notes: command.notes,
            mood: command.mood,
        };

        let replaced = self.entries.insert(entry.date, entry.clone()).is_some();
        info!(
            "Saved journal entry for {} ({} milestones, replaced={})",
            entry.date,
            entry.milestones.len(),
            replaced
        );
        entry
    }

    pub fn entry_for(&self, date: NaiveDate) -> Option<&JournalEntry> {
        self.entries.get(&date)
    }

    pub fn has_entry(&self, date: NaiveDate) -> bool {
        self.entries.contains_key(&date)
    }

    pub fn remove_entry(&mut self, date: NaiveDate) -> CareResult<JournalEntry> {
        match self.entries.remove(&date) {
            Some(entry) => {
                info!("Removed journal entry for {}", date);
                Ok(entry)
            }
            None => {
                warn!("No journal entry to remove on {}", date);
                Err(CareError::JournalEntryNotFound(date))
            }
        }
    }

    /// All entries, oldest first
    pub fn entries(&self) -> impl Iterator<Item = &JournalEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in the month containing `view_date`, oldest first
    pub fn entries_in_month(&self, view_date: NaiveDate) -> Vec<&JournalEntry> {
        self.entries
            .values()
            .filter(|entry| entry.date.year() == view_date.year() && entry.date.month() == view_date.month())
            .collect()
    }

    /// Days that carry measurements, oldest first
    pub fn growth_history(&self) -> Vec<(NaiveDate, GrowthData)> {
        self.entries
            .values()
            .filter_map(|entry| entry.growth_data.map(|data| (entry.date, data)))
            .collect()
    }

    /// Record a milestone achievement on the day it was reached.
    ///
    /// Creates a milestone entry for that day when none exists. A title
    /// already listed that day is left alone; otherwise the title is added
    /// and non-blank notes are appended as "<title>: <notes>".
    pub fn record_milestone(&mut self, achievement: &MilestoneAchievement) -> &JournalEntry {
        let title = achievement.text.as_str();
        let entry = self.entries.entry(achievement.date).or_insert_with(|| {
            debug!("Creating journal entry for milestone day {}", achievement.date);
            JournalEntry {
                entry_types: vec![JournalEntryType::Milestone],
                ..JournalEntry::new(achievement.date)
            }
        });

        if entry.milestones.iter().any(|existing| existing == title) {
            debug!("Milestone '{}' already in journal on {}", title, achievement.date);
            return entry;
        }

        entry.milestones.push(title.to_string());
        if !entry.has_type(JournalEntryType::Milestone) {
            entry.entry_types.push(JournalEntryType::Milestone);
        }

        let notes = achievement.notes.trim();
        if !notes.is_empty() {
            let line = format!("{}: {}", title, notes);
            if entry.notes.is_empty() {
                entry.notes = line;
            } else {
                entry.notes.push('\n');
                entry.notes.push_str(&line);
            }
        }

        info!("Wrote milestone '{}' to journal on {}", title, achievement.date);
        entry
    }

    /// Achievements matched from every journal day
    pub fn milestone_tracker(&self) -> MilestoneTracker {
        MilestoneTracker::from_journal(self.entries.values())
    }

    /// Month grid for the journal calendar with markers on journal days
    pub fn month_grid(
        &self,
        calendar: &CalendarService,
        view_date: NaiveDate,
        selected: Option<NaiveDate>,
        today: NaiveDate,
    ) -> Vec<CalendarCell> {
        debug!("Building journal calendar for {}", calendar.month_title(view_date));
        calendar.build_month_grid_marked(view_date, selected, &DateBounds::unbounded(), today, |date| {
            self.has_entry(date)
        })
    }
}
