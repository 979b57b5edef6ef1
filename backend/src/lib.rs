//! # Baby Care Backend
//!
//! Date, age, milestone and daily-routine logic for the baby care tracker.
//! Every service here is synchronous and operates on caller-owned state; the
//! UI layer maps its form inputs to the commands in [`domain::commands`] and
//! renders the DTOs defined in the `shared` crate.

use anyhow::Result;
use chrono::NaiveDate;
use log::info;
use shared::{Concern, MilestoneAchievement, MilestoneItem};
use std::path::Path;

pub mod config;
pub mod domain;
pub mod logging;

pub use config::CareConfig;
pub use domain::CareError;

/// Main backend struct that holds one baby's services
#[derive(Debug, Clone)]
pub struct CareBackend {
    pub config: CareConfig,
    pub baby: Option<domain::Baby>,
    pub calendar_service: domain::CalendarService,
    pub routine_log: domain::RoutineLog,
    pub growth_journal: domain::GrowthJournal,
    pub schedule_book: domain::ScheduleBook,
    pub milestone_tracker: domain::MilestoneTracker,
}

impl CareBackend {
    /// Create a backend with all services wired to `config`
    pub fn new(config: CareConfig) -> Self {
        let evaluator = domain::RoutineConcernEvaluator::new(config.concerns);
        Self {
            config,
            baby: None,
            calendar_service: domain::CalendarService::new(),
            routine_log: domain::RoutineLog::new(evaluator),
            growth_journal: domain::GrowthJournal::new(),
            schedule_book: domain::ScheduleBook::new(),
            milestone_tracker: domain::MilestoneTracker::new(),
        }
    }

    /// Create a backend from a YAML config file, using defaults if it is missing
    pub fn from_config_path(path: impl AsRef<Path>) -> Result<Self> {
        let config = CareConfig::load_or_default(path)?;
        Ok(Self::new(config))
    }

    pub fn set_baby(&mut self, name: impl Into<String>, birth_date: NaiveDate) -> &domain::Baby {
        let baby = domain::Baby::new(name, birth_date);
        info!("Tracking baby {} ({}) born {}", baby.name, baby.id, baby.birth_date);
        self.baby.insert(baby)
    }

    /// Mark a checklist milestone and write it into that day's journal entry
    pub fn mark_milestone(
        &mut self,
        item: MilestoneItem,
        date: NaiveDate,
        notes: impl Into<String>,
    ) -> MilestoneAchievement {
        let achievement = self.milestone_tracker.mark_achieved(item, date, notes).clone();
        self.growth_journal.record_milestone(&achievement);
        achievement
    }

    /// Rebuild milestone achievements from the journal, keeping checklist marks
    pub fn sync_journal_milestones(&mut self) {
        let from_journal = self.growth_journal.milestone_tracker();
        self.milestone_tracker.merge_journal(from_journal);
    }

    /// Routine concerns for `date`, using the baby's age on that day
    pub fn routine_concerns(&self, date: NaiveDate) -> Vec<Concern> {
        let age_in_days = self.baby.as_ref().map(|baby| baby.age_in_days(date));
        self.routine_log.concerns_for(date, age_in_days)
    }

    /// Picker for the baby's birthday, bounded by the configured earliest date and today
    pub fn birthday_picker(&self, today: NaiveDate) -> domain::DatePickerState {
        let bounds = domain::date_picker::birthday_bounds(&self.config.picker, today);
        let value = self.baby.as_ref().map(|baby| baby.birth_date);
        domain::DatePickerState::new(bounds, value, today)
    }

    pub fn vaccination_picker(&self, today: NaiveDate) -> domain::DatePickerState {
        let bounds = domain::date_picker::vaccination_bounds(&self.config.picker, today);
        domain::DatePickerState::new(bounds, None, today)
    }

    pub fn visit_picker(&self, today: NaiveDate) -> domain::DatePickerState {
        let bounds = domain::date_picker::visit_bounds(&self.config.picker, today);
        domain::DatePickerState::new(bounds, None, today)
    }
}

impl Default for CareBackend {
    fn default() -> Self {
        Self::new(CareConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConcernThresholds;
    use crate::domain::commands::routine::LogFeedingCommand;
    use chrono::NaiveTime;
    use shared::{ConcernType, FeedingType, MilestoneCategory};
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_concerns_without_baby_skip_feeding_rule() {
        let backend = CareBackend::default();
        let types: Vec<_> = backend
            .routine_concerns(date(2024, 4, 10))
            .into_iter()
            .map(|c| c.concern_type)
            .collect();
        assert_eq!(types, vec![ConcernType::Constipation]);
    }

    #[test]
    fn test_concerns_use_baby_age() {
        let mut backend = CareBackend::default();
        backend.set_baby("  Ada ", date(2024, 3, 1));
        assert_eq!(backend.baby.as_ref().unwrap().name, "Ada");

        let types: Vec<_> = backend
            .routine_concerns(date(2024, 4, 10))
            .into_iter()
            .map(|c| c.concern_type)
            .collect();
        assert_eq!(types, vec![ConcernType::Constipation, ConcernType::Feeding]);
    }

    #[test]
    fn test_config_thresholds_reach_routine_log() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("care.yaml");
        let mut config = CareConfig::default();
        config.concerns = ConcernThresholds {
            newborn_age_days: 90,
            min_daily_feedings: 1,
        };
        config.save(&path).unwrap();

        let mut backend = CareBackend::from_config_path(&path).unwrap();
        backend.set_baby("Ada", date(2024, 4, 1));
        backend.routine_log.log_feeding(LogFeedingCommand {
            date: date(2024, 4, 10),
            time: NaiveTime::from_hms_opt(7, 0, 0).unwrap(),
            feeding_type: FeedingType::Breast,
            duration_minutes: 20,
            amount_ml: None,
            notes: String::new(),
        });

        let types: Vec<_> = backend
            .routine_concerns(date(2024, 4, 10))
            .into_iter()
            .map(|c| c.concern_type)
            .collect();
        assert_eq!(types, vec![ConcernType::Constipation]);
    }

    #[test]
    fn test_birthday_picker_bounds() {
        let mut backend = CareBackend::default();
        let today = date(2024, 6, 15);
        backend.set_baby("Ada", date(2024, 3, 1));

        let picker = backend.birthday_picker(today);
        assert_eq!(picker.value(), Some(date(2024, 3, 1)));
        assert_eq!(picker.bounds().max, Some(today));
        assert_eq!(picker.bounds().min, Some(date(1900, 1, 1)));
        assert!(!backend.vaccination_picker(today).is_open());
    }

    #[test]
    fn test_mark_milestone_writes_journal() {
        let mut backend = CareBackend::default();
        let item = MilestoneItem {
            text: "Walks alone".to_string(),
            category: MilestoneCategory::Physical,
        };
        let achievement = backend.mark_milestone(item, date(2024, 9, 2), "Across the room");

        assert_eq!(achievement.milestone_id, "physical_walks_alone");
        let entry = backend.growth_journal.entry_for(date(2024, 9, 2)).unwrap();
        assert_eq!(entry.milestones, vec!["Walks alone".to_string()]);
        assert_eq!(entry.notes, "Walks alone: Across the room");
    }

    #[test]
    fn test_sync_journal_keeps_checklist_marks() {
        let mut backend = CareBackend::default();
        backend.mark_milestone(
            MilestoneItem {
                text: "Walks alone".to_string(),
                category: MilestoneCategory::Physical,
            },
            date(2024, 9, 2),
            "",
        );
        backend.growth_journal.save_entry(crate::domain::commands::journal::SaveJournalEntryCommand {
            date: date(2024, 3, 5),
            entry_types: Vec::new(),
            growth_data: None,
            milestones: vec!["cooing sounds".to_string()],
            notes: String::new(),
            mood: shared::Mood::Happy,
        });

        backend.sync_journal_milestones();
        let tracker = &backend.milestone_tracker;
        assert_eq!(tracker.len(), 3);
        assert_eq!(
            tracker.get("physical_walks_alone").map(|a| a.source),
            Some(shared::AchievementSource::Milestone)
        );
        assert!(tracker.is_achieved(MilestoneCategory::Communication, "Makes cooing sounds"));
    }
}
