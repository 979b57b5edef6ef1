//! Milestone checklist progress and journal-driven achievements.
//!
//! Journal milestones are free text. They are matched to catalog items with a
//! case-insensitive substring test in either direction, which is approximate:
//! short or generic phrases can match unrelated items and paraphrases can
//! miss. Callers that need exact matches should mark milestones by ID.

use chrono::NaiveDate;
use log::{debug, info};
use shared::{AchievementSource, JournalEntry, MilestoneAchievement, MilestoneCategory, MilestoneItem};
use std::collections::{BTreeMap, HashSet};

use crate::domain::milestones::{self, MilestoneCatalogEntry};

/// Completed vs. total count for one slice of the checklist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProgressCount {
    pub completed: usize,
    pub total: usize,
}

impl ProgressCount {
    /// Rounded completion percentage, 0 for an empty list
    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        ((self.completed as f64 / self.total as f64) * 100.0).round() as u32
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MilestoneProgress {
    pub overall: ProgressCount,
    pub by_category: BTreeMap<MilestoneCategory, ProgressCount>,
}

/// Tally completed checklist IDs against one catalog entry
pub fn progress(entry: &MilestoneCatalogEntry, completed_ids: &HashSet<String>) -> MilestoneProgress {
    let mut overall = ProgressCount::default();
    let mut by_category = BTreeMap::new();

    for category in MilestoneCategory::ALL {
        let list = entry.milestones(category);
        let completed = list
            .iter()
            .filter(|text| completed_ids.contains(&milestones::milestone_id(category, text)))
            .count();
        let count = ProgressCount { completed, total: list.len() };
        overall.completed += count.completed;
        overall.total += count.total;
        by_category.insert(category, count);
    }

    MilestoneProgress { overall, by_category }
}

/// Bidirectional, case-insensitive substring test
pub fn matches_milestone(catalog_text: &str, free_text: &str) -> bool {
    let catalog_text = catalog_text.to_lowercase();
    let free_text = free_text.to_lowercase();
    catalog_text.contains(&free_text) || free_text.contains(&catalog_text)
}

/// Catalog items matching a journal milestone string, at most one per category.
///
/// Each category contributes its first match in bucket order, so one phrase
/// can reach several categories ("cooing sounds" is both social and
/// communication). Blank strings never match; an empty needle would otherwise
/// match the first item of every category.
pub fn find_catalog_matches(free_text: &str) -> Vec<MilestoneItem> {
    let needle = free_text.trim();
    if needle.is_empty() {
        return Vec::new();
    }

    MilestoneCategory::ALL
        .iter()
        .filter_map(|&category| {
            milestones::all_entries()
                .flat_map(|entry| entry.milestones(category).iter())
                .find(|text| matches_milestone(text, needle))
                .map(|text| MilestoneItem {
                    text: (*text).to_string(),
                    category,
                })
        })
        .collect()
}

/// Tracks which milestones a baby has reached and when
#[derive(Debug, Clone, Default)]
pub struct MilestoneTracker {
    achievements: BTreeMap<String, MilestoneAchievement>,
}

impl MilestoneTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the tracker from growth journal entries.
    ///
    /// Entries are applied in date order, so the latest journal mention of a
    /// milestone wins.
    pub fn from_journal<'a>(entries: impl IntoIterator<Item = &'a JournalEntry>) -> Self {
        let mut tracker = Self::new();
        let mut sorted: Vec<&JournalEntry> = entries.into_iter().collect();
        sorted.sort_by_key(|entry| entry.date);
        let entry_count = sorted.len();

        for entry in sorted {
            for text in &entry.milestones {
                let matches = find_catalog_matches(text);
                if matches.is_empty() {
                    debug!("Journal milestone '{}' has no catalog match", text);
                }
                for item in matches {
                    debug!("Journal milestone '{}' matched {} item '{}'", text, item.category, item.text);
                    tracker.record(item, entry.date, entry.notes.clone(), AchievementSource::Journal);
                }
            }
        }

        info!("Collected {} milestone achievements from {} journal entries", tracker.len(), entry_count);
        tracker
    }

    /// Mark a checklist item as reached on `date`
    pub fn mark_achieved(&mut self, item: MilestoneItem, date: NaiveDate, notes: impl Into<String>) -> &MilestoneAchievement {
        info!("Marking milestone '{}' ({}) achieved on {}", item.text, item.category, date);
        self.record(item, date, notes.into(), AchievementSource::Milestone)
    }

    /// Replace journal-sourced records with `journal`'s. Checklist marks win
    /// over a journal match for the same milestone.
    pub fn merge_journal(&mut self, journal: MilestoneTracker) {
        self.achievements
            .retain(|_, achievement| achievement.source == AchievementSource::Milestone);
        for (milestone_id, achievement) in journal.achievements {
            self.achievements.entry(milestone_id).or_insert(achievement);
        }
        debug!("Merged journal achievements, {} total", self.achievements.len());
    }

    /// Toggle a checklist item off. Returns the removed record, if any.
    pub fn unmark(&mut self, milestone_id: &str) -> Option<MilestoneAchievement> {
        let removed = self.achievements.remove(milestone_id);
        if removed.is_some() {
            info!("Unmarked milestone {}", milestone_id);
        }
        removed
    }

    pub fn is_achieved(&self, category: MilestoneCategory, text: &str) -> bool {
        self.achievements.contains_key(&milestones::milestone_id(category, text))
    }

    pub fn get(&self, milestone_id: &str) -> Option<&MilestoneAchievement> {
        self.achievements.get(milestone_id)
    }

    pub fn completed_ids(&self) -> HashSet<String> {
        self.achievements.keys().cloned().collect()
    }

    pub fn progress_for(&self, entry: &MilestoneCatalogEntry) -> MilestoneProgress {
        progress(entry, &self.completed_ids())
    }

    /// Achievements sorted by date, oldest first
    pub fn timeline(&self) -> Vec<&MilestoneAchievement> {
        let mut list: Vec<_> = self.achievements.values().collect();
        list.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.milestone_id.cmp(&b.milestone_id)));
        list
    }

    pub fn len(&self) -> usize {
        self.achievements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.achievements.is_empty()
    }

    fn record(
        &mut self,
        item: MilestoneItem,
        date: NaiveDate,
        notes: String,
        source: AchievementSource,
    ) -> &MilestoneAchievement {
        let milestone_id = milestones::milestone_id(item.category, &item.text);
        let achievement = MilestoneAchievement {
            milestone_id: milestone_id.clone(),
            text: item.text,
            category: item.category,
            date,
            notes,
            source,
        };
        self.achievements.insert(milestone_id.clone(), achievement);
        &self.achievements[&milestone_id]
    }
}
