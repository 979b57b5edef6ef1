use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single cell of a 7-column month grid.
///
/// `day == None` marks a leading blank before the 1st of the month. Blank
/// cells are never today, selected, disabled or marked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarCell {
    pub day: Option<u32>,
    pub date: Option<NaiveDate>,
    pub is_today: bool,
    pub is_selected: bool,
    pub is_disabled: bool,
    /// Whether the day has logged data (routine calendar dot)
    pub has_entries: bool,
}

impl CalendarCell {
    /// Padding cell placed before the first day of the month
    pub fn blank() -> Self {
        Self {
            day: None,
            date: None,
            is_today: false,
            is_selected: false,
            is_disabled: false,
            has_entries: false,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.day.is_none()
    }

    /// A cell can be tapped only if it holds a date inside the allowed range
    pub fn is_selectable(&self) -> bool {
        self.date.is_some() && !self.is_disabled
    }
}

/// Kind of advisory raised from a day's routine log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConcernType {
    Constipation,
    Feeding,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConcernSeverity {
    Low,
    Medium,
}

/// Advisory message derived from logged care events. Never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Concern {
    #[serde(rename = "type")]
    pub concern_type: ConcernType,
    pub message: String,
    pub severity: ConcernSeverity,
}

/// Developmental area a milestone belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MilestoneCategory {
    Physical,
    Cognitive,
    Social,
    Communication,
}

impl MilestoneCategory {
    pub const ALL: [MilestoneCategory; 4] = [
        MilestoneCategory::Physical,
        MilestoneCategory::Cognitive,
        MilestoneCategory::Social,
        MilestoneCategory::Communication,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MilestoneCategory::Physical => "Physical",
            MilestoneCategory::Cognitive => "Cognitive",
            MilestoneCategory::Social => "Social",
            MilestoneCategory::Communication => "Communication",
        }
    }
}

impl fmt::Display for MilestoneCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Flattened catalog milestone, ready for list rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MilestoneItem {
    pub text: String,
    pub category: MilestoneCategory,
}

/// Where an achievement record came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AchievementSource {
    /// Matched from free text in a growth journal entry
    Journal,
    /// Marked directly on the milestone checklist
    Milestone,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MilestoneAchievement {
    pub milestone_id: String,
    pub text: String,
    pub category: MilestoneCategory,
    pub date: NaiveDate,
    pub notes: String,
    pub source: AchievementSource,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    #[default]
    Happy,
    Calm,
    Sleepy,
    Tired,
    Fussy,
    Sick,
}

/// Tags shown on a journal entry's detail page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JournalEntryType {
    Growth,
    Milestone,
    Note,
}

/// Measurements taken on a journal day. Any of them may be missing.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GrowthData {
    pub weight_kg: Option<f64>,
    pub height_cm: Option<f64>,
    pub head_circumference_cm: Option<f64>,
}

impl GrowthData {
    pub fn is_empty(&self) -> bool {
        self.weight_kg.is_none() && self.height_cm.is_none() && self.head_circumference_cm.is_none()
    }
}

/// One growth journal entry; there is at most one per day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub date: NaiveDate,
    pub entry_types: Vec<JournalEntryType>,
    pub growth_data: Option<GrowthData>,
    /// Free-text milestone titles recorded on that day
    pub milestones: Vec<String>,
    pub notes: String,
    pub mood: Mood,
}

impl JournalEntry {
    /// Blank entry for `date` with the default mood
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            entry_types: Vec::new(),
            growth_data: None,
            milestones: Vec::new(),
            notes: String::new(),
            mood: Mood::default(),
        }
    }

    pub fn has_type(&self, entry_type: JournalEntryType) -> bool {
        self.entry_types.contains(&entry_type)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedingType {
    Breast,
    Bottle,
    Solid,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedingEvent {
    pub id: String,
    pub time: NaiveTime,
    pub feeding_type: FeedingType,
    pub duration_minutes: u32,
    /// Bottle volume in ml
    pub amount_ml: Option<u32>,
    pub notes: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SleepQuality {
    Excellent,
    Good,
    Fair,
    Poor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SleepLocation {
    Crib,
    Bassinet,
    Bed,
    Stroller,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SleepEvent {
    pub id: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub duration_minutes: u32,
    pub quality: SleepQuality,
    pub location: SleepLocation,
    pub notes: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiaperType {
    Wet,
    Soiled,
    Both,
}

impl DiaperType {
    /// Soiled and mixed diapers count as a bowel movement
    pub fn is_bowel_movement(&self) -> bool {
        matches!(self, DiaperType::Soiled | DiaperType::Both)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoolConsistency {
    Soft,
    Firm,
    Loose,
    Hard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoolColor {
    Yellow,
    Brown,
    Green,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiaperEvent {
    pub id: String,
    pub time: NaiveTime,
    pub diaper_type: DiaperType,
    /// Always `None` for wet diapers
    pub consistency: Option<StoolConsistency>,
    /// Always `None` for wet diapers
    pub color: Option<StoolColor>,
    pub notes: String,
}

/// Everything logged for one baby on one calendar day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyRoutineRecord {
    pub date: NaiveDate,
    pub feeding: Vec<FeedingEvent>,
    pub sleep: Vec<SleepEvent>,
    pub diapers: Vec<DiaperEvent>,
}

impl DailyRoutineRecord {
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            feeding: Vec::new(),
            sleep: Vec::new(),
            diapers: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.feeding.is_empty() && self.sleep.is_empty() && self.diapers.is_empty()
    }

    pub fn entry_count(&self) -> usize {
        self.feeding.len() + self.sleep.len() + self.diapers.len()
    }
}

/// Routine event category, also used to build and parse entry IDs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoutineEntryKind {
    Feeding,
    Sleep,
    Diaper,
}

impl RoutineEntryKind {
    pub fn prefix(&self) -> &'static str {
        match self {
            RoutineEntryKind::Feeding => "feeding",
            RoutineEntryKind::Sleep => "sleep",
            RoutineEntryKind::Diaper => "diaper",
        }
    }

    /// Build an entry ID in format: "<feeding|sleep|diaper>::<token>"
    pub fn generate_id(&self, token: &str) -> String {
        format!("{}::{}", self.prefix(), token)
    }

    /// Parse the kind back out of an entry ID
    pub fn parse_id(id: &str) -> Result<RoutineEntryKind, EntryIdError> {
        let (prefix, token) = id.split_once("::").ok_or(EntryIdError::InvalidFormat)?;
        if token.is_empty() {
            return Err(EntryIdError::InvalidFormat);
        }
        match prefix {
            "feeding" => Ok(RoutineEntryKind::Feeding),
            "sleep" => Ok(RoutineEntryKind::Sleep),
            "diaper" => Ok(RoutineEntryKind::Diaper),
            _ => Err(EntryIdError::UnknownKind),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EntryIdError {
    InvalidFormat,
    UnknownKind,
}

impl fmt::Display for EntryIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryIdError::InvalidFormat => write!(f, "Invalid routine entry ID format"),
            EntryIdError::UnknownKind => write!(f, "Unknown routine entry kind"),
        }
    }
}

impl std::error::Error for EntryIdError {}

/// Category filter for the routine timeline tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimelineFilter {
    #[default]
    All,
    Feeding,
    Sleep,
    Diapers,
}

impl TimelineFilter {
    pub fn accepts(&self, kind: RoutineEntryKind) -> bool {
        match self {
            TimelineFilter::All => true,
            TimelineFilter::Feeding => kind == RoutineEntryKind::Feeding,
            TimelineFilter::Sleep => kind == RoutineEntryKind::Sleep,
            TimelineFilter::Diapers => kind == RoutineEntryKind::Diaper,
        }
    }
}

/// One row of the merged daily timeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "lowercase")]
pub enum TimelineEntry {
    Feeding(FeedingEvent),
    Sleep(SleepEvent),
    Diaper(DiaperEvent),
}

impl TimelineEntry {
    pub fn kind(&self) -> RoutineEntryKind {
        match self {
            TimelineEntry::Feeding(_) => RoutineEntryKind::Feeding,
            TimelineEntry::Sleep(_) => RoutineEntryKind::Sleep,
            TimelineEntry::Diaper(_) => RoutineEntryKind::Diaper,
        }
    }

    /// Sort key: event time, or start time for sleep
    pub fn time(&self) -> NaiveTime {
        match self {
            TimelineEntry::Feeding(event) => event.time,
            TimelineEntry::Sleep(event) => event.start_time,
            TimelineEntry::Diaper(event) => event.time,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            TimelineEntry::Feeding(event) => &event.id,
            TimelineEntry::Sleep(event) => &event.id,
            TimelineEntry::Diaper(event) => &event.id,
        }
    }
}

/// Per-day totals shown above the routine timeline
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailySummary {
    pub feeding_count: usize,
    pub feeding_minutes: u32,
    pub bottle_ml: u32,
    pub sleep_count: usize,
    pub sleep_minutes: u32,
    pub wet_diapers: usize,
    pub soiled_diapers: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vaccination {
    pub id: String,
    pub name: String,
    pub date: NaiveDate,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoctorVisit {
    pub id: String,
    pub reason: String,
    pub doctor: String,
    pub date_time: NaiveDateTime,
    pub notes: String,
}

impl DoctorVisit {
    pub fn date(&self) -> NaiveDate {
        self.date_time.date()
    }
}

/// Today's date in the shapes the UI needs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentDateResponse {
    pub month: u32,
    pub year: i32,
    pub day: u32,
    pub formatted_date: String, // e.g., "19 Jun 2025"
    pub iso_date: String,       // e.g., "2025-06-19"
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_entry_id_round_trip() {
        let id = RoutineEntryKind::Sleep.generate_id("abc");
        assert_eq!(id, "sleep::abc");
        assert_eq!(RoutineEntryKind::parse_id(&id), Ok(RoutineEntryKind::Sleep));
    }

    #[test]
    fn test_parse_entry_id_rejects_bad_input() {
        assert_eq!(RoutineEntryKind::parse_id("feeding"), Err(EntryIdError::InvalidFormat));
        assert_eq!(RoutineEntryKind::parse_id("feeding::"), Err(EntryIdError::InvalidFormat));
        assert_eq!(RoutineEntryKind::parse_id("bath::123"), Err(EntryIdError::UnknownKind));
    }

    #[test]
    fn test_blank_cell_is_not_selectable() {
        let cell = CalendarCell::blank();
        assert!(cell.is_blank());
        assert!(!cell.is_selectable());
    }

    #[test]
    fn test_diaper_bowel_movement() {
        assert!(!DiaperType::Wet.is_bowel_movement());
        assert!(DiaperType::Soiled.is_bowel_movement());
        assert!(DiaperType::Both.is_bowel_movement());
    }

    #[test]
    fn test_timeline_filter() {
        assert!(TimelineFilter::All.accepts(RoutineEntryKind::Sleep));
        assert!(TimelineFilter::Diapers.accepts(RoutineEntryKind::Diaper));
        assert!(!TimelineFilter::Feeding.accepts(RoutineEntryKind::Diaper));
    }

    #[test]
    fn test_concern_wire_shape() {
        let concern = Concern {
            concern_type: ConcernType::Constipation,
            message: "msg".to_string(),
            severity: ConcernSeverity::Medium,
        };
        let json = serde_json::to_value(&concern).unwrap();
        assert_eq!(json["type"], "constipation");
        assert_eq!(json["severity"], "medium");
    }

    #[test]
    fn test_timeline_entry_is_tagged_by_category() {
        let entry = TimelineEntry::Diaper(DiaperEvent {
            id: "diaper::1".to_string(),
            time: time(8, 15),
            diaper_type: DiaperType::Wet,
            consistency: None,
            color: None,
            notes: String::new(),
        });
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["category"], "diaper");
        assert_eq!(json["diaper_type"], "wet");
        assert_eq!(entry.time(), time(8, 15));
        assert_eq!(entry.kind(), RoutineEntryKind::Diaper);
    }

    #[test]
    fn test_journal_entry_wire_shape() {
        let mut entry = JournalEntry::new(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        entry.entry_types.push(JournalEntryType::Growth);
        entry.growth_data = Some(GrowthData {
            weight_kg: Some(6.2),
            ..GrowthData::default()
        });
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["mood"], "happy");
        assert_eq!(json["entry_types"][0], "growth");
        assert_eq!(json["growth_data"]["weight_kg"], 6.2);
        assert!(json["growth_data"]["height_cm"].is_null());
        assert!(GrowthData::default().is_empty());
    }

    #[test]
    fn test_record_entry_count() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let mut record = DailyRoutineRecord::empty(date);
        assert!(record.is_empty());
        record.feeding.push(FeedingEvent {
            id: "feeding::1".to_string(),
            time: time(7, 0),
            feeding_type: FeedingType::Bottle,
            duration_minutes: 15,
            amount_ml: Some(120),
            notes: String::new(),
        });
        assert!(!record.is_empty());
        assert_eq!(record.entry_count(), 1);
    }
}
