use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::age;
use crate::domain::milestones::{self, MilestoneCatalogEntry};

/// Domain model representing a baby profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Baby {
    pub id: String,
    pub name: String,
    pub birth_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Baby {
    /// Create a profile stamped with the current time
    pub fn new(name: impl Into<String>, birth_date: NaiveDate) -> Self {
        let now = Utc::now();
        Self {
            id: Self::generate_id(now.timestamp_millis() as u64),
            name: name.into().trim().to_string(),
            birth_date,
            created_at: now,
            updated_at: now,
        }
    }

    /// Generate a unique ID for a baby
    pub fn generate_id(timestamp_millis: u64) -> String {
        format!("baby::{}", timestamp_millis)
    }

    pub fn age_in_months(&self, today: NaiveDate) -> u32 {
        age::age_in_months(self.birth_date, today)
    }

    pub fn age_in_days(&self, today: NaiveDate) -> u32 {
        age::age_in_days(self.birth_date, today)
    }

    /// "3 months", "1 year, 2 months"
    pub fn age_label(&self, today: NaiveDate) -> String {
        age::format_age(self.age_in_months(today))
    }

    /// Milestones for the baby's current age bucket
    pub fn current_milestones(&self, today: NaiveDate) -> &'static MilestoneCatalogEntry {
        milestones::milestones_for(self.age_in_months(today))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_new_trims_name_and_generates_id() {
        let baby = Baby::new("  Ava ", date(2024, 1, 15));
        assert_eq!(baby.name, "Ava");
        assert!(baby.id.starts_with("baby::"));
        assert_eq!(Baby::generate_id(1702516122000), "baby::1702516122000");
    }

    #[test]
    fn test_age_helpers() {
        let baby = Baby::new("Ava", date(2024, 1, 15));
        let today = date(2025, 3, 20);
        assert_eq!(baby.age_in_months(today), 14);
        assert_eq!(baby.age_label(today), "1 year, 2 months");
        assert_eq!(baby.age_in_days(date(2024, 2, 14)), 30);
        assert_eq!(baby.current_milestones(today).label, "13-18 Months");
    }
}
