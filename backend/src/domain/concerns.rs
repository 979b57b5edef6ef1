//! Advisory concerns derived from a day's routine log.
//!
//! Both rules are advisory: nothing acts on them, the caller shows them as
//! dismissible banners. Rules are independent and either, both or neither
//! may fire.

use log::debug;
use shared::{Concern, ConcernSeverity, ConcernType, DailyRoutineRecord};

use crate::config::ConcernThresholds;

pub const CONSTIPATION_MESSAGE: &str =
    "No bowel movement recorded in 24+ hours. Consider consulting your pediatrician.";
pub const LOW_FEEDING_MESSAGE: &str =
    "Fewer than 6 feeding sessions today. Newborns typically need 8-12 feedings per day.";

/// Evaluates routine records against the configured thresholds
#[derive(Debug, Clone, Copy, Default)]
pub struct RoutineConcernEvaluator {
    thresholds: ConcernThresholds,
}

impl RoutineConcernEvaluator {
    pub fn new(thresholds: ConcernThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &ConcernThresholds {
        &self.thresholds
    }

    /// Concerns for `today`, looking back at `yesterday` for bowel movements.
    ///
    /// The feeding rule only applies when the baby's age is known.
    pub fn evaluate(
        &self,
        today: &DailyRoutineRecord,
        yesterday: Option<&DailyRoutineRecord>,
        baby_age_in_days: Option<u32>,
    ) -> Vec<Concern> {
        let mut concerns = Vec::new();

        let has_bowel_movement = |record: &DailyRoutineRecord| {
            record.diapers.iter().any(|d| d.diaper_type.is_bowel_movement())
        };
        let bowel_movement_today = has_bowel_movement(today);
        let bowel_movement_yesterday = yesterday.is_some_and(has_bowel_movement);

        if !bowel_movement_today && !bowel_movement_yesterday {
            concerns.push(Concern {
                concern_type: ConcernType::Constipation,
                message: CONSTIPATION_MESSAGE.to_string(),
                severity: ConcernSeverity::Medium,
            });
        }

        let is_newborn = baby_age_in_days.is_some_and(|days| days < self.thresholds.newborn_age_days);
        if is_newborn && today.feeding.len() < self.thresholds.min_daily_feedings {
            concerns.push(Concern {
                concern_type: ConcernType::Feeding,
                message: feeding_message(self.thresholds.min_daily_feedings),
                severity: ConcernSeverity::Low,
            });
        }

        debug!(
            "Evaluated routine for {}: {} feedings, {} diapers, {} concerns",
            today.date,
            today.feeding.len(),
            today.diapers.len(),
            concerns.len()
        );

        concerns
    }
}

fn feeding_message(min_daily_feedings: usize) -> String {
    if min_daily_feedings == ConcernThresholds::default().min_daily_feedings {
        LOW_FEEDING_MESSAGE.to_string()
    } else {
        format!(
            "Fewer than {} feeding sessions today. Newborns typically need 8-12 feedings per day.",
            min_daily_feedings
        )
    }
}

/// Evaluate with the default thresholds (90 days, 6 feedings)
pub fn evaluate(
    today: &DailyRoutineRecord,
    yesterday: Option<&DailyRoutineRecord>,
    baby_age_in_days: Option<u32>,
) -> Vec<Concern> {
    RoutineConcernEvaluator::default().evaluate(today, yesterday, baby_age_in_days)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};
    use shared::{DiaperEvent, DiaperType, FeedingEvent, FeedingType};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn diaper(diaper_type: DiaperType) -> DiaperEvent {
        DiaperEvent {
            id: "diaper::t".to_string(),
            time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            diaper_type,
            consistency: None,
            color: None,
            notes: String::new(),
        }
    }

    fn feeding(hour: u32) -> FeedingEvent {
        FeedingEvent {
            id: format!("feeding::{}", hour),
            time: NaiveTime::from_hms_opt(hour, 0, 0).unwrap(),
            feeding_type: FeedingType::Breast,
            duration_minutes: 20,
            amount_ml: None,
            notes: String::new(),
        }
    }

    fn record(day: u32, diapers: Vec<DiaperEvent>, feedings: usize) -> DailyRoutineRecord {
        DailyRoutineRecord {
            date: date(2024, 4, day),
            feeding: (0..feedings as u32).map(|h| feeding(h + 1)).collect(),
            sleep: Vec::new(),
            diapers,
        }
    }

    fn types(concerns: &[Concern]) -> Vec<ConcernType> {
        concerns.iter().map(|c| c.concern_type).collect()
    }

    #[test]
    fn test_empty_days_for_newborn_raise_both() {
        let today = record(2, vec![], 0);
        let yesterday = record(1, vec![], 0);
        let concerns = evaluate(&today, Some(&yesterday), Some(30));
        assert_eq!(types(&concerns), vec![ConcernType::Constipation, ConcernType::Feeding]);
        assert_eq!(concerns[0].severity, ConcernSeverity::Medium);
        assert_eq!(concerns[1].severity, ConcernSeverity::Low);
        assert_eq!(concerns[0].message, CONSTIPATION_MESSAGE);
        assert_eq!(concerns[1].message, LOW_FEEDING_MESSAGE);
    }

    #[test]
    fn test_soiled_today_for_older_baby_is_clear() {
        let today = record(2, vec![diaper(DiaperType::Soiled)], 0);
        assert!(evaluate(&today, None, Some(200)).is_empty());
        assert!(evaluate(&today, Some(&record(1, vec![], 0)), Some(200)).is_empty());
    }

    #[test]
    fn test_bowel_movement_yesterday_counts() {
        let today = record(2, vec![diaper(DiaperType::Wet)], 0);
        let yesterday = record(1, vec![diaper(DiaperType::Both)], 0);
        assert!(evaluate(&today, Some(&yesterday), None).is_empty());
    }

    #[test]
    fn test_wet_only_raises_constipation() {
        let today = record(2, vec![diaper(DiaperType::Wet), diaper(DiaperType::Wet)], 8);
        let concerns = evaluate(&today, None, Some(10));
        assert_eq!(types(&concerns), vec![ConcernType::Constipation]);
    }

    #[test]
    fn test_feeding_rule_boundaries() {
        let clear = vec![diaper(DiaperType::Soiled)];
        assert!(evaluate(&record(2, clear.clone(), 6), None, Some(30)).is_empty());
        assert_eq!(types(&evaluate(&record(2, clear.clone(), 5), None, Some(89))), vec![ConcernType::Feeding]);
        assert!(evaluate(&record(2, clear.clone(), 5), None, Some(90)).is_empty());
        assert!(evaluate(&record(2, clear, 0), None, None).is_empty());
    }

    #[test]
    fn test_evaluate_is_pure() {
        let today = record(2, vec![], 3);
        let yesterday = record(1, vec![diaper(DiaperType::Wet)], 2);
        let first = evaluate(&today, Some(&yesterday), Some(45));
        let second = evaluate(&today, Some(&yesterday), Some(45));
        assert_eq!(first, second);
    }

    #[test]
    fn test_custom_thresholds() {
        let evaluator = RoutineConcernEvaluator::new(ConcernThresholds {
            newborn_age_days: 180,
            min_daily_feedings: 8,
        });
        let today = record(2, vec![diaper(DiaperType::Soiled)], 7);
        let concerns = evaluator.evaluate(&today, None, Some(120));
        assert_eq!(types(&concerns), vec![ConcernType::Feeding]);
        assert!(concerns[0].message.starts_with("Fewer than 8 feeding sessions"));
    }
}
