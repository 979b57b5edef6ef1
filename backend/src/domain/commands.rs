//! Domain-level command types.
//! The UI layer maps its form state to these structs; services validate and
//! turn them into the DTOs defined in the `shared` crate.

pub mod routine {
    use chrono::{NaiveDate, NaiveTime};
    use shared::{DiaperType, FeedingType, SleepLocation, SleepQuality, StoolColor, StoolConsistency};

    /// Input for logging a feeding session.
    #[derive(Debug, Clone)]
    pub struct LogFeedingCommand {
        pub date: NaiveDate,
        pub time: NaiveTime,
        pub feeding_type: FeedingType,
        pub duration_minutes: u32,
        pub amount_ml: Option<u32>,
        pub notes: String,
    }

    /// Input for logging a sleep period. An end time before the start time
    /// means the sleep ran past midnight.
    #[derive(Debug, Clone)]
    pub struct LogSleepCommand {
        pub date: NaiveDate,
        pub start_time: NaiveTime,
        pub end_time: NaiveTime,
        pub quality: SleepQuality,
        pub location: SleepLocation,
        pub notes: String,
    }

    /// Input for logging a diaper change. Consistency and color are dropped
    /// for wet diapers.
    #[derive(Debug, Clone)]
    pub struct LogDiaperCommand {
        pub date: NaiveDate,
        pub time: NaiveTime,
        pub diaper_type: DiaperType,
        pub consistency: Option<StoolConsistency>,
        pub color: Option<StoolColor>,
        pub notes: String,
    }
}

pub mod schedule {
    use chrono::{NaiveDate, NaiveTime};

    /// Input for recording an upcoming or completed vaccination.
    #[derive(Debug, Clone)]
    pub struct ScheduleVaccinationCommand {
        pub name: String,
        pub date: NaiveDate,
        pub notes: String,
    }

    /// Input for recording a doctor visit; date and time of day are picked
    /// separately and combined by the service.
    #[derive(Debug, Clone)]
    pub struct ScheduleVisitCommand {
        pub reason: String,
        pub doctor: String,
        pub date: NaiveDate,
        pub time: NaiveTime,
        pub notes: String,
    }
}

pub mod journal {
    use chrono::NaiveDate;
    use shared::{GrowthData, JournalEntryType, Mood};

    /// Input for saving a growth journal day. Saving replaces whatever was
    /// recorded for that date before.
    #[derive(Debug, Clone)]
    pub struct SaveJournalEntryCommand {
        pub date: NaiveDate,
        pub entry_types: Vec<JournalEntryType>,
        pub growth_data: Option<GrowthData>,
        pub milestones: Vec<String>,
        pub notes: String,
        pub mood: Mood,
    }
}
