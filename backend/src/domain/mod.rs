//! # Domain Module
//!
//! Business logic for the baby care tracker.
//!
//! ## Responsibilities
//! - Age arithmetic and the developmental milestone catalog
//! - Calendar grids and the date picker interaction state
//! - Growth journal days with milestone write-back
//! - Daily routine logging, summaries and advisory concerns
//! - Vaccination and doctor visit scheduling
//!
//! Nothing in here performs I/O; callers own the state and decide where it
//! lives.

pub mod age;
pub mod calendar;
pub mod commands;
pub mod concerns;
pub mod date_picker;
pub mod error;
pub mod growth_journal;
pub mod milestone_tracker;
pub mod milestones;
pub mod models;
pub mod routine_log;
pub mod schedule;

pub use calendar::{CalendarService, DateBounds};
pub use concerns::RoutineConcernEvaluator;
pub use date_picker::{DateChangeHandler, DatePickerState, PickerMode};
pub use error::{CareError, CareResult};
pub use growth_journal::GrowthJournal;
pub use milestone_tracker::MilestoneTracker;
pub use milestones::{AgeBucket, MilestoneCatalogEntry};
pub use models::baby::Baby;
pub use routine_log::RoutineLog;
pub use schedule::ScheduleBook;
