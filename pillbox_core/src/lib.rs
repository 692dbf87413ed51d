#![forbid(unsafe_code)]

//! Core domain model for the Pillbox medication inventory.
//!
//! This crate provides:
//! - Calendar-day keys for grouping timestamps
//! - Event types (restocks, dose changes, end-of-day markers)
//! - Event normalization and the day-by-day fold into a ledger
//! - History loading, configuration and logging

pub mod types;
pub mod error;
pub mod calendar;
pub mod config;
pub mod logging;
pub mod normalize;
pub mod fold;
pub mod ledger;
pub mod engine;
pub mod history;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use calendar::{day_number, same_day, CalendarDay};
pub use config::Config;
pub use normalize::normalize_events;
pub use fold::collapse_events;
pub use ledger::Ledger;
pub use engine::project_ledger;
pub use history::History;
