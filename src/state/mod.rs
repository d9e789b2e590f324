//! State management module
//!
//! This module contains the countdown state machine and the registry of hosted
//! exam sessions.

pub mod app_state;
pub mod countdown;
pub mod error;
pub mod urgency;

// Re-export main types
pub use app_state::{AppState, ExamSession, SessionSnapshot};
pub use countdown::{parse_duration, CountdownSession, SubmitReason, TickOutcome};
pub use error::SessionError;
pub use urgency::{format_remaining, UrgencyLevel, DANGER_THRESHOLD_SECS, WARNING_THRESHOLD_SECS};
