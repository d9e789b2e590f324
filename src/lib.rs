//! Exam Guard - hosted exam countdown sessions with a hard deadline
//!
//! Each exam page gets a deadline guard: a one-second countdown rendered as
//! `MM:SS`, an urgency level that escalates in the last ten and five minutes,
//! and exactly one form submission, either by the user or automatically when
//! time runs out. The crate also carries the small pure helpers behind the
//! rest of the exam page (navigation, sidebar, dependent selects, counters).

pub mod config;
pub mod state;
pub mod api;
pub mod surfaces;
pub mod tasks;
pub mod utils;
pub mod widgets;

// Re-export commonly used types
pub use config::Config;
pub use state::{AppState, CountdownSession, SessionError, UrgencyLevel};
pub use api::create_router;
pub use surfaces::{DisplayTarget, ExamForm, TimerSurface};
pub use tasks::{DeadlineGuard, GuardHandle, GuardPhase, GuardStatus};
pub use utils::signals::shutdown_signal;
