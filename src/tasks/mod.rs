//! Background tasks module
//!
//! This module contains the per-session tasks that run alongside the HTTP server.

pub mod deadline_guard;
pub mod session_reaper;

// Re-export main types
pub use deadline_guard::{DeadlineGuard, GuardHandle, GuardPhase, GuardStatus, TICK_PERIOD};
pub use session_reaper::session_reaper_task;
