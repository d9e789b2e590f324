//! Countdown session state machine

use serde::{Deserialize, Serialize};

use super::urgency::{format_remaining, UrgencyLevel};

/// Why a session stopped accepting ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmitReason {
    /// Time ran out and the form was submitted programmatically
    Expired,
    /// The user submitted the form before the deadline
    Manual,
}

/// Result of a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Time remains
    Running { seconds_remaining: u64 },
    /// Remaining time reached zero on this tick
    Expired,
    /// The session was already submitted, nothing changed
    Halted,
}

/// Parse a duration attribute the way an integer-prefix parser would.
///
/// Leading/trailing whitespace is ignored, an optional sign is accepted and the
/// leading run of ASCII digits is taken. Anything that does not yield a positive
/// value returns `None`.
pub fn parse_duration(raw: Option<&str>) -> Option<u64> {
    let trimmed = raw?.trim();
    let (negative, digits) = match trimmed.as_bytes().first()? {
        b'-' => (true, &trimmed[1..]),
        b'+' => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let value: u64 = digits[..end].parse().ok()?;
    if negative || value == 0 {
        return None;
    }
    Some(value)
}

/// Remaining time for one exam attempt
#[derive(Debug, Clone)]
pub struct CountdownSession {
    initial_duration: u64,
    seconds_remaining: u64,
    submitted: Option<SubmitReason>,
}

impl CountdownSession {
    /// Create a session. A zero duration never starts.
    pub fn new(initial_duration: u64) -> Option<Self> {
        if initial_duration == 0 {
            return None;
        }
        Some(Self {
            initial_duration,
            seconds_remaining: initial_duration,
            submitted: None,
        })
    }

    /// Create a session straight from raw configuration data
    pub fn from_raw(raw: Option<&str>) -> Option<Self> {
        parse_duration(raw).and_then(Self::new)
    }

    /// Advance by one second
    pub fn tick(&mut self) -> TickOutcome {
        if self.submitted.is_some() || self.seconds_remaining == 0 {
            return TickOutcome::Halted;
        }

        self.seconds_remaining -= 1;
        if self.seconds_remaining == 0 {
            TickOutcome::Expired
        } else {
            TickOutcome::Running {
                seconds_remaining: self.seconds_remaining,
            }
        }
    }

    /// Flag the session as submitted. Returns false if it already was.
    pub fn mark_submitted(&mut self, reason: SubmitReason) -> bool {
        if self.submitted.is_some() {
            return false;
        }
        self.submitted = Some(reason);
        true
    }

    pub fn initial_duration(&self) -> u64 {
        self.initial_duration
    }

    pub fn seconds_remaining(&self) -> u64 {
        self.seconds_remaining
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted.is_some()
    }

    pub fn submit_reason(&self) -> Option<SubmitReason> {
        self.submitted
    }

    /// Recomputed on every call
    pub fn urgency(&self) -> UrgencyLevel {
        UrgencyLevel::for_remaining(self.seconds_remaining)
    }

    pub fn display_text(&self) -> String {
        format_remaining(self.seconds_remaining)
    }
}
