//! Urgency escalation and remaining-time formatting

use serde::{Deserialize, Serialize};

/// At or below this many seconds the countdown is in danger
pub const DANGER_THRESHOLD_SECS: u64 = 300;
/// At or below this many seconds the countdown is in warning
pub const WARNING_THRESHOLD_SECS: u64 = 600;

/// Visual escalation derived from remaining time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UrgencyLevel {
    Normal,
    Warning,
    Danger,
}

impl UrgencyLevel {
    /// Derive the level for a remaining number of seconds
    pub fn for_remaining(seconds_remaining: u64) -> Self {
        if seconds_remaining <= DANGER_THRESHOLD_SECS {
            Self::Danger
        } else if seconds_remaining <= WARNING_THRESHOLD_SECS {
            Self::Warning
        } else {
            Self::Normal
        }
    }

    /// Class applied to the timer surface, if any
    pub fn css_class(&self) -> Option<&'static str> {
        match self {
            Self::Normal => None,
            Self::Warning => Some("is-warning"),
            Self::Danger => Some("is-danger"),
        }
    }
}

/// Format remaining seconds as `MM:SS`. The minutes field never rolls over into hours.
pub fn format_remaining(seconds_remaining: u64) -> String {
    format!("{:02}:{:02}", seconds_remaining / 60, seconds_remaining % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_at_boundaries() {
        assert_eq!(UrgencyLevel::for_remaining(0), UrgencyLevel::Danger);
        assert_eq!(UrgencyLevel::for_remaining(300), UrgencyLevel::Danger);
        assert_eq!(UrgencyLevel::for_remaining(301), UrgencyLevel::Warning);
        assert_eq!(UrgencyLevel::for_remaining(600), UrgencyLevel::Warning);
        assert_eq!(UrgencyLevel::for_remaining(601), UrgencyLevel::Normal);
    }

    #[test]
    fn formats_minutes_and_seconds() {
        assert_eq!(format_remaining(0), "00:00");
        assert_eq!(format_remaining(59), "00:59");
        assert_eq!(format_remaining(60), "01:00");
        assert_eq!(format_remaining(601), "10:01");
        assert_eq!(format_remaining(3661), "61:01");
    }

    #[test]
    fn css_classes() {
        assert_eq!(UrgencyLevel::Normal.css_class(), None);
        assert_eq!(UrgencyLevel::Warning.css_class(), Some("is-warning"));
        assert_eq!(UrgencyLevel::Danger.css_class(), Some("is-danger"));
    }
}
