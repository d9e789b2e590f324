//! Collaborator seams the deadline guard is wired to

use crate::state::UrgencyLevel;

/// Target that shows the formatted remaining time
pub trait DisplayTarget {
    fn set_text(&mut self, text: &str);
}

/// Surface carrying the exam duration and a nested display target
pub trait TimerSurface: Send + 'static {
    /// Raw duration configuration in seconds, exactly as attached to the surface
    fn duration(&self) -> Option<String>;

    /// Nested display target. It may disappear at any point during a session.
    fn display(&mut self) -> Option<&mut dyn DisplayTarget>;

    /// Replace any previous urgency marker with `level`
    fn set_urgency(&mut self, level: UrgencyLevel);
}

/// Form that can be submitted programmatically
pub trait ExamForm: Send + 'static {
    /// Submit now
    fn submit(&mut self);
}
