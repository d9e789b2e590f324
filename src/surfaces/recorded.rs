//! In-memory surfaces backing sessions hosted by the server

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::traits::{DisplayTarget, ExamForm, TimerSurface};
use crate::state::{SubmitReason, UrgencyLevel};

/// What the timer surface currently shows
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SurfaceView {
    pub text: Option<String>,
    pub urgency_class: Option<String>,
    pub display_attached: bool,
}

/// Display target writing into a shared [`SurfaceView`]
#[derive(Debug, Clone)]
pub struct RecordedDisplay {
    view: Arc<Mutex<SurfaceView>>,
}

impl RecordedDisplay {
    fn is_attached(&self) -> bool {
        self.view.lock().map(|v| v.display_attached).unwrap_or(false)
    }
}

impl DisplayTarget for RecordedDisplay {
    fn set_text(&mut self, text: &str) {
        if let Ok(mut view) = self.view.lock() {
            view.text = Some(text.to_string());
        }
    }
}

/// Timer surface whose state can be observed from other clones
#[derive(Debug, Clone)]
pub struct RecordedSurface {
    duration: Option<String>,
    display: RecordedDisplay,
}

impl RecordedSurface {
    /// Surface with an attached display target
    pub fn new(duration: Option<String>) -> Self {
        Self::with_display(duration, true)
    }

    pub fn with_display(duration: Option<String>, attached: bool) -> Self {
        let view = SurfaceView {
            display_attached: attached,
            ..SurfaceView::default()
        };
        Self {
            duration,
            display: RecordedDisplay {
                view: Arc::new(Mutex::new(view)),
            },
        }
    }

    /// Remove the display target, as if it were taken off the page
    pub fn detach_display(&self) {
        if let Ok(mut view) = self.display.view.lock() {
            view.display_attached = false;
        }
    }

    pub fn view(&self) -> SurfaceView {
        self.display
            .view
            .lock()
            .map(|v| v.clone())
            .unwrap_or_default()
    }
}

impl TimerSurface for RecordedSurface {
    fn duration(&self) -> Option<String> {
        self.duration.clone()
    }

    fn display(&mut self) -> Option<&mut dyn DisplayTarget> {
        if !self.display.is_attached() {
            return None;
        }
        Some(&mut self.display)
    }

    fn set_urgency(&mut self, level: UrgencyLevel) {
        if let Ok(mut view) = self.display.view.lock() {
            view.urgency_class = level.css_class().map(str::to_string);
        }
    }
}

/// One submission of the exam form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    pub reason: SubmitReason,
    pub submitted_at: DateTime<Utc>,
}

/// Exam form that logs its submission.
///
/// Like a page that is already navigating away, the form accepts only the
/// first submission and ignores the rest.
#[derive(Debug, Clone, Default)]
pub struct RecordedForm {
    submissions: Arc<Mutex<Vec<Submission>>>,
}

impl RecordedForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Log a user-initiated submission. Returns false if the form was already submitted.
    pub fn record_manual(&self) -> bool {
        self.record(SubmitReason::Manual)
    }

    pub fn submissions(&self) -> Vec<Submission> {
        self.submissions
            .lock()
            .map(|s| s.clone())
            .unwrap_or_default()
    }

    pub fn is_submitted(&self) -> bool {
        self.submissions.lock().map(|s| !s.is_empty()).unwrap_or(false)
    }

    fn record(&self, reason: SubmitReason) -> bool {
        match self.submissions.lock() {
            Ok(mut submissions) if submissions.is_empty() => {
                submissions.push(Submission {
                    reason,
                    submitted_at: Utc::now(),
                });
                true
            }
            Ok(_) => {
                warn!("Ignoring {:?} submission, form already submitted", reason);
                false
            }
            Err(e) => {
                warn!("Failed to record {:?} submission: {}", reason, e);
                false
            }
        }
    }
}

impl ExamForm for RecordedForm {
    fn submit(&mut self) {
        self.record(SubmitReason::Expired);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surface_clones_share_the_view() {
        let observer = RecordedSurface::new(Some("90".to_string()));
        let mut surface = observer.clone();

        surface.display().unwrap().set_text("01:30");
        surface.set_urgency(UrgencyLevel::Warning);

        let view = observer.view();
        assert_eq!(view.text.as_deref(), Some("01:30"));
        assert_eq!(view.urgency_class.as_deref(), Some("is-warning"));
    }

    #[test]
    fn detached_display_is_absent() {
        let observer = RecordedSurface::new(Some("90".to_string()));
        let mut surface = observer.clone();
        observer.detach_display();
        assert!(surface.display().is_none());
    }

    #[test]
    fn urgency_replaces_previous_class() {
        let mut surface = RecordedSurface::new(None);
        surface.set_urgency(UrgencyLevel::Danger);
        surface.set_urgency(UrgencyLevel::Normal);
        assert_eq!(surface.view().urgency_class, None);
    }

    #[test]
    fn form_keeps_only_first_submission() {
        let form = RecordedForm::new();
        let mut programmatic = form.clone();
        assert!(!form.is_submitted());

        programmatic.submit();
        assert!(!form.record_manual());

        let reasons: Vec<_> = form.submissions().iter().map(|s| s.reason).collect();
        assert_eq!(reasons, vec![SubmitReason::Expired]);
    }

    #[test]
    fn manual_submission_is_recorded() {
        let form = RecordedForm::new();
        assert!(form.record_manual());
        assert!(form.is_submitted());
        assert_eq!(form.submissions()[0].reason, SubmitReason::Manual);
    }
}
