//! Main application state and exam session registry

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicU64, Ordering},
        Mutex, MutexGuard,
    },
    time::{Duration, Instant},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::SessionError;
use crate::{
    surfaces::{RecordedForm, RecordedSurface, Submission, SurfaceView},
    tasks::{DeadlineGuard, GuardHandle, GuardPhase, GuardStatus},
};

/// One hosted exam page: its timer surface, its form and the guard wired to them
#[derive(Debug)]
pub struct ExamSession {
    pub id: u64,
    pub started_at: DateTime<Utc>,
    pub surface: RecordedSurface,
    pub form: RecordedForm,
    /// `None` when the guard stayed inert
    pub guard: Option<GuardHandle>,
}

impl ExamSession {
    /// When the session stopped counting down, `None` while its guard runs.
    ///
    /// Sessions without a guard never counted down and finish when they open.
    pub fn finished_at(&self) -> Option<DateTime<Utc>> {
        if let Some(submission) = self.form.submissions().first() {
            return Some(submission.submitted_at);
        }
        match &self.guard {
            Some(guard) if !guard.status().phase.is_final() => None,
            _ => Some(self.started_at),
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let guard = self.guard.as_ref().map(GuardHandle::status);
        SessionSnapshot {
            id: self.id,
            started_at: self.started_at,
            guard_active: guard
                .as_ref()
                .map(|status| status.phase == GuardPhase::Running)
                .unwrap_or(false),
            guard,
            view: self.surface.view(),
            submissions: self.form.submissions(),
        }
    }
}

/// Serializable view of an exam session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub id: u64,
    pub started_at: DateTime<Utc>,
    pub guard_active: bool,
    pub guard: Option<GuardStatus>,
    pub view: SurfaceView,
    pub submissions: Vec<Submission>,
}

/// Main application state holding server metadata and exam sessions
#[derive(Debug)]
pub struct AppState {
    /// Default exam duration when a session does not supply one
    pub exam_duration_minutes: u64,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    sessions: Mutex<HashMap<u64, ExamSession>>,
    next_id: AtomicU64,
    /// Last action tracking
    last_action: Mutex<Option<String>>,
    last_action_time: Mutex<Option<DateTime<Utc>>>,
}

impl AppState {
    pub fn new(port: u16, host: String, exam_duration_minutes: u64) -> Self {
        Self {
            exam_duration_minutes,
            start_time: Instant::now(),
            port,
            host,
            sessions: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(1),
            last_action: Mutex::new(None),
            last_action_time: Mutex::new(None),
        }
    }

    fn sessions(&self) -> Result<MutexGuard<'_, HashMap<u64, ExamSession>>, SessionError> {
        self.sessions
            .lock()
            .map_err(|e| SessionError::Lock(e.to_string()))
    }

    fn record_action(&self, action: &str) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    /// Default duration attribute rendered onto a new exam page
    pub fn default_duration_seconds(&self) -> u64 {
        self.exam_duration_minutes.saturating_mul(60)
    }

    /// Open an exam page and install its deadline guard.
    ///
    /// Must be called from within a tokio runtime. A duration that does not parse
    /// still opens the session, only without a running guard.
    pub fn start_session(&self, duration: Option<String>) -> Result<SessionSnapshot, SessionError> {
        let duration = duration.or_else(|| Some(self.default_duration_seconds().to_string()));
        let surface = RecordedSurface::new(duration);
        let form = RecordedForm::new();
        let guard = DeadlineGuard::install(Some(surface.clone()), Some(form.clone()));

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let session = ExamSession {
            id,
            started_at: Utc::now(),
            surface,
            form,
            guard,
        };
        let snapshot = session.snapshot();

        self.sessions()?.insert(id, session);
        self.record_action("start");
        info!("Exam session {} opened (guard active: {})", id, snapshot.guard_active);
        Ok(snapshot)
    }

    pub fn session(&self, id: u64) -> Result<SessionSnapshot, SessionError> {
        self.sessions()?
            .get(&id)
            .map(ExamSession::snapshot)
            .ok_or(SessionError::NotFound(id))
    }

    /// The user submits the exam form
    pub fn submit_session(&self, id: u64) -> Result<SessionSnapshot, SessionError> {
        let sessions = self.sessions()?;
        let session = sessions.get(&id).ok_or(SessionError::NotFound(id))?;

        // The guard decides between the user and expiry before anything is recorded
        if let Some(guard) = &session.guard {
            if !guard.notify_submit() {
                return Err(SessionError::AlreadySubmitted(id));
            }
        }
        if !session.form.record_manual() {
            return Err(SessionError::AlreadySubmitted(id));
        }

        let snapshot = session.snapshot();
        drop(sessions);

        self.record_action("submit");
        info!("Exam session {} submitted by user", id);
        Ok(snapshot)
    }

    /// Tear down an exam page, cancelling its guard without submitting
    pub fn end_session(&self, id: u64) -> Result<(), SessionError> {
        let mut session = self
            .sessions()?
            .remove(&id)
            .ok_or(SessionError::NotFound(id))?;

        if let Some(guard) = session.guard.as_mut() {
            guard.cancel();
        }
        self.record_action("end");
        info!("Exam session {} closed", id);
        Ok(())
    }

    /// Drop sessions that finished more than `retention` ago. Returns how many went.
    pub fn evict_finished(&self, retention: Duration) -> Result<usize, SessionError> {
        let Some(cutoff) = chrono::Duration::from_std(retention)
            .ok()
            .and_then(|retention| Utc::now().checked_sub_signed(retention))
        else {
            return Ok(0);
        };

        let mut sessions = self.sessions()?;
        let before = sessions.len();
        sessions.retain(|_, session| {
            session
                .finished_at()
                .map_or(true, |finished_at| finished_at > cutoff)
        });
        let evicted = before - sessions.len();
        drop(sessions);

        if evicted > 0 {
            debug!("Evicted {} finished exam sessions", evicted);
        }
        Ok(evicted)
    }

    /// Cancel every guard, used on shutdown
    pub fn teardown_all(&self) {
        match self.sessions() {
            Ok(mut sessions) => {
                let count = sessions.len();
                for session in sessions.values_mut() {
                    if let Some(guard) = session.guard.as_mut() {
                        guard.cancel();
                    }
                }
                sessions.clear();
                info!("Tore down {} exam sessions", count);
            }
            Err(e) => warn!("Failed to tear down exam sessions: {}", e),
        }
    }

    /// Returns (sessions with a running guard, all sessions)
    pub fn session_counts(&self) -> Result<(usize, usize), SessionError> {
        let sessions = self.sessions()?;
        let active = sessions
            .values()
            .filter_map(|s| s.guard.as_ref())
            .filter(|g| !g.status().phase.is_final())
            .count();
        Ok((active, sessions.len()))
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}
