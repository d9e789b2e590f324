//! Exam deadline guard background task
//!
//! A guard owns one [`CountdownSession`] and the recurring one-second tick that
//! drives it. Ticks and submit notifications are serialized through a single
//! `select!` loop. The submission itself is claimed through a flag shared with
//! the handle, so exactly one of expiry and the user gets to submit even when
//! the handle lives on another worker thread.

use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};

use serde::{Deserialize, Serialize};
use tokio::{
    sync::{mpsc, watch},
    time::{interval_at, Instant, Interval},
};
use tracing::{debug, info};

use crate::{
    state::{CountdownSession, SubmitReason, TickOutcome, UrgencyLevel},
    surfaces::{ExamForm, TimerSurface},
};

/// Period of the recurring tick
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Lifecycle phase of a guard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GuardPhase {
    /// Counting down
    Running,
    /// Time ran out and the form was auto-submitted
    Expired,
    /// The user submitted before the deadline
    Submitted,
    /// Torn down with the page, nothing submitted
    Cancelled,
}

impl GuardPhase {
    pub fn is_final(&self) -> bool {
        !matches!(self, Self::Running)
    }
}

/// Snapshot published after every render
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuardStatus {
    pub seconds_remaining: u64,
    pub display: String,
    pub urgency: UrgencyLevel,
    pub phase: GuardPhase,
}

impl GuardStatus {
    fn of(session: &CountdownSession, phase: GuardPhase) -> Self {
        Self {
            seconds_remaining: session.seconds_remaining(),
            display: session.display_text(),
            urgency: session.urgency(),
            phase,
        }
    }
}

#[derive(Debug)]
enum GuardEvent {
    SubmitRequested,
    Teardown,
}

enum GuardExit {
    Expired,
    Manual,
    Teardown,
}

/// Installs deadline guards onto a timer surface and a form
pub struct DeadlineGuard;

impl DeadlineGuard {
    /// Start a guard. Must be called from within a tokio runtime.
    ///
    /// Returns `None` without logging when either collaborator is missing or the
    /// surface carries no positive duration. A page without an active exam simply
    /// has no countdown.
    pub fn install<S, F>(surface: Option<S>, form: Option<F>) -> Option<GuardHandle>
    where
        S: TimerSurface,
        F: ExamForm,
    {
        let (mut surface, form) = (surface?, form?);
        let session = CountdownSession::from_raw(surface.duration().as_deref())?;

        // First paint shows the full duration
        render(&session, &mut surface);

        let (status_tx, status_rx) =
            watch::channel(GuardStatus::of(&session, GuardPhase::Running));
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let claimed = Arc::new(AtomicBool::new(false));
        let interval = interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);

        info!(
            "Starting deadline guard for {}s ({})",
            session.initial_duration(),
            session.display_text()
        );

        tokio::spawn(run_guard(
            session,
            surface,
            form,
            interval,
            events_rx,
            status_tx,
            Arc::clone(&claimed),
        ));

        Some(GuardHandle {
            events: Some(events_tx),
            status_rx,
            claimed,
        })
    }
}

/// Exclusive owner of a running guard's tick.
///
/// Dropping the handle tears the guard down without submitting.
#[derive(Debug)]
pub struct GuardHandle {
    events: Option<mpsc::UnboundedSender<GuardEvent>>,
    status_rx: watch::Receiver<GuardStatus>,
    /// Set by whoever submits first, the user or expiry
    claimed: Arc<AtomicBool>,
}

impl GuardHandle {
    /// Tell the guard the user submitted the form. The guard stops ticking and
    /// does not submit again.
    ///
    /// Returns false when the submission was already claimed, either by an
    /// earlier call or because time ran out first. The caller must then not
    /// submit.
    pub fn notify_submit(&self) -> bool {
        if !claim(&self.claimed) {
            return false;
        }
        if let Some(events) = &self.events {
            // A closed channel means the guard already finished
            let _ = events.send(GuardEvent::SubmitRequested);
        }
        true
    }

    /// Stop the guard without submitting. Safe to call more than once.
    pub fn cancel(&mut self) {
        if let Some(events) = self.events.take() {
            let _ = events.send(GuardEvent::Teardown);
        }
    }

    /// Latest published status
    pub fn status(&self) -> GuardStatus {
        self.status_rx.borrow().clone()
    }

    /// Subscribe to status updates
    pub fn subscribe(&self) -> watch::Receiver<GuardStatus> {
        self.status_rx.clone()
    }

    /// Resolve once the guard has stopped for any reason
    pub async fn wait_finished(&self) -> GuardStatus {
        let mut rx = self.status_rx.clone();
        // Err means the task ended and dropped its sender
        let _ = rx.wait_for(|status| status.phase.is_final()).await;
        let status = rx.borrow().clone();
        status
    }
}

impl Drop for GuardHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

fn claim(claimed: &AtomicBool) -> bool {
    claimed
        .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
        .is_ok()
}

fn render<S: TimerSurface>(session: &CountdownSession, surface: &mut S) {
    // A missing display only skips the digits
    if let Some(display) = surface.display() {
        display.set_text(&session.display_text());
    }
    surface.set_urgency(session.urgency());
}

async fn run_guard<S, F>(
    mut session: CountdownSession,
    mut surface: S,
    mut form: F,
    mut interval: Interval,
    mut events: mpsc::UnboundedReceiver<GuardEvent>,
    status_tx: watch::Sender<GuardStatus>,
    claimed: Arc<AtomicBool>,
) where
    S: TimerSurface,
    F: ExamForm,
{
    let exit = loop {
        tokio::select! {
            biased;

            event = events.recv() => match event {
                Some(GuardEvent::SubmitRequested) => break GuardExit::Manual,
                Some(GuardEvent::Teardown) | None => break GuardExit::Teardown,
            },

            _ = interval.tick() => match session.tick() {
                TickOutcome::Running { seconds_remaining } => {
                    render(&session, &mut surface);
                    debug!("Deadline guard tick: {}s remaining", seconds_remaining);
                    let _ = status_tx.send(GuardStatus::of(&session, GuardPhase::Running));
                }
                TickOutcome::Expired => {
                    render(&session, &mut surface);
                    // The user may have claimed the submission on another thread
                    // before its event reached this loop
                    if claim(&claimed) {
                        break GuardExit::Expired;
                    }
                    break GuardExit::Manual;
                }
                // The loop only marks the session after it exits
                TickOutcome::Halted => break GuardExit::Teardown,
            },
        }
    };

    // Release the tick before any submission
    drop(interval);

    match exit {
        GuardExit::Expired => {
            session.mark_submitted(SubmitReason::Expired);
            let _ = status_tx.send(GuardStatus::of(&session, GuardPhase::Expired));
            info!("Exam time expired, auto-submitting form");
            form.submit();
        }
        GuardExit::Manual => {
            session.mark_submitted(SubmitReason::Manual);
            let _ = status_tx.send(GuardStatus::of(&session, GuardPhase::Submitted));
            info!(
                "Exam submitted manually with {}s remaining, countdown stopped",
                session.seconds_remaining()
            );
        }
        GuardExit::Teardown => {
            let _ = status_tx.send(GuardStatus::of(&session, GuardPhase::Cancelled));
            debug!("Deadline guard torn down at {}s remaining", session.seconds_remaining());
        }
    }
}
