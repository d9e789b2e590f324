use std::{sync::Arc, time::Duration};

use exam_guard::{state::SubmitReason, AppState, GuardPhase, SessionError};

/// Users submitting right at the deadline, with guards running on other worker
/// threads. Whichever side wins, the guard's verdict and the recorded
/// submission must agree, and there is only ever one submission.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn deadline_submissions_have_a_single_winner() {
    let state = Arc::new(AppState::new(0, "127.0.0.1".to_string(), 60));

    for _ in 0..3 {
        let ids: Vec<u64> = (0..200)
            .map(|_| state.start_session(Some("1".to_string())).unwrap().id)
            .collect();

        tokio::time::sleep(Duration::from_millis(995)).await;

        let mut accepted = Vec::new();
        for &id in &ids {
            match state.submit_session(id) {
                Ok(_) => accepted.push(id),
                Err(SessionError::AlreadySubmitted(_)) => {}
                Err(e) => panic!("unexpected error: {}", e),
            }
        }

        // Let every guard finish
        tokio::time::sleep(Duration::from_millis(500)).await;

        for &id in &ids {
            let snapshot = state.session(id).unwrap();
            let phase = snapshot.guard.unwrap().phase;
            assert_eq!(snapshot.submissions.len(), 1, "session {}", id);

            let reason = snapshot.submissions[0].reason;
            match phase {
                GuardPhase::Expired => {
                    assert_eq!(reason, SubmitReason::Expired, "session {}", id);
                    assert!(!accepted.contains(&id), "session {}", id);
                }
                GuardPhase::Submitted => {
                    assert_eq!(reason, SubmitReason::Manual, "session {}", id);
                    assert!(accepted.contains(&id), "session {}", id);
                }
                other => panic!("session {} ended as {:?}", id, other),
            }
        }
    }
}
