//! Finished-session eviction background task

use std::{sync::Arc, time::Duration};
use tokio::time::{interval, MissedTickBehavior};
use tracing::{info, warn};

use crate::state::AppState;

/// How often finished sessions are looked for
pub const REAP_PERIOD: Duration = Duration::from_secs(60);

/// Background task that drops sessions finished longer than `retention` ago
pub async fn session_reaper_task(state: Arc<AppState>, retention: Duration) {
    info!("Starting session reaper task (retention {}s)", retention.as_secs());

    let mut interval = interval(REAP_PERIOD);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;

        if let Err(e) = state.evict_finished(retention) {
            warn!("Failed to evict finished sessions: {}", e);
        }
    }
}
