//! Exam Guard - hosted exam countdown sessions with a hard deadline
//!
//! This is the main entry point for the exam-guard server.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use exam_guard::{
    api::create_router,
    config::Config,
    state::AppState,
    tasks::session_reaper_task,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("exam_guard={},tower_http=info", config.log_level()))
        .init();

    info!("Starting exam-guard server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, exam={}min, retain={}min",
          config.host, config.port, config.exam_minutes, config.retain_minutes);

    let state = Arc::new(AppState::new(config.port, config.host.clone(), config.exam_minutes));

    // Evict finished sessions in the background
    let reaper_state = Arc::clone(&state);
    let retention = config.retention();
    tokio::spawn(async move {
        session_reaper_task(reaper_state, retention).await;
    });
    let app = create_router(Arc::clone(&state));

    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST   /sessions            - Open an exam session and start its countdown");
    info!("  GET    /sessions/:id        - Countdown and submission state");
    info!("  POST   /sessions/:id/submit - Submit the exam");
    info!("  DELETE /sessions/:id        - Close an exam session");
    info!("  GET    /status              - Server status");
    info!("  GET    /health              - Health check");

    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        signal = shutdown_signal() => {
            signal?;
            info!("Shutdown signal received");
        }
    }

    state.teardown_all();
    info!("Server shutdown complete");
    Ok(())
}
