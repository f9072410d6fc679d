//! Cue dispatch background task

use std::sync::Arc;
use tokio::{
    sync::broadcast::{error::RecvError, Receiver},
    task::JoinHandle,
};
use tracing::{debug, info, warn};

use crate::{clock::ClockEvent, services::Cue, state::AppState};

/// Background task that plays a cue for every clock event that has one.
///
/// Each cue plays in its own task; a new cue cuts off the one still playing.
/// Pass a receiver from [`AppState::subscribe`] taken before any event that
/// should be heard.
pub async fn cue_dispatch_task(state: Arc<AppState>, mut events: Receiver<ClockEvent>) {
    info!("Starting cue dispatch task");

    let mut playing: Option<JoinHandle<()>> = None;

    loop {
        match events.recv().await {
            Ok(event) => {
                let Some(cue) = Cue::for_event(&event) else {
                    debug!("No cue for {:?}", event);
                    continue;
                };

                if let Some(previous) = playing.take() {
                    previous.abort();
                }

                let sink = Arc::clone(&state.cue_sink);
                playing = Some(tokio::spawn(async move {
                    if let Err(e) = sink.play(cue).await {
                        warn!("Failed to play cue {}: {}", cue.asset_name(), e);
                    }
                }));
            }
            Err(RecvError::Lagged(skipped)) => {
                warn!("Cue dispatch lagged, skipped {} events", skipped);
            }
            Err(RecvError::Closed) => {
                info!("Clock event channel closed, stopping cue dispatch");
                break;
            }
        }
    }
}
