//! Tick driver background task

use std::{sync::Arc, time::Duration};
use tokio::time::{interval, MissedTickBehavior};
use tracing::{error, info};

use crate::state::AppState;

/// Background task that advances the clock by elapsed time on every interval
pub async fn tick_driver_task(state: Arc<AppState>, period: Duration) {
    info!("Starting tick driver task ({:?} period)", period);

    let mut interval = interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        interval.tick().await;

        // "now" is sampled under the clock lock, so a press that lands
        // between interval ticks is never followed by an older sample
        match state.tick_now() {
            Ok(Some(report)) => {
                if let Some(event) = report.expired {
                    info!("Clock expired: {:?}", event);
                }
            }
            Ok(None) => {
                // Clock is stopped
            }
            Err(e) => {
                error!("Failed to advance clock: {}", e);
            }
        }
    }
}
