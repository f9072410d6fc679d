//! Main application state management

use std::{
    sync::{Arc, Mutex},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::sync::{broadcast, watch};
use tracing::{debug, info};

use crate::{
    clock::{ClockEvent, ClockSnapshot, Side, TickReport, TimePreset, TurnClock},
    services::CueSink,
};

/// What an action did to the clock
#[derive(Debug, Clone)]
pub struct ActionOutcome {
    /// False when the action was ignored for the current state
    pub applied: bool,
    pub snapshot: ClockSnapshot,
}

/// Main application state that owns the clock and its notification channels
pub struct AppState {
    /// The chess clock
    pub clock: Arc<Mutex<TurnClock>>,
    /// Preset used by a reset that names no time
    pub default_preset: TimePreset,
    /// Feedback for turn starts and flag falls
    pub cue_sink: Arc<dyn CueSink>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
    /// Clock events (turn started, expired, reset)
    pub event_tx: broadcast::Sender<ClockEvent>,
    /// Latest snapshot after every change
    pub snapshot_tx: watch::Sender<ClockSnapshot>,
    /// Keep the receiver alive to prevent channel closure
    pub _snapshot_rx: watch::Receiver<ClockSnapshot>,
}

impl AppState {
    /// Create a new AppState with a stopped clock set to `default_preset`
    pub fn new(
        port: u16,
        host: String,
        default_preset: TimePreset,
        cue_sink: Arc<dyn CueSink>,
    ) -> Self {
        let clock = TurnClock::new(default_preset.seconds());
        let (event_tx, _) = broadcast::channel(100);
        let (snapshot_tx, snapshot_rx) = watch::channel(clock.snapshot());

        Self {
            clock: Arc::new(Mutex::new(clock)),
            default_preset,
            cue_sink,
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
            event_tx,
            snapshot_tx,
            _snapshot_rx: snapshot_rx,
        }
    }

    /// Apply an action to the clock and publish whatever it produced
    pub fn update_clock<F>(&self, action: &str, updater: F) -> Result<ActionOutcome, String>
    where
        F: FnOnce(&mut TurnClock) -> (bool, Option<ClockEvent>),
    {
        let mut clock = self.clock.lock()
            .map_err(|e| format!("Failed to lock clock: {}", e))?;

        let (applied, event) = updater(&mut *clock);
        let snapshot = clock.snapshot();

        if !applied {
            drop(clock);
            debug!("Action {} ignored for current clock state", action);
            return Ok(ActionOutcome { applied, snapshot });
        }

        // Publish under the lock so listeners see changes in clock order
        self.publish(event, &snapshot);
        drop(clock);

        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }

        Ok(ActionOutcome { applied, snapshot })
    }

    /// Restart the game with `preset`, or the default preset
    pub fn reset(&self, preset: Option<TimePreset>) -> Result<ActionOutcome, String> {
        let preset = preset.unwrap_or(self.default_preset);
        info!("Resetting clock to {}", preset.label());
        self.update_clock("reset", |clock| (true, Some(clock.reset(preset.seconds()))))
    }

    pub fn start(&self) -> Result<ActionOutcome, String> {
        self.update_clock("start", |clock| {
            let event = clock.start();
            (event.is_some(), event)
        })
    }

    pub fn stop(&self) -> Result<ActionOutcome, String> {
        self.update_clock("stop", |clock| (clock.stop(), None))
    }

    pub fn switch_turn(&self) -> Result<ActionOutcome, String> {
        self.update_clock("switch", |clock| {
            let event = clock.switch_turn();
            (event.is_some(), event)
        })
    }

    /// `side` presses its own button
    pub fn press(&self, side: Side) -> Result<ActionOutcome, String> {
        self.update_clock(&format!("press-{}", side), |clock| {
            let event = clock.press(side);
            (event.is_some(), event)
        })
    }

    /// Advance the clock to the clock's own "now", sampled under the lock
    pub fn tick_now(&self) -> Result<Option<TickReport>, String> {
        self.advance(|clock| clock.now())
    }

    /// Advance the clock to `now`. Returns `None` when the clock is stopped.
    pub fn tick(&self, now: Instant) -> Result<Option<TickReport>, String> {
        self.advance(|_| now)
    }

    fn advance<F>(&self, sample: F) -> Result<Option<TickReport>, String>
    where
        F: FnOnce(&TurnClock) -> Instant,
    {
        let mut clock = self.clock.lock()
            .map_err(|e| format!("Failed to lock clock: {}", e))?;

        let now = sample(&*clock);
        let Some(report) = clock.tick(now) else {
            return Ok(None);
        };

        self.publish(report.expired, &clock.snapshot());
        Ok(Some(report))
    }

    /// Latest published clock snapshot
    pub fn latest_snapshot(&self) -> ClockSnapshot {
        self.snapshot_tx.borrow().clone()
    }

    /// Subscribe to clock events
    pub fn subscribe(&self) -> broadcast::Receiver<ClockEvent> {
        self.event_tx.subscribe()
    }

    fn publish(&self, event: Option<ClockEvent>, snapshot: &ClockSnapshot) {
        if let Some(event) = event {
            // No subscribers is normal before the cue task starts
            if self.event_tx.send(event).is_err() {
                debug!("No listeners for clock event {:?}", event);
            }
        }
        self.snapshot_tx.send_replace(snapshot.clone());
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
