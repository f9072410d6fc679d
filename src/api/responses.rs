//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    clock::{ClockSnapshot, Side, TimePreset},
    render::SideView,
    state::ActionOutcome,
};

/// Body accepted by POST /reset
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResetRequest {
    /// Minutes per side; must match a preset
    pub minutes: Option<u64>,
}

/// API response structure for clock action endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub applied: bool,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub clock: ClockSnapshot,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: String, applied: bool, message: String, clock: ClockSnapshot) -> Self {
        Self {
            status,
            applied,
            message,
            timestamp: Utc::now(),
            clock,
        }
    }

    /// Build a response for an action, with a message for each case
    pub fn from_outcome(outcome: ActionOutcome, applied_msg: &str, ignored_msg: &str) -> Self {
        if outcome.applied {
            Self::new("applied".to_string(), true, applied_msg.to_string(), outcome.snapshot)
        } else {
            Self::new("ignored".to_string(), false, ignored_msg.to_string(), outcome.snapshot)
        }
    }
}

/// Status response with rendered clock faces
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub clock: ClockSnapshot,
    pub white: SideView,
    pub black: SideView,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

impl StatusResponse {
    pub fn faces(clock: &ClockSnapshot) -> (SideView, SideView) {
        (
            SideView::from_snapshot(clock, Side::White),
            SideView::from_snapshot(clock, Side::Black),
        )
    }
}

/// One restart menu entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresetEntry {
    pub label: String,
    pub minutes: u64,
    pub default: bool,
}

/// Restart menu
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresetsResponse {
    pub presets: Vec<PresetEntry>,
}

impl PresetsResponse {
    pub fn menu(default: TimePreset) -> Self {
        Self {
            presets: TimePreset::ALL
                .into_iter()
                .map(|preset| PresetEntry {
                    label: preset.label().to_string(),
                    minutes: preset.minutes(),
                    default: preset == default,
                })
                .collect(),
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
