//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use tracing::{error, info, warn};

use crate::{
    clock::{Side, TimePreset},
    state::AppState,
};
use super::responses::{
    ApiResponse, HealthResponse, PresetsResponse, ResetRequest, StatusResponse,
};

/// Handle POST /press/:side - A player presses their own button
pub async fn press_handler(
    State(state): State<Arc<AppState>>,
    Path(side): Path<String>,
) -> Result<Json<ApiResponse>, StatusCode> {
    let side: Side = side.parse().map_err(|e| {
        warn!("Rejected press: {}", e);
        StatusCode::BAD_REQUEST
    })?;

    match state.press(side) {
        Ok(outcome) => {
            info!("Press endpoint called by {} (applied={})", side, outcome.applied);
            Ok(Json(ApiResponse::from_outcome(
                outcome,
                &format!("{} passed the move", side),
                &format!("{} does not hold the move", side),
            )))
        }
        Err(e) => {
            error!("Failed to handle press from {}: {}", side, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /switch - Hand the move to the other side
pub async fn switch_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    match state.switch_turn() {
        Ok(outcome) => Ok(Json(ApiResponse::from_outcome(
            outcome,
            "Turn switched",
            "Clock expired, reset to play again",
        ))),
        Err(e) => {
            error!("Failed to switch turn: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /start - Start the active side's time
pub async fn start_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    match state.start() {
        Ok(outcome) => Ok(Json(ApiResponse::from_outcome(
            outcome,
            "Clock started",
            "Clock already running or expired",
        ))),
        Err(e) => {
            error!("Failed to start clock: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /stop - Pause the clock
pub async fn stop_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    match state.stop() {
        Ok(outcome) => Ok(Json(ApiResponse::from_outcome(
            outcome,
            "Clock stopped",
            "Clock was not running",
        ))),
        Err(e) => {
            error!("Failed to stop clock: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /reset - Restart the game, optionally with a new preset
pub async fn reset_handler(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<ApiResponse>, StatusCode> {
    let request = if body.iter().all(u8::is_ascii_whitespace) {
        ResetRequest::default()
    } else {
        serde_json::from_slice::<ResetRequest>(&body).map_err(|e| {
            warn!("Rejected reset body: {}", e);
            StatusCode::BAD_REQUEST
        })?
    };

    let preset = match request.minutes {
        Some(minutes) => Some(TimePreset::from_minutes(minutes).ok_or_else(|| {
            warn!("Rejected reset: no {} minute preset", minutes);
            StatusCode::BAD_REQUEST
        })?),
        None => None,
    };

    match state.reset(preset) {
        Ok(outcome) => {
            let label = preset.unwrap_or(state.default_preset).label();
            Ok(Json(ApiResponse::from_outcome(
                outcome,
                &format!("Clock reset to {}", label),
                "Clock reset ignored",
            )))
        }
        Err(e) => {
            error!("Failed to reset clock: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle GET /presets - Return the restart menu
pub async fn presets_handler(State(state): State<Arc<AppState>>) -> Json<PresetsResponse> {
    Json(PresetsResponse::menu(state.default_preset))
}

/// Handle GET /status - Return current clock status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let clock = state.latest_snapshot();
    let (white, black) = StatusResponse::faces(&clock);
    let (last_action, last_action_time) = state.get_last_action();

    Json(StatusResponse {
        clock,
        white,
        black,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    })
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
