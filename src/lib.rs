//! Turn Clock - A two-player chess clock
//! 
//! This library provides the two-sided countdown state machine, pure
//! presentation helpers for clock faces, and a small HTTP service that drives
//! the clock and plays cues for turn changes and flag falls.

pub mod clock;
pub mod render;
pub mod config;
pub mod state;
pub mod api;
pub mod services;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use clock::{Side, TimePreset, TurnClock};
pub use config::Config;
pub use state::AppState;
pub use api::create_router;
pub use utils::signals::shutdown_signal;
