//! State management module
//! 
//! This module contains the shared application state that owns the clock.

pub mod app_state;

// Re-export main types
pub use app_state::{ActionOutcome, AppState};
