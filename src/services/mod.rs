//! External side effects module
//! 
//! This module contains the cue sinks that stand in for audio playback.

pub mod cues;

// Re-export main types
pub use cues::{CommandCueSink, Cue, CueFuture, CueSink, LogCueSink};
