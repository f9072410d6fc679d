//! Chess clock core
//! 
//! This module contains the two-sided countdown state machine and the small
//! value types that travel with it.

pub mod side;
pub mod preset;
pub mod source;
pub mod turn_clock;

// Re-export main types
pub use side::Side;
pub use preset::TimePreset;
pub use source::{ManualClock, MonotonicClock, SystemClock};
pub use turn_clock::{ClockEvent, ClockSnapshot, TickReport, TurnClock};
