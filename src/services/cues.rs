//! Cue sinks: audible (or visible) feedback for clock events

use std::future::Future;
use std::pin::Pin;
use tokio::process::Command;
use tracing::{debug, info};

use crate::clock::{ClockEvent, Side};

/// A feedback cue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// A side's time started running
    Snap(Side),
    /// A flag fell
    TickTock,
}

impl Cue {
    /// Cue for a clock event, if that event has one
    pub fn for_event(event: &ClockEvent) -> Option<Self> {
        match event {
            ClockEvent::TurnStarted { side } => Some(Cue::Snap(*side)),
            ClockEvent::Expired { .. } => Some(Cue::TickTock),
            ClockEvent::Reset { .. } => None,
        }
    }

    /// Name of the sound asset for this cue
    pub fn asset_name(self) -> &'static str {
        match self {
            Cue::Snap(Side::White) => "snap1",
            Cue::Snap(Side::Black) => "snap2",
            Cue::TickTock => "ticktock",
        }
    }
}

/// Boxed future returned by cue sinks
pub type CueFuture<'a> = Pin<Box<dyn Future<Output = Result<(), String>> + Send + 'a>>;

/// Something that can play a cue
pub trait CueSink: Send + Sync {
    fn play(&self, cue: Cue) -> CueFuture<'_>;
}

/// Writes cues to the log
#[derive(Debug, Clone, Copy, Default)]
pub struct LogCueSink;

impl CueSink for LogCueSink {
    fn play(&self, cue: Cue) -> CueFuture<'_> {
        Box::pin(async move {
            info!("Cue: {}", cue.asset_name());
            Ok(())
        })
    }
}

/// Runs an external program with the cue's asset name as its last argument
#[derive(Debug, Clone)]
pub struct CommandCueSink {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandCueSink {
    /// Build from a whitespace separated command line, e.g. `"play-sound --quiet"`
    pub fn from_command_line(command_line: &str) -> Option<Self> {
        let mut parts = command_line.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        Some(Self {
            program,
            args: parts.collect(),
        })
    }
}

impl CueSink for CommandCueSink {
    fn play(&self, cue: Cue) -> CueFuture<'_> {
        Box::pin(async move {
            debug!("Running {} for cue {}", self.program, cue.asset_name());

            let output = Command::new(&self.program)
                .args(&self.args)
                .arg(cue.asset_name())
                .kill_on_drop(true)
                .output()
                .await
                .map_err(|e| format!("Failed to execute {}: {}", self.program, e))?;

            if !output.status.success() {
                let stderr = String::from_utf8_lossy(&output.stderr);
                return Err(format!("{} failed: {}", self.program, stderr));
            }

            Ok(())
        })
    }
}
