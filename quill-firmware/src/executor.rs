//! Motion queue executor
//!
//! Forwards resolved motion commands (G0-G3) to the motion task. Every
//! other command is acknowledged without further action.

use defmt::*;

use quill_core::command::Command;
use quill_core::state::MotionMode;
use quill_core::traits::{CoordinateMode, Executor, Outcome};

use crate::channels::MOTION_QUEUE;

/// Axis words of a motion command; missing axes keep their position
#[derive(Debug, Clone, Copy, PartialEq, Default, Format)]
pub struct Target {
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub z: Option<f32>,
    pub a: Option<f32>,
}

impl Target {
    fn from_command(command: &Command) -> Self {
        Self {
            x: command.value('X'),
            y: command.value('Y'),
            z: command.value('Z'),
            a: command.value('A'),
        }
    }
}

/// A move handed to the motion task
#[derive(Debug, Clone, Copy, PartialEq, Format)]
pub struct MotionRequest {
    pub mode: MotionMode,
    pub coords: CoordinateMode,
    pub target: Target,
    /// Feed rate in mm/min, when the command sets one
    pub feed: Option<f32>,
}

/// Executor feeding the motion queue
#[derive(Debug, Default)]
pub struct QueueExecutor {
    queued: u32,
}

impl QueueExecutor {
    pub const fn new() -> Self {
        Self { queued: 0 }
    }
}

impl Executor for QueueExecutor {
    fn dispatch(&mut self, command: &Command, coords: CoordinateMode) -> Outcome {
        let Some(mode) = command.motion() else {
            trace!("Acknowledged {} command", command.letter());
            return Outcome::ok();
        };

        let request = MotionRequest {
            mode,
            coords,
            target: Target::from_command(command),
            feed: command.value('F'),
        };

        match MOTION_QUEUE.try_send(request) {
            Ok(()) => {
                self.queued = self.queued.wrapping_add(1);
                trace!("Queued motion #{}: {:?}", self.queued, request);
                Outcome::ok()
            }
            Err(_) => {
                warn!("Motion queue full, rejecting {:?}", mode);
                Outcome::error().with_text("Motion queue full")
            }
        }
    }
}
