//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy tasks.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;

use quill_core::state::HaltCause;

use crate::executor::MotionRequest;

/// Motion requests waiting for the planner
pub const MOTION_QUEUE_SIZE: usize = 16;

/// Resolved motion commands from the console task
pub static MOTION_QUEUE: Channel<CriticalSectionRawMutex, MotionRequest, MOTION_QUEUE_SIZE> =
    Channel::new();

/// Discard all queued motion (raised when the machine halts)
pub static MOTION_FLUSH: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Halt requested from outside the console (e.g. the halt button)
pub static HALT_REQUEST: Signal<CriticalSectionRawMutex, HaltCause> = Signal::new();
