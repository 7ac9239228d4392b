//! Halt control
//!
//! Couples the dispatcher's halt latch to the motion task.

use defmt::*;

use quill_core::state::HaltCause;
use quill_core::traits::HaltControl;

use crate::channels::MOTION_FLUSH;

/// Halt control that flushes queued motion when the machine halts
#[derive(Debug, Default)]
pub struct SignalHaltControl;

impl HaltControl for SignalHaltControl {
    fn on_halt(&mut self, cause: HaltCause) {
        warn!("Halt latched: {:?}", cause);
        MOTION_FLUSH.signal(());
    }

    fn on_clear(&mut self) {
        info!("Halt cleared, position must be re-homed");
    }
}
