//! Halt control trait

use crate::state::HaltCause;

/// System-wide halt collaborator
///
/// Notified when the dispatcher latches or clears the halt state. Halts
/// requested by the collaborator itself go through
/// [`DispatchEngine::halt`](crate::dispatch::DispatchEngine::halt) and are
/// not echoed back.
pub trait HaltControl {
    /// The dispatcher latched the machine into halt
    fn on_halt(&mut self, cause: HaltCause);

    /// The reset command cleared the halt
    fn on_clear(&mut self);
}

impl<H: HaltControl + ?Sized> HaltControl for &mut H {
    fn on_halt(&mut self, cause: HaltCause) {
        (**self).on_halt(cause)
    }

    fn on_clear(&mut self) {
        (**self).on_clear()
    }
}
