//! Events that trigger mode transitions

use super::machine::HaltCause;

/// Events that can change the machine mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ModeEvent {
    /// Engage the safety latch
    Halt(HaltCause),
    /// Reset command received
    Reset,
}

impl ModeEvent {
    /// Check if this event was raised by the dispatcher itself
    pub fn is_dispatch_event(&self) -> bool {
        matches!(
            self,
            ModeEvent::Halt(HaltCause::CommandFailed) | ModeEvent::Reset
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_events() {
        assert!(ModeEvent::Reset.is_dispatch_event());
        assert!(ModeEvent::Halt(HaltCause::CommandFailed).is_dispatch_event());
        assert!(!ModeEvent::Halt(HaltCause::External).is_dispatch_event());
    }
}
