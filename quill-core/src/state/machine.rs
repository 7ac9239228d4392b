//! Machine mode definition
//!
//! Whether commands may reach the executor is a function of the current
//! mode. The only way out of a halt is the reset command.

use super::events::ModeEvent;

/// M-code that clears the halt latch
pub const RESET_MCODE: u16 = 999;

/// Machine modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MachineMode {
    /// Commands flow to the executor
    #[default]
    Normal,
    /// Safety latch engaged; only allow-listed commands pass
    Halted(HaltCause),
}

/// Reasons the machine entered the halted mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HaltCause {
    /// Raised by the halt-control collaborator (kill button, limit switch, ...)
    External,
    /// The executor reported a failed command
    CommandFailed,
}

impl MachineMode {
    /// Check if the safety latch is engaged
    pub fn is_halted(&self) -> bool {
        matches!(self, MachineMode::Halted(_))
    }

    /// Process an event and return the next mode
    pub fn transition(self, event: ModeEvent) -> Self {
        use MachineMode::*;
        use ModeEvent::*;

        match (self, event) {
            (Normal, Halt(cause)) => Halted(cause),
            // The first cause is kept; later faults do not overwrite it
            (Halted(cause), Halt(_)) => Halted(cause),
            (Halted(_), Reset) => Normal,
            (Normal, Reset) => Normal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_normal() {
        let mode = MachineMode::default();
        assert_eq!(mode, MachineMode::Normal);
        assert!(!mode.is_halted());
    }

    #[test]
    fn test_halt_latches() {
        let mode = MachineMode::Normal.transition(ModeEvent::Halt(HaltCause::CommandFailed));
        assert_eq!(mode, MachineMode::Halted(HaltCause::CommandFailed));
    }

    #[test]
    fn test_first_cause_is_kept() {
        let mode = MachineMode::Normal
            .transition(ModeEvent::Halt(HaltCause::External))
            .transition(ModeEvent::Halt(HaltCause::CommandFailed));
        assert_eq!(mode, MachineMode::Halted(HaltCause::External));
    }

    #[test]
    fn test_reset_clears_from_any_cause() {
        for cause in [HaltCause::External, HaltCause::CommandFailed] {
            let mode = MachineMode::Halted(cause).transition(ModeEvent::Reset);
            assert_eq!(mode, MachineMode::Normal);
        }
    }

    #[test]
    fn test_reset_while_normal_is_noop() {
        assert_eq!(
            MachineMode::Normal.transition(ModeEvent::Reset),
            MachineMode::Normal
        );
    }
}
