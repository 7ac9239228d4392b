//! Halt gate
//!
//! While the machine is halted every decoded command is checked here
//! before it may reach the executor.

use super::allow::{AllowSet, HALT_ALLOWED_MCODES};
use crate::command::Command;
use crate::state::{MachineMode, RESET_MCODE};

/// Gate decision for one command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Verdict {
    /// Command may proceed to the executor
    Pass,
    /// Reset command while halted; clears the latch and runs nothing
    Reset,
    /// Command refused while halted
    Locked,
}

/// Filters commands against the allow-list while halted
#[derive(Debug, Clone, Copy)]
pub struct HaltGate {
    allowed: AllowSet,
}

impl Default for HaltGate {
    fn default() -> Self {
        Self::new(HALT_ALLOWED_MCODES)
    }
}

impl HaltGate {
    /// Create a gate with the given allow-list
    pub const fn new(allowed: AllowSet) -> Self {
        Self { allowed }
    }

    /// Allow-list in use
    pub fn allowed(&self) -> AllowSet {
        self.allowed
    }

    /// Decide whether a command may run in the given mode
    ///
    /// In normal mode everything passes. While halted only the reset code
    /// and allow-listed M-codes get through; commands without an M-code
    /// are refused.
    pub fn inspect(&self, mode: MachineMode, command: &Command) -> Verdict {
        if !mode.is_halted() {
            return Verdict::Pass;
        }

        match command.m() {
            Some(code) if code.number == RESET_MCODE => Verdict::Reset,
            Some(code) if self.allowed.contains(code.number) => Verdict::Pass,
            _ => Verdict::Locked,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::VariableTable;
    use crate::state::HaltCause;

    const HALTED: MachineMode = MachineMode::Halted(HaltCause::CommandFailed);

    fn command(segment: &str) -> Command {
        Command::parse(segment, &VariableTable::new(), None).unwrap()
    }

    #[test]
    fn test_normal_mode_passes_everything() {
        let gate = HaltGate::default();
        for segment in ["G1 X10", "M3 S1000", "T1", "M999"] {
            assert_eq!(
                gate.inspect(MachineMode::Normal, &command(segment)),
                Verdict::Pass
            );
        }
    }

    #[test]
    fn test_allowed_query_passes_while_halted() {
        let gate = HaltGate::default();
        assert_eq!(gate.inspect(HALTED, &command("M105")), Verdict::Pass);
        assert_eq!(gate.inspect(HALTED, &command("M114")), Verdict::Pass);
    }

    #[test]
    fn test_disallowed_mcode_locked() {
        let gate = HaltGate::default();
        assert_eq!(gate.inspect(HALTED, &command("M3")), Verdict::Locked);
    }

    #[test]
    fn test_non_mcode_locked() {
        let gate = HaltGate::default();
        assert_eq!(gate.inspect(HALTED, &command("G0 X0")), Verdict::Locked);
        assert_eq!(gate.inspect(HALTED, &command("T1")), Verdict::Locked);
        assert_eq!(gate.inspect(HALTED, &command("#1=5")), Verdict::Locked);
    }

    #[test]
    fn test_reset_recognized() {
        let gate = HaltGate::default();
        assert_eq!(gate.inspect(HALTED, &command("M999")), Verdict::Reset);
        let external = MachineMode::Halted(HaltCause::External);
        assert_eq!(gate.inspect(external, &command("M999")), Verdict::Reset);
    }

    #[test]
    fn test_custom_allow_list() {
        let gate = HaltGate::new(AllowSet::new(&[3]));
        assert_eq!(gate.allowed().codes(), &[3]);
        assert_eq!(gate.inspect(HALTED, &command("M3")), Verdict::Pass);
        assert_eq!(gate.inspect(HALTED, &command("M105")), Verdict::Locked);
    }
}
