//! Machine-coordinate override
//!
//! `G53` makes the next motion use absolute machine coordinates. It shows
//! up either in front of an explicit move (`G53 G0 X0 Y0`) or on its own
//! with axis words (`G53 X0 Y0`), in which case the modal motion mode is
//! used.

use crate::command::{Code, Command, ParseError, VariableTable};
use crate::line::Splitter;
use crate::state::{ModalContext, MotionMode};

/// G code selecting machine coordinates
pub const MACHINE_COORDS_GCODE: u16 = 53;

/// Outcome of resolving a `G53` directive
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// Motion command to run in machine coordinates
    Resolved(Command),
    /// No usable motion command; the directive is dropped
    Invalid,
}

/// Check if a command is the machine-coordinate directive
pub fn is_machine_override(command: &Command) -> bool {
    command.g() == Some(Code::new(MACHINE_COORDS_GCODE))
}

/// Resolve a `G53` directive into the motion command it applies to
///
/// When more text follows on the line, all of it is consumed and must be a
/// rapid or linear move. Otherwise the directive itself becomes a move in
/// the current modal mode.
pub fn resolve(
    mut directive: Command,
    rest: &mut Splitter<'_>,
    modal: &ModalContext,
    variables: &VariableTable,
) -> Result<Resolution, ParseError> {
    if rest.is_exhausted() {
        return Ok(match modal.motion() {
            Some(mode) => {
                directive.set_motion(mode);
                Resolution::Resolved(directive)
            }
            None => Resolution::Invalid,
        });
    }

    let command = Command::parse(rest.take_rest(), variables, directive.line_number())?;
    let straight = command.motion().is_some_and(MotionMode::is_straight);
    Ok(if straight {
        Resolution::Resolved(command)
    } else {
        Resolution::Invalid
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first(splitter: &mut Splitter<'_>) -> Command {
        let segment = splitter.next().unwrap();
        Command::parse(segment, &VariableTable::new(), Some(7)).unwrap()
    }

    fn resolved(resolution: Resolution) -> Command {
        match resolution {
            Resolution::Resolved(command) => command,
            Resolution::Invalid => panic!("expected a resolved command"),
        }
    }

    #[test]
    fn test_detects_directive() {
        let vars = VariableTable::new();
        assert!(is_machine_override(&Command::parse("G53", &vars, None).unwrap()));
        assert!(!is_machine_override(&Command::parse("G54", &vars, None).unwrap()));
        assert!(!is_machine_override(&Command::parse("G53.1", &vars, None).unwrap()));
    }

    #[test]
    fn test_explicit_move_consumes_rest() {
        let mut splitter = Splitter::new("G53 G0 X0 Y0");
        let directive = first(&mut splitter);
        let modal = ModalContext::default();

        let command = resolved(resolve(directive, &mut splitter, &modal, &VariableTable::new()).unwrap());
        assert_eq!(command.g(), Some(Code::new(0)));
        assert_eq!(command.value('X'), Some(0.0));
        assert_eq!(command.value('Y'), Some(0.0));
        assert_eq!(command.line_number(), Some(7));
        assert!(splitter.is_exhausted());
    }

    #[test]
    fn test_rest_must_be_straight_move() {
        let modal = ModalContext::new(Some(MotionMode::Linear));
        for line in ["G53 G2 X0", "G53 M3", "G53 G1.1 X0", "G53 G0.5 Y1"] {
            let mut splitter = Splitter::new(line);
            let directive = first(&mut splitter);
            assert_eq!(
                resolve(directive, &mut splitter, &modal, &VariableTable::new()),
                Ok(Resolution::Invalid),
                "{}",
                line
            );
            assert!(splitter.is_exhausted());
        }
    }

    #[test]
    fn test_bare_directive_uses_modal_mode() {
        let mut splitter = Splitter::new("G53 X0 Y0");
        let directive = first(&mut splitter);
        let modal = ModalContext::new(Some(MotionMode::Linear));

        let command = resolved(resolve(directive, &mut splitter, &modal, &VariableTable::new()).unwrap());
        assert_eq!(command.g(), Some(Code::new(1)));
        assert_eq!(command.value('X'), Some(0.0));
    }

    #[test]
    fn test_bare_directive_without_modal_mode_is_invalid() {
        let mut splitter = Splitter::new("G53 X0");
        let directive = first(&mut splitter);

        assert_eq!(
            resolve(directive, &mut splitter, &ModalContext::default(), &VariableTable::new()),
            Ok(Resolution::Invalid)
        );
    }
}
