//! Command executor trait
//!
//! The executor is the downstream consumer of resolved commands (motion
//! planner, temperature control, queries). It runs each command to
//! completion and reports an outcome the dispatcher turns into a reply.

use heapless::String;

use crate::command::Command;

/// Maximum length of the text an executor may attach to an outcome
pub const MAX_OUTCOME_TEXT: usize = 96;

/// Text attached to an outcome
pub type OutcomeText = String<MAX_OUTCOME_TEXT>;

/// Whether a command succeeded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Status {
    Ok,
    /// Fatal failure; latches the machine into halt
    Error,
}

/// Coordinate system for a command's axis words
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CoordinateMode {
    /// Active work offset applies
    #[default]
    Work,
    /// Absolute machine coordinates, for this command only
    Machine,
}

/// Result of running one command
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Outcome {
    pub status: Status,
    /// Text appended to the acknowledgment
    pub text: Option<OutcomeText>,
    /// Emit an empty line before the acknowledgment
    pub add_newline: bool,
}

impl Outcome {
    /// Plain success
    pub const fn ok() -> Self {
        Self {
            status: Status::Ok,
            text: None,
            add_newline: false,
        }
    }

    /// Failure without text
    pub const fn error() -> Self {
        Self {
            status: Status::Error,
            text: None,
            add_newline: false,
        }
    }

    /// Attach text, truncated to [`MAX_OUTCOME_TEXT`] at a char boundary
    pub fn with_text(mut self, text: &str) -> Self {
        let mut end = text.len().min(MAX_OUTCOME_TEXT);
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        let mut owned = OutcomeText::new();
        // Cannot fail: end is within capacity
        let _ = owned.push_str(&text[..end]);
        self.text = Some(owned);
        self
    }

    /// Request an empty line before the acknowledgment
    pub fn with_newline(mut self) -> Self {
        self.add_newline = true;
        self
    }

    pub fn is_ok(&self) -> bool {
        self.status == Status::Ok
    }

    /// Attached text, if any
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }
}

/// Consumer of resolved commands
///
/// Called synchronously, once per command, from the dispatch engine.
/// Implementations must not call back into the engine.
pub trait Executor {
    /// Run a command and report its outcome
    ///
    /// `coords` is [`CoordinateMode::Machine`] when the command's axis words
    /// are absolute machine coordinates. It applies to this call only.
    fn dispatch(&mut self, command: &Command, coords: CoordinateMode) -> Outcome;
}

impl<E: Executor + ?Sized> Executor for &mut E {
    fn dispatch(&mut self, command: &Command, coords: CoordinateMode) -> Outcome {
        (**self).dispatch(command, coords)
    }
}
