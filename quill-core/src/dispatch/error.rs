//! Dispatch error kinds

use crate::command::{ParseError, VariableError};
use crate::line::NormalizeError;

/// Reasons a line is refused before any of it reaches the executor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineError {
    /// Line does not fit the line buffer
    TooLong,
    /// A command holds more words than can be decoded
    TooManyWords,
    /// Variable table has no room for another variable
    TooManyVariables,
    /// Parameter-only line with no motion mode to inherit
    NoMotionMode,
}

impl LineError {
    /// Text sent to the host after `error:`
    pub fn reason(&self) -> &'static str {
        match self {
            LineError::TooLong => "Line too long",
            LineError::TooManyWords => "Too many words",
            LineError::TooManyVariables => "Too many variables",
            LineError::NoMotionMode => "No active motion mode",
        }
    }
}

impl From<NormalizeError> for LineError {
    fn from(e: NormalizeError) -> Self {
        match e {
            NormalizeError::TooLong => LineError::TooLong,
        }
    }
}

impl From<ParseError> for LineError {
    fn from(e: ParseError) -> Self {
        match e {
            ParseError::TooManyWords => LineError::TooManyWords,
        }
    }
}

impl From<VariableError> for LineError {
    fn from(e: VariableError) -> Self {
        match e {
            VariableError::TableFull => LineError::TooManyVariables,
        }
    }
}

/// Errors observed while dispatching a line
///
/// Only [`DispatchError::ExecutorFailure`] halts the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DispatchError {
    /// Line refused before dispatch
    MalformedLine(LineError),
    /// Machine-coordinate override without a usable motion command
    InvalidOverride,
    /// Command refused while halted
    AlarmLocked,
    /// Executor reported a failure
    ExecutorFailure,
}

impl From<LineError> for DispatchError {
    fn from(e: LineError) -> Self {
        DispatchError::MalformedLine(e)
    }
}
