//! Command decoding
//!
//! Turns one command segment into a [`Command`] with its words, G/M codes
//! and optional variable assignment.

pub mod parser;
pub mod variables;

pub use parser::{Assignment, Code, Command, ParseError, MAX_WORDS};
pub use variables::{VariableError, VariableTable, MAX_VARIABLES};
