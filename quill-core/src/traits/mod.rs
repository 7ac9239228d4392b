//! Collaborator traits
//!
//! These traits define the interface between the dispatch engine and the
//! rest of the firmware.

pub mod executor;
pub mod halt;

pub use executor::{CoordinateMode, Executor, Outcome, OutcomeText, Status, MAX_OUTCOME_TEXT};
pub use halt::HaltControl;
