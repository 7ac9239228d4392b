//! Board-agnostic G-code ingestion for the Quill motion firmware
//!
//! This crate turns received text lines into validated commands and
//! acknowledgments without depending on any hardware:
//!
//! - Line classification, normalization and command splitting
//! - Command parsing with numbered variables
//! - Modal resumption and the `G53` machine-coordinate override
//! - Halt gate with its allow-list
//! - Dispatch engine and reply protocol
//! - Collaborator traits (executor, halt control)
//! - Dispatch configuration types

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
#[macro_use]
extern crate std;

pub mod command;
pub mod config;
pub mod dispatch;
pub mod line;
pub mod safety;
pub mod state;
pub mod traits;

pub use dispatch::{DispatchEngine, DispatchError, Disposition, LineError, RawLine};
