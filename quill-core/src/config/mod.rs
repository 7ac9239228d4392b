//! Configuration types

pub mod types;

pub use types::*;
