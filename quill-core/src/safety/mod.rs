//! Safety gating
//!
//! Keeps commands away from the executor while the machine is halted.

pub mod allow;
pub mod gate;

pub use allow::{AllowSet, HALT_ALLOWED_MCODES};
pub use gate::{HaltGate, Verdict};
