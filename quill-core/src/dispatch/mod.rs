//! Line dispatch
//!
//! Ties the line, command and safety stages together and drives the
//! acknowledgment protocol.

pub mod engine;
pub mod error;
pub mod machine_coords;
pub mod synthesize;

pub use engine::{DispatchEngine, Disposition, RawLine};
pub use error::{DispatchError, LineError};
pub use machine_coords::{is_machine_override, Resolution, MACHINE_COORDS_GCODE};
pub use synthesize::synthesize;
