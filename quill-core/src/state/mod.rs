//! Dispatcher state
//!
//! Two pieces of state outlive a single line: the machine mode (halt
//! latch) and the modal group 1 motion mode. Both are owned by the
//! dispatch engine and change only through the transitions defined here.

pub mod events;
pub mod machine;
pub mod modal;

pub use events::ModeEvent;
pub use machine::{HaltCause, MachineMode, RESET_MCODE};
pub use modal::{ModalContext, MotionMode};
