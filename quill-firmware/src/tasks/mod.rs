//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod console;
pub mod halt_button;
pub mod motion;

pub use console::console_task;
pub use halt_button::halt_button_task;
pub use motion::motion_task;
