//! Quill Host Line Protocol
//!
//! This crate defines the text protocol between a G-code host (slicer,
//! sender, terminal) and the Quill firmware. The protocol is line based:
//!
//! ```text
//!   host ── "G1 X10 Y20\n" ──▶ firmware
//!   host ◀── "ok\r\n" ──────── firmware
//! ```
//!
//! Every received line is answered with one or more acknowledgment
//! replies. Hosts count the `ok`s to pace their sending, so the reply
//! literals in [`reply`] are part of the wire contract.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
#[macro_use]
extern crate std;

pub mod line;
pub mod reply;
pub mod sink;

pub use line::{Line, LineAssembler, LineError, MAX_LINE_LEN};
pub use reply::{Reply, HOME_WARNING};
pub use sink::{ReplyLog, ReplySink, ReplyText, MAX_REPLY_LEN};
