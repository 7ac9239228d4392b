//! Modal resumption
//!
//! Some CAM tools emit lines holding only axis or feed words (`X10 Y20`),
//! relying on the motion mode of an earlier line. Such a line is rewritten
//! with an explicit motion command in front and then dispatched like any
//! other command line.

use core::fmt::Write;

use super::error::LineError;
use crate::line::NormalizedLine;
use crate::state::{ModalContext, MotionMode};

/// Rewrite a parameter-only line with an explicit motion command
///
/// `trigger` is the letter that opened the line. A lone feed word always
/// resumes linear motion; axis words resume the modal motion mode and fail
/// when there is none.
pub fn synthesize(
    line: &str,
    trigger: char,
    modal: &ModalContext,
) -> Result<NormalizedLine, LineError> {
    let mode = if trigger == 'F' {
        MotionMode::Linear
    } else {
        modal.motion().ok_or(LineError::NoMotionMode)?
    };

    let mut out = NormalizedLine::new();
    write!(out, "G{} ", mode.gcode()).map_err(|_| LineError::TooLong)?;
    out.push_str(line).map_err(|_| LineError::TooLong)?;
    Ok(out)
}
