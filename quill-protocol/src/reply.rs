//! Acknowledgment replies sent back to the host
//!
//! Existing host software matches these byte for byte, line terminators
//! included, so every variant renders to a fixed literal.

use core::fmt;

/// Advisory sent when the alarm latch is cleared
pub const HOME_WARNING: &str = "WARNING: After HALT you should HOME as position is currently unknown";

/// Text used when a failed command carries no explanation
pub const UNKNOWN_FAILURE: &str = "unknown";

/// One acknowledgment unit written to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Reply<'a> {
    /// `ok\r\n` for an empty line
    EmptyLine,
    /// `ok\n` for comments, blank lines and a cleared alarm
    Blank,
    /// `ok\r\n` for a successful command
    Ok,
    /// `ok <text>\r\n` for a successful command with trailing text
    OkWith(&'a str),
    /// `\r\n` requested by the executor ahead of the ok
    Newline,
    /// `ok - ignore: [<line>]\n` for an uppercase word that is not a command
    Ignored(&'a str),
    /// `ok - Invalid G53\r\n` for a malformed machine-coordinate override
    InvalidOverride,
    /// `error:Alarm lock\n` for a command refused while halted
    AlarmLock,
    /// `error:<text>\r\n`, or `error:unknown\r\n`, for a failed command
    Failure(Option<&'a str>),
    /// `Entering Alarm/Halt state\n` following a failure
    EnteringHalt,
    /// Post-reset advisory line
    HomeWarning,
    /// `error:<reason>\r\n` for a line refused before dispatch
    Rejected(&'a str),
}

impl Reply<'_> {
    /// Line terminator this reply ends with
    pub fn terminator(&self) -> &'static str {
        match self {
            Reply::Blank
            | Reply::Ignored(_)
            | Reply::AlarmLock
            | Reply::EnteringHalt
            | Reply::HomeWarning => "\n",
            _ => "\r\n",
        }
    }
}

impl fmt::Display for Reply<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::EmptyLine | Reply::Ok => f.write_str("ok\r\n"),
            Reply::Blank => f.write_str("ok\n"),
            Reply::OkWith(text) => write!(f, "ok {}\r\n", text),
            Reply::Newline => f.write_str("\r\n"),
            Reply::Ignored(line) => write!(f, "ok - ignore: [{}]\n", line),
            Reply::InvalidOverride => f.write_str("ok - Invalid G53\r\n"),
            Reply::AlarmLock => f.write_str("error:Alarm lock\n"),
            Reply::Failure(text) => {
                write!(f, "error:{}\r\n", text.unwrap_or(UNKNOWN_FAILURE))
            }
            Reply::EnteringHalt => f.write_str("Entering Alarm/Halt state\n"),
            Reply::HomeWarning => write!(f, "{}\n", HOME_WARNING),
            Reply::Rejected(reason) => write!(f, "error:{}\r\n", reason),
        }
    }
}
