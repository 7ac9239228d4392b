//! Line assembly for the host console.
//!
//! Hosts stream G-code as text terminated by `\n`, `\r` or `\r\n`. The
//! assembler collects bytes until a terminator and hands back one complete
//! line at a time:
//! - `\r` and `\n` both end a line
//! - the `\n` of a `\r\n` pair does not produce an extra empty line
//! - a line longer than [`MAX_LINE_LEN`] is dropped up to its terminator
//!   and reported once as [`LineError::Overflow`]

use heapless::{String, Vec};

/// Maximum line length in bytes (terminator excluded)
pub const MAX_LINE_LEN: usize = 256;

/// A complete received line, without its terminator
pub type Line = String<MAX_LINE_LEN>;

/// Errors that can occur while assembling lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineError {
    /// Line exceeded the maximum length and was discarded
    Overflow,
    /// Line was not valid UTF-8 and was discarded
    InvalidUtf8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AssemblyState {
    /// Collecting bytes of the current line
    Collecting,
    /// Previous line ended with `\r`; a following `\n` belongs to it
    AfterCarriageReturn,
    /// Current line overflowed; skipping until the next terminator
    Discarding,
}

/// State machine turning a byte stream into lines
#[derive(Debug, Clone)]
pub struct LineAssembler {
    state: AssemblyState,
    buffer: Vec<u8, MAX_LINE_LEN>,
}

impl Default for LineAssembler {
    fn default() -> Self {
        Self::new()
    }
}

impl LineAssembler {
    /// Create a new, empty line assembler
    pub fn new() -> Self {
        Self {
            state: AssemblyState::Collecting,
            buffer: Vec::new(),
        }
    }

    /// Drop any partially received line
    pub fn reset(&mut self) {
        self.state = AssemblyState::Collecting;
        self.buffer.clear();
    }

    /// Number of bytes buffered for the line in progress
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }

    /// Feed a single byte to the assembler
    ///
    /// Returns `Ok(Some(line))` when a terminator completes a line,
    /// `Ok(None)` when more bytes are needed, or `Err` when the line in
    /// progress had to be discarded.
    pub fn feed(&mut self, byte: u8) -> Result<Option<Line>, LineError> {
        match byte {
            b'\n' if self.state == AssemblyState::AfterCarriageReturn => {
                self.state = AssemblyState::Collecting;
                Ok(None)
            }
            b'\r' | b'\n' => {
                let discarding = self.state == AssemblyState::Discarding;
                self.state = if byte == b'\r' {
                    AssemblyState::AfterCarriageReturn
                } else {
                    AssemblyState::Collecting
                };

                if discarding {
                    // Overflow was already reported when it happened
                    self.buffer.clear();
                    return Ok(None);
                }
                self.take_line().map(Some)
            }
            _ => {
                if self.state == AssemblyState::Discarding {
                    return Ok(None);
                }
                self.state = AssemblyState::Collecting;

                if self.buffer.push(byte).is_err() {
                    self.buffer.clear();
                    self.state = AssemblyState::Discarding;
                    return Err(LineError::Overflow);
                }
                Ok(None)
            }
        }
    }

    /// Feed multiple bytes to the assembler
    ///
    /// Returns the first complete line found, if any.
    /// Remaining bytes after a complete line are not consumed.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> Result<Option<Line>, LineError> {
        for &byte in bytes {
            if let Some(line) = self.feed(byte)? {
                return Ok(Some(line));
            }
        }
        Ok(None)
    }

    fn take_line(&mut self) -> Result<Line, LineError> {
        let result = core::str::from_utf8(&self.buffer)
            .map_err(|_| LineError::InvalidUtf8)
            .and_then(|text| Line::try_from(text).map_err(|_| LineError::Overflow));
        self.buffer.clear();
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(assembler: &mut LineAssembler, bytes: &[u8]) -> Vec<Line, 8> {
        let mut lines = Vec::new();
        for &byte in bytes {
            if let Ok(Some(line)) = assembler.feed(byte) {
                lines.push(line).unwrap();
            }
        }
        lines
    }

    #[test]
    fn test_single_line() {
        let mut assembler = LineAssembler::new();
        let line = assembler.feed_bytes(b"G1 X10\n").unwrap().unwrap();
        assert_eq!(line.as_str(), "G1 X10");
        assert_eq!(assembler.pending(), 0);
    }

    #[test]
    fn test_incomplete_line() {
        let mut assembler = LineAssembler::new();
        assert_eq!(assembler.feed_bytes(b"G1 X1"), Ok(None));
        assert_eq!(assembler.pending(), 5);
    }

    #[test]
    fn test_crlf_is_one_terminator() {
        let mut assembler = LineAssembler::new();
        let lines = collect(&mut assembler, b"G0 X1\r\nM105\r\n");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].as_str(), "G0 X1");
        assert_eq!(lines[1].as_str(), "M105");
    }

    #[test]
    fn test_bare_cr_terminates() {
        let mut assembler = LineAssembler::new();
        let lines = collect(&mut assembler, b"M114\rM105\r");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].as_str(), "M105");
    }

    #[test]
    fn test_empty_lines_are_reported() {
        let mut assembler = LineAssembler::new();
        let lines = collect(&mut assembler, b"\n\n");
        assert_eq!(lines.len(), 2);
        assert!(lines.iter().all(|l| l.is_empty()));
    }

    #[test]
    fn test_overflow_discards_until_terminator() {
        let mut assembler = LineAssembler::new();
        let long = [b'X'; MAX_LINE_LEN + 1];

        let mut errors = 0;
        for &byte in &long {
            if assembler.feed(byte) == Err(LineError::Overflow) {
                errors += 1;
            }
        }
        assert_eq!(errors, 1);

        // Terminator of the oversized line yields nothing
        assert_eq!(assembler.feed(b'\n'), Ok(None));

        // Next line is received intact
        let line = assembler.feed_bytes(b"M105\n").unwrap().unwrap();
        assert_eq!(line.as_str(), "M105");
    }

    #[test]
    fn test_line_at_capacity_is_accepted() {
        let mut assembler = LineAssembler::new();
        let full = [b'Y'; MAX_LINE_LEN];
        assert_eq!(assembler.feed_bytes(&full), Ok(None));
        let line = assembler.feed(b'\n').unwrap().unwrap();
        assert_eq!(line.len(), MAX_LINE_LEN);
    }

    #[test]
    fn test_invalid_utf8() {
        let mut assembler = LineAssembler::new();
        assert_eq!(
            assembler.feed_bytes(&[b'G', 0xFF, 0xFE, b'\n']),
            Err(LineError::InvalidUtf8)
        );

        // Assembler recovers for the next line
        let line = assembler.feed_bytes(b"G28\n").unwrap().unwrap();
        assert_eq!(line.as_str(), "G28");
    }

    proptest::proptest! {
        #[test]
        fn prop_printable_lines_survive_framing(
            lines in proptest::collection::vec("[ -~]{0,64}", 0..8),
            crlf in proptest::bool::ANY,
        ) {
            let mut assembler = LineAssembler::new();
            for line in &lines {
                for &byte in line.as_bytes() {
                    proptest::prop_assert_eq!(assembler.feed(byte), Ok(None));
                }
                let received = if crlf {
                    let received = assembler.feed(b'\r');
                    proptest::prop_assert_eq!(assembler.feed(b'\n'), Ok(None));
                    received
                } else {
                    assembler.feed(b'\n')
                };
                let received = received.unwrap().unwrap();
                proptest::prop_assert_eq!(received.as_str(), line.as_str());
            }
        }
    }

    #[test]
    fn test_reset_drops_partial_line() {
        let mut assembler = LineAssembler::new();
        assembler.feed_bytes(b"G1 X").unwrap();
        assembler.reset();
        let line = assembler.feed_bytes(b"M105\n").unwrap().unwrap();
        assert_eq!(line.as_str(), "M105");
    }
}
