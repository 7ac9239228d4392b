//! Command splitting
//!
//! Hosts may concatenate several commands on one line without separators
//! (`G1X10M104S200`). The splitter walks a normalized line and yields one
//! command segment at a time. Where the next command starts depends on the
//! letter of the current one:
//!
//! | current | next command starts at |
//! |---------|------------------------|
//! | `G`     | `G`, `M`, `T`; also `S` when the rest holds both an `S` and an `M` |
//! | `M`     | `G`, `M` |
//! | `T`/`S` | with an `M` ahead: `G`, `M`, `S`, `T` after that `M`; otherwise `G`, `S`, `T` |
//!
//! The search starts two bytes into the current segment so the letter's own
//! number is never taken for a new command. Segments are views into the
//! source line and cover it without gaps or overlaps.

/// Iterator over the command segments of a line
#[derive(Debug, Clone)]
pub struct Splitter<'a> {
    line: &'a str,
    start: usize,
}

impl<'a> Splitter<'a> {
    /// Start splitting a normalized line
    pub fn new(line: &'a str) -> Self {
        Self { line, start: 0 }
    }

    /// Text not yet handed out
    pub fn remaining(&self) -> &'a str {
        &self.line[self.start..]
    }

    /// Check if every segment has been handed out
    pub fn is_exhausted(&self) -> bool {
        self.start >= self.line.len()
    }

    /// Take everything left on the line as one segment
    pub fn take_rest(&mut self) -> &'a str {
        let rest = self.remaining();
        self.start = self.line.len();
        rest
    }
}

impl<'a> Iterator for Splitter<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        if self.is_exhausted() {
            return None;
        }

        let rest = self.remaining();
        let end = next_boundary(rest.as_bytes()).unwrap_or(rest.len());
        self.start += end;
        Some(&rest[..end])
    }
}

/// Offset of the command following the one at the start of `segment`
fn next_boundary(segment: &[u8]) -> Option<usize> {
    match segment.first()? {
        b'G' => {
            if find_any(segment, b"S", 2).is_some() && find_any(segment, b"M", 2).is_some() {
                find_any(segment, b"GMST", 2)
            } else {
                find_any(segment, b"GMT", 2)
            }
        }
        b'M' => find_any(segment, b"GM", 2),
        b'T' | b'S' => match find_any(segment, b"M", 2) {
            Some(m) => find_any(segment, b"GMST", m + 2),
            None => find_any(segment, b"GST", 2),
        },
        _ => None,
    }
}

/// Position of the first byte from `set` at or after `from`
fn find_any(bytes: &[u8], set: &[u8], from: usize) -> Option<usize> {
    bytes
        .get(from..)?
        .iter()
        .position(|b| set.contains(b))
        .map(|offset| offset + from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use heapless::Vec;

    fn split(line: &str) -> Vec<&str, 8> {
        Splitter::new(line).collect()
    }

    #[test]
    fn test_concatenated_g_and_m() {
        assert_eq!(split("G1X10M104S200"), ["G1X10", "M104S200"]);
    }

    #[test]
    fn test_single_command() {
        assert_eq!(split("G1 X10 Y20"), ["G1 X10 Y20"]);
        assert_eq!(split("M104 S200"), ["M104 S200"]);
    }

    #[test]
    fn test_g_with_s_but_no_m_keeps_s() {
        // Spindle speed on a motion line is a parameter, not a new command
        assert_eq!(split("G1 X5 S1000"), ["G1 X5 S1000"]);
    }

    #[test]
    fn test_g_with_s_and_m_splits_at_s() {
        assert_eq!(split("G1 X5 S1000 M3"), ["G1 X5 ", "S1000 M3"]);
    }

    #[test]
    fn test_g_splits_at_tool() {
        assert_eq!(split("G28 T1"), ["G28 ", "T1"]);
    }

    #[test]
    fn test_m_does_not_split_at_s_or_t() {
        assert_eq!(split("M3 S1000 T1"), ["M3 S1000 T1"]);
        assert_eq!(split("M3 S1000 G1 X2"), ["M3 S1000 ", "G1 X2"]);
    }

    #[test]
    fn test_tool_before_m() {
        // T/S in front of an M belong to it
        assert_eq!(split("T1 M6"), ["T1 M6"]);
        assert_eq!(split("S500 M3 G1 X1"), ["S500 M3 ", "G1 X1"]);
    }

    #[test]
    fn test_tool_without_m() {
        assert_eq!(split("T1 G28"), ["T1 ", "G28"]);
        assert_eq!(split("S500 T2"), ["S500 ", "T2"]);
    }

    #[test]
    fn test_promoted_directive_splits() {
        assert_eq!(split("G91G1 X10 "), ["G91", "G1 X10 "]);
    }

    #[test]
    fn test_unknown_leading_letter_is_one_segment() {
        assert_eq!(split("#100=5 G1"), ["#100=5 G1"]);
    }

    #[test]
    fn test_short_segments() {
        assert_eq!(split("G"), ["G"]);
        assert_eq!(split("MG"), ["MG"]);
        assert!(split("").is_empty());
    }

    #[test]
    fn test_take_rest() {
        let mut splitter = Splitter::new("G53 G0 X0 Y0");
        assert_eq!(splitter.next(), Some("G53 "));
        assert!(!splitter.is_exhausted());
        assert_eq!(splitter.take_rest(), "G0 X0 Y0");
        assert!(splitter.is_exhausted());
        assert_eq!(splitter.next(), None);
    }

    #[test]
    fn test_restartable() {
        let line = "G1X1M105";
        let first: Vec<&str, 4> = Splitter::new(line).collect();
        let second: Vec<&str, 4> = Splitter::new(line).collect();
        assert_eq!(first, second);
    }

    proptest::proptest! {
        #[test]
        fn prop_segments_cover_line(line in "[GMSTXYZ#0-9 .]{0,64}") {
            let mut rebuilt = std::string::String::new();
            for segment in Splitter::new(&line) {
                proptest::prop_assert!(!segment.is_empty());
                rebuilt.push_str(segment);
            }
            proptest::prop_assert_eq!(rebuilt, line);
        }
    }
}
