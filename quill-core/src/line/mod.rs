//! Line preprocessing
//!
//! Classifies a received line, normalizes command lines and splits them
//! into single-command segments.

pub mod normalize;
pub mod split;

pub use normalize::{normalize, NormalizeError, NormalizedLine, MAX_NORMALIZED_LEN};
pub use split::Splitter;

/// Letters that open a command line
const COMMAND_LETTERS: &[u8] = b"GMTSN#";

/// Letters that may open a parameter-only line
const PARAMETER_LETTERS: &[u8] = b"XYZAF";

/// What a received line is, judged by its first significant character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineClass {
    /// Nothing but blanks
    Empty,
    /// Lowercase or `$` line meant for another interpreter
    Foreign,
    /// Comment or bare line terminator
    Comment,
    /// Starts with a command letter (`G`, `M`, `T`, `S`, `N`, `#`)
    Commands,
    /// Axis or feed words only; the letter that triggered it
    Parameters(char),
    /// Any other uppercase text
    Unrecognized,
}

/// Remove leading spaces and tabs
pub fn trim_blanks(line: &str) -> &str {
    line.trim_start_matches([' ', '\t'])
}

/// Classify a line whose leading blanks were already removed
pub fn classify(line: &str) -> LineClass {
    let Some(&first) = line.as_bytes().first() else {
        return LineClass::Empty;
    };

    match first {
        b'$' => LineClass::Foreign,
        b if b.is_ascii_lowercase() => LineClass::Foreign,
        b if COMMAND_LETTERS.contains(&b) => LineClass::Commands,
        b';' | b'(' | b'\n' | b'\r' => LineClass::Comment,
        b if PARAMETER_LETTERS.contains(&b) => LineClass::Parameters(b as char),
        _ => LineClass::Unrecognized,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_blanks() {
        assert_eq!(trim_blanks("  \tG1"), "G1");
        assert_eq!(trim_blanks("\rG1"), "\rG1");
        assert_eq!(trim_blanks("   "), "");
    }

    #[test]
    fn test_command_lines() {
        for line in ["G1 X1", "M105", "T0", "S100", "N10 G1", "#1=2"] {
            assert_eq!(classify(line), LineClass::Commands, "{}", line);
        }
    }

    #[test]
    fn test_foreign_lines() {
        assert_eq!(classify("$G"), LineClass::Foreign);
        assert_eq!(classify("version"), LineClass::Foreign);
        assert_eq!(classify("x10"), LineClass::Foreign);
    }

    #[test]
    fn test_comment_lines() {
        assert_eq!(classify("; note"), LineClass::Comment);
        assert_eq!(classify("(note)"), LineClass::Comment);
        assert_eq!(classify("\r"), LineClass::Comment);
        assert_eq!(classify("\n"), LineClass::Comment);
    }

    #[test]
    fn test_parameter_lines() {
        assert_eq!(classify("X10 Y20"), LineClass::Parameters('X'));
        assert_eq!(classify("F3000"), LineClass::Parameters('F'));
        assert_eq!(classify("A5"), LineClass::Parameters('A'));
    }

    #[test]
    fn test_other_lines() {
        assert_eq!(classify(""), LineClass::Empty);
        assert_eq!(classify("HELLO"), LineClass::Unrecognized);
        assert_eq!(classify("E5"), LineClass::Unrecognized);
        assert_eq!(classify("*42"), LineClass::Unrecognized);
    }
}
