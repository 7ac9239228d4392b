//! Single-command parsing
//!
//! A command segment such as `G1 X10 Y-2.5 F3000` or `M104S200` is decoded
//! into letter/value words. Malformed numbers are tolerated and read as
//! zero; it is up to the executor to reject a command it cannot run.

use heapless::Vec;

use super::variables::VariableTable;
use crate::state::MotionMode;

/// Maximum words in a single command
pub const MAX_WORDS: usize = 24;

/// Command parsing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Segment holds more words than a command can carry
    TooManyWords,
}

/// A G or M code with optional subcode (`G38.2` is number 38, subcode 2)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Code {
    pub number: u16,
    pub subcode: u8,
}

impl Code {
    /// Create a code without subcode
    pub const fn new(number: u16) -> Self {
        Self { number, subcode: 0 }
    }

    /// Decode a word value; negative and NaN values decode as zero
    pub fn from_value(value: f32) -> Self {
        // One decimal place is significant; round to it first
        let tenths = (value * 10.0 + 0.5) as u32;
        Self {
            number: (tenths / 10).min(u16::MAX as u32) as u16,
            subcode: (tenths % 10) as u8,
        }
    }
}

/// A letter/value pair
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Word {
    pub letter: char,
    pub value: f32,
}

/// A `#<n>=<value>` assignment carried by a command
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Assignment {
    pub index: u16,
    pub value: f32,
}

/// A decoded command
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Command {
    letter: char,
    words: Vec<Word, MAX_WORDS>,
    g: Option<Code>,
    m: Option<Code>,
    assignment: Option<Assignment>,
    line_number: Option<u32>,
}

impl Command {
    /// Parse one command segment
    ///
    /// `#<n>` word values are read from `variables`. The segment's line
    /// number tag, if the sender supplied one, is carried along.
    pub fn parse(
        segment: &str,
        variables: &VariableTable,
        line_number: Option<u32>,
    ) -> Result<Self, ParseError> {
        let segment = segment.trim_start_matches([' ', '\t']);
        let bytes = segment.as_bytes();
        let letter = segment.chars().next().map_or(' ', |c| c.to_ascii_uppercase());

        let mut pos = 0;
        let mut assignment = None;
        if letter == '#' {
            let (parsed, next) = parse_assignment(bytes, 1, variables);
            assignment = parsed;
            pos = next;
        }

        let mut words = Vec::new();
        let mut g = None;
        let mut m = None;

        while pos < bytes.len() {
            let byte = bytes[pos];
            if !byte.is_ascii_alphabetic() {
                // Separators and stray characters between words
                pos += 1;
                continue;
            }

            let word_letter = byte.to_ascii_uppercase() as char;
            let (value, next) = parse_value(bytes, pos + 1, variables);
            pos = next;

            match word_letter {
                'G' if g.is_none() => g = Some(Code::from_value(value)),
                'M' if m.is_none() => m = Some(Code::from_value(value)),
                _ => {}
            }

            words
                .push(Word {
                    letter: word_letter,
                    value,
                })
                .map_err(|_| ParseError::TooManyWords)?;
        }

        Ok(Self {
            letter,
            words,
            g,
            m,
            assignment,
            line_number,
        })
    }

    /// Leading letter of the segment (`G`, `M`, `T`, `S`, `#`, ...)
    pub fn letter(&self) -> char {
        self.letter
    }

    /// G code carried by this command
    pub fn g(&self) -> Option<Code> {
        self.g
    }

    /// M code carried by this command
    pub fn m(&self) -> Option<Code> {
        self.m
    }

    pub fn has_g(&self) -> bool {
        self.g.is_some()
    }

    pub fn has_m(&self) -> bool {
        self.m.is_some()
    }

    /// Group 1 motion mode selected by this command's G code
    pub fn motion(&self) -> Option<MotionMode> {
        self.g
            .filter(|code| code.subcode == 0)
            .and_then(|code| MotionMode::from_gcode(code.number))
    }

    /// Variable assignment carried by a `#` command
    pub fn assignment(&self) -> Option<Assignment> {
        self.assignment
    }

    /// Sender line number of the originating line
    pub fn line_number(&self) -> Option<u32> {
        self.line_number
    }

    /// Value of the first word with the given letter
    pub fn value(&self, letter: char) -> Option<f32> {
        self.words
            .iter()
            .find(|word| word.letter == letter)
            .map(|word| word.value)
    }

    /// Rewrite this command's G code to a motion mode
    ///
    /// Used when a bare `G53` inherits the modal motion mode.
    pub fn set_motion(&mut self, mode: MotionMode) {
        let number = mode.gcode();
        self.g = Some(Code::new(number));
        if let Some(word) = self.words.iter_mut().find(|word| word.letter == 'G') {
            word.value = number as f32;
        }
    }
}

/// Parse a number (or `#<n>` variable reference) starting at `start`
///
/// Returns the value and the index just past it. Unparseable text reads
/// as zero.
fn parse_value(bytes: &[u8], start: usize, variables: &VariableTable) -> (f32, usize) {
    let mut pos = skip_blanks(bytes, start);

    if bytes.get(pos) == Some(&b'#') {
        let (index, next) = parse_index(bytes, pos + 1);
        return (index.map_or(0.0, |i| variables.get(i)), next);
    }

    let begin = pos;
    if matches!(bytes.get(pos), Some(b'+') | Some(b'-')) {
        pos += 1;
    }
    while pos < bytes.len() && (bytes[pos].is_ascii_digit() || bytes[pos] == b'.') {
        pos += 1;
    }

    let value = core::str::from_utf8(&bytes[begin..pos])
        .ok()
        .and_then(|text| text.parse::<f32>().ok())
        .unwrap_or(0.0);
    (value, pos)
}

/// Parse an unsigned variable index
fn parse_index(bytes: &[u8], start: usize) -> (Option<u16>, usize) {
    let mut pos = start;
    let mut index: Option<u16> = None;
    while let Some(digit) = bytes.get(pos).filter(|b| b.is_ascii_digit()) {
        let d = (digit - b'0') as u16;
        index = Some(index.unwrap_or(0).saturating_mul(10).saturating_add(d));
        pos += 1;
    }
    (index, pos)
}

/// Parse `<n>=<value>` following a leading `#`
fn parse_assignment(
    bytes: &[u8],
    start: usize,
    variables: &VariableTable,
) -> (Option<Assignment>, usize) {
    let (index, pos) = parse_index(bytes, start);
    let Some(index) = index else {
        return (None, pos);
    };

    let pos = skip_blanks(bytes, pos);
    if bytes.get(pos) != Some(&b'=') {
        return (None, pos);
    }

    let (value, next) = parse_value(bytes, pos + 1, variables);
    (Some(Assignment { index, value }), next)
}

fn skip_blanks(bytes: &[u8], mut pos: usize) -> usize {
    while matches!(bytes.get(pos), Some(b' ') | Some(b'\t')) {
        pos += 1;
    }
    pos
}
