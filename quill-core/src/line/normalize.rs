//! Line normalization
//!
//! Prepares a command line for splitting:
//! 1. strips a leading `N<digits>` line-number tag
//! 2. drops everything from the first `;` or `(` comment opener
//! 3. on lines starting with `G`, moves a `G90`/`G91` distance-mode
//!    directive to the front so it takes effect before the other commands
//!
//! Whether a line is reordered is decided by its first character before
//! the line number is stripped, so numbered lines keep their order.
//! Normalizing a normalized line without a line number returns it unchanged.

use heapless::String;

use quill_protocol::MAX_LINE_LEN;

/// Room left after a full-length line for a synthesized `G<n> ` prefix
pub const PREFIX_RESERVE: usize = 8;

/// Maximum normalized line length
pub const MAX_NORMALIZED_LEN: usize = MAX_LINE_LEN + PREFIX_RESERVE;

/// A normalized line
pub type NormalizedLine = String<MAX_NORMALIZED_LEN>;

/// Characters making up a line-number tag and the blanks around it
const LINE_NUMBER_CHARS: &[u8] = b"N0123456789.,- \t";

/// Comment openers
const COMMENT_OPENERS: &[u8] = b";(";

/// Distance-mode directives, in promotion priority order
const PROMOTED_DIRECTIVES: [&str; 2] = ["G90", "G91"];

/// Line normalization errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NormalizeError {
    /// Line does not fit the normalized line buffer
    TooLong,
}

/// Normalize a command line whose leading blanks were already removed
///
/// An empty result means the line carried nothing but a line number
/// and/or a comment.
pub fn normalize(line: &str) -> Result<NormalizedLine, NormalizeError> {
    let reorder = line.starts_with('G');
    let line = strip_line_number(line);
    let line = strip_comment(line);

    let mut out = NormalizedLine::new();
    match find_directive(line) {
        Some((directive, pos)) if reorder => {
            out.push_str(directive).map_err(|_| NormalizeError::TooLong)?;
            out.push_str(&line[..pos]).map_err(|_| NormalizeError::TooLong)?;
            out.push_str(&line[pos + directive.len()..])
                .map_err(|_| NormalizeError::TooLong)?;
        }
        _ => out.push_str(line).map_err(|_| NormalizeError::TooLong)?,
    }
    Ok(out)
}

/// Remove a leading `N<digits>` tag
fn strip_line_number(line: &str) -> &str {
    if !line.starts_with('N') {
        return line;
    }
    let end = line
        .bytes()
        .position(|b| !LINE_NUMBER_CHARS.contains(&b))
        .unwrap_or(line.len());
    &line[end..]
}

/// Cut the line at the first comment opener
fn strip_comment(line: &str) -> &str {
    match line.bytes().position(|b| COMMENT_OPENERS.contains(&b)) {
        Some(pos) => &line[..pos],
        None => line,
    }
}

/// Locate the first promotable directive
///
/// `G90` is looked for before `G91`; only one directive is ever promoted.
/// A match must not continue with a digit or `.` (`G900`, `G90.1`).
fn find_directive(line: &str) -> Option<(&'static str, usize)> {
    PROMOTED_DIRECTIVES.iter().find_map(|&directive| {
        line.match_indices(directive)
            .map(|(pos, _)| pos)
            .find(|&pos| {
                !matches!(
                    line.as_bytes().get(pos + directive.len()),
                    Some(b'0'..=b'9') | Some(b'.')
                )
            })
            .map(|pos| (directive, pos))
    })
}
