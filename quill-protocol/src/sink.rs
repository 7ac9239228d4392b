//! Reply sinks
//!
//! A sink receives replies one at a time, in the order they are produced.
//! Each call to [`ReplySink::send`] is one discrete write to the host.

use core::fmt::{self, Write};

use heapless::{Deque, String};

use crate::line::MAX_LINE_LEN;
use crate::reply::Reply;

/// Maximum rendered reply length (an echoed line plus framing)
pub const MAX_REPLY_LEN: usize = MAX_LINE_LEN + 32;

/// A rendered reply
pub type ReplyText = String<MAX_REPLY_LEN>;

/// Destination for acknowledgment replies
pub trait ReplySink {
    /// Write one reply to the host
    fn send(&mut self, reply: &Reply<'_>);
}

impl<S: ReplySink + ?Sized> ReplySink for &mut S {
    fn send(&mut self, reply: &Reply<'_>) {
        (**self).send(reply)
    }
}

/// Bounded FIFO of rendered replies
///
/// Used to collect the replies of one line so they can be flushed to an
/// async transport afterwards. When full, further replies are counted as
/// dropped rather than overwriting earlier ones.
#[derive(Debug, Clone, Default)]
pub struct ReplyLog<const N: usize> {
    entries: Deque<ReplyText, N>,
    dropped: usize,
}

impl<const N: usize> ReplyLog<N> {
    /// Create an empty log
    pub const fn new() -> Self {
        Self {
            entries: Deque::new(),
            dropped: 0,
        }
    }

    /// Number of buffered replies
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no replies are buffered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of replies lost because the log was full
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Remove and return the oldest reply
    pub fn pop(&mut self) -> Option<ReplyText> {
        self.entries.pop_front()
    }

    /// Iterate over buffered replies, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|text| text.as_str())
    }

    /// Discard all buffered replies and reset the drop counter
    pub fn clear(&mut self) {
        self.entries.clear();
        self.dropped = 0;
    }
}

impl<const N: usize> ReplySink for ReplyLog<N> {
    fn send(&mut self, reply: &Reply<'_>) {
        let text = render(reply);
        if self.entries.push_back(text).is_err() {
            self.dropped += 1;
        }
    }
}

/// Render a reply, clipping an overlong body but keeping its terminator
pub fn render(reply: &Reply<'_>) -> ReplyText {
    let terminator = reply.terminator();
    let mut text = ReplyText::new();
    let mut writer = Clipped {
        text: &mut text,
        limit: MAX_REPLY_LEN - terminator.len(),
        clipped: false,
    };
    // Clipped never reports an error
    let _ = write!(writer, "{}", reply);
    if writer.clipped {
        let _ = text.push_str(terminator);
    }
    text
}

/// Writer that stops accepting text once `limit` bytes are stored
struct Clipped<'a> {
    text: &'a mut ReplyText,
    limit: usize,
    clipped: bool,
}

impl Write for Clipped<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        if self.clipped {
            return Ok(());
        }
        if self.text.len() + s.len() <= self.limit {
            // Fits below limit, so the push cannot fail
            let _ = self.text.push_str(s);
            return Ok(());
        }
        for ch in s.chars() {
            if self.text.len() + ch.len_utf8() > self.limit {
                self.clipped = true;
                break;
            }
            let _ = self.text.push(ch);
        }
        Ok(())
    }
}
