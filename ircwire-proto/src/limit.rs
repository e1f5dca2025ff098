//! Byte-length limits that never cut a multi-byte character in half.

/// The default maximum length of an outgoing line, in bytes, before the CRLF terminator.
pub const DEFAULT_MAX_MESSAGE_LEN: usize = 400;

/// Truncates `s` to at most `max_bytes` bytes, backing off to the previous character boundary.
///
/// # Example
/// ```
/// # use ircwire_proto::limit::truncate_to_len;
/// assert_eq!(truncate_to_len("hello world", 5), "hello");
/// assert_eq!(truncate_to_len("naïve", 3), "na");
/// assert_eq!(truncate_to_len("hi", 10), "hi");
/// ```
pub fn truncate_to_len(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Splits `s` into consecutive chunks of at most `max_bytes` bytes each.
///
/// A chunk always holds at least one character, so a limit smaller than a single character still
/// makes progress (that chunk is then longer than the limit). An empty string yields no chunks.
///
/// # Example
/// ```
/// # use ircwire_proto::limit::split_to_len;
/// let chunks: Vec<_> = split_to_len("Hello World! This is a test.", 10).collect();
/// assert_eq!(chunks, vec!["Hello Worl", "d! This is", " a test."]);
/// ```
pub fn split_to_len(s: &str, max_bytes: usize) -> SplitToLen<'_> {
    SplitToLen {
        remaining: s,
        max_bytes,
    }
}

/// An iterator over length-limited chunks of a string, created by
/// [`split_to_len`](fn.split_to_len.html).
#[derive(Clone, Debug)]
pub struct SplitToLen<'a> {
    remaining: &'a str,
    max_bytes: usize,
}

impl<'a> Iterator for SplitToLen<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let first = self.remaining.chars().next()?;
        let mut len = truncate_to_len(self.remaining, self.max_bytes).len();
        if len == 0 {
            len = first.len_utf8();
        }
        let (chunk, rest) = self.remaining.split_at(len);
        self.remaining = rest;
        Some(chunk)
    }
}
