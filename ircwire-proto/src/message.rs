//! A module providing a data structure for messages to and from IRC servers.
use std::convert::{Infallible, TryFrom};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use crate::entity::Entity;
use crate::response::Response;

/// A single IRC protocol line of the form
/// `[':' prefix ' '] command [' ' middle] [' ' ':' trailing]`.
///
/// Nothing is parsed up front. Every accessor scans the raw line on demand and none of them can
/// fail: a malformed line simply yields empty strings, an empty `Entity`, or `-1` for
/// [`numeric`](#method.numeric). This keeps dispatch code free of error handling for lines that
/// servers (or other users) get wrong.
#[derive(Clone, Default, PartialEq, Eq, Hash, Debug)]
pub struct Message {
    raw: String,
}

impl Message {
    /// Creates a message from a raw line. Line terminators and NUL bytes are trimmed from both
    /// ends; a line with a NUL anywhere else is invalid and becomes the empty message.
    ///
    /// # Example
    /// ```
    /// # use ircwire_proto::Message;
    /// let msg = Message::new(":nick!user@host PRIVMSG #chan :hello there\r\n");
    /// assert_eq!(msg.command(), "PRIVMSG");
    /// assert_eq!(msg.prefix().nickname(), "nick");
    /// assert_eq!(msg.middle(), "#chan");
    /// assert_eq!(msg.trailing(), "hello there");
    /// ```
    pub fn new(s: &str) -> Message {
        let trimmed = s.trim_matches(|c: char| c == '\0' || c == '\n' || c == '\r');
        if trimmed.contains('\0') {
            return Message::default();
        }
        Message {
            raw: trimmed.to_owned(),
        }
    }

    /// Gets the sanitized line.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Returns true if the line is empty (or was invalid).
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Returns true if the line starts with a `:prefix`.
    pub fn has_prefix(&self) -> bool {
        self.raw.starts_with(':')
    }

    /// Returns true if a `:` occurs anywhere after the prefix marker, regardless of whether any
    /// trailing text follows it.
    pub fn has_trailing(&self) -> bool {
        if self.has_prefix() {
            self.raw[1..].contains(':')
        } else {
            self.raw.contains(':')
        }
    }

    /// Gets the source of the message, or an empty entity if there is no prefix.
    pub fn prefix(&self) -> Entity {
        if !self.has_prefix() {
            return Entity::default();
        }
        self.raw
            .find(' ')
            .map_or_else(Entity::default, |i| Entity::new(&self.raw[1..i]))
    }

    /// Gets the command (or numeric) in uppercase.
    ///
    /// A command must be followed by a space to be recognized, so a bare `QUIT` with no
    /// parameters yields an empty string.
    pub fn command(&self) -> String {
        let state = match self.after_prefix() {
            Some(state) => state,
            None => return String::new(),
        };
        state
            .find(' ')
            .map_or_else(String::new, |i| state[..i].to_uppercase())
    }

    /// Returns true if the command is a numeric reply.
    pub fn is_numeric(&self) -> bool {
        let cmd = self.command();
        !cmd.is_empty() && cmd.bytes().all(|b| b.is_ascii_digit())
    }

    /// Gets the numeric reply code, or `-1` if the command is not a numeric. A numeric too large
    /// for an `i64` also yields `-1`.
    pub fn numeric(&self) -> i64 {
        if !self.is_numeric() {
            return -1;
        }
        self.command().parse().unwrap_or(-1)
    }

    /// Gets the numeric as a known [`Response`](../response/enum.Response.html), if it is one.
    pub fn response(&self) -> Option<Response> {
        u16::try_from(self.numeric()).ok().and_then(Response::from_u16)
    }

    /// Gets the middle parameters as a single string, without the trailing parameter.
    pub fn middle(&self) -> &str {
        let params = match self.params() {
            Some(params) => params,
            None => return "",
        };
        match params.find(':') {
            Some(i) => params[..i].trim_end_matches(' '),
            None => params,
        }
    }

    /// Gets the middle parameters split on spaces. An empty middle yields a single empty string.
    pub fn middles(&self) -> Vec<&str> {
        self.middle().split(' ').collect()
    }

    /// Gets the trailing parameter, which may contain spaces.
    pub fn trailing(&self) -> &str {
        let params = match self.params() {
            Some(params) => params,
            None => return "",
        };
        match params.find(':') {
            Some(i) if i + 1 < params.len() => &params[i + 1..],
            _ => "",
        }
    }

    /// Gets the trailing parameter split on spaces. An empty trailing yields a single empty
    /// string.
    pub fn trailings(&self) -> Vec<&str> {
        self.trailing().split(' ').collect()
    }

    /// The line from the command onwards. `None` when a prefix is not followed by anything.
    fn after_prefix(&self) -> Option<&str> {
        let state = &self.raw[..];
        if state.is_empty() {
            return None;
        }
        if !self.has_prefix() {
            return Some(state);
        }
        match state.find(' ') {
            Some(i) if i + 1 < state.len() => Some(&state[i + 1..]),
            _ => None,
        }
    }

    /// Everything after the space that ends the command token.
    fn params(&self) -> Option<&str> {
        let state = self.after_prefix()?;
        state.find(' ').map(|i| &state[i + 1..])
    }
}

/// This implementation never returns an error.
impl FromStr for Message {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Message, Self::Err> {
        Ok(Message::new(s))
    }
}

impl<'a> From<&'a str> for Message {
    fn from(s: &'a str) -> Message {
        Message::new(s)
    }
}

impl Display for Message {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        f.write_str(&self.raw)
    }
}
