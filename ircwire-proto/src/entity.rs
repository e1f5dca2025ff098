//! A module providing a type for the sources and targets of messages.
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use crate::chan::ChannelExt;

/// An `Entity` is anything on IRC that can send or receive a message: a nickname, a server name,
/// a channel, or a full `nick!user@host` hostmask.
///
/// Every string is exactly one of a channel (`is_chan`), a hostmask (`is_hostmask`) or a name
/// (`is_name`). Malformed hostmasks such as `name@host!user` are names; no attempt is made to
/// repair them.
#[derive(Clone, Default, Eq, PartialEq, Hash, Debug)]
pub struct Entity(String);

impl Entity {
    /// Wraps the given string as an entity.
    ///
    /// # Example
    /// ```
    /// # use ircwire_proto::Entity;
    /// let user = Entity::new("nick!user@host");
    /// assert!(user.is_hostmask());
    /// assert_eq!(user.nickname(), "nick");
    /// ```
    pub fn new<S: Into<String>>(s: S) -> Entity {
        Entity(s.into())
    }

    /// Gets the underlying string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the entity is an empty string.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns true if the entity is a channel name.
    pub fn is_chan(&self) -> bool {
        self.0.is_channel_name()
    }

    /// Returns true if the entity is a hostmask, i.e. a `!` occurs before the first `@`.
    pub fn is_hostmask(&self) -> bool {
        self.hostmask_split().is_some()
    }

    /// Returns true if the entity is a server name or a nickname.
    pub fn is_name(&self) -> bool {
        !self.is_chan() && !self.is_hostmask()
    }

    /// Gets the nickname: everything before the first `!`, or the whole entity if it has none.
    pub fn nickname(&self) -> &str {
        self.0.find('!').map_or(&self.0[..], |i| &self.0[..i])
    }

    /// Gets the username of a hostmask, or an empty string for anything else.
    pub fn username(&self) -> &str {
        self.hostmask_split()
            .map_or("", |(bang, at)| &self.0[bang + 1..at])
    }

    /// Gets the hostname of a hostmask, or an empty string for anything else.
    pub fn hostname(&self) -> &str {
        self.hostmask_split().map_or("", |(_, at)| &self.0[at + 1..])
    }

    /// Positions of the first `!` and the first `@`, if they form a hostmask.
    fn hostmask_split(&self) -> Option<(usize, usize)> {
        match (self.0.find('!'), self.0.find('@')) {
            (Some(bang), Some(at)) if bang < at => Some((bang, at)),
            _ => None,
        }
    }
}

/// This implementation never returns an error and is isomorphic with `Display`.
impl FromStr for Entity {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Entity::new(s))
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'a> From<&'a str> for Entity {
    fn from(s: &str) -> Self {
        Entity::new(s)
    }
}

impl From<String> for Entity {
    fn from(s: String) -> Self {
        Entity(s)
    }
}

impl AsRef<str> for Entity {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
