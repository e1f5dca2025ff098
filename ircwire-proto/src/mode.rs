//! A module for the channel membership prefixes found in `NAMES` replies, e.g. `@nick`.
use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// A user's privilege level on a channel, as signalled by a prefix sigil.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChannelMode {
    /// `+` - user may speak in a moderated channel
    Voice,
    /// `%` - half-operator (helper)
    HalfOp,
    /// `@` - channel operator
    Op,
    /// `&` - channel admin (protected)
    Admin,
    /// `~` - channel owner (founder)
    Owner,
}

impl ChannelMode {
    /// Gets the mode for a prefix sigil, if it is one.
    pub fn from_sigil(c: char) -> Option<ChannelMode> {
        use self::ChannelMode::*;

        match c {
            '+' => Some(Voice),
            '%' => Some(HalfOp),
            '@' => Some(Op),
            '&' => Some(Admin),
            '~' => Some(Owner),
            _ => None,
        }
    }

    /// Gets the prefix sigil of this mode.
    pub fn sigil(self) -> char {
        use self::ChannelMode::*;

        match self {
            Voice => '+',
            HalfOp => '%',
            Op => '@',
            Admin => '&',
            Owner => '~',
        }
    }

    fn bit(self) -> u8 {
        use self::ChannelMode::*;

        match self {
            Voice => 1,
            HalfOp => 1 << 1,
            Op => 1 << 2,
            Admin => 1 << 3,
            Owner => 1 << 4,
        }
    }
}

impl fmt::Display for ChannelMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.sigil())
    }
}

/// A set of [`ChannelMode`](enum.ChannelMode.html)s.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq, Hash)]
pub struct ChannelModes(u8);

impl ChannelModes {
    /// Voiced user.
    pub const VOICE: ChannelModes = ChannelModes(1);
    /// Half-operator.
    pub const HALF_OP: ChannelModes = ChannelModes(1 << 1);
    /// Channel operator.
    pub const OP: ChannelModes = ChannelModes(1 << 2);
    /// Channel admin.
    pub const ADMIN: ChannelModes = ChannelModes(1 << 3);
    /// Channel owner.
    pub const OWNER: ChannelModes = ChannelModes(1 << 4);

    /// Creates an empty set.
    pub fn empty() -> ChannelModes {
        ChannelModes(0)
    }

    /// Gets the raw bits of the set.
    pub fn bits(self) -> u8 {
        self.0
    }

    /// Returns true if no modes are set.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns true if every mode in `other` is also in this set.
    pub fn contains(self, other: ChannelModes) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns true if the given mode is in this set.
    pub fn has(self, mode: ChannelMode) -> bool {
        self.0 & mode.bit() != 0
    }

    /// Adds a mode to the set.
    pub fn insert(&mut self, mode: ChannelMode) {
        self.0 |= mode.bit();
    }

    /// Gets the highest mode in the set.
    pub fn highest(self) -> Option<ChannelMode> {
        use self::ChannelMode::*;

        [Owner, Admin, Op, HalfOp, Voice]
            .iter()
            .copied()
            .find(|&m| self.has(m))
    }
}

impl From<ChannelMode> for ChannelModes {
    fn from(mode: ChannelMode) -> ChannelModes {
        ChannelModes(mode.bit())
    }
}

impl BitOr for ChannelModes {
    type Output = ChannelModes;

    fn bitor(self, rhs: ChannelModes) -> ChannelModes {
        ChannelModes(self.0 | rhs.0)
    }
}

impl BitOrAssign for ChannelModes {
    fn bitor_assign(&mut self, rhs: ChannelModes) {
        self.0 |= rhs.0;
    }
}

/// Splits the channel mode prefixes off a nickname as found in `RPL_NAMREPLY`.
///
/// Every leading sigil (`~&@%+`) is added to the returned set; the rest of the string, from the
/// first non-sigil character, is the nickname.
///
/// # Example
/// ```
/// # use ircwire_proto::mode::{parse_channel_modes, ChannelModes};
/// assert_eq!(
///     parse_channel_modes("&@SomeNick"),
///     ("SomeNick", ChannelModes::ADMIN | ChannelModes::OP)
/// );
/// ```
pub fn parse_channel_modes(s: &str) -> (&str, ChannelModes) {
    let mut modes = ChannelModes::empty();
    for (i, c) in s.char_indices() {
        match ChannelMode::from_sigil(c) {
            Some(mode) => modes.insert(mode),
            None => return (&s[i..], modes),
        }
    }
    ("", modes)
}
