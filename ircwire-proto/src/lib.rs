//! The IRC wire protocol, distilled.
//!
//! Every parser in this crate is total: a malformed line, hostmask or formatted string degrades
//! to empty results instead of an error. The only fallible parts are the Tokio codecs, which deal
//! with text encodings and I/O.

#![warn(missing_docs)]

pub mod chan;
pub mod colors;
pub mod entity;
pub mod error;
#[cfg(feature = "codec")]
pub mod irc;
pub mod limit;
#[cfg(feature = "codec")]
pub mod line;
pub mod message;
pub mod mode;
pub mod response;

pub use self::chan::ChannelExt;
pub use self::colors::{strip_control_codes, FormattedStringExt};
pub use self::entity::Entity;
#[cfg(feature = "codec")]
pub use self::irc::IrcCodec;
pub use self::message::Message;
pub use self::mode::{parse_channel_modes, ChannelMode, ChannelModes};
pub use self::response::Response;
