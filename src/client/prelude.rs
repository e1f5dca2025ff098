//! A client-side IRC prelude, re-exporting the complete high-level IRC client API.
//!
//! # Structure
//! A connection to an IRC server is driven by a `Client`, configured using a `Config` struct that
//! defines which server to connect to, on what port, and using what nickname. An `EventHandler`
//! receives the semantic events (joins, messages, nickname changes, numerics) decoded from each
//! line, while `Client` offers the methods for sending commands back.
//!
//! The `proto` types capture the protocol itself. `Message` is a single line with total,
//! never-failing accessors, `Entity` classifies the nicknames, channels and hostmasks found in
//! it, and `Response` names the common numeric replies. `parse_channel_modes` and
//! `strip_control_codes` help when presenting names lists and message bodies.

pub use crate::{
    client::{data::Config, Client, Direction, EventHandler},
    proto::{
        parse_channel_modes, strip_control_codes, ChannelExt, ChannelMode, ChannelModes, Entity,
        FormattedStringExt, Message, Response,
    },
};
