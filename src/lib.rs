//! A small, thread-safe IRC client.
//!
//! The heavy lifting happens in [`proto`], which parses protocol lines into
//! [`Message`](proto::Message)s without ever failing, classifies senders and targets as
//! [`Entity`](proto::Entity) values, strips channel-mode sigils and text formatting, and frames
//! lines on the wire. The [`client`] module drives a single connection on top of it.
//!
//! # Example
//!
//! ```no_run
//! use ircwire::client::prelude::*;
//!
//! struct Echo;
//!
//! impl EventHandler for Echo {
//!     fn on_privmsg(&self, client: &Client, message: &str, source: &Entity, target: &Entity) {
//!         let reply_to = if target.is_chan() { target.to_string() } else { source.nickname().to_owned() };
//!         let client = client.clone();
//!         let message = message.to_owned();
//!         tokio::spawn(async move { client.send_privmsg(&reply_to, &message).await });
//!     }
//! }
//!
//! # #[tokio::main]
//! # async fn main() -> ircwire::error::Result<()> {
//! let config = Config {
//!     nickname: Some("echobot".to_owned()),
//!     server: Some("irc.example.com".to_owned()),
//!     channels: vec!["#ircwire".to_owned()],
//!     ..Config::default()
//! };
//!
//! let client = Client::new(config, Echo)?;
//! client.connect().await?;
//! client.run().await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub use ircwire_proto as proto;

pub mod client;
pub mod error;
