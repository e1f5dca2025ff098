//! A simple, thread-safe, and async-friendly IRC client.
//!
//! A [`Client`](struct.Client.html) owns at most one connection. It is created from a
//! [`Config`](data/struct.Config.html) and an [`EventHandler`](trait.EventHandler.html), connected
//! with [`connect`](struct.Client.html#method.connect) (or
//! [`connect_with`](struct.Client.html#method.connect_with) for a stream you already have), and
//! then driven by [`run`](struct.Client.html#method.run), which registers with the server and
//! dispatches every incoming line until the connection ends.
//!
//! `Client` is a cheap handle: clones share the same connection, so one task can sit in `run`
//! while others send messages or close the connection.
//!
//! # Example
//!
//! ```no_run
//! use ircwire::client::prelude::*;
//!
//! # #[tokio::main]
//! # async fn main() -> ircwire::error::Result<()> {
//! let config = Config::load("config.toml")?;
//! let client = Client::new(config, ())?;
//! client.connect().await?;
//!
//! let sender = client.clone();
//! tokio::spawn(async move { sender.send_privmsg("#ircwire", "hi there").await });
//!
//! client.run().await?;
//! # Ok(())
//! # }
//! ```

use std::{fmt, sync::Arc};

use bytes::BytesMut;
use futures_util::stream::StreamExt;
use log::{debug, info, trace, warn};
use parking_lot::Mutex;
use tokio::{
    io::{AsyncRead, AsyncWrite, AsyncWriteExt},
    sync::{Mutex as AsyncMutex, Notify},
};
use tokio_util::codec::{Encoder, FramedRead};

use crate::{
    client::{
        conn::{BoxedRead, BoxedWrite},
        data::Config,
    },
    error::{self, Error},
    proto::{limit::split_to_len, Entity, IrcCodec, Message, Response},
};

mod conn;
pub mod data;
#[cfg(test)]
pub mod mock;
pub mod prelude;

/// Which way a line travelled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Received from the server.
    Incoming,
    /// Sent to the server.
    Outgoing,
}

/// Callbacks invoked by [`Client::run`](struct.Client.html#method.run).
///
/// Every method has an empty default, so a handler only implements the events it cares about.
/// Handlers run on the read loop and must not block; to reply, clone the client and spawn a task.
/// `()` is a handler that ignores everything.
#[allow(unused_variables)]
pub trait EventHandler: Send + Sync + 'static {
    /// Called for every line received from or sent to the server.
    fn on_raw(&self, client: &Client, message: &Message, direction: Direction) {}

    /// Called after the client answered a `PING`.
    fn on_ping_pong(&self, client: &Client) {}

    /// Called when `user` joins `channel`.
    fn on_join(&self, client: &Client, channel: &str, user: &Entity) {}

    /// Called when `user` leaves `channel`.
    fn on_part(&self, client: &Client, channel: &str, message: &str, user: &Entity) {}

    /// Called when `user` kicks someone. `targets` holds the channel and the kicked nickname,
    /// separated by a space.
    fn on_kick(&self, client: &Client, targets: &str, message: &str, user: &Entity) {}

    /// Called for a `PRIVMSG` from `source` to `target` (a channel or the client's nickname).
    fn on_privmsg(&self, client: &Client, message: &str, source: &Entity, target: &Entity) {}

    /// Called for a `NOTICE` from `source` to `target`.
    fn on_notice(&self, client: &Client, message: &str, source: &Entity, target: &Entity) {}

    /// Called when `user` changes nickname to `new_nick`.
    fn on_nick(&self, client: &Client, new_nick: &str, user: &Entity) {}

    /// Called when `user` quits.
    fn on_quit(&self, client: &Client, message: &str, user: &Entity) {}

    /// Called for every numeric reply.
    fn on_numeric(&self, client: &Client, numeric: i64, message: &Message) {}
}

impl EventHandler for () {}

/// The sending side of a live connection.
struct Outgoing {
    writer: BoxedWrite,
    codec: IrcCodec,
    shutdown: Arc<Notify>,
}

impl Outgoing {
    async fn close(mut self) {
        if let Err(e) = self.writer.shutdown().await {
            debug!("Shutting down the writer failed: {}", e);
        }
        self.shutdown.notify_one();
    }
}

/// The receiving side of a live connection, waiting to be picked up by `run`.
struct Incoming {
    stream: FramedRead<BoxedRead, IrcCodec>,
    shutdown: Arc<Notify>,
}

struct ClientState {
    config: Config,
    handler: Box<dyn EventHandler>,
    password: Mutex<Option<String>>,
    outgoing: AsyncMutex<Option<Outgoing>>,
    incoming: Mutex<Option<Incoming>>,
}

/// An IRC client driving a single connection.
#[derive(Clone)]
pub struct Client {
    state: Arc<ClientState>,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("config", &self.state.config)
            .finish()
    }
}

impl Client {
    /// Creates a disconnected client.
    ///
    /// Fails if the configuration has no nickname or names an unknown encoding. The password, if
    /// any, is moved out of the configuration and sent once, with the first registration.
    pub fn new<H: EventHandler>(mut config: Config, handler: H) -> error::Result<Client> {
        config.nickname()?;
        IrcCodec::new(config.encoding())?;
        let password = config.password.take();

        Ok(Client {
            state: Arc::new(ClientState {
                config,
                handler: Box::new(handler),
                password: Mutex::new(password),
                outgoing: AsyncMutex::new(None),
                incoming: Mutex::new(None),
            }),
        })
    }

    /// Gets the configuration being used with this client.
    pub fn config(&self) -> &Config {
        &self.state.config
    }

    /// Returns true while the client holds a connection.
    pub async fn is_connected(&self) -> bool {
        self.state.outgoing.lock().await.is_some()
    }

    /// Connects to the server named in the configuration, using TLS if it asks for it.
    pub async fn connect(&self) -> error::Result<()> {
        if self.is_connected().await {
            return Err(Error::AlreadyConnected);
        }
        let (read, write) = conn::connect(&self.state.config).await?;
        self.attach(read, write).await
    }

    /// Adopts an already established stream as the connection.
    pub async fn connect_with<S>(&self, stream: S) -> error::Result<()>
    where
        S: AsyncRead + AsyncWrite + Send + 'static,
    {
        let (read, write) = conn::split(stream);
        self.attach(read, write).await
    }

    async fn attach(&self, read: BoxedRead, write: BoxedWrite) -> error::Result<()> {
        let mut outgoing = self.state.outgoing.lock().await;
        if outgoing.is_some() {
            return Err(Error::AlreadyConnected);
        }

        let config = &self.state.config;
        let codec = || IrcCodec::with_max_len(config.encoding(), config.max_message_len());
        let shutdown = Arc::new(Notify::new());

        *self.state.incoming.lock() = Some(Incoming {
            stream: FramedRead::new(read, codec()?),
            shutdown: shutdown.clone(),
        });
        *outgoing = Some(Outgoing {
            writer: write,
            codec: codec()?,
            shutdown,
        });

        info!("Connected.");
        Ok(())
    }

    /// Closes the connection and wakes `run`, which then returns `Ok(())`.
    pub async fn close(&self) -> error::Result<()> {
        let outgoing = self
            .state
            .outgoing
            .lock()
            .await
            .take()
            .ok_or(Error::AlreadyDisconnected)?;
        self.state.incoming.lock().take();
        outgoing.close().await;
        info!("Disconnected.");
        Ok(())
    }

    /// Drops whatever is left of the connection after the read side ended.
    async fn disconnect(&self) {
        let outgoing = self.state.outgoing.lock().await.take();
        if let Some(outgoing) = outgoing {
            outgoing.close().await;
        }
    }

    /// Registers with the server, then reads and dispatches lines until the connection is closed
    /// by either side.
    ///
    /// Returns `Ok(())` after [`close`](#method.close) or when the server ends the stream, and the
    /// error otherwise. Only one `run` can be active per connection.
    pub async fn run(&self) -> error::Result<()> {
        let Incoming {
            mut stream,
            shutdown,
        } = self
            .state
            .incoming
            .lock()
            .take()
            .ok_or(Error::NotConnected)?;

        if let Err(e) = self.register().await {
            warn!("Registration failed: {}", e);
            self.disconnect().await;
            return Err(e);
        }

        loop {
            let message = tokio::select! {
                _ = shutdown.notified() => {
                    debug!("Read loop stopped by close.");
                    return Ok(());
                }
                next = stream.next() => match next {
                    Some(Ok(message)) => message,
                    Some(Err(e)) => {
                        warn!("Reading from the server failed: {}", e);
                        self.disconnect().await;
                        return Err(e.into());
                    }
                    None => {
                        info!("Connection closed by the server.");
                        self.disconnect().await;
                        return Ok(());
                    }
                },
            };

            if message.is_empty() {
                continue;
            }
            match self.dispatch(message).await {
                Ok(()) => (),
                // A concurrent `close` took the writer away mid-dispatch.
                Err(Error::NotConnected) => return Ok(()),
                Err(e) => {
                    warn!("Handling a line failed: {}", e);
                    self.disconnect().await;
                    return Err(e);
                }
            }
        }
    }

    async fn register(&self) -> error::Result<()> {
        let config = &self.state.config;
        let password = self.state.password.lock().take();

        if let Some(password) = password.filter(|p| !p.is_empty()) {
            self.send_raw(&format!("PASS {}", password)).await?;
        }
        let nickname = config.nickname()?;
        self.send_raw(&format!("NICK {}", nickname)).await?;
        self.send_raw(&format!(
            "USER {} {} * :{}",
            config.username(),
            config.umode(),
            config.real_name()
        ))
        .await?;

        debug!("Sent registration for {}.", nickname);
        Ok(())
    }

    async fn dispatch(&self, message: Message) -> error::Result<()> {
        trace!("[RECV] {}", message);
        let handler = &*self.state.handler;
        handler.on_raw(self, &message, Direction::Incoming);

        match &message.command()[..] {
            "PING" => {
                self.send_pong(&message).await?;
                handler.on_ping_pong(self);
            }
            "JOIN" => handler.on_join(self, trailing_or_first(&message), &message.prefix()),
            "PART" => handler.on_part(
                self,
                message.middle(),
                message.trailing(),
                &message.prefix(),
            ),
            "KICK" => handler.on_kick(
                self,
                message.middle(),
                message.trailing(),
                &message.prefix(),
            ),
            "PRIVMSG" => handler.on_privmsg(
                self,
                message.trailing(),
                &message.prefix(),
                &first_middle(&message),
            ),
            "NOTICE" => handler.on_notice(
                self,
                message.trailing(),
                &message.prefix(),
                &first_middle(&message),
            ),
            "NICK" => handler.on_nick(self, trailing_or_first(&message), &message.prefix()),
            "QUIT" => handler.on_quit(self, message.trailing(), &message.prefix()),
            _ if message.is_numeric() => {
                if message.response() == Some(Response::RPL_WELCOME) {
                    self.join_channels().await?;
                }
                handler.on_numeric(self, message.numeric(), &message);
            }
            _ => (),
        }

        Ok(())
    }

    async fn send_pong(&self, ping: &Message) -> error::Result<()> {
        if !ping.trailing().is_empty() {
            self.send_raw(&format!("PONG :{}", ping.trailing())).await
        } else if !ping.middle().is_empty() {
            self.send_raw(&format!("PONG {}", ping.middle())).await
        } else {
            self.send_raw("PONG").await
        }
    }

    async fn join_channels(&self) -> error::Result<()> {
        for channel in self.state.config.channels() {
            self.send_join(channel, "").await?;
        }
        Ok(())
    }

    /// Sends a raw line.
    ///
    /// The line is cut at the first CR or LF, truncated to the configured maximum length without
    /// splitting a character, and terminated with CRLF. If the socket takes only part of the line,
    /// the connection is closed and `ShortWrite` is returned.
    pub async fn send_raw(&self, raw: &str) -> error::Result<()> {
        let mut guard = self.state.outgoing.lock().await;
        let outgoing = guard.as_mut().ok_or(Error::NotConnected)?;
        if IrcCodec::sanitize(raw).is_empty() {
            return Ok(());
        }

        let message = Message::new(&outgoing.codec.prepare(raw));
        let mut buf = BytesMut::new();
        Encoder::<&str>::encode(&mut outgoing.codec, raw, &mut buf)?;

        let expected = buf.len();
        let written = outgoing.writer.write(&buf).await?;
        if written != expected {
            warn!(
                "Short write ({} of {} bytes), closing the connection.",
                written, expected
            );
            if let Some(outgoing) = guard.take() {
                outgoing.close().await;
            }
            return Err(Error::ShortWrite { written, expected });
        }
        outgoing.writer.flush().await?;
        drop(guard);

        trace!("[SENT] {}", message);
        self.state
            .handler
            .on_raw(self, &message, Direction::Outgoing);
        Ok(())
    }

    /// Joins a channel, with a key if `key` is not empty.
    pub async fn send_join(&self, channel: &str, key: &str) -> error::Result<()> {
        if key.is_empty() {
            self.send_raw(&format!("JOIN {}", channel)).await
        } else {
            self.send_raw(&format!("JOIN {} {}", channel, key)).await
        }
    }

    /// Leaves a channel, with a parting message if `message` is not empty.
    pub async fn send_part(&self, channel: &str, message: &str) -> error::Result<()> {
        if message.is_empty() {
            self.send_raw(&format!("PART {}", channel)).await
        } else {
            self.send_raw(&format!("PART {} :{}", channel, message)).await
        }
    }

    /// Sends a message to a channel or user.
    ///
    /// Each line of `message` is split into as many `PRIVMSG`s as it takes to fit the maximum
    /// line length. An empty message sends nothing.
    pub async fn send_privmsg(&self, target: &str, message: &str) -> error::Result<()> {
        self.send_split("PRIVMSG", target, message).await
    }

    /// Sends a notice to a channel or user, split the same way as
    /// [`send_privmsg`](#method.send_privmsg).
    pub async fn send_notice(&self, target: &str, message: &str) -> error::Result<()> {
        self.send_split("NOTICE", target, message).await
    }

    async fn send_split(&self, command: &str, target: &str, message: &str) -> error::Result<()> {
        let header = format!("{} {} :", command, target);
        let room = self
            .state
            .config
            .max_message_len()
            .saturating_sub(header.len());
        if room == 0 {
            warn!("No room for a message to {} after the header, dropping it.", target);
            return Ok(());
        }

        for line in message.split(|c: char| c == '\r' || c == '\n') {
            for chunk in split_to_len(line, room) {
                self.send_raw(&format!("{}{}", header, chunk)).await?;
            }
        }
        Ok(())
    }

    /// Changes the client's nickname.
    pub async fn send_nick(&self, nickname: &str) -> error::Result<()> {
        self.send_raw(&format!("NICK {}", nickname)).await
    }

    /// Quits the server, with a message if `message` is not empty. The server closes the
    /// connection in response.
    pub async fn send_quit(&self, message: &str) -> error::Result<()> {
        if message.is_empty() {
            self.send_raw("QUIT").await
        } else {
            self.send_raw(&format!("QUIT :{}", message)).await
        }
    }
}

fn first_middle(message: &Message) -> Entity {
    Entity::new(message.middles().first().copied().unwrap_or(""))
}

fn trailing_or_first(message: &Message) -> &str {
    if message.trailing().is_empty() {
        message.middles().first().copied().unwrap_or("")
    } else {
        message.trailing()
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use anyhow::Result;
    use parking_lot::Mutex;
    use tokio::io::{AsyncBufReadExt, BufReader};

    use super::{Client, Direction, EventHandler};
    use crate::{
        client::{data::Config, mock::MockStream},
        error::Error,
        proto::{Entity, Message},
    };

    fn test_config() -> Config {
        Config {
            nickname: Some("test".to_owned()),
            username: Some("test".to_owned()),
            realname: Some("test".to_owned()),
            channels: vec!["#test".to_owned(), "#test2".to_owned()],
            ..Config::default()
        }
    }

    const REGISTRATION: &str = "NICK test\r\nUSER test +i * :test\r\n";

    #[derive(Clone, Default)]
    struct Recorder {
        events: Arc<Mutex<Vec<String>>>,
    }

    impl Recorder {
        fn push(&self, event: String) {
            self.events.lock().push(event);
        }

        fn events(&self) -> Vec<String> {
            self.events.lock().clone()
        }
    }

    impl EventHandler for Recorder {
        fn on_raw(&self, _: &Client, message: &Message, direction: Direction) {
            self.push(format!("raw {:?} {}", direction, message));
        }

        fn on_ping_pong(&self, _: &Client) {
            self.push("pingpong".to_owned());
        }

        fn on_join(&self, _: &Client, channel: &str, user: &Entity) {
            self.push(format!("join {} {}", channel, user));
        }

        fn on_part(&self, _: &Client, channel: &str, message: &str, user: &Entity) {
            self.push(format!("part {} {} {}", channel, message, user));
        }

        fn on_kick(&self, _: &Client, targets: &str, message: &str, user: &Entity) {
            self.push(format!("kick {} {} {}", targets, message, user));
        }

        fn on_privmsg(&self, _: &Client, message: &str, source: &Entity, target: &Entity) {
            self.push(format!("privmsg {} {} {}", message, source.nickname(), target));
        }

        fn on_notice(&self, _: &Client, message: &str, source: &Entity, target: &Entity) {
            self.push(format!("notice {} {} {}", message, source, target));
        }

        fn on_nick(&self, _: &Client, new_nick: &str, user: &Entity) {
            self.push(format!("nick {} {}", new_nick, user.nickname()));
        }

        fn on_quit(&self, _: &Client, message: &str, user: &Entity) {
            self.push(format!("quit {} {}", message, user.nickname()));
        }

        fn on_numeric(&self, _: &Client, numeric: i64, _: &Message) {
            self.push(format!("numeric {}", numeric));
        }
    }

    /// Runs a client over `input` until the mock stream is exhausted and returns what it wrote.
    async fn run_client(config: Config, handler: Recorder, input: &str) -> Result<String> {
        let client = Client::new(config, handler)?;
        let stream = MockStream::new(input.as_bytes());
        client.connect_with(stream.clone()).await?;
        client.run().await?;
        Ok(stream.written_str())
    }

    #[tokio::test]
    async fn registration() -> Result<()> {
        let written = run_client(test_config(), Recorder::default(), "").await?;
        assert_eq!(written, REGISTRATION);
        Ok(())
    }

    #[tokio::test]
    async fn registration_with_password() -> Result<()> {
        let config = Config {
            password: Some("hunter2".to_owned()),
            umode: Some("+iw".to_owned()),
            realname: Some("Test Bot".to_owned()),
            ..test_config()
        };
        let client = Client::new(config, ())?;
        assert_eq!(client.config().password, None);

        let stream = MockStream::empty();
        client.connect_with(stream.clone()).await?;
        client.run().await?;
        assert_eq!(
            stream.written_str(),
            "PASS hunter2\r\nNICK test\r\nUSER test +iw * :Test Bot\r\n"
        );

        // The password is only ever sent once.
        let stream = MockStream::empty();
        client.connect_with(stream.clone()).await?;
        client.run().await?;
        assert_eq!(stream.written_str(), "NICK test\r\nUSER test +iw * :Test Bot\r\n");
        Ok(())
    }

    #[tokio::test]
    async fn new_requires_nickname() {
        let err = Client::new(Config::default(), ()).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig { .. }));
    }

    #[tokio::test]
    async fn new_rejects_unknown_encoding() {
        let config = Config {
            encoding: Some("no-such-encoding".to_owned()),
            ..test_config()
        };
        assert!(matches!(Client::new(config, ()), Err(Error::Proto(_))));
    }

    #[tokio::test]
    async fn answers_ping() -> Result<()> {
        let handler = Recorder::default();
        let written = run_client(
            test_config(),
            handler.clone(),
            "PING :irc.test.net\r\nPING irc.other.net\r\n",
        )
        .await?;
        assert_eq!(
            written,
            format!(
                "{}PONG :irc.test.net\r\nPONG irc.other.net\r\n",
                REGISTRATION
            )
        );
        let pongs = handler
            .events()
            .into_iter()
            .filter(|e| e == "pingpong")
            .count();
        assert_eq!(pongs, 2);
        Ok(())
    }

    #[tokio::test]
    async fn joins_channels_after_welcome() -> Result<()> {
        let handler = Recorder::default();
        let written = run_client(
            test_config(),
            handler.clone(),
            ":irc.test.net 001 test :Welcome to the network\r\n",
        )
        .await?;
        assert_eq!(
            written,
            format!("{}JOIN #test\r\nJOIN #test2\r\n", REGISTRATION)
        );
        assert!(handler.events().contains(&"numeric 1".to_owned()));
        Ok(())
    }

    #[tokio::test]
    async fn other_numerics_do_not_join() -> Result<()> {
        let handler = Recorder::default();
        let written = run_client(
            test_config(),
            handler.clone(),
            ":irc.test.net 433 * test :Nickname is already in use\r\n",
        )
        .await?;
        assert_eq!(written, REGISTRATION);
        assert!(handler.events().contains(&"numeric 433".to_owned()));
        Ok(())
    }

    #[tokio::test]
    async fn dispatches_events() -> Result<()> {
        let handler = Recorder::default();
        let input = concat!(
            ":a!b@c JOIN :#chan\r\n",
            ":a!b@c JOIN #other\r\n",
            ":a!b@c PART #chan :see you\r\n",
            ":op!o@h KICK #chan a :bye now\r\n",
            ":a!b@c PRIVMSG #chan :hello there\r\n",
            ":srv NOTICE test :notice text\r\n",
            ":a!b@c NICK :d\r\n",
            ":d!b@c QUIT :gone\r\n",
            ":a!b@c UNKNOWN thing\r\n",
        );
        run_client(test_config(), handler.clone(), input).await?;

        let events: Vec<_> = handler
            .events()
            .into_iter()
            .filter(|e| !e.starts_with("raw"))
            .collect();
        assert_eq!(
            events,
            vec![
                "join #chan a!b@c",
                "join #other a!b@c",
                "part #chan see you a!b@c",
                "kick #chan a bye now op!o@h",
                "privmsg hello there a #chan",
                "notice notice text srv test",
                "nick d a",
                "quit gone d",
            ]
        );
        Ok(())
    }

    #[tokio::test]
    async fn raw_events_in_both_directions() -> Result<()> {
        let handler = Recorder::default();
        run_client(test_config(), handler.clone(), "PING :x\r\n\r\n").await?;
        let raw: Vec<_> = handler
            .events()
            .into_iter()
            .filter(|e| e.starts_with("raw"))
            .collect();
        assert_eq!(
            raw,
            vec![
                "raw Outgoing NICK test",
                "raw Outgoing USER test +i * :test",
                "raw Incoming PING :x",
                "raw Outgoing PONG :x",
            ]
        );
        Ok(())
    }

    #[tokio::test]
    async fn not_connected() -> Result<()> {
        let client = Client::new(test_config(), ())?;
        assert!(matches!(
            client.send_raw("NICK test").await,
            Err(Error::NotConnected)
        ));
        assert!(matches!(client.run().await, Err(Error::NotConnected)));
        assert!(!client.is_connected().await);
        Ok(())
    }

    #[tokio::test]
    async fn already_connected() -> Result<()> {
        let client = Client::new(test_config(), ())?;
        client.connect_with(MockStream::empty()).await?;
        assert!(client.is_connected().await);
        assert!(matches!(
            client.connect_with(MockStream::empty()).await,
            Err(Error::AlreadyConnected)
        ));
        assert!(matches!(client.connect().await, Err(Error::AlreadyConnected)));
        Ok(())
    }

    #[tokio::test]
    async fn already_disconnected() -> Result<()> {
        let client = Client::new(test_config(), ())?;
        assert!(matches!(
            client.close().await,
            Err(Error::AlreadyDisconnected)
        ));
        client.connect_with(MockStream::empty()).await?;
        client.close().await?;
        assert!(!client.is_connected().await);
        assert!(matches!(
            client.close().await,
            Err(Error::AlreadyDisconnected)
        ));
        Ok(())
    }

    #[tokio::test]
    async fn connect_without_server() -> Result<()> {
        let client = Client::new(test_config(), ())?;
        assert!(matches!(
            client.connect().await,
            Err(Error::InvalidConfig { .. })
        ));
        Ok(())
    }

    #[tokio::test]
    async fn short_write_closes() -> Result<()> {
        let client = Client::new(test_config(), ())?;
        let stream = MockStream::empty().with_write_limit(4);
        client.connect_with(stream.clone()).await?;

        match client.send_raw("NICK test").await {
            Err(Error::ShortWrite { written, expected }) => {
                assert_eq!(written, 4);
                assert_eq!(expected, 11);
            }
            other => panic!("expected a short write, got {:?}", other),
        }
        assert_eq!(stream.written(), b"NICK".to_vec());
        assert!(!client.is_connected().await);
        assert!(matches!(
            client.send_raw("NICK test").await,
            Err(Error::NotConnected)
        ));
        Ok(())
    }

    #[tokio::test]
    async fn send_raw_sanitizes_and_truncates() -> Result<()> {
        let config = Config {
            max_message_len: Some(10),
            ..test_config()
        };
        let client = Client::new(config, ())?;
        let stream = MockStream::empty();
        client.connect_with(stream.clone()).await?;

        client.send_raw("NICK a\r\nQUIT").await?;
        client.send_raw("PRIVMSG #a :hello").await?;
        client.send_raw("").await?;
        client.send_raw("\r\nQUIT").await?;
        client.send_raw("NICK ąčęž").await?;
        assert_eq!(
            stream.written_str(),
            "NICK a\r\nPRIVMSG #a\r\nNICK ąč\r\n"
        );
        Ok(())
    }

    #[tokio::test]
    async fn privmsg_is_split() -> Result<()> {
        let config = Config {
            max_message_len: Some(20),
            ..test_config()
        };
        let client = Client::new(config, ())?;
        let stream = MockStream::empty();
        client.connect_with(stream.clone()).await?;

        client.send_privmsg("#c", "abcdefghijkl").await?;
        client.send_notice("#c", "one\ntwo").await?;
        assert_eq!(
            stream.written_str(),
            concat!(
                "PRIVMSG #c :abcdefgh\r\n",
                "PRIVMSG #c :ijkl\r\n",
                "NOTICE #c :one\r\n",
                "NOTICE #c :two\r\n",
            )
        );
        Ok(())
    }

    #[tokio::test]
    async fn privmsg_to_overlong_target_sends_nothing() -> Result<()> {
        let config = Config {
            max_message_len: Some(20),
            ..test_config()
        };
        let client = Client::new(config, ())?;
        let stream = MockStream::empty();
        client.connect_with(stream.clone()).await?;

        client.send_privmsg("#a-very-long-channel", "hello").await?;
        client.send_notice("#another-long-one", "hello").await?;
        assert!(stream.written().is_empty());
        assert!(client.is_connected().await);
        Ok(())
    }

    #[tokio::test]
    async fn failed_registration_disconnects() -> Result<()> {
        let client = Client::new(test_config(), ())?;
        client
            .connect_with(MockStream::new(b"PING :x\r\n").with_broken_pipe_after(0))
            .await?;

        assert!(matches!(client.run().await, Err(Error::Io(_))));
        assert!(!client.is_connected().await);

        let stream = MockStream::empty();
        client.connect_with(stream.clone()).await?;
        client.run().await?;
        assert_eq!(stream.written_str(), REGISTRATION);
        Ok(())
    }

    #[tokio::test]
    async fn failed_dispatch_disconnects() -> Result<()> {
        let client = Client::new(test_config(), ())?;
        let stream = MockStream::new(b"PING :x\r\nPING :y\r\n").with_broken_pipe_after(2);
        client.connect_with(stream.clone()).await?;

        assert!(matches!(client.run().await, Err(Error::Io(_))));
        assert_eq!(stream.written_str(), REGISTRATION);
        assert!(!client.is_connected().await);
        assert!(client.connect_with(MockStream::empty()).await.is_ok());
        Ok(())
    }

    #[tokio::test]
    async fn empty_privmsg_sends_nothing() -> Result<()> {
        let client = Client::new(test_config(), ())?;
        let stream = MockStream::empty();
        client.connect_with(stream.clone()).await?;
        client.send_privmsg("#c", "").await?;
        client.send_notice("#c", "\r\n").await?;
        assert!(stream.written().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn command_builders() -> Result<()> {
        let client = Client::new(test_config(), ())?;
        let stream = MockStream::empty();
        client.connect_with(stream.clone()).await?;

        client.send_join("#a", "").await?;
        client.send_join("#b", "secret").await?;
        client.send_part("#a", "").await?;
        client.send_part("#b", "so long").await?;
        client.send_nick("other").await?;
        client.send_quit("").await?;
        client.send_quit("bye all").await?;
        assert_eq!(
            stream.written_str(),
            concat!(
                "JOIN #a\r\n",
                "JOIN #b secret\r\n",
                "PART #a\r\n",
                "PART #b :so long\r\n",
                "NICK other\r\n",
                "QUIT\r\n",
                "QUIT :bye all\r\n",
            )
        );
        Ok(())
    }

    #[tokio::test]
    async fn close_stops_run() -> Result<()> {
        let client = Client::new(test_config(), ())?;
        let (stream, server) = tokio::io::duplex(4096);
        client.connect_with(stream).await?;

        let runner = tokio::spawn({
            let client = client.clone();
            async move { client.run().await }
        });

        let mut lines = BufReader::new(server).lines();
        assert_eq!(lines.next_line().await?.as_deref(), Some("NICK test"));
        assert_eq!(
            lines.next_line().await?.as_deref(),
            Some("USER test +i * :test")
        );

        client.close().await?;
        assert!(runner.await?.is_ok());
        assert!(!client.is_connected().await);
        Ok(())
    }
}
