//! Implementation of IRC codec for Tokio.
use bytes::BytesMut;
use tokio_util::codec::{Decoder, Encoder};

use crate::error;
use crate::limit::{truncate_to_len, DEFAULT_MAX_MESSAGE_LEN};
use crate::line::LineCodec;
use crate::message::Message;

/// An IRC codec built around an inner codec.
///
/// Incoming lines become [`Message`](../message/struct.Message.html)s. Outgoing lines are cut at
/// the first line terminator, truncated to the maximum message length without splitting a
/// character, and terminated with CRLF.
pub struct IrcCodec {
    inner: LineCodec,
    max_len: usize,
}

impl IrcCodec {
    /// Creates a new instance of IrcCodec wrapping a LineCodec with the specific encoding.
    pub fn new(label: &str) -> error::Result<IrcCodec> {
        IrcCodec::with_max_len(label, DEFAULT_MAX_MESSAGE_LEN)
    }

    /// Creates a codec that truncates outgoing lines to `max_len` bytes (excluding CRLF).
    pub fn with_max_len(label: &str, max_len: usize) -> error::Result<IrcCodec> {
        LineCodec::new(label).map(|inner| IrcCodec { inner, max_len })
    }

    /// Gets the maximum length of an outgoing line.
    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// Sanitizes the input string by cutting it at the first line terminator (`\r` or `\n`). This
    /// prevents the injection of additional commands through user-supplied text.
    pub fn sanitize(data: &str) -> &str {
        data.find(|c: char| c == '\r' || c == '\n')
            .map_or(data, |pos| &data[..pos])
    }

    /// Produces the exact line that will be written for `raw`, including the CRLF.
    pub fn prepare(&self, raw: &str) -> String {
        let line = truncate_to_len(IrcCodec::sanitize(raw), self.max_len);
        let mut out = String::with_capacity(line.len() + 2);
        out.push_str(line);
        out.push_str("\r\n");
        out
    }
}

impl Decoder for IrcCodec {
    type Item = Message;
    type Error = error::ProtocolError;

    fn decode(&mut self, src: &mut BytesMut) -> error::Result<Option<Message>> {
        self.inner
            .decode(src)
            .map(|res| res.map(|line| Message::new(&line)))
    }
}

impl Encoder<String> for IrcCodec {
    type Error = error::ProtocolError;

    fn encode(&mut self, msg: String, dst: &mut BytesMut) -> error::Result<()> {
        let line = self.prepare(&msg);
        self.inner.encode(line, dst)
    }
}

impl<'a> Encoder<&'a str> for IrcCodec {
    type Error = error::ProtocolError;

    fn encode(&mut self, msg: &'a str, dst: &mut BytesMut) -> error::Result<()> {
        let line = self.prepare(msg);
        self.inner.encode(line, dst)
    }
}

impl Encoder<Message> for IrcCodec {
    type Error = error::ProtocolError;

    fn encode(&mut self, msg: Message, dst: &mut BytesMut) -> error::Result<()> {
        Encoder::<&str>::encode(self, msg.as_str(), dst)
    }
}
