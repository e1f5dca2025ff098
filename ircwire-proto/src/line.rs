//! Implementation of line-delimiting codec for Tokio.

use bytes::BytesMut;
use encoding::label::encoding_from_whatwg_label;
use encoding::{DecoderTrap, EncoderTrap, EncodingRef};
use tokio_util::codec::{Decoder, Encoder};

use crate::error;

/// A line-based codec parameterized by an encoding.
///
/// Decoded lines keep their `\n` (and any `\r`); `Message::new` trims them.
pub struct LineCodec {
    encoding: EncodingRef,
    next_index: usize,
}

impl LineCodec {
    /// Creates a new instance of LineCodec from the specified encoding.
    pub fn new(label: &str) -> error::Result<LineCodec> {
        encoding_from_whatwg_label(label)
            .map(|enc| LineCodec {
                encoding: enc,
                next_index: 0,
            })
            .ok_or_else(|| error::ProtocolError::UnknownCodec {
                codec: label.to_owned(),
            })
    }

    /// Gets the name of the encoding in use.
    pub fn encoding_name(&self) -> &'static str {
        self.encoding.name()
    }
}

impl Decoder for LineCodec {
    type Item = String;
    type Error = error::ProtocolError;

    fn decode(&mut self, src: &mut BytesMut) -> error::Result<Option<String>> {
        if let Some(offset) = src[self.next_index..].iter().position(|b| *b == b'\n') {
            // Remove the next frame from the buffer.
            let line = src.split_to(self.next_index + offset + 1);

            // Set the search start index back to 0 since we found a newline.
            self.next_index = 0;

            // Undecodable bytes become U+FFFD rather than failing the whole connection.
            self.encoding
                .decode(line.as_ref(), DecoderTrap::Replace)
                .map(Some)
                .map_err(|data| error::ProtocolError::CodecFailed {
                    codec: self.encoding.name(),
                    data: data.into_owned(),
                })
        } else {
            // Set the search start index to the current length since we know that none of the
            // characters we've already looked at are newlines.
            self.next_index = src.len();
            Ok(None)
        }
    }
}

impl Encoder<String> for LineCodec {
    type Error = error::ProtocolError;

    fn encode(&mut self, msg: String, dst: &mut BytesMut) -> error::Result<()> {
        let data = self
            .encoding
            .encode(&msg, EncoderTrap::Replace)
            .map_err(|data| error::ProtocolError::CodecFailed {
                codec: self.encoding.name(),
                data: data.into_owned(),
            })?;

        dst.extend_from_slice(&data);

        Ok(())
    }
}
