use std::{
    io::{self, Cursor, Read},
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
};

use parking_lot::Mutex;
use tokio::io::{AsyncRead, AsyncWrite, ReadBuf};

/// A fake stream for testing network applications backed by buffers.
///
/// Clones share the log of written bytes, so a test can hand one clone to the client and keep
/// the other to inspect what was sent.
#[derive(Clone, Debug)]
pub struct MockStream {
    written: Arc<Mutex<Vec<u8>>>,
    received: Cursor<Vec<u8>>,
    write_limit: Option<usize>,
    writes_left: Option<usize>,
}

impl MockStream {
    /// Creates a new mock stream with nothing to read.
    pub fn empty() -> MockStream {
        MockStream::new(&[])
    }

    /// Creates a new mock stream with the specified bytes to read.
    pub fn new(initial: &[u8]) -> MockStream {
        MockStream {
            written: Arc::new(Mutex::new(vec![])),
            received: Cursor::new(initial.to_owned()),
            write_limit: None,
            writes_left: None,
        }
    }

    /// Accepts at most `limit` bytes per write.
    pub fn with_write_limit(mut self, limit: usize) -> MockStream {
        self.write_limit = Some(limit);
        self
    }

    /// Lets `writes` writes through, then fails every later one with `BrokenPipe`.
    pub fn with_broken_pipe_after(mut self, writes: usize) -> MockStream {
        self.writes_left = Some(writes);
        self
    }

    /// Gets a copy of the bytes that have been written.
    pub fn written(&self) -> Vec<u8> {
        self.written.lock().clone()
    }

    /// Gets the written bytes as text.
    pub fn written_str(&self) -> String {
        String::from_utf8_lossy(&self.written.lock()).into_owned()
    }
}

impl AsyncRead for MockStream {
    fn poll_read(
        mut self: Pin<&mut Self>,
        _: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        let n = self.as_mut().received.read(buf.initialize_unfilled())?;
        buf.advance(n);
        Poll::Ready(Ok(()))
    }
}

impl AsyncWrite for MockStream {
    fn poll_write(
        mut self: Pin<&mut Self>,
        _: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<Result<usize, io::Error>> {
        match self.writes_left {
            Some(0) => {
                return Poll::Ready(Err(io::Error::new(
                    io::ErrorKind::BrokenPipe,
                    "mock stream closed",
                )))
            }
            Some(n) => self.writes_left = Some(n - 1),
            None => (),
        }
        let n = self.write_limit.map_or(buf.len(), |limit| limit.min(buf.len()));
        self.written.lock().extend_from_slice(&buf[..n]);
        Poll::Ready(Ok(n))
    }

    fn poll_flush(self: Pin<&mut Self>, _: &mut Context<'_>) -> Poll<Result<(), io::Error>> {
        Poll::Ready(Ok(()))
    }

    fn poll_shutdown(self: Pin<&mut Self>, _: &mut Context<'_>) -> Poll<Result<(), io::Error>> {
        Poll::Ready(Ok(()))
    }
}
