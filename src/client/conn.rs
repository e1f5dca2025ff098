//! Establishing connections for a `Client`.
use tokio::{
    io::{AsyncRead, AsyncWrite},
    net::TcpStream,
};

#[cfg(feature = "tls-native")]
use native_tls::TlsConnector;

use crate::client::data::Config;
use crate::error;

/// The read half of a connection, whatever the underlying transport.
pub(crate) type BoxedRead = Box<dyn AsyncRead + Send + Unpin>;
/// The write half of a connection, whatever the underlying transport.
pub(crate) type BoxedWrite = Box<dyn AsyncWrite + Send + Unpin>;

/// Splits any duplex stream into boxed halves.
pub(crate) fn split<S>(stream: S) -> (BoxedRead, BoxedWrite)
where
    S: AsyncRead + AsyncWrite + Send + 'static,
{
    let (read, write) = tokio::io::split(stream);
    (Box::new(read), Box::new(write))
}

/// Dials the server named in `config`, wrapping the socket in TLS when requested.
pub(crate) async fn connect(config: &Config) -> error::Result<(BoxedRead, BoxedWrite)> {
    let server = config.server()?;
    let port = config.port();

    if config.use_tls() {
        connect_tls(config, server, port).await
    } else {
        log::info!("Connecting to {}:{}.", server, port);
        let socket = TcpStream::connect((server, port)).await?;
        Ok(split(socket))
    }
}

#[cfg(feature = "tls-native")]
async fn connect_tls(
    config: &Config,
    server: &str,
    port: u16,
) -> error::Result<(BoxedRead, BoxedWrite)> {
    log::info!("Connecting via TLS to {}:{}.", server, port);

    let mut builder = TlsConnector::builder();
    if config.dangerously_accept_invalid_certs() {
        log::warn!("Accepting invalid certificates for {}.", server);
        builder.danger_accept_invalid_certs(true);
    }
    let connector: tokio_native_tls::TlsConnector = builder.build()?.into();

    let socket = TcpStream::connect((server, port)).await?;
    let stream = connector.connect(server, socket).await?;
    Ok(split(stream))
}

#[cfg(not(feature = "tls-native"))]
async fn connect_tls(
    _: &Config,
    _: &str,
    _: u16,
) -> error::Result<(BoxedRead, BoxedWrite)> {
    Err(error::Error::TlsDisabled)
}
