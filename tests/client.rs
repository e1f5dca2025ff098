use anyhow::Result;
use tokio::{
    io::{AsyncBufReadExt, AsyncWriteExt, BufReader},
    net::TcpListener,
};

use ircwire::client::prelude::*;

struct Echo;

impl EventHandler for Echo {
    fn on_privmsg(&self, client: &Client, message: &str, source: &Entity, target: &Entity) {
        let reply_to = if target.is_chan() {
            target.to_string()
        } else {
            source.nickname().to_owned()
        };
        let client = client.clone();
        let message = strip_control_codes(message);
        tokio::spawn(async move { client.send_privmsg(&reply_to, &message).await });
    }
}

#[tokio::test]
async fn echo_bot_session() -> Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();

    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let port = listener.local_addr()?.port();

    let server = tokio::spawn(async move {
        let (socket, _) = listener.accept().await?;
        let (read, mut write) = socket.into_split();
        let mut lines = BufReader::new(read).lines();
        let mut seen = vec![];

        for _ in 0..2 {
            seen.extend(lines.next_line().await?);
        }
        write.write_all(b":irc.test 001 echobot :Welcome\r\n").await?;
        seen.extend(lines.next_line().await?);

        write
            .write_all(b":a!b@c PRIVMSG #ircwire :\x02hello\x02 there\r\n")
            .await?;
        seen.extend(lines.next_line().await?);

        write.write_all(b"PING :irc.test\r\n").await?;
        seen.extend(lines.next_line().await?);

        Ok::<_, anyhow::Error>(seen)
    });

    let config = Config {
        nickname: Some("echobot".to_owned()),
        server: Some("127.0.0.1".to_owned()),
        port: Some(port),
        use_tls: Some(false),
        channels: vec!["#ircwire".to_owned()],
        ..Config::default()
    };
    let client = Client::new(config, Echo)?;
    client.connect().await?;
    client.run().await?;

    assert_eq!(
        server.await??,
        vec![
            "NICK echobot",
            "USER echobot +i * :echobot",
            "JOIN #ircwire",
            "PRIVMSG #ircwire :hello there",
            "PONG :irc.test",
        ]
    );
    assert!(!client.is_connected().await);
    Ok(())
}

#[test]
fn parses_server_lines() {
    let msg = Message::new(":SomeNick!SomeUser@SomeHost 671 yournick othernick :is using a secure connection\r\n");
    assert_eq!(msg.prefix().nickname(), "SomeNick");
    assert_eq!(msg.response(), Some(Response::RPL_WHOISSECURE));
    assert_eq!(msg.middles(), vec!["yournick", "othernick"]);

    let (nick, modes) = parse_channel_modes("@+voiced");
    assert_eq!(nick, "voiced");
    assert!(modes.has(ChannelMode::Op) && modes.has(ChannelMode::Voice));
    assert_eq!(modes.highest(), Some(ChannelMode::Op));
}
