//! End-to-end tests against an in-process remote console server.

use mc_console_config::ConsoleConfig;
use mc_console_connector::prelude::*;
use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

const PASSWORD: &str = "hunter2";
const FRAGMENT: usize = 4096;

struct TestServer {
    port: u16,
    logins: Arc<AtomicUsize>,
    drops: Arc<AtomicUsize>,
    commands: Arc<AtomicUsize>,
}

impl TestServer {
    async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let logins = Arc::new(AtomicUsize::new(0));
        let drops = Arc::new(AtomicUsize::new(0));
        let commands = Arc::new(AtomicUsize::new(0));

        let (l, d, c) = (logins.clone(), drops.clone(), commands.clone());
        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                tokio::spawn(serve(stream, l.clone(), d.clone(), c.clone()));
            }
        });

        Self {
            port,
            logins,
            drops,
            commands,
        }
    }

    fn config(&self, password: &str) -> ConsoleConfig {
        let mut config = ConsoleConfig::default();
        config.rcon.host = "127.0.0.1".to_string();
        config.rcon.port = self.port;
        config.rcon.password = Some(password.to_string());
        config.rcon.connect_timeout_ms = 2000;
        config.rcon.io_timeout_ms = 2000;
        config.retry.base_delay_ms = 10;
        config
    }
}

async fn read_packet(stream: &mut TcpStream) -> io::Result<Option<(i32, i32, String)>> {
    let size = match stream.read_i32_le().await {
        Ok(size) => size as usize,
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => return Ok(None),
        Err(e) => return Err(e),
    };
    let id = stream.read_i32_le().await?;
    let kind = stream.read_i32_le().await?;
    let mut body = vec![0; size - 8];
    stream.read_exact(&mut body).await?;
    body.truncate(body.len() - 2);
    Ok(Some((id, kind, String::from_utf8(body).unwrap())))
}

async fn write_packet(stream: &mut TcpStream, id: i32, kind: i32, body: &str) -> io::Result<()> {
    let mut buf = Vec::with_capacity(body.len() + 14);
    buf.extend_from_slice(&((body.len() + 10) as i32).to_le_bytes());
    buf.extend_from_slice(&id.to_le_bytes());
    buf.extend_from_slice(&kind.to_le_bytes());
    buf.extend_from_slice(body.as_bytes());
    buf.extend_from_slice(&[0, 0]);
    stream.write_all(&buf).await
}

async fn serve(
    mut stream: TcpStream,
    logins: Arc<AtomicUsize>,
    drops: Arc<AtomicUsize>,
    commands: Arc<AtomicUsize>,
) -> io::Result<()> {
    while let Some((id, kind, body)) = read_packet(&mut stream).await? {
        if kind == 3 {
            if body == PASSWORD {
                logins.fetch_add(1, Ordering::SeqCst);
                write_packet(&mut stream, id, 0, "").await?;
                write_packet(&mut stream, id, 2, "").await?;
            } else {
                write_packet(&mut stream, -1, 2, "").await?;
            }
            continue;
        }
        if kind != 2 {
            // vanilla servers answer request types they do not know with one packet
            write_packet(&mut stream, id, 0, &format!("Unknown request {:x}", kind)).await?;
            continue;
        }

        commands.fetch_add(1, Ordering::SeqCst);
        let dropped = drops
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if dropped {
            return Ok(());
        }

        match body.as_str() {
            "list" => {
                write_packet(&mut stream, id, 0, "There are 2 of a max of 20 players online: Steve, Alex")
                    .await?
            }
            "long" => {
                write_packet(&mut stream, id, 0, &"a".repeat(FRAGMENT)).await?;
                write_packet(&mut stream, id, 0, "tail").await?;
            }
            "exact" => write_packet(&mut stream, id, 0, &"a".repeat(FRAGMENT)).await?,
            "wide" => write_packet(&mut stream, id, 0, &"\u{a7}".repeat(2100)).await?,
            other => write_packet(&mut stream, id, 0, &format!("Unknown command: {other}")).await?,
        }
    }
    Ok(())
}

#[tokio::test]
async fn test_player_list_over_tcp() {
    let server = TestServer::start().await;
    let connector = RconConnector::from_config(&server.config(PASSWORD)).unwrap();

    let raw = connector.execute_command("list").await.unwrap();
    let presence = decode_player_list(&raw).unwrap();
    assert_eq!(presence.online_count, 2);
    assert_eq!(presence.max_count, 20);
    assert_eq!(presence.player_names, vec!["Steve", "Alex"]);
    assert_eq!(connector.status().await, ConnectionStatus::Connected);

    connector.close().await.unwrap();
    assert_eq!(connector.status().await, ConnectionStatus::Disconnected);
}

#[tokio::test]
async fn test_wrong_password_is_reported_once() {
    let server = TestServer::start().await;
    let connector = RconConnector::from_config(&server.config("not-it")).unwrap();

    let err = connector.execute_command("list").await.unwrap_err();
    assert!(matches!(
        err,
        ConsoleError::Connect {
            step: RecoveryStep::Dial,
            source: TransportError::AuthRejected,
            ..
        }
    ));
    assert_eq!(server.logins.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_fragmented_response_is_reassembled() {
    let server = TestServer::start().await;
    let connector = RconConnector::from_config(&server.config(PASSWORD)).unwrap();

    let raw = connector.execute_command("long").await.unwrap();
    assert_eq!(raw.len(), FRAGMENT + 4);
    assert!(raw.ends_with("atail"));
    assert_eq!(server.commands.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_response_of_exactly_one_fragment_does_not_wait_for_more() {
    let server = TestServer::start().await;
    let mut config = server.config(PASSWORD);
    config.rcon.io_timeout_ms = 500;
    let connector = RconConnector::from_config(&config).unwrap();

    let raw = connector.execute_command("exact").await.unwrap();
    assert_eq!(raw.len(), FRAGMENT);
    assert_eq!(server.commands.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_wide_characters_fit_in_one_fragment() {
    let server = TestServer::start().await;
    let connector = RconConnector::from_config(&server.config(PASSWORD)).unwrap();

    let raw = connector.execute_command("wide").await.unwrap();
    assert_eq!(raw.chars().count(), 2100);
    assert!(raw.chars().all(|c| c == '\u{a7}'));
    assert_eq!(server.commands.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_dropped_connection_is_replaced() {
    let server = TestServer::start().await;
    let connector = RconConnector::from_config(&server.config(PASSWORD)).unwrap();
    connector.execute_command("list").await.unwrap();

    server.drops.store(1, Ordering::SeqCst);
    let raw = connector.execute_command("say hi").await.unwrap();
    assert_eq!(raw, "Unknown command: say hi");
    assert_eq!(server.logins.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_unreachable_server_exhausts_retries() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let mut config = ConsoleConfig::default();
    config.rcon.host = "127.0.0.1".to_string();
    config.rcon.port = port;
    config.rcon.password = Some(PASSWORD.to_string());
    config.retry.max_attempts = 2;
    config.retry.base_delay_ms = 10;

    let connector = RconConnector::from_config(&config).unwrap();
    let err = connector.execute_command("list").await.unwrap_err();
    assert!(matches!(
        err,
        ConsoleError::Connect {
            step: RecoveryStep::RetriesExhausted { attempts: 2 },
            ..
        }
    ));
}
