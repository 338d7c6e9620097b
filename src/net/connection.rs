use crate::app::event::{AppEvent, ConnectionId};
use crate::net::protocol::{encode_command, encode_login};
use crate::net::NetError;
use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Handle to a live server connection. Dropping it closes the writer task,
/// which shuts down the write half of the socket.
pub struct GameConnection {
    pub id: ConnectionId,
    sender: mpsc::UnboundedSender<String>,
}

impl GameConnection {
    pub fn send(&self, command: &str) -> Result<(), NetError> {
        self.sender
            .send(encode_command(command))
            .map_err(|_| NetError::ChannelClosed)
    }
}

pub async fn spawn_connection(
    id: ConnectionId,
    host: String,
    port: u16,
    character: String,
    event_tx: mpsc::UnboundedSender<AppEvent>,
) -> Result<GameConnection> {
    let stream = TcpStream::connect((host.as_str(), port))
        .await
        .with_context(|| format!("Failed to connect to {}:{}", host, port))?;
    info!(id, %host, port, "connected");

    let (reader, mut writer) = stream.into_split();
    let (line_tx, mut line_rx) = mpsc::unbounded_channel::<String>();

    line_tx
        .send(encode_login(&character))
        .map_err(|_| NetError::ChannelClosed)?;
    let _ = event_tx.send(AppEvent::Connected {
        id,
        host,
        port,
    });

    tokio::spawn(async move {
        while let Some(line) = line_rx.recv().await {
            debug!(line = line.trim_end(), "send");
            if let Err(e) = writer.write_all(line.as_bytes()).await {
                warn!("write failed: {}", e);
                break;
            }
            if writer.flush().await.is_err() {
                break;
            }
        }
        let _ = writer.shutdown().await;
    });

    let reader_tx = event_tx.clone();
    tokio::spawn(async move {
        let mut lines = BufReader::new(reader).lines();
        let reason = loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    if reader_tx.send(AppEvent::ServerLine { id, line }).is_err() {
                        return;
                    }
                }
                Ok(None) => break "Connection closed by server".to_string(),
                Err(e) => {
                    let _ = reader_tx.send(AppEvent::NetError {
                        id,
                        error: e.to_string(),
                    });
                    break e.to_string();
                }
            }
        };
        info!(id, %reason, "disconnected");
        let _ = reader_tx.send(AppEvent::Disconnected { id, reason });
    });

    Ok(GameConnection {
        id,
        sender: line_tx,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn test_round_trip_over_loopback() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();

        let server = tokio::spawn(async move {
            let (socket, _) = listener.accept().await.unwrap();
            let (reader, mut writer) = socket.into_split();
            let mut lines = BufReader::new(reader).lines();
            let login = lines.next_line().await.unwrap().unwrap();
            writer.write_all(b"@skills 1:Fireball\n").await.unwrap();
            let command = lines.next_line().await.unwrap().unwrap();
            (login, command)
        });

        let (event_tx, mut event_rx) = mpsc::unbounded_channel();
        let conn = spawn_connection(7, "127.0.0.1".into(), port, "Brannoc".into(), event_tx)
            .await
            .unwrap();

        assert!(matches!(
            event_rx.recv().await,
            Some(AppEvent::Connected { id: 7, port: p, .. }) if p == port
        ));
        match event_rx.recv().await {
            Some(AppEvent::ServerLine { id, line }) => {
                assert_eq!(id, 7);
                assert_eq!(line, "@skills 1:Fireball");
            }
            other => panic!("unexpected event {:?}", other),
        }

        conn.send("fireball").unwrap();
        let (login, command) = server.await.unwrap();
        assert_eq!(login, "@login Brannoc");
        assert_eq!(command, "fireball");

        assert!(matches!(
            event_rx.recv().await,
            Some(AppEvent::Disconnected { id: 7, .. })
        ));
    }

    #[tokio::test]
    async fn test_connect_refused_is_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let (event_tx, _event_rx) = mpsc::unbounded_channel();
        let result = spawn_connection(1, "127.0.0.1".into(), port, "x".into(), event_tx).await;
        assert!(result.is_err());
    }
}
