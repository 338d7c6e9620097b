use crate::app::event::{AppEvent, ConnectionId};
use crate::net::connection::{spawn_connection, GameConnection};
use crate::net::NetError;
use anyhow::Result;
use tokio::sync::mpsc;

/// Owns the (at most one) live server connection.
pub struct ConnectionManager {
    connection: Option<GameConnection>,
    next_id: ConnectionId,
    event_tx: mpsc::UnboundedSender<AppEvent>,
}

impl ConnectionManager {
    pub fn new(event_tx: mpsc::UnboundedSender<AppEvent>) -> Self {
        Self {
            connection: None,
            next_id: 0,
            event_tx,
        }
    }

    pub fn current_id(&self) -> Option<ConnectionId> {
        self.connection.as_ref().map(|c| c.id)
    }

    /// Replaces any existing connection and returns the new connection's id.
    pub async fn connect(&mut self, host: &str, port: u16, character: &str) -> Result<ConnectionId> {
        self.disconnect();
        let id = self.next_id;
        self.next_id += 1;
        let conn = spawn_connection(
            id,
            host.to_string(),
            port,
            character.to_string(),
            self.event_tx.clone(),
        )
        .await?;
        self.connection = Some(conn);
        Ok(id)
    }

    pub fn disconnect(&mut self) {
        if let Some(conn) = self.connection.take() {
            let _ = conn.send("quit");
        }
    }

    /// Forget the connection after the server side went away.
    pub fn clear(&mut self) {
        self.connection = None;
    }

    pub fn send(&self, command: &str) -> Result<(), NetError> {
        self.connection
            .as_ref()
            .ok_or(NetError::NotConnected)?
            .send(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncBufReadExt, BufReader};
    use tokio::net::TcpListener;

    #[test]
    fn test_send_without_connection() {
        let (event_tx, _rx) = mpsc::unbounded_channel();
        let manager = ConnectionManager::new(event_tx);
        assert_eq!(manager.current_id(), None);
        assert!(matches!(manager.send("look"), Err(NetError::NotConnected)));
    }

    #[tokio::test]
    async fn test_reconnect_allocates_new_id() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let server = tokio::spawn(async move {
            let mut logins = Vec::new();
            for _ in 0..2 {
                let (socket, _) = listener.accept().await.unwrap();
                let mut lines = BufReader::new(socket).lines();
                logins.push(lines.next_line().await.unwrap().unwrap());
            }
            logins
        });

        let (event_tx, _rx) = mpsc::unbounded_channel();
        let mut manager = ConnectionManager::new(event_tx);
        let first = manager.connect("127.0.0.1", port, "Brannoc").await.unwrap();
        let second = manager.connect("127.0.0.1", port, "Brannoc").await.unwrap();
        assert_ne!(first, second);
        assert_eq!(manager.current_id(), Some(second));

        assert_eq!(server.await.unwrap(), ["@login Brannoc", "@login Brannoc"]);
        manager.disconnect();
        assert_eq!(manager.current_id(), None);
    }
}
