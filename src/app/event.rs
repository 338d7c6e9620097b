use crossterm::event::Event as CrosstermEvent;

/// Identifies one connection attempt so late events from a replaced
/// connection can be told apart from the live one.
pub type ConnectionId = u64;

#[derive(Debug)]
pub enum AppEvent {
    /// Terminal input event
    Terminal(CrosstermEvent),

    /// One line received from the game server
    ServerLine {
        id: ConnectionId,
        line: String,
    },

    /// Connection state changed
    Connected {
        id: ConnectionId,
        host: String,
        port: u16,
    },
    Disconnected {
        id: ConnectionId,
        reason: String,
    },
    NetError {
        id: ConnectionId,
        error: String,
    },

    /// Tick for UI refresh
    Tick,
}
