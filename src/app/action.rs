/// Outbound intents produced by event handling. The main loop drains them in
/// order, so every handler result is dispatched exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Write one command line to the game server.
    Send { command: String },
    Connect,
    Disconnect,
    Quit,
}

/// Action constructor for an outbound game command.
pub fn send(command: impl Into<String>) -> Action {
    Action::Send {
        command: command.into(),
    }
}
