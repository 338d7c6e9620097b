//! Game server connection: wire protocol, connection tasks and the manager
//! the main loop sends commands through.

pub mod connection;
pub mod manager;
pub mod protocol;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NetError {
    #[error("not connected")]
    NotConnected,
    #[error("connection writer closed")]
    ChannelClosed,
}
