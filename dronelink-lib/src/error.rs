use std::io;
use thiserror::Error;

/// The primary error type for the `dronelink` library.
#[derive(Error, Debug)]
pub enum LinkError {
    #[error("Invalid command type: {0:#04x}")]
    InvalidCommand(u8),

    #[error("Checksum mismatch: computed {expected:#04x}, frame carries {actual:#04x}")]
    ChecksumMismatch { expected: u8, actual: u8 },

    #[error("Invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("Invalid flight mode: {0:#04x}")]
    InvalidFlightMode(u8),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Timeout waiting for drone response: {0}")]
    Timeout(#[from] tokio::time::error::Elapsed),

    #[error("Connection closed before a complete record was received")]
    ConnectionClosed,

    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LinkError>;
