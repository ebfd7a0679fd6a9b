//! Bluetooth error types
//!
//! Transports report [`TransportError`]; each session operation wraps it in
//! its own error so the UI can tell the failure kinds apart.

use std::io;
use thiserror::Error;

/// Failure reported by a platform transport
#[derive(Debug, Error)]
pub enum TransportError {
    /// No adapter, or the radio is switched off
    #[error("Bluetooth adapter unavailable: {0}")]
    AdapterUnavailable(String),

    /// The device exposes no serial port service
    #[error("Serial service not found on {0}")]
    ServiceNotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Please enable Bluetooth first! ({0})")]
    AdapterUnavailable(String),

    #[error("Error scanning devices: {0}")]
    Io(io::Error),
}

#[derive(Debug, Error)]
pub enum ConnectError {
    #[error("Already connected to {0}")]
    AlreadyConnected(String),

    #[error("Please enable Bluetooth first! ({0})")]
    AdapterUnavailable(String),

    #[error("Selected device not found: {0}")]
    DeviceNotFound(String),

    #[error("No serial port service on {0}")]
    ServiceNotFound(String),

    #[error("Failed to connect: {0}")]
    Io(io::Error),
}

#[derive(Debug, Error)]
pub enum SendError {
    #[error("Please connect to HC-05 first!")]
    NotConnected,

    #[error("Failed to send command: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Error)]
pub enum DisconnectError {
    #[error("Not connected")]
    NotConnected,

    #[error("Error disconnecting: {0}")]
    Io(#[from] io::Error),
}

impl From<TransportError> for ScanError {
    fn from(e: TransportError) -> Self {
        match e {
            TransportError::AdapterUnavailable(reason) => Self::AdapterUnavailable(reason),
            TransportError::ServiceNotFound(name) => {
                Self::Io(io::Error::new(io::ErrorKind::NotFound, name))
            }
            TransportError::Io(e) => Self::Io(e),
        }
    }
}

impl From<TransportError> for ConnectError {
    fn from(e: TransportError) -> Self {
        match e {
            TransportError::AdapterUnavailable(reason) => Self::AdapterUnavailable(reason),
            TransportError::ServiceNotFound(name) => Self::ServiceNotFound(name),
            TransportError::Io(e) => Self::Io(e),
        }
    }
}

impl From<TransportError> for SendError {
    fn from(e: TransportError) -> Self {
        Self::Io(into_io(e))
    }
}

impl From<TransportError> for DisconnectError {
    fn from(e: TransportError) -> Self {
        Self::Io(into_io(e))
    }
}

fn into_io(e: TransportError) -> io::Error {
    match e {
        TransportError::Io(e) => e,
        other => io::Error::other(other.to_string()),
    }
}

impl ScanError {
    pub fn title(&self) -> &'static str {
        match self {
            Self::AdapterUnavailable(_) => "Bluetooth Error",
            Self::Io(_) => "Scan Error",
        }
    }
}

impl ConnectError {
    pub fn title(&self) -> &'static str {
        match self {
            Self::AlreadyConnected(_) => "Already Connected",
            Self::AdapterUnavailable(_) => "Bluetooth Error",
            Self::DeviceNotFound(_) => "Device Error",
            Self::ServiceNotFound(_) | Self::Io(_) => "Connection Error",
        }
    }
}

impl SendError {
    pub fn title(&self) -> &'static str {
        match self {
            Self::NotConnected => "Not Connected",
            Self::Io(_) => "Command Error",
        }
    }
}

impl DisconnectError {
    pub fn title(&self) -> &'static str {
        match self {
            Self::NotConnected => "Not Connected",
            Self::Io(_) => "Disconnection Error",
        }
    }
}
