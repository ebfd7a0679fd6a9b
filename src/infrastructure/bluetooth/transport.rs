//! Transport seam between the session and the platform Bluetooth stack

use super::error::TransportError;
use async_trait::async_trait;
use uuid::Uuid;

/// A device paired at the OS level
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BondedDevice {
    /// Display name, e.g. "HC-05"
    pub name: String,
    /// Platform handle used to open the device (device id, address, ...)
    pub id: String,
}

impl BondedDevice {
    pub fn new(name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
        }
    }
}

/// Platform Bluetooth access: list bonded devices and open serial links.
///
/// Implementations are created on, and stay on, the Bluetooth worker thread.
#[async_trait(?Send)]
pub trait SerialTransport {
    /// Devices already bonded with this host. No live discovery.
    async fn bonded_devices(&self) -> Result<Vec<BondedDevice>, TransportError>;

    /// Open an RFCOMM channel to `service` on `device`
    async fn open(
        &self,
        device: &BondedDevice,
        service: Uuid,
    ) -> Result<Box<dyn SerialLink>, TransportError>;

    fn name(&self) -> &'static str;
}

/// An open serial channel
#[async_trait(?Send)]
pub trait SerialLink {
    /// Write the whole buffer and flush
    async fn write_all(&mut self, bytes: &[u8]) -> Result<(), TransportError>;

    async fn close(&mut self) -> Result<(), TransportError>;
}
