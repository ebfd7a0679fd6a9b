//! Simulated Transport
//!
//! Used where no native RFCOMM backend exists, or when `simulate_hardware` is
//! set. Reports two paired modules, always connects and traces every write.

use super::error::TransportError;
use super::transport::{BondedDevice, SerialLink, SerialTransport};
use async_trait::async_trait;
use tracing::info;
use uuid::Uuid;

pub const SIMULATED_DEVICES: [&str; 2] = ["HC-05 (Simulated)", "HC-06 (Simulated)"];

#[derive(Debug, Default)]
pub struct SimulatedTransport;

impl SimulatedTransport {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait(?Send)]
impl SerialTransport for SimulatedTransport {
    async fn bonded_devices(&self) -> Result<Vec<BondedDevice>, TransportError> {
        Ok(SIMULATED_DEVICES
            .iter()
            .enumerate()
            .map(|(i, name)| BondedDevice::new(*name, format!("00:00:00:00:00:0{}", i + 1)))
            .collect())
    }

    async fn open(
        &self,
        device: &BondedDevice,
        service: Uuid,
    ) -> Result<Box<dyn SerialLink>, TransportError> {
        info!("[sim] Opening {} on {} ({})", service, device.name, device.id);
        Ok(Box::new(SimulatedLink {
            device: device.name.clone(),
        }))
    }

    fn name(&self) -> &'static str {
        "simulated"
    }
}

struct SimulatedLink {
    device: String,
}

#[async_trait(?Send)]
impl SerialLink for SimulatedLink {
    async fn write_all(&mut self, bytes: &[u8]) -> Result<(), TransportError> {
        info!("[sim] {} <- {:?}", self.device, String::from_utf8_lossy(bytes));
        Ok(())
    }

    async fn close(&mut self) -> Result<(), TransportError> {
        info!("[sim] Closed {}", self.device);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::bluetooth::protocol::spp_uuid;

    #[tokio::test]
    async fn test_simulated_devices_open() {
        let transport = SimulatedTransport::new();
        let devices = transport.bonded_devices().await.unwrap();
        assert_eq!(devices.len(), 2);
        assert_eq!(devices[0].name, "HC-05 (Simulated)");

        let mut link = transport.open(&devices[0], spp_uuid()).await.unwrap();
        link.write_all(b"F\n").await.unwrap();
        link.close().await.unwrap();
    }
}
