//! Windows RFCOMM Transport
//!
//! Paired-device enumeration and Serial Port Profile sockets on WinRT.

use super::error::TransportError;
use super::transport::{BondedDevice, SerialLink, SerialTransport};
use async_trait::async_trait;
use std::io;
use tracing::{debug, info};
use uuid::Uuid;
use windows::core::{Interface, GUID, HSTRING};
use windows::Devices::Bluetooth::Rfcomm::RfcommServiceId;
use windows::Devices::Bluetooth::{BluetoothAdapter, BluetoothDevice};
use windows::Devices::Enumeration::DeviceInformation;
use windows::Devices::Radios::RadioState;
use windows::Networking::Sockets::{SocketProtectionLevel, StreamSocket};
use windows::Storage::Streams::DataWriter;
use windows_future::IAsyncOperation;

impl From<windows::core::Error> for TransportError {
    fn from(e: windows::core::Error) -> Self {
        TransportError::Io(io::Error::other(format!("{} ({:#010X})", e.message(), e.code().0)))
    }
}

#[derive(Debug, Default)]
pub struct RfcommTransport;

impl RfcommTransport {
    pub fn new() -> Self {
        Self
    }

    /// Fails unless a default adapter exists and its radio is on
    async fn ensure_adapter(&self) -> Result<(), TransportError> {
        let adapter = BluetoothAdapter::GetDefaultAsync()?
            .await
            .map_err(|e| TransportError::AdapterUnavailable(e.message().to_string()))?;
        let radio = adapter
            .GetRadioAsync()?
            .await
            .map_err(|e| TransportError::AdapterUnavailable(e.message().to_string()))?;
        let state = radio.State()?;
        if state != RadioState::On {
            return Err(TransportError::AdapterUnavailable(format!(
                "radio state {:?}",
                state
            )));
        }
        Ok(())
    }
}

#[async_trait(?Send)]
impl SerialTransport for RfcommTransport {
    async fn bonded_devices(&self) -> Result<Vec<BondedDevice>, TransportError> {
        self.ensure_adapter().await?;

        let selector = BluetoothDevice::GetDeviceSelectorFromPairingState(true)?;
        let infos = DeviceInformation::FindAllAsyncAqsFilter(&selector)?.await?;

        let mut devices = Vec::with_capacity(infos.Size()? as usize);
        for i in 0..infos.Size()? {
            let info = infos.GetAt(i)?;
            devices.push(BondedDevice::new(
                info.Name()?.to_string(),
                info.Id()?.to_string(),
            ));
        }
        debug!("Paired devices: {:?}", devices);
        Ok(devices)
    }

    async fn open(
        &self,
        device: &BondedDevice,
        service: Uuid,
    ) -> Result<Box<dyn SerialLink>, TransportError> {
        self.ensure_adapter().await?;

        let bt_device = BluetoothDevice::FromIdAsync(&HSTRING::from(device.id.as_str()))?.await?;
        let service_id = RfcommServiceId::FromUuid(GUID::from_u128(service.as_u128()))?;
        let result = bt_device.GetRfcommServicesForIdAsync(&service_id)?.await?;

        let services = result.Services()?;
        if services.Size()? == 0 {
            let _ = bt_device.Close();
            return Err(TransportError::ServiceNotFound(device.name.clone()));
        }
        let rfcomm = services.GetAt(0)?;

        let socket = StreamSocket::new()?;
        socket
            .ConnectWithProtectionLevelAsync(
                &rfcomm.ConnectionHostName()?,
                &rfcomm.ConnectionServiceName()?,
                SocketProtectionLevel::BluetoothEncryptionAllowNullAuthentication,
            )?
            .await?;
        info!("RFCOMM socket connected to {}", device.name);

        let writer = DataWriter::CreateDataWriter(&socket.OutputStream()?)?;
        Ok(Box::new(RfcommLink {
            device: bt_device,
            socket,
            writer,
        }))
    }

    fn name(&self) -> &'static str {
        "rfcomm"
    }
}

struct RfcommLink {
    device: BluetoothDevice,
    socket: StreamSocket,
    writer: DataWriter,
}

#[async_trait(?Send)]
impl SerialLink for RfcommLink {
    async fn write_all(&mut self, bytes: &[u8]) -> Result<(), TransportError> {
        self.writer.WriteBytes(bytes)?;
        let stored = self
            .writer
            .StoreAsync()?
            .cast::<IAsyncOperation<u32>>()?
            .await?;
        if (stored as usize) < bytes.len() {
            return Err(TransportError::Io(io::Error::new(
                io::ErrorKind::WriteZero,
                format!("stored {} of {} bytes", stored, bytes.len()),
            )));
        }
        self.writer.FlushAsync()?.await?;
        Ok(())
    }

    async fn close(&mut self) -> Result<(), TransportError> {
        let _ = self.writer.DetachStream();
        self.socket.Close()?;
        self.device.Close()?;
        Ok(())
    }
}
