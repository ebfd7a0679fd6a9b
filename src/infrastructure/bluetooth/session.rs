//! Rover Session
//!
//! Owns the transport and at most one open serial link. The session is
//! connected exactly when it holds a link, so the flag and the socket can
//! never disagree.

use super::discovery::{filter_rover_modules, resolve_device};
use super::error::{ConnectError, DisconnectError, ScanError, SendError};
use super::transport::{SerialLink, SerialTransport};
use crate::domain::commands::RoverCommand;
use tracing::{debug, info, warn};
use uuid::Uuid;

struct OpenLink {
    device: String,
    link: Box<dyn SerialLink>,
}

pub struct RoverSession {
    transport: Box<dyn SerialTransport>,
    service: Uuid,
    name_filters: Vec<String>,
    open: Option<OpenLink>,
}

impl RoverSession {
    pub fn new(transport: Box<dyn SerialTransport>, service: Uuid, name_filters: Vec<String>) -> Self {
        Self {
            transport,
            service,
            name_filters,
            open: None,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.open.is_some()
    }

    pub fn connected_device(&self) -> Option<&str> {
        self.open.as_ref().map(|o| o.device.as_str())
    }

    pub fn can_connect(&self) -> bool {
        !self.is_connected()
    }

    pub fn can_disconnect(&self) -> bool {
        self.is_connected()
    }

    /// Names of bonded devices that match the module filters
    pub async fn scan(&self) -> Result<Vec<String>, ScanError> {
        let devices = self.transport.bonded_devices().await?;
        debug!("{} bonded devices reported by {}", devices.len(), self.transport.name());

        let names: Vec<String> = filter_rover_modules(&devices, &self.name_filters)
            .into_iter()
            .map(|d| d.name.clone())
            .collect();
        info!("Found {} rover modules", names.len());
        Ok(names)
    }

    /// Resolve `name` against the bonded list and open the serial service on it
    pub async fn connect(&mut self, name: &str) -> Result<(), ConnectError> {
        if let Some(open) = &self.open {
            return Err(ConnectError::AlreadyConnected(open.device.clone()));
        }

        let devices = self.transport.bonded_devices().await?;
        let device = resolve_device(&devices, name)
            .ok_or_else(|| ConnectError::DeviceNotFound(name.to_string()))?;

        info!("Opening RFCOMM channel to {} ({})", device.name, device.id);
        let link = self.transport.open(device, self.service).await?;

        self.open = Some(OpenLink {
            device: device.name.clone(),
            link,
        });
        Ok(())
    }

    /// Write one command. Nothing is read back.
    pub async fn send(&mut self, command: RoverCommand) -> Result<(), SendError> {
        let open = self.open.as_mut().ok_or(SendError::NotConnected)?;
        open.link.write_all(&command.wire_bytes()).await?;
        debug!("Sent {} to {}", command, open.device);
        Ok(())
    }

    /// Close the link. The session is disconnected afterwards even if the
    /// close itself failed. Returns the name of the device that was closed.
    pub async fn disconnect(&mut self) -> Result<String, DisconnectError> {
        let mut open = self.open.take().ok_or(DisconnectError::NotConnected)?;
        if let Err(e) = open.link.close().await {
            warn!("Closing link to {} failed: {}", open.device, e);
            return Err(e.into());
        }
        info!("Disconnected from {}", open.device);
        Ok(open.device)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::bluetooth::fake::{FakeFailure, FakeTransport};
    use crate::infrastructure::bluetooth::protocol::spp_uuid;

    fn session(fake: &FakeTransport) -> RoverSession {
        RoverSession::new(
            Box::new(fake.clone()),
            spp_uuid(),
            vec!["HC-05".to_string(), "HC-06".to_string()],
        )
    }

    #[tokio::test]
    async fn test_scan_filters_bonded_devices() {
        let fake = FakeTransport::with_devices(&["HC-05", "Speaker", "HC-06", "Phone"]);
        let names = session(&fake).scan().await.unwrap();
        assert_eq!(names, vec!["HC-05", "HC-06"]);
    }

    #[tokio::test]
    async fn test_scan_with_adapter_off() {
        let fake = FakeTransport::with_devices(&["HC-05"]);
        fake.fail(FakeFailure::AdapterOff);
        let err = session(&fake).scan().await.unwrap_err();
        assert!(matches!(err, ScanError::AdapterUnavailable(_)));
    }

    #[tokio::test]
    async fn test_connect_disconnect_toggles_availability() {
        let fake = FakeTransport::with_devices(&["HC-05"]);
        let mut session = session(&fake);
        assert!(session.can_connect());
        assert!(!session.can_disconnect());

        session.connect("HC-05").await.unwrap();
        assert!(!session.can_connect());
        assert!(session.can_disconnect());
        assert_eq!(session.connected_device(), Some("HC-05"));

        let closed = session.disconnect().await.unwrap();
        assert_eq!(closed, "HC-05");
        assert!(session.can_connect());
        assert!(!session.can_disconnect());
        assert_eq!(fake.closes(), 1);
    }

    #[tokio::test]
    async fn test_connect_twice_is_rejected() {
        let fake = FakeTransport::with_devices(&["HC-05", "HC-06"]);
        let mut session = session(&fake);
        session.connect("HC-05").await.unwrap();

        let err = session.connect("HC-06").await.unwrap_err();
        assert!(matches!(err, ConnectError::AlreadyConnected(ref d) if d == "HC-05"));
        assert_eq!(fake.opens(), 1);
    }

    #[tokio::test]
    async fn test_connect_unknown_device() {
        let fake = FakeTransport::with_devices(&["HC-05"]);
        let mut session = session(&fake);
        let err = session.connect("HC-06").await.unwrap_err();
        assert!(matches!(err, ConnectError::DeviceNotFound(ref d) if d == "HC-06"));
        assert!(!session.is_connected());
        assert_eq!(fake.opens(), 0);
    }

    #[tokio::test]
    async fn test_failed_open_leaves_session_disconnected() {
        let fake = FakeTransport::with_devices(&["HC-05"]);
        fake.fail(FakeFailure::Open);
        let mut session = session(&fake);

        let err = session.connect("HC-05").await.unwrap_err();
        assert!(matches!(err, ConnectError::Io(_)));
        assert!(!session.is_connected());
        assert!(session.can_connect());
    }

    #[tokio::test]
    async fn test_send_without_connect_never_writes() {
        let fake = FakeTransport::with_devices(&["HC-05"]);
        let mut session = session(&fake);

        for command in RoverCommand::ALL {
            let err = session.send(command).await.unwrap_err();
            assert!(matches!(err, SendError::NotConnected));
        }
        assert!(fake.writes().is_empty());
    }

    #[tokio::test]
    async fn test_send_writes_command_and_newline() {
        let fake = FakeTransport::with_devices(&["HC-05"]);
        let mut session = session(&fake);
        session.connect("HC-05").await.unwrap();

        session.send(RoverCommand::Forward).await.unwrap();
        session.send(RoverCommand::Stop).await.unwrap();
        assert_eq!(fake.writes(), vec![b"F\n".to_vec(), b"S\n".to_vec()]);
    }

    #[tokio::test]
    async fn test_failed_write_keeps_link() {
        let fake = FakeTransport::with_devices(&["HC-05"]);
        let mut session = session(&fake);
        session.connect("HC-05").await.unwrap();
        fake.fail(FakeFailure::Write);

        let err = session.send(RoverCommand::Left).await.unwrap_err();
        assert!(matches!(err, SendError::Io(_)));
        assert!(session.is_connected());
    }

    #[tokio::test]
    async fn test_failed_close_still_disconnects() {
        let fake = FakeTransport::with_devices(&["HC-05"]);
        let mut session = session(&fake);
        session.connect("HC-05").await.unwrap();
        fake.fail(FakeFailure::Close);

        let err = session.disconnect().await.unwrap_err();
        assert!(matches!(err, DisconnectError::Io(_)));
        assert!(!session.is_connected());
        assert!(session.can_connect());
    }

    #[tokio::test]
    async fn test_disconnect_when_idle() {
        let fake = FakeTransport::with_devices(&[]);
        let mut session = session(&fake);
        let err = session.disconnect().await.unwrap_err();
        assert!(matches!(err, DisconnectError::NotConnected));
    }
}
