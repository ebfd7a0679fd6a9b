//! Bluetooth Service Module
//!
//! Runs UI requests against the rover session and reports every outcome back
//! to the UI as [`AppEvent`]s: log lines, popups and connection status.

use crate::domain::commands::command_label;
use crate::domain::models::{Alert, AppEvent, BluetoothCommand, ConnectionStatus};
use crate::domain::settings::SettingsService;
use crate::infrastructure::bluetooth::error::{DisconnectError, SendError};
use crate::infrastructure::bluetooth::session::RoverSession;
use crate::infrastructure::bluetooth::transport::SerialTransport;
use crate::infrastructure::bluetooth::protocol;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use tracing::{error, info, warn};

pub struct BluetoothService {
    session: RoverSession,
    event_sender: mpsc::UnboundedSender<AppEvent>,
    settings: Arc<Mutex<SettingsService>>,
}

impl BluetoothService {
    pub fn new(
        transport: Box<dyn SerialTransport>,
        event_sender: mpsc::UnboundedSender<AppEvent>,
        settings: Arc<Mutex<SettingsService>>,
    ) -> Self {
        let (service_uuid, filters) = match settings.lock() {
            Ok(s) => (
                protocol::service_uuid_or_spp(&s.get().spp_uuid),
                s.get().device_name_filters.clone(),
            ),
            Err(_) => {
                error!("Settings lock poisoned, using defaults");
                (protocol::spp_uuid(), vec!["HC-05".into(), "HC-06".into()])
            }
        };
        info!("Bluetooth service using {} transport", transport.name());

        Self {
            session: RoverSession::new(transport, service_uuid, filters),
            event_sender,
            settings,
        }
    }

    /// Process requests until the UI side hangs up
    pub async fn run(mut self, mut commands: mpsc::UnboundedReceiver<BluetoothCommand>) {
        while let Some(cmd) = commands.recv().await {
            self.handle(cmd).await;
        }
        if let Some(device) = self.session.connected_device() {
            info!("Closing link to {} on shutdown", device);
            match self.session.disconnect().await {
                Ok(device) => self.log(format!("Disconnected from {}", device)),
                Err(e) => error!("Closing link on shutdown failed: {}", e),
            }
        }
        info!("Bluetooth worker stopped");
    }

    pub async fn handle(&mut self, cmd: BluetoothCommand) {
        match cmd {
            BluetoothCommand::Scan => self.scan().await,
            BluetoothCommand::Connect(name) => self.connect(&name).await,
            BluetoothCommand::Disconnect => self.disconnect().await,
            BluetoothCommand::Send(command) => self.send(command).await,
        }
    }

    async fn scan(&mut self) {
        match self.session.scan().await {
            Ok(names) => {
                let count = names.len();
                self.emit(AppEvent::DevicesFound(names));
                self.alert("Scan Complete", format!("Found {} HC-05 devices", count));
            }
            Err(e) => {
                error!("Scan failed: {}", e);
                self.alert(e.title(), e.to_string());
            }
        }
    }

    async fn connect(&mut self, name: &str) {
        match self.session.connect(name).await {
            Ok(()) => {
                info!("Connected to {}", name);
                if let Ok(mut settings) = self.settings.lock() {
                    if let Err(e) = settings.remember_device(name) {
                        warn!("Could not save last device: {}", e);
                    }
                }
                self.emit(AppEvent::ConnectionStatus(ConnectionStatus::Connected));
                self.log(format!("Connected to {}", name));
            }
            Err(e) => {
                error!("Connection failed: {}", e);
                self.alert(e.title(), e.to_string());
                self.log(format!("Connection failed: {}", e));
                let status = if self.session.is_connected() {
                    ConnectionStatus::Connected
                } else {
                    ConnectionStatus::Disconnected
                };
                self.emit(AppEvent::ConnectionStatus(status));
            }
        }
    }

    async fn send(&mut self, command: crate::domain::commands::RoverCommand) {
        let c = command.as_char();
        match self.session.send(command).await {
            Ok(()) => self.log(format!("Sent: {} ({})", c, command_label(c))),
            Err(e @ SendError::NotConnected) => self.alert(e.title(), e.to_string()),
            Err(e) => {
                error!("Sending {} failed: {}", c, e);
                self.alert(e.title(), e.to_string());
                self.log(format!("Error sending {}: {}", c, e));
            }
        }
    }

    async fn disconnect(&mut self) {
        match self.session.disconnect().await {
            Ok(device) => self.log(format!("Disconnected from {}", device)),
            Err(e @ DisconnectError::NotConnected) => warn!("Disconnect requested while idle: {}", e),
            Err(e) => self.alert(e.title(), e.to_string()),
        }
        self.emit(AppEvent::ConnectionStatus(ConnectionStatus::Disconnected));
    }

    fn log(&self, message: String) {
        self.emit(AppEvent::Log(message));
    }

    fn alert(&self, title: &str, message: String) {
        self.emit(AppEvent::Alert(Alert::new(title, message)));
    }

    fn emit(&self, event: AppEvent) {
        let _ = self.event_sender.send(event);
    }
}
