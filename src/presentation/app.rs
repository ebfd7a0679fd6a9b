use crate::domain::command_log::CommandLog;
use crate::domain::commands::RoverCommand;
use crate::domain::models::{Alert, AppEvent, BluetoothCommand, ConnectionStatus, Navigator, Screen};
use crate::domain::settings::{Settings, SettingsService};
use crate::infrastructure::bluetooth::transport::SerialTransport;
use crate::infrastructure::bluetooth::{self, BluetoothService};
use eframe::egui;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

pub struct RoverApp {
    pub(crate) settings: Arc<Mutex<SettingsService>>,

    // Bluetooth worker
    pub(crate) bluetooth: BluetoothWorker,
    pub(crate) event_rx: mpsc::UnboundedReceiver<AppEvent>,

    // State
    pub(crate) navigator: Navigator,
    pub(crate) connection_status: ConnectionStatus,
    pub(crate) connected_device: Option<String>,
    pub(crate) devices: Vec<String>,
    pub(crate) selected_device: Option<String>,
    pub(crate) command_log: CommandLog,
    /// Popups waiting to be acknowledged, oldest first
    pub(crate) alerts: VecDeque<Alert>,

    // UI Options
    pub(crate) is_dark_mode: bool,

    pub(crate) _logging_guard: Option<crate::infrastructure::logging::LoggingGuard>,
}

impl RoverApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let settings_service = SettingsService::new().unwrap_or_else(|e| {
            eprintln!("Failed to load settings, using defaults: {}", e);
            SettingsService::in_memory(Settings::default())
        });

        let logging_guard =
            crate::infrastructure::logging::init_logger(&settings_service.get().log_settings)
                .map_err(|e| eprintln!("Failed to initialize logging: {}", e))
                .ok();

        tracing::info!("Starting Rover Remote");

        let is_dark_mode = settings_service.get().dark_mode;
        crate::presentation::theme::configure_theme(&cc.egui_ctx, is_dark_mode);

        let simulate = settings_service.get().simulate_hardware;
        let last_device = settings_service.get().last_device.clone();
        let settings = Arc::new(Mutex::new(settings_service));
        let (bluetooth, event_rx) =
            BluetoothWorker::spawn(settings.clone(), move || bluetooth::platform_transport(simulate));

        Self {
            settings,
            bluetooth,
            event_rx,
            navigator: Navigator::default(),
            connection_status: ConnectionStatus::Disconnected,
            connected_device: None,
            devices: last_device.iter().cloned().collect(),
            selected_device: last_device,
            command_log: CommandLog::default(),
            alerts: VecDeque::new(),
            is_dark_mode,
            _logging_guard: logging_guard,
        }
    }

    pub(crate) fn request(&self, cmd: BluetoothCommand) {
        if !self.bluetooth.request(cmd) {
            error!("Bluetooth worker is gone");
        }
    }

    pub(crate) fn connect(&mut self) {
        let Some(device) = self.selected_device.clone() else {
            self.show_message(Alert::new("No Device", "Please select a device first!"));
            return;
        };
        if !self.connection_status.can_connect() {
            return;
        }
        self.connection_status = ConnectionStatus::Connecting;
        self.connected_device = Some(device.clone());
        self.request(BluetoothCommand::Connect(device));
    }

    pub(crate) fn disconnect(&mut self) {
        if self.connection_status.can_disconnect() {
            self.request(BluetoothCommand::Disconnect);
        }
    }

    pub(crate) fn send_command(&mut self, command: RoverCommand) {
        if self.connection_status != ConnectionStatus::Connected {
            self.show_message(Alert::new("Not Connected", "Please connect to HC-05 first!"));
            return;
        }
        self.request(BluetoothCommand::Send(command));
    }

    fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::DevicesFound(names) => {
                if let Some(selected) = &self.selected_device {
                    if !names.contains(selected) {
                        self.selected_device = None;
                    }
                }
                self.devices = names;
            }
            AppEvent::ConnectionStatus(status) => {
                self.connection_status = status;
                if status == ConnectionStatus::Disconnected {
                    self.connected_device = None;
                }
            }
            AppEvent::Log(message) => self.command_log.push(message),
            AppEvent::Alert(alert) => self.show_message(alert),
        }
    }

    fn toggle_theme(&mut self, ctx: &egui::Context) {
        self.is_dark_mode = !self.is_dark_mode;
        crate::presentation::theme::configure_theme(ctx, self.is_dark_mode);
        if let Ok(mut settings) = self.settings.lock() {
            settings.get_mut().dark_mode = self.is_dark_mode;
            if let Err(e) = settings.save() {
                warn!("Could not save settings: {}", e);
            }
        }
    }

    fn show_message(&mut self, alert: Alert) {
        self.alerts.push_back(alert);
    }

    fn dismiss_alert(&mut self) {
        self.alerts.pop_front();
    }

    fn show_alert(&mut self, ctx: &egui::Context) {
        let Some(alert) = self.alerts.front() else {
            return;
        };
        let mut dismissed = false;
        egui::Window::new(alert.title.as_str())
            .id(egui::Id::new("alert_popup"))
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(alert.message.as_str());
                ui.add_space(10.0);
                if ui.button("OK").clicked() || ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    dismissed = true;
                }
            });
        if dismissed {
            self.dismiss_alert();
        }
    }
}

/// Handle to the Bluetooth worker thread. Hanging up waits for the worker
/// to close any open link.
pub(crate) struct BluetoothWorker {
    commands: Option<mpsc::UnboundedSender<BluetoothCommand>>,
    thread: Option<JoinHandle<()>>,
}

impl BluetoothWorker {
    /// The worker thread owns the transport; WinRT objects stay on the thread that made them
    fn spawn<F>(
        settings: Arc<Mutex<SettingsService>>,
        make_transport: F,
    ) -> (Self, mpsc::UnboundedReceiver<AppEvent>)
    where
        F: FnOnce() -> Box<dyn SerialTransport> + Send + 'static,
    {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();

        let spawned = std::thread::Builder::new()
            .name("bluetooth".into())
            .spawn(move || {
                let rt = match tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()
                {
                    Ok(rt) => rt,
                    Err(e) => {
                        error!("Failed to create tokio runtime for Bluetooth: {}", e);
                        let _ = event_tx.send(AppEvent::Alert(Alert::new(
                            "Bluetooth Error",
                            format!("Bluetooth worker failed to start:\n{}", e),
                        )));
                        return;
                    }
                };

                rt.block_on(async move {
                    BluetoothService::new(make_transport(), event_tx, settings)
                        .run(cmd_rx)
                        .await;
                });
            });

        let thread = match spawned {
            Ok(handle) => Some(handle),
            Err(e) => {
                error!("Failed to spawn Bluetooth thread: {}", e);
                None
            }
        };

        (
            Self {
                commands: Some(cmd_tx),
                thread,
            },
            event_rx,
        )
    }

    /// False once the worker has stopped
    fn request(&self, cmd: BluetoothCommand) -> bool {
        self.commands
            .as_ref()
            .is_some_and(|tx| tx.send(cmd).is_ok())
    }

    /// Hang up and block until the worker has finished its teardown
    pub(crate) fn shutdown(&mut self) {
        self.commands.take();
        if let Some(thread) = self.thread.take() {
            info!("Waiting for Bluetooth worker to stop");
            if thread.join().is_err() {
                error!("Bluetooth worker panicked");
            }
        }
    }
}

impl Drop for BluetoothWorker {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl eframe::App for RoverApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        while let Ok(event) = self.event_rx.try_recv() {
            self.handle_event(event);
        }

        if self.connection_status == ConnectionStatus::Connecting {
            ctx.request_repaint();
        } else {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                if self.navigator.current() != Screen::ModeSelection && ui.button("← Back").clicked() {
                    self.navigator.back();
                }
                ui.label(egui::RichText::new(self.navigator.current().title()).strong());

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let switch_icon = if self.is_dark_mode {
                        "☀ Light"
                    } else {
                        "🌙 Dark"
                    };
                    if ui.button(switch_icon).clicked() {
                        self.toggle_theme(ctx);
                    }
                });
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.set_max_width(480.0);
                    ui.add_space(20.0);

                    use crate::presentation::screens;
                    match self.navigator.current() {
                        Screen::ModeSelection => screens::mode_selection::render(self, ui),
                        Screen::RoverControl => screens::rover_control::render(self, ui),
                        screen => screens::placeholder::render(screen, ui),
                    }

                    ui.add_space(50.0);
                });
            });
        });

        self.show_alert(ctx);
    }
}

impl Drop for RoverApp {
    // Runs before the logging guard is released so the worker's teardown reaches the log file
    fn drop(&mut self) {
        self.bluetooth.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::bluetooth::simulated::{SimulatedTransport, SIMULATED_DEVICES};

    fn settings() -> Arc<Mutex<SettingsService>> {
        Arc::new(Mutex::new(SettingsService::in_memory(Settings::default())))
    }

    fn app() -> (
        RoverApp,
        mpsc::UnboundedReceiver<BluetoothCommand>,
        mpsc::UnboundedSender<AppEvent>,
    ) {
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let app = RoverApp {
            settings: settings(),
            bluetooth: BluetoothWorker {
                commands: Some(cmd_tx),
                thread: None,
            },
            event_rx,
            navigator: Navigator::default(),
            connection_status: ConnectionStatus::Disconnected,
            connected_device: None,
            devices: Vec::new(),
            selected_device: None,
            command_log: CommandLog::default(),
            alerts: VecDeque::new(),
            is_dark_mode: false,
            _logging_guard: None,
        };
        (app, cmd_rx, event_tx)
    }

    #[test]
    fn test_connect_without_selection_alerts() {
        let (mut app, mut cmd_rx, _events) = app();

        app.connect();
        assert_eq!(app.alerts.front().map(|a| a.title.as_str()), Some("No Device"));
        assert_eq!(app.connection_status, ConnectionStatus::Disconnected);
        assert!(cmd_rx.try_recv().is_err());
    }

    #[test]
    fn test_connect_marks_connecting() {
        let (mut app, mut cmd_rx, _events) = app();
        app.selected_device = Some("HC-05".into());

        app.connect();
        assert_eq!(app.connection_status, ConnectionStatus::Connecting);
        assert_eq!(app.connected_device.as_deref(), Some("HC-05"));
        assert_eq!(
            cmd_rx.try_recv().unwrap(),
            BluetoothCommand::Connect("HC-05".into())
        );

        // A second click while in flight does nothing
        app.connect();
        assert!(cmd_rx.try_recv().is_err());
    }

    #[test]
    fn test_send_while_disconnected_stays_local() {
        let (mut app, mut cmd_rx, _events) = app();

        app.send_command(RoverCommand::Forward);
        assert_eq!(
            app.alerts.front(),
            Some(&Alert::new("Not Connected", "Please connect to HC-05 first!"))
        );
        assert!(cmd_rx.try_recv().is_err());
    }

    #[test]
    fn test_scan_result_drops_stale_selection() {
        let (mut app, _cmd_rx, _events) = app();
        app.selected_device = Some("HC-06".into());

        app.handle_event(AppEvent::DevicesFound(vec!["HC-05".into()]));
        assert_eq!(app.devices, vec!["HC-05"]);
        assert_eq!(app.selected_device, None);

        app.selected_device = Some("HC-05".into());
        app.handle_event(AppEvent::DevicesFound(vec!["HC-05".into(), "HC-06".into()]));
        assert_eq!(app.selected_device.as_deref(), Some("HC-05"));
    }

    #[test]
    fn test_disconnected_status_clears_device() {
        let (mut app, _cmd_rx, _events) = app();
        app.selected_device = Some("HC-05".into());
        app.connect();
        app.handle_event(AppEvent::ConnectionStatus(ConnectionStatus::Connected));
        assert_eq!(app.connected_device.as_deref(), Some("HC-05"));

        app.handle_event(AppEvent::ConnectionStatus(ConnectionStatus::Disconnected));
        assert_eq!(app.connection_status, ConnectionStatus::Disconnected);
        assert_eq!(app.connected_device, None);
    }

    #[test]
    fn test_alerts_are_shown_in_order() {
        let (mut app, _cmd_rx, _events) = app();

        app.handle_event(AppEvent::Alert(Alert::new("Scan Complete", "Found 2 HC-05 devices")));
        app.handle_event(AppEvent::Alert(Alert::new("Connection Error", "refused")));
        assert_eq!(app.alerts.len(), 2);
        assert_eq!(app.alerts.front().map(|a| a.title.as_str()), Some("Scan Complete"));

        app.dismiss_alert();
        assert_eq!(app.alerts.front().map(|a| a.title.as_str()), Some("Connection Error"));
        app.dismiss_alert();
        assert!(app.alerts.is_empty());
    }

    #[test]
    fn test_worker_closes_link_before_shutdown_returns() {
        let (mut worker, mut events) =
            BluetoothWorker::spawn(settings(), || -> Box<dyn SerialTransport> {
                Box::new(SimulatedTransport::new())
            });
        let device = SIMULATED_DEVICES[0];

        assert!(worker.request(BluetoothCommand::Connect(device.into())));
        worker.shutdown();
        assert!(!worker.request(BluetoothCommand::Scan));

        let mut logs = Vec::new();
        while let Ok(event) = events.try_recv() {
            if let AppEvent::Log(message) = event {
                logs.push(message);
            }
        }
        assert_eq!(
            logs,
            vec![
                format!("Connected to {}", device),
                format!("Disconnected from {}", device),
            ]
        );
    }
}
