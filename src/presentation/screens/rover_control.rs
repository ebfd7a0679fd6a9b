use crate::domain::commands::{self, RoverCommand};
use crate::domain::models::{BluetoothCommand, ConnectionStatus};
use crate::presentation::app::RoverApp;
use crate::presentation::components::Components;
use crate::presentation::theme::RoverPalette;
use eframe::egui;

const PAD_BUTTON: egui::Vec2 = egui::vec2(110.0, 80.0);

pub fn render(app: &mut RoverApp, ui: &mut egui::Ui) {
    let palette = RoverPalette::for_ctx(ui.ctx());

    ui_connection_panel(app, ui, &palette);
    ui.add_space(10.0);

    ui.label(egui::RichText::new(commands::instructions()).color(palette.muted));
    ui.add_space(10.0);

    ui_control_pad(app, ui, &palette);
    handle_keyboard(app, ui);
    ui.add_space(15.0);

    Components::card(ui, "Command Log:", |ui| {
        if !app.command_log.is_empty() && ui.small_button("Clear").clicked() {
            app.command_log.clear();
        }
        egui::ScrollArea::vertical()
            .id_salt("command_log")
            .max_height(200.0)
            .stick_to_bottom(true)
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                ui.label(
                    egui::RichText::new(app.command_log.render())
                        .monospace()
                        .color(palette.muted),
                );
            });
    });
}

fn ui_connection_panel(app: &mut RoverApp, ui: &mut egui::Ui, palette: &RoverPalette) {
    Components::card(ui, "Connection", |ui| {
        ui.horizontal(|ui| {
            ui.label("HC-05 Device:");
            let selected_text = app
                .selected_device
                .clone()
                .unwrap_or_else(|| "Select Device".to_string());
            ui.add_enabled_ui(app.connection_status.can_connect(), |ui| {
                egui::ComboBox::from_id_salt("device_picker")
                    .selected_text(selected_text)
                    .width(180.0)
                    .show_ui(ui, |ui| {
                        if app.devices.is_empty() {
                            ui.label("Scan for devices...");
                        }
                        for name in &app.devices {
                            ui.selectable_value(&mut app.selected_device, Some(name.clone()), name.as_str());
                        }
                    });
            });
            if ui
                .add_enabled(app.connection_status.can_connect(), egui::Button::new("🔍"))
                .on_hover_text("List paired HC-05/HC-06 modules")
                .clicked()
            {
                app.request(BluetoothCommand::Scan);
            }
        });

        ui.columns(2, |cols| {
            if Components::wide_button(
                &mut cols[0],
                "Connect",
                palette.go,
                40.0,
                app.connection_status.can_connect(),
            )
            .clicked()
            {
                app.connect();
            }
            if Components::wide_button(
                &mut cols[1],
                "Disconnect",
                palette.stop,
                40.0,
                app.connection_status.can_disconnect(),
            )
            .clicked()
            {
                app.disconnect();
            }
        });

        let (text, color) = match (app.connection_status, &app.connected_device) {
            (ConnectionStatus::Connected, Some(device)) => {
                (format!("Status: Connected to {}", device), palette.go)
            }
            (ConnectionStatus::Connected, None) => ("Status: Connected".to_string(), palette.go),
            (ConnectionStatus::Connecting, _) => ("Status: Connecting...".to_string(), palette.hover),
            (ConnectionStatus::Disconnected, _) => ("Status: Disconnected".to_string(), palette.stop),
        };
        ui.horizontal(|ui| {
            Components::status_line(ui, &text, color);
            if app.connection_status == ConnectionStatus::Connecting {
                ui.spinner();
            }
        });
    });
}

fn pad_button(
    app: &mut RoverApp,
    ui: &mut egui::Ui,
    command: RoverCommand,
    arrow: &str,
    fill: egui::Color32,
) {
    let text = format!(
        "{}\n{}\n({})",
        arrow,
        command.label().to_uppercase(),
        command.as_char()
    );
    let button = egui::Button::new(egui::RichText::new(text).color(egui::Color32::WHITE).strong())
        .fill(fill);
    if ui.add_sized(PAD_BUTTON, button).clicked() {
        app.send_command(command);
    }
}

fn ui_control_pad(app: &mut RoverApp, ui: &mut egui::Ui, palette: &RoverPalette) {
    egui::Grid::new("control_pad")
        .spacing([15.0, 15.0])
        .show(ui, |ui| {
            ui.allocate_space(PAD_BUTTON);
            pad_button(app, ui, RoverCommand::Forward, "↑", palette.drive);
            ui.allocate_space(PAD_BUTTON);
            ui.end_row();

            pad_button(app, ui, RoverCommand::Left, "←", palette.drive);
            pad_button(app, ui, RoverCommand::Stop, "⏹", palette.stop);
            pad_button(app, ui, RoverCommand::Right, "→", palette.drive);
            ui.end_row();

            ui.allocate_space(PAD_BUTTON);
            pad_button(app, ui, RoverCommand::Backward, "↓", palette.drive);
            ui.allocate_space(PAD_BUTTON);
            ui.end_row();
        });
}

/// Arrow keys or the command letters drive the rover; Space stops it
fn handle_keyboard(app: &mut RoverApp, ui: &mut egui::Ui) {
    if !app.alerts.is_empty() || ui.ctx().wants_keyboard_input() {
        return;
    }

    let pressed: Vec<RoverCommand> = ui.input(|i| {
        i.events
            .iter()
            .filter_map(|event| match event {
                egui::Event::Key {
                    key,
                    pressed: true,
                    repeat: false,
                    ..
                } => key_command(*key),
                _ => None,
            })
            .collect()
    });

    for command in pressed {
        app.send_command(command);
    }
}

fn key_command(key: egui::Key) -> Option<RoverCommand> {
    match key {
        egui::Key::ArrowUp | egui::Key::F => Some(RoverCommand::Forward),
        egui::Key::ArrowLeft | egui::Key::L => Some(RoverCommand::Left),
        egui::Key::ArrowRight | egui::Key::R => Some(RoverCommand::Right),
        egui::Key::ArrowDown | egui::Key::B => Some(RoverCommand::Backward),
        egui::Key::Space | egui::Key::S => Some(RoverCommand::Stop),
        _ => None,
    }
}
