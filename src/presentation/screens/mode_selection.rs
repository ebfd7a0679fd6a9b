use crate::domain::models::Screen;
use crate::presentation::app::RoverApp;
use crate::presentation::components::Components;
use crate::presentation::theme::RoverPalette;
use eframe::egui;

pub fn render(app: &mut RoverApp, ui: &mut egui::Ui) {
    Components::heading(ui, Screen::ModeSelection.title());
    ui.label(
        egui::RichText::new("8051 Microcontroller - HC-05 Bluetooth")
            .color(RoverPalette::for_ctx(ui.ctx()).muted),
    );
    ui.add_space(20.0);

    for mode in Screen::MODES {
        let (r, g, b) = mode.accent();
        if Components::wide_button(ui, mode.title(), egui::Color32::from_rgb(r, g, b), 80.0, true)
            .clicked()
        {
            app.navigator.go_to(mode);
        }
    }
}
