//! Modes the firmware does not drive yet: static description only

use crate::domain::models::Screen;
use crate::presentation::components::Components;
use eframe::egui;

pub fn render(screen: Screen, ui: &mut egui::Ui) {
    Components::heading(ui, screen.title());
    ui.add_space(20.0);

    if let Some(text) = screen.placeholder_text() {
        ui.label(egui::RichText::new(text).size(16.0));
    }
}
