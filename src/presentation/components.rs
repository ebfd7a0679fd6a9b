use eframe::egui;

pub struct Components;

impl Components {
    pub fn heading(ui: &mut egui::Ui, text: &str) {
        ui.heading(egui::RichText::new(text).strong());
    }

    pub fn card<R>(
        ui: &mut egui::Ui,
        title: &str,
        add_contents: impl FnOnce(&mut egui::Ui) -> R,
    ) -> R {
        let stroke = ui.style().visuals.widgets.noninteractive.bg_stroke;
        let bg = ui.style().visuals.widgets.noninteractive.bg_fill;

        egui::Frame::none()
            .inner_margin(egui::Margin::same(12.0))
            .stroke(stroke)
            .fill(bg)
            .show(ui, |ui| {
                ui.vertical(|ui| {
                    ui.label(egui::RichText::new(title).strong().size(17.0));
                    ui.add_space(6.0);
                    add_contents(ui)
                })
                .inner
            })
            .inner
    }

    /// Full-width coloured button, as used for mode tiles and connect/disconnect
    pub fn wide_button(
        ui: &mut egui::Ui,
        text: &str,
        fill: egui::Color32,
        height: f32,
        enabled: bool,
    ) -> egui::Response {
        ui.add_enabled(
            enabled,
            egui::Button::new(egui::RichText::new(text).color(egui::Color32::WHITE).strong())
                .fill(fill)
                .min_size(egui::vec2(ui.available_width(), height)),
        )
    }

    pub fn status_line(ui: &mut egui::Ui, text: &str, color: egui::Color32) {
        ui.label(egui::RichText::new(text).color(color).size(16.0).strong());
    }
}
