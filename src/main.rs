mod domain;
mod infrastructure;
mod presentation;

use eframe::egui;

fn main() -> Result<(), eframe::Error> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([400.0, 720.0])
            .with_min_inner_size([360.0, 560.0])
            .with_title("Smart Rover Control"),
        ..Default::default()
    };

    eframe::run_native(
        "Smart Rover Control",
        options,
        Box::new(|cc| Ok(Box::new(presentation::app::RoverApp::new(cc)))),
    )
}
