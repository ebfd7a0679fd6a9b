use eframe::egui;

/// Flat, hard-edged palette. Accents follow the rover's button colours.
pub struct RoverPalette {
    pub bg: egui::Color32,
    pub fg: egui::Color32,
    pub stroke: egui::Color32,
    pub hover: egui::Color32,
    pub go: egui::Color32,
    pub drive: egui::Color32,
    pub stop: egui::Color32,
    pub muted: egui::Color32,
}

impl RoverPalette {
    pub fn new(is_dark: bool) -> Self {
        let shared = |bg, fg, muted| Self {
            bg,
            fg,
            stroke: fg,
            hover: egui::Color32::from_rgb(255, 210, 0),
            go: egui::Color32::from_rgb(26, 179, 26),
            drive: egui::Color32::from_rgb(51, 153, 230),
            stop: egui::Color32::from_rgb(204, 51, 51),
            muted,
        };
        if is_dark {
            shared(
                egui::Color32::from_rgb(25, 25, 25),
                egui::Color32::WHITE,
                egui::Color32::from_gray(150),
            )
        } else {
            shared(
                egui::Color32::from_rgb(245, 245, 245),
                egui::Color32::BLACK,
                egui::Color32::from_gray(100),
            )
        }
    }

    pub fn for_ctx(ctx: &egui::Context) -> Self {
        Self::new(ctx.style().visuals.dark_mode)
    }
}

pub fn configure_theme(ctx: &egui::Context, is_dark: bool) {
    let mut style = (*ctx.style()).clone();
    style.visuals = if is_dark {
        egui::Visuals::dark()
    } else {
        egui::Visuals::light()
    };
    let palette = RoverPalette::new(is_dark);

    style
        .text_styles
        .iter_mut()
        .for_each(|(text_style, font_id)| {
            font_id.size = match text_style {
                egui::TextStyle::Heading => 24.0,
                egui::TextStyle::Body => 15.0,
                egui::TextStyle::Button => 16.0,
                _ => font_id.size,
            };
        });

    // Finger-sized targets
    style.spacing.item_spacing = egui::vec2(12.0, 12.0);
    style.spacing.button_padding = egui::vec2(16.0, 12.0);
    style.spacing.interact_size.y = 40.0;

    let widgets = &mut style.visuals.widgets;
    for (visuals, stroke_width) in [
        (&mut widgets.noninteractive, 2.0),
        (&mut widgets.inactive, 2.0),
        (&mut widgets.hovered, 2.5),
        (&mut widgets.active, 3.0),
    ] {
        visuals.bg_stroke = egui::Stroke::new(stroke_width, palette.stroke);
        visuals.rounding = egui::Rounding::ZERO;
        visuals.fg_stroke = egui::Stroke::new(1.0, palette.fg);
    }
    widgets.noninteractive.bg_fill = palette.bg;
    widgets.inactive.bg_fill = if is_dark {
        egui::Color32::from_gray(30)
    } else {
        egui::Color32::WHITE
    };
    widgets.hovered.bg_fill = palette.hover;
    widgets.hovered.fg_stroke = egui::Stroke::new(1.0, egui::Color32::BLACK);
    widgets.hovered.expansion = 2.0;
    widgets.active.bg_fill = palette.go;
    widgets.active.fg_stroke = egui::Stroke::new(1.0, egui::Color32::BLACK);

    style.visuals.selection.stroke = egui::Stroke::new(1.0, palette.stroke);
    style.visuals.selection.bg_fill = palette.drive;

    style.visuals.window_rounding = egui::Rounding::ZERO;
    style.visuals.window_stroke = egui::Stroke::new(2.0, palette.stroke);
    style.visuals.window_shadow = egui::Shadow {
        offset: egui::vec2(8.0, 8.0),
        blur: 0.0,
        spread: 0.0,
        color: palette.stroke,
    };
    style.visuals.window_fill = palette.bg;
    style.visuals.panel_fill = palette.bg;
    style.visuals.override_text_color = Some(palette.fg);

    ctx.set_style(style);
}
