use crate::app::FigurineApp;

pub fn show(ctx: &egui::Context, app: &mut FigurineApp) {
    egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
        ui.add_space(2.0);

        // Log area, fixed at 4 lines and scrollable.
        let line_height = ui.text_style_height(&egui::TextStyle::Body);
        let spacing = ui.spacing().item_spacing.y;
        let log_height = line_height * 4.0 + spacing * 3.0;

        egui::ScrollArea::vertical()
            .max_height(log_height)
            .min_scrolled_height(log_height)
            .stick_to_bottom(true)
            .show(ui, |ui| {
                if app.ui_state.log_messages.is_empty() {
                    // Reserve space for 4 empty lines to prevent layout jump.
                    for _ in 0..4 {
                        ui.label("");
                    }
                } else {
                    for msg in &app.ui_state.log_messages {
                        ui.label(msg);
                    }
                }
            });

        // Status line
        ui.horizontal(|ui| {
            if let Some([w, h]) = app.preview.image_size {
                ui.label(format!("{w}x{h}"));
                ui.separator();
            }
            let transform = app.preview.viewport.transform();
            ui.label(format!("Zoom: {:.0}%", transform.scale * 100.0));
            ui.separator();
            ui.label(format!("Rotation: {}\u{b0}", transform.rotate));
            ui.separator();
            ui.label(format!("Mode: {}", app.ui_state.mode));
            if app.preview.viewport.state().loading {
                ui.separator();
                ui.spinner();
            }
        });

        ui.add_space(2.0);
    });
}
