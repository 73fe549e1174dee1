use figurine_core::config::ExportFormat;
use figurine_core::crop::AspectPreset;
use figurine_core::viewport::ViewportEvent;

use crate::app::FigurineApp;
use crate::panels::helpers::{enum_combo, section_header};
use crate::states::EditorMode;

const EXPORT_FORMATS: &[ExportFormat] = &[ExportFormat::Png, ExportFormat::Jpeg];

pub fn show(ctx: &egui::Context, app: &mut FigurineApp) {
    egui::SidePanel::left("controls")
        .resizable(false)
        .default_width(220.0)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.add_space(4.0);
                mode_section(ui, app);
                ui.separator();
                match app.ui_state.mode {
                    EditorMode::View => view_section(ui, app),
                    EditorMode::Crop => crop_section(ui, app),
                }
            });
        });
}

fn mode_section(ui: &mut egui::Ui, app: &mut FigurineApp) {
    section_header(ui, "Mode", None);
    ui.horizontal(|ui| {
        for mode in [EditorMode::View, EditorMode::Crop] {
            ui.selectable_value(&mut app.ui_state.mode, mode, mode.to_string());
        }
    });
}

fn view_section(ui: &mut egui::Ui, app: &mut FigurineApp) {
    let transform = app.preview.viewport.transform();
    let status = format!("{:.0}%", transform.scale * 100.0);
    section_header(ui, "View", Some(&status));
    ui.add_space(4.0);

    let enabled = app.preview.viewport.state().accepts_input();
    let viewport = &mut app.preview.viewport;
    ui.add_enabled_ui(enabled, |ui| {
        ui.horizontal(|ui| {
            if ui.button("Zoom In").clicked() {
                viewport.dispatch(ViewportEvent::ZoomIn);
            }
            if ui.button("Zoom Out").clicked() {
                viewport.dispatch(ViewportEvent::ZoomOut);
            }
        });
        ui.horizontal(|ui| {
            if ui.button("\u{27f2} Rotate Left").clicked() {
                viewport.dispatch(ViewportEvent::RotateCounterClockwise);
            }
            if ui.button("Rotate Right \u{27f3}").clicked() {
                viewport.dispatch(ViewportEvent::RotateClockwise);
            }
        });
        if ui.button("Reset").clicked() {
            viewport.dispatch(ViewportEvent::Reset);
        }
    });

    ui.add_space(4.0);
    ui.small(format!("Rotation: {}\u{b0}", transform.rotate));
    ui.small("Scroll to zoom, drag to pan, double-click to reset");
}

fn crop_section(ui: &mut egui::Ui, app: &mut FigurineApp) {
    section_header(ui, "Crop", None);
    ui.add_space(4.0);

    let enabled = app.source.is_some();
    ui.add_enabled_ui(enabled, |ui| {
        let mut preset = app.crop.preset;
        if enum_combo(ui, "Aspect", &mut preset, AspectPreset::ALL) {
            app.crop.set_preset(preset);
        }
        enum_combo(ui, "Format", &mut app.ui_state.export_format, EXPORT_FORMATS);
    });

    if let Some(region) = app.crop.selection() {
        ui.add_space(4.0);
        ui.small(format!(
            "Selection: {}x{} at ({}, {})",
            region.width, region.height, region.x, region.y
        ));
    }

    ui.add_space(4.0);
    let can_export = enabled && !app.ui_state.is_saving && app.crop.cropper.rect().is_some();
    if ui
        .add_enabled(can_export, egui::Button::new("Export Crop..."))
        .clicked()
    {
        app.export_crop();
    }
}
