use figurine_core::crop::compute_fitted_box;
use figurine_core::geometry::{Point, Size};
use figurine_core::viewport::{TransformDescriptor, ViewportEvent};

use crate::app::FigurineApp;
use crate::panels::crop_interaction;
use crate::panels::helpers::viewport_cursor;
use crate::states::{EditorMode, PreviewState};

pub fn show(ctx: &egui::Context, app: &mut FigurineApp) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let rect = ui.available_rect_before_wrap();
        paint_background(ui, rect);

        let texture_id = app.preview.texture.as_ref().map(|t| t.id());
        let (Some(texture_id), Some([w, h])) = (texture_id, app.preview.image_size) else {
            show_placeholder(ui, app.preview.viewport.state().loading);
            return;
        };
        let natural = Size::from((w, h));
        let response = ui.allocate_rect(rect, egui::Sense::click_and_drag());

        match app.ui_state.mode {
            EditorMode::View => {
                handle_view_input(ui, &response, &mut app.preview);
                draw_transformed_image(
                    ui,
                    texture_id,
                    rect,
                    natural,
                    &app.preview.viewport.transform(),
                );
                if response.hovered() {
                    if let Some(icon) = viewport_cursor(app.preview.viewport.cursor()) {
                        ctx.set_cursor_icon(icon);
                    }
                }
            }
            EditorMode::Crop => {
                crop_interaction::show(ctx, ui, &response, app, texture_id);
            }
        }

        draw_viewing_label(ui, rect, &app.preview.viewing_label);
    });
}

fn paint_background(ui: &egui::Ui, rect: egui::Rect) {
    ui.painter()
        .rect_filled(rect, 0.0, egui::Color32::from_gray(30));
}

fn to_point(pos: egui::Pos2) -> Point {
    Point::new(pos.x, pos.y)
}

/// Translate wheel, pointer and touch input into viewport events.
fn handle_view_input(ui: &egui::Ui, response: &egui::Response, preview: &mut PreviewState) {
    if response.hovered() {
        let scroll = ui.input(|i| i.raw_scroll_delta.y);
        if scroll != 0.0 {
            // egui reports scrolling away from the user as positive.
            preview
                .viewport
                .dispatch(ViewportEvent::Wheel { delta_y: -scroll });
        }
    }

    if handle_touches(ui, response.rect, preview) {
        return;
    }

    if response.drag_started_by(egui::PointerButton::Primary) {
        let origin = ui
            .input(|i| i.pointer.press_origin())
            .or(response.interact_pointer_pos());
        if let Some(pos) = origin {
            preview
                .viewport
                .dispatch(ViewportEvent::DragStart(to_point(pos)));
        }
    }
    if response.dragged_by(egui::PointerButton::Primary) {
        if let Some(pos) = response.interact_pointer_pos() {
            preview
                .viewport
                .dispatch(ViewportEvent::DragMove(to_point(pos)));
        }
    }
    if response.drag_stopped_by(egui::PointerButton::Primary) {
        preview.viewport.dispatch(ViewportEvent::DragEnd);
    }

    if response.double_clicked() {
        preview.viewport.dispatch(ViewportEvent::Reset);
    }
}

/// Track raw touch contacts and forward them. Returns `true` while any
/// contact is down so emulated pointer drags are not applied twice.
fn handle_touches(ui: &egui::Ui, rect: egui::Rect, preview: &mut PreviewState) -> bool {
    let touches: Vec<(egui::TouchId, egui::TouchPhase, egui::Pos2)> = ui.input(|i| {
        i.events
            .iter()
            .filter_map(|e| match e {
                egui::Event::Touch { id, phase, pos, .. } => Some((*id, *phase, *pos)),
                _ => None,
            })
            .collect()
    });

    for (id, phase, pos) in touches {
        match phase {
            egui::TouchPhase::Start if rect.contains(pos) => {
                preview.touches.insert(id, to_point(pos));
                let contacts = preview.contacts();
                preview.viewport.dispatch(ViewportEvent::TouchStart(contacts));
            }
            egui::TouchPhase::Move if preview.touches.contains_key(&id) => {
                preview.touches.insert(id, to_point(pos));
                let contacts = preview.contacts();
                preview.viewport.dispatch(ViewportEvent::TouchMove(contacts));
            }
            egui::TouchPhase::End | egui::TouchPhase::Cancel => {
                if preview.touches.remove(&id).is_some() {
                    let contacts = preview.contacts();
                    preview.viewport.dispatch(ViewportEvent::TouchEnd(contacts));
                }
            }
            _ => {}
        }
    }

    !preview.touches.is_empty()
}

/// Draw the image letterboxed into `rect`, then mapped through the viewport
/// transform around the rect's center.
fn draw_transformed_image(
    ui: &egui::Ui,
    texture_id: egui::TextureId,
    rect: egui::Rect,
    natural: Size,
    transform: &TransformDescriptor,
) {
    let container = Size::new(rect.width(), rect.height());
    let Some(fitted) = compute_fitted_box(container, natural) else {
        return;
    };

    let hw = fitted.width / 2.0;
    let hh = fitted.height / 2.0;
    let corners = [
        (-hw, -hh, 0.0, 0.0),
        (hw, -hh, 1.0, 0.0),
        (hw, hh, 1.0, 1.0),
        (-hw, hh, 0.0, 1.0),
    ];

    let center = rect.center();
    let mut mesh = egui::Mesh::with_texture(texture_id);
    for (x, y, u, v) in corners {
        let p = transform.apply(Point::new(x, y));
        mesh.vertices.push(egui::epaint::Vertex {
            pos: center + egui::vec2(p.x, p.y),
            uv: egui::pos2(u, v),
            color: egui::Color32::WHITE,
        });
    }
    mesh.add_triangle(0, 1, 2);
    mesh.add_triangle(0, 2, 3);

    ui.painter_at(rect).add(egui::Shape::mesh(mesh));
}

fn draw_viewing_label(ui: &egui::Ui, rect: egui::Rect, label: &str) {
    if label.is_empty() {
        return;
    }
    let label_pos = rect.left_top() + egui::vec2(8.0, 8.0);
    ui.painter().text(
        label_pos,
        egui::Align2::LEFT_TOP,
        label,
        egui::FontId::proportional(14.0),
        egui::Color32::from_white_alpha(200),
    );
}

fn show_placeholder(ui: &mut egui::Ui, loading: bool) {
    let text = if loading {
        "Loading..."
    } else {
        "Open an image to begin"
    };
    ui.centered_and_justified(|ui| {
        ui.label(
            egui::RichText::new(text)
                .size(18.0)
                .color(egui::Color32::from_gray(100)),
        );
    });
}
