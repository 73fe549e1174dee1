use figurine_core::consts::HANDLE_HIT_TOLERANCE;
use figurine_core::crop::{CropEvent, CropHandle, CropRect, FittedImageBox, PixelRegion};
use figurine_core::geometry::{Point, Size};

use crate::app::FigurineApp;
use crate::panels::helpers::handle_cursor;

const HANDLE_SIZE: f32 = 8.0;

/// Panel-local coordinates: the cropper works relative to the panel's
/// top-left corner.
fn to_local(pos: egui::Pos2, origin: egui::Pos2) -> Point {
    Point::new(pos.x - origin.x, pos.y - origin.y)
}

fn to_screen_rect(x: f32, y: f32, w: f32, h: f32, origin: egui::Pos2) -> egui::Rect {
    egui::Rect::from_min_size(origin + egui::vec2(x, y), egui::vec2(w, h))
}

fn crop_to_screen(c: &CropRect, origin: egui::Pos2) -> egui::Rect {
    to_screen_rect(c.x, c.y, c.width, c.height, origin)
}

fn fitted_to_screen(f: &FittedImageBox, origin: egui::Pos2) -> egui::Rect {
    to_screen_rect(f.left, f.top, f.width, f.height, origin)
}

/// Crop mode: draw the fitted image with its overlay and route pointer
/// input to the cropper.
pub fn show(
    ctx: &egui::Context,
    ui: &egui::Ui,
    response: &egui::Response,
    app: &mut FigurineApp,
    texture_id: egui::TextureId,
) {
    let panel = response.rect;
    let origin = panel.min;
    app.crop
        .sync_container(Size::new(panel.width(), panel.height()));

    handle_crop_drag(response, ui, app, origin);
    update_crop_cursor(ctx, response, ui, app, origin);

    let state = app.crop.cropper.state();
    let Some(fitted) = state.fitted else {
        return;
    };
    let img_rect = fitted_to_screen(&fitted, origin);
    ui.painter().image(
        texture_id,
        img_rect,
        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
        egui::Color32::WHITE,
    );

    if let (Some(rect), Some(region)) = (state.rect, app.crop.selection()) {
        draw_crop_overlay(ui, &rect, img_rect, origin, region);
    }
}

fn handle_crop_drag(
    response: &egui::Response,
    ui: &egui::Ui,
    app: &mut FigurineApp,
    origin: egui::Pos2,
) {
    let cropper = &mut app.crop.cropper;

    if response.drag_started_by(egui::PointerButton::Primary) {
        let press = ui
            .input(|i| i.pointer.press_origin())
            .or(response.interact_pointer_pos());
        if let (Some(pos), Some(rect)) = (press, cropper.rect()) {
            let pointer = to_local(pos, origin);
            if let Some(handle) = CropHandle::hit_test(&rect, pointer, HANDLE_HIT_TOLERANCE) {
                cropper.dispatch(CropEvent::BeginHandleDrag { handle, pointer });
            }
        }
    }

    if response.dragged_by(egui::PointerButton::Primary) && cropper.state().is_dragging() {
        if let Some(pos) = response.interact_pointer_pos() {
            cropper.dispatch(CropEvent::PointerMove(to_local(pos, origin)));
        }
    }

    if response.drag_stopped() && cropper.state().is_dragging() {
        cropper.dispatch(CropEvent::EndHandleDrag);
    }
}

fn update_crop_cursor(
    ctx: &egui::Context,
    response: &egui::Response,
    ui: &egui::Ui,
    app: &FigurineApp,
    origin: egui::Pos2,
) {
    let state = app.crop.cropper.state();
    if let Some(drag) = state.drag {
        ctx.set_cursor_icon(handle_cursor(drag.handle.cursor()));
        return;
    }

    let Some(hover) = ui.input(|i| i.pointer.hover_pos()) else {
        return;
    };
    if !response.rect.contains(hover) {
        return;
    }
    let hit = state
        .rect
        .and_then(|r| CropHandle::hit_test(&r, to_local(hover, origin), HANDLE_HIT_TOLERANCE));
    if let Some(handle) = hit {
        ctx.set_cursor_icon(handle_cursor(handle.cursor()));
    }
}

/// Draw the crop overlay (dim regions + border + handles + dimensions label).
fn draw_crop_overlay(
    ui: &egui::Ui,
    crop: &CropRect,
    img_rect: egui::Rect,
    origin: egui::Pos2,
    region: PixelRegion,
) {
    let crop_screen = crop_to_screen(crop, origin);

    draw_dim_regions(ui, img_rect, crop_screen);
    draw_crop_border(ui, crop_screen);
    draw_handles(ui, crop, origin);
    draw_dimensions_label(ui, region, crop_screen);
}

fn draw_dim_regions(ui: &egui::Ui, img_rect: egui::Rect, crop_screen: egui::Rect) {
    let dim_color = egui::Color32::from_black_alpha(140);
    let painter = ui.painter();

    // Top
    painter.rect_filled(
        egui::Rect::from_min_max(img_rect.left_top(), egui::pos2(img_rect.right(), crop_screen.top())),
        0.0,
        dim_color,
    );
    // Bottom
    painter.rect_filled(
        egui::Rect::from_min_max(egui::pos2(img_rect.left(), crop_screen.bottom()), img_rect.right_bottom()),
        0.0,
        dim_color,
    );
    // Left (between top and bottom)
    painter.rect_filled(
        egui::Rect::from_min_max(
            egui::pos2(img_rect.left(), crop_screen.top()),
            egui::pos2(crop_screen.left(), crop_screen.bottom()),
        ),
        0.0,
        dim_color,
    );
    // Right (between top and bottom)
    painter.rect_filled(
        egui::Rect::from_min_max(
            egui::pos2(crop_screen.right(), crop_screen.top()),
            egui::pos2(img_rect.right(), crop_screen.bottom()),
        ),
        0.0,
        dim_color,
    );
}

fn draw_crop_border(ui: &egui::Ui, crop_screen: egui::Rect) {
    let border_color = egui::Color32::from_rgb(255, 255, 0);
    ui.painter().rect_stroke(
        crop_screen,
        0.0,
        egui::Stroke::new(1.5, border_color),
        egui::epaint::StrokeKind::Outside,
    );
}

fn draw_handles(ui: &egui::Ui, crop: &CropRect, origin: egui::Pos2) {
    let painter = ui.painter();
    for handle in CropHandle::ALL.iter().filter(|h| **h != CropHandle::Move) {
        let p = handle.position(crop);
        let square = egui::Rect::from_center_size(
            origin + egui::vec2(p.x, p.y),
            egui::vec2(HANDLE_SIZE, HANDLE_SIZE),
        );
        painter.rect_filled(square, 1.0, egui::Color32::WHITE);
        painter.rect_stroke(
            square,
            1.0,
            egui::Stroke::new(1.0, egui::Color32::from_gray(40)),
            egui::epaint::StrokeKind::Inside,
        );
    }
}

fn draw_dimensions_label(ui: &egui::Ui, region: PixelRegion, crop_screen: egui::Rect) {
    let border_color = egui::Color32::from_rgb(255, 255, 0);
    let label = format!("{}x{}", region.width, region.height);
    let label_pos = egui::pos2(crop_screen.right() - 4.0, crop_screen.bottom() + 4.0);
    ui.painter().text(
        label_pos,
        egui::Align2::RIGHT_TOP,
        label,
        egui::FontId::proportional(12.0),
        border_color,
    );
}
