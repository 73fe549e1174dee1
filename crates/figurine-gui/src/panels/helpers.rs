/// Show a ComboBox for enum selection. Returns `true` if the value changed.
pub(crate) fn enum_combo<T: PartialEq + Copy + ToString>(
    ui: &mut egui::Ui,
    label: &str,
    current: &mut T,
    options: &[T],
) -> bool {
    let resp = egui::ComboBox::from_label(label)
        .selected_text(current.to_string())
        .show_ui(ui, |ui| {
            let mut changed = false;
            for &choice in options {
                if ui
                    .selectable_value(current, choice, choice.to_string())
                    .changed()
                {
                    changed = true;
                }
            }
            changed
        });
    resp.inner == Some(true)
}

pub(crate) fn section_header(ui: &mut egui::Ui, label: &str, status: Option<&str>) {
    egui::Frame::NONE.inner_margin(4.0).show(ui, |ui| {
        ui.horizontal(|ui| {
            ui.strong(label);
            if let Some(s) = status {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.small(s);
                });
            }
        });
    });
}

/// Map a core cursor hint onto egui's cursor icons.
pub(crate) fn viewport_cursor(hint: figurine_core::viewport::CursorHint) -> Option<egui::CursorIcon> {
    use figurine_core::viewport::CursorHint;
    match hint {
        CursorHint::Default => None,
        CursorHint::Grab => Some(egui::CursorIcon::Grab),
        CursorHint::Grabbing => Some(egui::CursorIcon::Grabbing),
    }
}

pub(crate) fn handle_cursor(cursor: figurine_core::crop::HandleCursor) -> egui::CursorIcon {
    use figurine_core::crop::HandleCursor;
    match cursor {
        HandleCursor::Move => egui::CursorIcon::Move,
        HandleCursor::ResizeVertical => egui::CursorIcon::ResizeVertical,
        HandleCursor::ResizeHorizontal => egui::CursorIcon::ResizeHorizontal,
        HandleCursor::ResizeNwSe => egui::CursorIcon::ResizeNwSe,
        HandleCursor::ResizeNeSw => egui::CursorIcon::ResizeNeSw,
    }
}
