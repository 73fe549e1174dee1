use image::{imageops::FilterType, DynamicImage, GenericImageView};

/// Convert a decoded image to an egui ColorImage, downscaling so neither side
/// exceeds `max_side` (the GPU texture limit). Crop geometry keeps using the
/// source's natural size, so this only affects what is drawn.
pub fn image_to_color_image(image: &DynamicImage, max_side: u32) -> egui::ColorImage {
    let (w, h) = image.dimensions();
    let rgba = if w.max(h) > max_side {
        image.resize(max_side, max_side, FilterType::Triangle).to_rgba8()
    } else {
        image.to_rgba8()
    };

    let size = [rgba.width() as usize, rgba.height() as usize];
    egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw())
}
