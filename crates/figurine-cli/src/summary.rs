use std::path::Path;

use console::Style;
use figurine_core::crop::{AspectPreset, CropRect, FittedImageBox, PixelRegion};
use figurine_core::geometry::Size;
use figurine_core::viewport::{CursorHint, TransformDescriptor};

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    method: Style,
    disabled: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            method: Style::new().green(),
            disabled: Style::new().dim().yellow(),
            path: Style::new().underlined(),
        }
    }

    fn banner(&self, title: &str) {
        println!();
        println!("  {}", self.title.apply_to(title));
        println!("  {}", self.title.apply_to("\u{2550}".repeat(title.chars().count())));
        println!();
    }
}

fn fmt_size(size: Size) -> String {
    format!("{}x{}", size.width, size.height)
}

fn fmt_rect(rect: &CropRect) -> String {
    format!(
        "{:.1}x{:.1} at ({:.1}, {:.1})",
        rect.width, rect.height, rect.x, rect.y
    )
}

fn fmt_fitted(fitted: &FittedImageBox) -> String {
    format!(
        "{:.1}x{:.1} at ({:.1}, {:.1})",
        fitted.width, fitted.height, fitted.left, fitted.top
    )
}

/// Layout of an image inside a container with the default crop applied.
pub struct LayoutReport<'a> {
    pub file: &'a Path,
    pub natural: Size,
    pub container: Size,
    pub aspect: AspectPreset,
    pub fitted: Option<FittedImageBox>,
    pub rect: Option<CropRect>,
}

pub fn print_layout(report: &LayoutReport<'_>) {
    let s = Styles::new();
    s.banner("Figurine Layout");

    println!(
        "  {:<14}{}",
        s.label.apply_to("File"),
        s.path.apply_to(report.file.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Natural"),
        s.value.apply_to(fmt_size(report.natural))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Container"),
        s.value.apply_to(fmt_size(report.container))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Aspect"),
        s.method.apply_to(report.aspect)
    );
    println!();

    println!("  {}", s.header.apply_to("Crop"));
    match (report.fitted, report.rect) {
        (Some(fitted), Some(rect)) => {
            println!(
                "    {:<12}{}",
                s.label.apply_to("Fitted"),
                s.value.apply_to(fmt_fitted(&fitted))
            );
            println!(
                "    {:<12}{}",
                s.label.apply_to("Default"),
                s.value.apply_to(fmt_rect(&rect))
            );
        }
        _ => println!(
            "    {}",
            s.disabled.apply_to("image cannot be fitted into this container")
        ),
    }
    println!();
}

pub struct CropReport<'a> {
    pub steps: usize,
    pub rect: &'a CropRect,
    pub region: PixelRegion,
    pub output: &'a Path,
}

pub fn print_crop(report: &CropReport<'_>) {
    let s = Styles::new();
    s.banner("Figurine Crop");

    println!(
        "  {:<14}{}",
        s.label.apply_to("Steps"),
        s.value.apply_to(report.steps)
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Selection"),
        s.value.apply_to(fmt_rect(report.rect))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Pixels"),
        s.method.apply_to(format!(
            "{}x{} at ({}, {})",
            report.region.width, report.region.height, report.region.x, report.region.y
        ))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Output"),
        s.path.apply_to(report.output.display())
    );
    println!();
}

pub fn print_transform(steps: usize, transform: &TransformDescriptor, cursor: CursorHint) {
    let s = Styles::new();
    s.banner("Figurine Viewport");

    let [a, b, c, d, e, f] = transform.to_matrix();
    println!(
        "  {:<14}{}",
        s.label.apply_to("Steps"),
        s.value.apply_to(steps)
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Scale"),
        s.value.apply_to(transform.scale)
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Rotation"),
        s.value.apply_to(format!("{}\u{b0}", transform.rotate))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("CSS"),
        s.method.apply_to(transform.to_css())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Matrix"),
        s.method
            .apply_to(format!("matrix({a}, {b}, {c}, {d}, {e}, {f})"))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Cursor"),
        s.value.apply_to(format!("{cursor:?}").to_lowercase())
    );
    println!();
}
