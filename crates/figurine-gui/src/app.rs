use std::sync::mpsc;

use figurine_core::config::EditorConfig;
use figurine_core::crop::CropEvent;
use figurine_core::geometry::Size;
use figurine_core::viewport::ViewportEvent;
use image::{DynamicImage, GenericImageView};

use crate::convert::image_to_color_image;
use crate::messages::{WorkerCommand, WorkerResult};
use crate::panels;
use crate::states::{CropPanelState, PreviewState, UIState};
use crate::worker;

pub struct FigurineApp {
    pub cmd_tx: mpsc::Sender<WorkerCommand>,
    pub result_tx: mpsc::Sender<WorkerResult>,
    pub result_rx: mpsc::Receiver<WorkerResult>,
    pub ui_state: UIState,
    pub preview: PreviewState,
    pub crop: CropPanelState,
    pub config: EditorConfig,
    /// Decoded source image, kept for export at natural resolution.
    pub source: Option<DynamicImage>,
    pub show_about: bool,
}

impl FigurineApp {
    pub fn new(ctx: &egui::Context) -> std::io::Result<Self> {
        let (result_tx, result_rx) = mpsc::channel();
        let cmd_tx = worker::spawn_worker(result_tx.clone(), ctx.clone())?;
        let config = EditorConfig::default();

        Ok(Self {
            cmd_tx,
            result_tx,
            result_rx,
            ui_state: UIState::default(),
            preview: PreviewState::new(&config.viewport),
            crop: CropPanelState::new(&config.crop, Default::default()),
            config,
            source: None,
            show_about: false,
        })
    }

    /// Drain all pending results from the worker.
    fn poll_results(&mut self, ctx: &egui::Context) {
        while let Ok(result) = self.result_rx.try_recv() {
            match result {
                WorkerResult::LoadStarted { path } => {
                    self.preview
                        .viewport
                        .dispatch(ViewportEvent::SetLoading(true));
                    self.ui_state.add_log(format!("Loading {}", path.display()));
                }
                WorkerResult::ImageLoaded { path, image } => {
                    let (w, h) = image.dimensions();
                    self.ui_state.add_log(format!("Opened: {} ({w}x{h})", path.display()));
                    self.update_viewport_texture(ctx, &image);
                    self.preview.image_size = Some([w, h]);
                    self.preview.viewing_label = path
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_default();

                    let viewport = &mut self.preview.viewport;
                    viewport.dispatch(ViewportEvent::BindImage(Some(path.display().to_string())));
                    viewport.dispatch(ViewportEvent::SetLoading(false));

                    self.crop.cropper.dispatch(CropEvent::Unload);
                    self.crop.cropper.dispatch(CropEvent::ImageLoaded {
                        natural: Size::from((w, h)),
                    });

                    self.source = Some(image);
                    self.ui_state.file_path = Some(path);
                }
                WorkerResult::CropSaved {
                    path,
                    width,
                    height,
                } => {
                    self.ui_state.is_saving = false;
                    self.ui_state
                        .add_log(format!("Saved {width}x{height} crop: {}", path.display()));
                }
                WorkerResult::SaveCancelled => {
                    self.ui_state.is_saving = false;
                    self.ui_state.add_log("Export cancelled".into());
                }
                WorkerResult::ConfigImported { config } => {
                    self.apply_config(config);
                    self.ui_state.add_log("Config imported".into());
                }
                WorkerResult::Error { message } => {
                    self.ui_state.is_saving = false;
                    self.preview
                        .viewport
                        .dispatch(ViewportEvent::SetLoading(false));
                    tracing::warn!("{message}");
                    self.ui_state.add_log(format!("ERROR: {message}"));
                }
                WorkerResult::Log { message } => {
                    self.ui_state.add_log(message);
                }
            }
        }
    }

    fn update_viewport_texture(&mut self, ctx: &egui::Context, image: &DynamicImage) {
        let max_side = ctx.input(|i| i.max_texture_side) as u32;
        let color_image = image_to_color_image(image, max_side);
        let texture = ctx.load_texture("viewport", color_image, egui::TextureOptions::LINEAR);
        self.preview.texture = Some(texture);
    }

    /// Rebuild the viewport and cropper from a new config, rebinding the
    /// current image.
    pub fn apply_config(&mut self, config: EditorConfig) {
        let texture = self.preview.texture.take();
        let image_size = self.preview.image_size;
        let label = std::mem::take(&mut self.preview.viewing_label);

        self.preview = PreviewState::new(&config.viewport);
        self.preview.texture = texture;
        self.preview.image_size = image_size;
        self.preview.viewing_label = label;
        self.crop = CropPanelState::new(&config.crop, self.crop.preset);
        self.ui_state.export_format = config.export.format;

        if let (Some(path), Some([w, h])) = (&self.ui_state.file_path, image_size) {
            self.preview
                .viewport
                .dispatch(ViewportEvent::BindImage(Some(path.display().to_string())));
            self.crop.cropper.dispatch(CropEvent::ImageLoaded {
                natural: Size::from((w, h)),
            });
        }
        self.config = config;
    }

    /// Encode the current selection and ask where to save it.
    pub fn export_crop(&mut self) {
        if self.ui_state.is_saving {
            return;
        }
        let format = self.ui_state.export_format;
        let encoded = match self.crop.cropper.export(&self.source, format) {
            Ok(encoded) => encoded,
            Err(e) => {
                self.ui_state.add_log(format!("ERROR: {e}"));
                return;
            }
        };

        let stem = self
            .ui_state
            .file_path
            .as_ref()
            .and_then(|p| p.file_stem())
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".into());
        let file_name = format!("{stem}_crop.{}", format.extension());

        self.ui_state.is_saving = true;
        let cmd_tx = self.cmd_tx.clone();
        let result_tx = self.result_tx.clone();
        std::thread::spawn(move || {
            match rfd::FileDialog::new()
                .add_filter(format.to_string(), &[format.extension()])
                .set_file_name(file_name)
                .save_file()
            {
                Some(path) => {
                    let _ = cmd_tx.send(WorkerCommand::SaveCrop { path, encoded });
                }
                None => {
                    let _ = result_tx.send(WorkerResult::SaveCancelled);
                }
            }
        });
    }
}

impl eframe::App for FigurineApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_results(ctx);

        panels::menu_bar::show(ctx, self);
        panels::status::show(ctx, self);
        panels::controls::show(ctx, self);
        panels::viewport::show(ctx, self);

        // About dialog
        if self.show_about {
            egui::Window::new("About Figurine")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.heading("Figurine");
                        ui.label("Figure viewer and cropper");
                        ui.add_space(8.0);
                        ui.label(format!("Version {}", env!("CARGO_PKG_VERSION")));
                        ui.add_space(8.0);
                        if ui.button("Close").clicked() {
                            self.show_about = false;
                        }
                    });
                });
        }
    }
}
