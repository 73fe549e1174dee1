use std::path::Path;
use std::sync::mpsc;
use std::time::Instant;

use figurine_core::crop::EncodedImage;

use crate::messages::{WorkerCommand, WorkerResult};

/// Spawn the background thread that decodes and writes images.
pub fn spawn_worker(
    result_tx: mpsc::Sender<WorkerResult>,
    ctx: egui::Context,
) -> std::io::Result<mpsc::Sender<WorkerCommand>> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<WorkerCommand>();

    std::thread::Builder::new()
        .name("figurine-worker".into())
        .spawn(move || {
            worker_loop(cmd_rx, result_tx, ctx);
        })?;

    Ok(cmd_tx)
}

fn send(tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context, result: WorkerResult) {
    let _ = tx.send(result);
    ctx.request_repaint();
}

fn send_log(tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context, msg: impl Into<String>) {
    send(tx, ctx, WorkerResult::Log { message: msg.into() });
}

fn send_error(tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context, msg: impl Into<String>) {
    send(tx, ctx, WorkerResult::Error { message: msg.into() });
}

fn worker_loop(
    cmd_rx: mpsc::Receiver<WorkerCommand>,
    tx: mpsc::Sender<WorkerResult>,
    ctx: egui::Context,
) {
    while let Ok(cmd) = cmd_rx.recv() {
        match cmd {
            WorkerCommand::LoadImage { path } => handle_load_image(&path, &tx, &ctx),
            WorkerCommand::SaveCrop { path, encoded } => {
                handle_save_crop(&path, &encoded, &tx, &ctx)
            }
        }
    }
    tracing::debug!("worker channel closed, exiting");
}

fn handle_load_image(path: &Path, tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context) {
    send(
        tx,
        ctx,
        WorkerResult::LoadStarted {
            path: path.to_path_buf(),
        },
    );

    let start = Instant::now();
    match image::open(path) {
        Ok(image) => {
            send_log(
                tx,
                ctx,
                format!(
                    "Decoded {} in {:.0}ms",
                    path.display(),
                    start.elapsed().as_secs_f32() * 1000.0
                ),
            );
            send(
                tx,
                ctx,
                WorkerResult::ImageLoaded {
                    path: path.to_path_buf(),
                    image,
                },
            );
        }
        Err(e) => send_error(tx, ctx, format!("Failed to open {}: {e}", path.display())),
    }
}

fn handle_save_crop(
    path: &Path,
    encoded: &EncodedImage,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    match encoded.save(path) {
        Ok(()) => send(
            tx,
            ctx,
            WorkerResult::CropSaved {
                path: path.to_path_buf(),
                width: encoded.width,
                height: encoded.height,
            },
        ),
        Err(e) => send_error(tx, ctx, format!("Failed to save {}: {e}", path.display())),
    }
}
