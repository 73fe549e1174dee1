use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use figurine_core::surface::PolledSurface;
use figurine_core::viewport::{Viewport, ViewportEvent};
use tracing::debug;

use super::load_config;
use crate::script::{self, ViewScript};
use crate::summary::print_transform;

#[derive(Args)]
pub struct ViewArgs {
    /// Gesture script (TOML with [[step]] tables)
    #[arg(short, long)]
    pub script: PathBuf,

    /// Editor config file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Replay a viewport event script and print the resulting transform.
pub fn run(args: &ViewArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let script: ViewScript = script::load(&args.script)?;

    let mut viewport = Viewport::new(PolledSurface, config.viewport.clone());
    viewport.dispatch(ViewportEvent::BindImage(Some(script.image.clone())));

    for step in &script.steps {
        let state = viewport.dispatch(step.to_event());
        debug!(?step, scale = state.transform.scale, rotation = state.transform.rotation);
    }

    print_transform(script.steps.len(), &viewport.transform(), viewport.cursor());
    Ok(())
}
