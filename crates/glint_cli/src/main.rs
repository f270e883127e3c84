mod cli;
mod output;

use anyhow::{Context, Result};
use clap::Parser;
use glint_renderer::{render, Scene, Settings};

use crate::cli::Args;

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(args.log_level.into())
        .init();

    log::info!("Starting Glint");

    let mut settings = match &args.config {
        Some(path) => Settings::load(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => Settings::default(),
    };
    args.apply(&mut settings);
    settings.validate().context("Invalid settings")?;

    let camera = settings.camera.build();
    let scene = Scene::reference();
    let image = render(&camera, &scene, &settings.render);

    output::save(&image, &args.output)?;
    log::info!("Saved to {}", args.output.display());

    Ok(())
}
