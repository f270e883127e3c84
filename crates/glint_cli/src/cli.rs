use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use glint_renderer::Settings;
use log::LevelFilter;

/// Log levels accepted on the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "glint")]
#[command(about = "Ray cast the reference scene to an image file")]
pub struct Args {
    /// JSON settings file; missing fields use the reference defaults
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Image width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Image height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Samples per pixel (1 disables antialiasing)
    #[arg(short, long)]
    pub samples: Option<u32>,

    /// Seed for antialiasing jitter
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output file (.png or .ppm)
    #[arg(short, long, default_value = "output.png")]
    pub output: PathBuf,

    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

impl Args {
    /// Apply command-line overrides on top of loaded settings.
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(width) = self.width {
            settings.camera.width = width;
        }
        if let Some(height) = self.height {
            settings.camera.height = height;
        }
        if let Some(samples) = self.samples {
            settings.render.samples_per_pixel = samples;
        }
        if self.seed.is_some() {
            settings.render.seed = self.seed;
        }
    }
}
