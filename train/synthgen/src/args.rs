use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::render::RenderCfg;

/// Synthetic rotated-digit detection datasets
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Log level (off, error, warn, info, debug, trace); RUST_LOG wins when set
    #[arg(long, default_value = "info", global = true)]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate images with their label files
    Generate(GenerateArgs),
    /// Draw the oriented boxes of a label file over its image
    Preview {
        #[arg(long)]
        image: PathBuf,
        #[arg(long)]
        labels: PathBuf,
        #[arg(short, long, default_value = "preview.png")]
        out: PathBuf,
    },
}

#[derive(clap::Args, Debug, Default)]
pub struct GenerateArgs {
    /// JSON file with generation settings
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[arg(short, long)]
    pub out_dir: Option<PathBuf>,

    /// Number of images
    #[arg(short = 'n', long)]
    pub count: Option<u32>,

    #[arg(long)]
    pub seed: Option<u64>,

    #[arg(long)]
    pub font_dir: Option<PathBuf>,

    /// Font file stem inside the font directory
    #[arg(long)]
    pub font: Option<String>,

    /// Also write image_<n>_preview.png with boxes drawn
    #[arg(long)]
    pub preview: bool,
}

impl GenerateArgs {
    pub fn apply_to(&self, cfg: &mut RenderCfg) {
        if let Some(dir) = &self.out_dir {
            cfg.out_dir = dir.clone();
        }
        if let Some(count) = self.count {
            cfg.count = count;
        }
        if let Some(seed) = self.seed {
            cfg.seed = seed;
        }
        if let Some(dir) = &self.font_dir {
            cfg.font_dir = dir.clone();
        }
        if let Some(font) = &self.font {
            cfg.font = Some(font.clone());
        }
        cfg.preview |= self.preview;
    }
}
