use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::{
    args::{Args, Command, GenerateArgs},
    fonts::FontCache,
    generator::DatasetItemGenerator,
    render::RenderCfg,
};

mod args;
mod fonts;
mod generator;
mod io;
mod preview;
mod render;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&args.log_level))
        .context("invalid log level")?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match args.command {
        Command::Generate(g) => generate(&g),
        Command::Preview { image, labels, out } => preview::render_file(&image, &labels, &out),
    }
}

fn generate(args: &GenerateArgs) -> anyhow::Result<()> {
    let mut cfg = RenderCfg::load(args.config.as_deref())?;
    args.apply_to(&mut cfg);
    cfg.validate()?;

    let fonts = FontCache::load(&cfg.font_dir)?;
    let rasterizer = fonts.rasterizer(cfg.font.as_deref())?;

    let generator = DatasetItemGenerator::new(cfg, rasterizer)?;
    generator.init_output()?;

    let count = generator.config.count;
    let out_dir = generator.config.out_dir.display().to_string();
    info!(count, seed = generator.config.seed, %out_dir, "generating");

    let mut glyphs = 0;
    for id in 1..=count {
        let seed = generator.item_seed(id);
        let scene = generator
            .generate_with_seed(seed)
            .with_context(|| format!("generating image {id}"))?;
        let labels = generator.annotations(&scene);
        generator.save_item(id, &scene, &labels)?;
        glyphs += labels.len();
    }

    info!("Generated {count} images with {glyphs} digits in {out_dir}");
    Ok(())
}
