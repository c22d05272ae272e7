use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::Context;
use image::RgbaImage;
use layout::{NormalizedAnnotation, annotation, composer::Scene};
use tracing::debug;

use crate::{generator::DatasetItemGenerator, preview};

pub fn image_path(dir: &Path, id: u32) -> PathBuf {
    dir.join(format!("image_{id}.png"))
}

pub fn labels_path(dir: &Path, id: u32) -> PathBuf {
    dir.join(format!("image_{id}.txt"))
}

pub fn preview_path(dir: &Path, id: u32) -> PathBuf {
    dir.join(format!("image_{id}_preview.png"))
}

impl<G> DatasetItemGenerator<G> {
    pub fn init_output(&self) -> anyhow::Result<()> {
        std::fs::create_dir_all(&self.config.out_dir)
            .with_context(|| format!("creating {}", self.config.out_dir.display()))
    }

    /// Writes the image, its label file and, if enabled, the preview.
    pub fn save_item(
        &self,
        id: u32,
        scene: &Scene,
        labels: &[NormalizedAnnotation],
    ) -> anyhow::Result<()> {
        let dir = &self.config.out_dir;
        save_png(&scene.image, &image_path(dir, id))?;
        write_labels(&labels_path(dir, id), labels)?;

        if self.config.preview {
            let mut img = scene.image.clone();
            preview::draw_oriented_boxes(&mut img, &scene.placements);
            save_png(&img, &preview_path(dir, id))?;
        }
        debug!(id, glyphs = labels.len(), "item written");
        Ok(())
    }
}

pub fn save_png(img: &RgbaImage, path: &Path) -> anyhow::Result<()> {
    img.save(path)
        .with_context(|| format!("writing {}", path.display()))
}

pub fn write_labels(path: &Path, labels: &[NormalizedAnnotation]) -> anyhow::Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    for label in labels {
        writeln!(writer, "{label}")?;
    }
    writer.flush()?;
    Ok(())
}

pub fn read_labels(path: &Path) -> anyhow::Result<Vec<NormalizedAnnotation>> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    annotation::parse_lines(&text).with_context(|| format!("parsing {}", path.display()))
}
