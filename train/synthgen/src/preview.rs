use std::path::Path;

use anyhow::Context;
use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_line_segment_mut;
use layout::{Placement, geom::rotated_rectangle_corners};
use tracing::info;

use crate::io;

const BOX_COLOR: Rgba<u8> = Rgba([255, 0, 0, 255]);

/// Outlines each placement as its oriented box, rotated the same way the
/// glyph was.
pub fn draw_oriented_boxes(img: &mut RgbaImage, placements: &[Placement]) {
    for p in placements {
        let corners = rotated_rectangle_corners(p.x_center, p.y_center, p.width, p.height, p.angle);
        for i in 0..corners.len() {
            let (a, b) = (corners[i], corners[(i + 1) % corners.len()]);
            draw_line_segment_mut(
                img,
                (a.0 as f32, a.1 as f32),
                (b.0 as f32, b.1 as f32),
                BOX_COLOR,
            );
        }
    }
}

/// Draws the boxes from `labels` over the image at `image_path` and writes
/// the result to `out`.
pub fn render_file(image_path: &Path, labels: &Path, out: &Path) -> anyhow::Result<()> {
    let mut img = image::open(image_path)
        .with_context(|| format!("opening {}", image_path.display()))?
        .to_rgba8();
    let (w, h) = img.dimensions();

    let placements: Vec<Placement> = io::read_labels(labels)?
        .iter()
        .map(|a| a.denormalize(w, h))
        .collect();
    draw_oriented_boxes(&mut img, &placements);

    io::save_png(&img, out)?;
    info!(boxes = placements.len(), out = %out.display(), "preview written");
    Ok(())
}
