use std::ops::RangeInclusive;

use image::{RgbaImage, imageops};
use rand::Rng;
use tracing::debug;

use crate::{
    annotation::Placement,
    collision::{PixelBox, overlaps_any},
    error::LayoutError,
    glyph::{GlyphPlacer, GlyphRasterizer},
};

pub const DEFAULT_MARGIN: u32 = 20;

/// A composited canvas with the glyphs that made it onto it.
pub struct Scene {
    pub image: RgbaImage,
    pub placements: Vec<Placement>,
    /// Collision box of each placement, same order as `placements`.
    pub bounds: Vec<PixelBox>,
}

/// Places rotated glyphs on a canvas without overlap.
///
/// Each requested glyph gets exactly one attempt: a candidate that collides
/// with an earlier placement, or that cannot fit inside the margins, is
/// dropped. Earlier glyphs win contested space.
pub struct SceneComposer<G> {
    placer: GlyphPlacer<G>,
    margin: u32,
}

impl<G: GlyphRasterizer> SceneComposer<G> {
    pub fn new(placer: GlyphPlacer<G>, margin: u32) -> Self {
        Self { placer, margin }
    }

    pub fn margin(&self) -> u32 {
        self.margin
    }

    pub fn compose<R: Rng>(
        &self,
        mut canvas: RgbaImage,
        num_glyphs: usize,
        rng: &mut R,
    ) -> Result<Scene, LayoutError> {
        let (canvas_w, canvas_h) = canvas.dimensions();
        let mut placements = Vec::with_capacity(num_glyphs);
        let mut bounds: Vec<PixelBox> = Vec::with_capacity(num_glyphs);

        for attempt in 0..num_glyphs {
            let glyph = self.placer.generate(rng)?;
            let d = glyph.descriptor;

            let (Some(xs), Some(ys)) = (
                origin_range(canvas_w, d.pixel_width, self.margin),
                origin_range(canvas_h, d.pixel_height, self.margin),
            ) else {
                debug!(
                    attempt,
                    digit = %d.digit,
                    width = d.pixel_width,
                    height = d.pixel_height,
                    "glyph does not fit inside margins, skipped"
                );
                continue;
            };
            let x = rng.random_range(xs);
            let y = rng.random_range(ys);

            let candidate = PixelBox::at(x, y, d.pixel_width, d.pixel_height);
            if overlaps_any(&candidate, &bounds) {
                debug!(attempt, digit = %d.digit, x, y, "collision, skipped");
                continue;
            }

            imageops::overlay(&mut canvas, &glyph.image, x as i64, y as i64);
            bounds.push(candidate);
            placements.push(Placement {
                digit: d.digit,
                x_center: x as f64 + d.center_offset.0,
                y_center: y as f64 + d.center_offset.1,
                width: d.pixel_width as f64,
                height: d.pixel_height as f64,
                angle: d.angle as f64,
            });
        }

        Ok(Scene {
            image: canvas,
            placements,
            bounds,
        })
    }
}

/// Valid top-left coordinates for a glyph of `glyph` pixels along a canvas
/// axis of `extent` pixels, keeping `margin` free on both ends.
pub fn origin_range(extent: u32, glyph: u32, margin: u32) -> Option<RangeInclusive<u32>> {
    let hi = extent.checked_sub(glyph)?.checked_sub(margin)?;
    (margin <= hi).then_some(margin..=hi)
}
