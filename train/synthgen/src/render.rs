use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use image::{Rgba, RgbaImage};
use imageproc::{drawing::draw_polygon_mut, point::Point};
use rand::Rng;
use serde::Deserialize;

pub const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct RenderCfg {
    pub out_dir: PathBuf, // "dataset"
    pub font_dir: PathBuf,
    /// File stem of the font to use; first font by file name when unset.
    pub font: Option<String>,
    pub count: u32,
    pub seed: u64,
    pub width: u32,
    pub height: u32,
    pub margin: u32,
    pub font_size_range: (u32, u32),
    pub glyphs_per_image: (u32, u32),
    pub polygons_per_image: (u32, u32), // upper bound exclusive
    pub polygon_points: (u32, u32),     // upper bound exclusive
    pub preview: bool,
}

impl Default for RenderCfg {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("dataset"),
            font_dir: PathBuf::from("assets/fonts"),
            font: None,
            count: 250,
            seed: 0,
            width: 640,
            height: 640,
            margin: 20,
            font_size_range: (50, 150),
            glyphs_per_image: (2, 5),
            polygons_per_image: (5, 15),
            polygon_points: (3, 7),
            preview: false,
        }
    }
}

impl RenderCfg {
    /// Defaults, overlaid with the JSON file at `path` when given.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let (flo, fhi) = self.font_size_range;
        if flo == 0 || flo > fhi {
            bail!("font_size_range must satisfy 1 <= lo <= hi, got [{flo}, {fhi}]");
        }
        let (glo, ghi) = self.glyphs_per_image;
        if glo > ghi {
            bail!("glyphs_per_image must satisfy lo <= hi, got [{glo}, {ghi}]");
        }
        let (plo, phi) = self.polygons_per_image;
        if plo >= phi {
            bail!("polygons_per_image must satisfy lo < hi, got [{plo}, {phi})");
        }
        let (vlo, vhi) = self.polygon_points;
        if vlo < 3 || vlo >= vhi {
            bail!("polygon_points must satisfy 3 <= lo < hi, got [{vlo}, {vhi})");
        }
        if self.width <= 2 * self.margin || self.height <= 2 * self.margin {
            bail!(
                "canvas {}x{} leaves no room inside a {}px margin",
                self.width,
                self.height,
                self.margin
            );
        }
        Ok(())
    }
}

/// White canvas covered with randomly colored random polygons.
pub fn polygon_background<R: Rng>(cfg: &RenderCfg, rng: &mut R) -> RgbaImage {
    let mut img = RgbaImage::from_pixel(cfg.width, cfg.height, WHITE);

    let (lo, hi) = cfg.polygons_per_image;
    for _ in 0..rng.random_range(lo..hi) {
        let poly = random_polygon(cfg, rng);
        let color = random_fill(rng);
        // imageproc rejects a single point and closed rings
        if poly.len() < 2 {
            continue;
        }
        draw_polygon_mut(&mut img, &poly, color);
    }
    img
}

fn random_polygon<R: Rng>(cfg: &RenderCfg, rng: &mut R) -> Vec<Point<i32>> {
    let (lo, hi) = cfg.polygon_points;
    let n = rng.random_range(lo..hi);
    let mut poly: Vec<Point<i32>> = (0..n)
        .map(|_| {
            Point::new(
                rng.random_range(0..cfg.width as i32),
                rng.random_range(0..cfg.height as i32),
            )
        })
        .collect();
    while poly.len() > 1 && poly.first() == poly.last() {
        poly.pop();
    }
    poly
}

/// Any opaque color except pure black, which is reserved for digits.
fn random_fill<R: Rng>(rng: &mut R) -> Rgba<u8> {
    loop {
        let rgb: [u8; 3] = [rng.random(), rng.random(), rng.random()];
        if rgb != [0, 0, 0] {
            return Rgba([rgb[0], rgb[1], rgb[2], 255]);
        }
    }
}
