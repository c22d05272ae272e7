use std::{
    fs::read_dir,
    path::{Path, PathBuf},
};

use ab_glyph::{Font, FontArc, PxScale};
use anyhow::{Context, bail};
use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_text_mut, text_size};
use layout::{
    GlyphRasterizer, LayoutError,
    glyph::{DIGITS, TRANSPARENT},
};
use tracing::{debug, warn};

const INK: Rgba<u8> = Rgba([0, 0, 0, 255]);

pub struct FontCache {
    // sorted by file name for a stable default
    fonts: Vec<(String, FontArc)>,
}

impl FontCache {
    /// Loads every `.ttf`/`.otf` in `dir` that has glyphs for all ten digits.
    pub fn load(dir: &Path) -> anyhow::Result<Self> {
        let mut paths: Vec<PathBuf> = read_dir(dir)
            .with_context(|| format!("reading font directory {}", dir.display()))?
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| {
                matches!(
                    p.extension().and_then(|s| s.to_str()),
                    Some("ttf") | Some("otf")
                )
            })
            .collect();
        paths.sort();

        let fonts: Vec<(String, FontArc)> = paths.iter().filter_map(|p| load_font(p)).collect();
        if fonts.is_empty() {
            bail!("no usable fonts found in {}", dir.display());
        }
        debug!(count = fonts.len(), "fonts loaded");
        Ok(FontCache { fonts })
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fonts.iter().map(|(name, _)| name.as_str())
    }

    /// Rasterizer for the font whose file stem is `name`, or the first font.
    pub fn rasterizer(&self, name: Option<&str>) -> anyhow::Result<FontRasterizer> {
        let entry = match name {
            None => self.fonts.first(),
            Some(name) => self.fonts.iter().find(|(n, _)| n == name),
        };
        let Some((_, font)) = entry else {
            bail!(
                "font {:?} not found, available: {}",
                name.unwrap_or_default(),
                self.names().collect::<Vec<_>>().join(", ")
            );
        };
        Ok(FontRasterizer::new(font.clone()))
    }
}

fn load_font(path: &Path) -> Option<(String, FontArc)> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) => {
            warn!(path = %path.display(), %err, "cannot read font");
            return None;
        }
    };
    let font = match FontArc::try_from_vec(bytes) {
        Ok(font) => font,
        Err(err) => {
            warn!(path = %path.display(), %err, "invalid font");
            return None;
        }
    };
    if !DIGITS.iter().all(|&ch| font.glyph_id(ch).0 != 0) {
        warn!(path = %path.display(), "font lacks digit glyphs");
        return None;
    }
    let name = path.file_stem()?.to_string_lossy().into_owned();
    Some((name, font))
}

/// Draws digits in black on a transparent raster sized from the text extent,
/// with twice the text height so descending outlines are never clipped.
pub struct FontRasterizer {
    font: FontArc,
}

impl FontRasterizer {
    pub fn new(font: FontArc) -> Self {
        Self { font }
    }
}

impl GlyphRasterizer for FontRasterizer {
    fn rasterize(&self, digit: char, font_size: u32) -> Result<RgbaImage, LayoutError> {
        let scale = PxScale::from(font_size as f32);
        let mut buf = [0u8; 4];
        let text: &str = digit.encode_utf8(&mut buf);

        let (w, h) = text_size(scale, &self.font, text);
        if w == 0 || h == 0 {
            return Err(LayoutError::Rasterize {
                digit,
                font_size,
                reason: format!("text extent is {w}x{h}"),
            });
        }

        let mut img = RgbaImage::from_pixel(w, 2 * h, TRANSPARENT);
        draw_text_mut(&mut img, INK, 0, 0, scale, &self.font, text);
        Ok(img)
    }
}
