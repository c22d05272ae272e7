use image::{Rgba, RgbaImage, imageops};
use imageproc::geometric_transformations::{Interpolation, rotate_about_center};
use rand::Rng;

use crate::{error::LayoutError, geom};

pub const DIGITS: [char; 10] = ['0', '1', '2', '3', '4', '5', '6', '7', '8', '9'];

/// Fully transparent white, the padding used around rendered glyphs.
pub const TRANSPARENT: Rgba<u8> = Rgba([255, 255, 255, 0]);

/// Renders single digits onto transparent rasters.
pub trait GlyphRasterizer {
    /// Returns the upright `digit` drawn at `font_size` pixels. Pixels outside
    /// the glyph must have zero alpha.
    fn rasterize(&self, digit: char, font_size: u32) -> Result<RgbaImage, LayoutError>;
}

impl<T: GlyphRasterizer + ?Sized> GlyphRasterizer for &T {
    fn rasterize(&self, digit: char, font_size: u32) -> Result<RgbaImage, LayoutError> {
        (**self).rasterize(digit, font_size)
    }
}

/// Geometry of one rendered, rotated digit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlyphDescriptor {
    pub digit: char,
    pub font_size: u32,
    /// Counter-clockwise rotation in whole degrees, `0..360`.
    pub angle: u32,
    /// Tight box of the opaque pixels after rotation.
    pub pixel_width: u32,
    pub pixel_height: u32,
    /// Center of the tight box relative to the rotated raster's top-left corner.
    pub center_offset: (f64, f64),
}

pub struct RotatedGlyph {
    pub image: RgbaImage,
    pub descriptor: GlyphDescriptor,
}

impl RotatedGlyph {
    pub fn from_upright(
        digit: char,
        font_size: u32,
        angle: u32,
        upright: &RgbaImage,
    ) -> Result<Self, LayoutError> {
        let image = rotate_expanded(upright, angle);
        let (x0, y0, x1, y1) =
            tight_bbox(&image).ok_or(LayoutError::EmptyGlyph { digit, font_size })?;
        let (pixel_width, pixel_height) = (x1 - x0, y1 - y0);

        Ok(Self {
            image,
            descriptor: GlyphDescriptor {
                digit,
                font_size,
                angle,
                pixel_width,
                pixel_height,
                center_offset: (
                    x0 as f64 + pixel_width as f64 / 2.0,
                    y0 as f64 + pixel_height as f64 / 2.0,
                ),
            },
        })
    }
}

/// Rotates `img` counter-clockwise by `angle_deg`, growing the canvas so no
/// opaque pixel is clipped. New area is transparent.
pub fn rotate_expanded(img: &RgbaImage, angle_deg: u32) -> RgbaImage {
    if angle_deg % 360 == 0 {
        return img.clone();
    }

    let (w, h) = img.dimensions();
    let (ew, eh) = geom::expanded_extent(w, h, angle_deg as f64);
    let (ew, eh) = (ew.max(w), eh.max(h));

    let mut padded = RgbaImage::from_pixel(ew, eh, TRANSPARENT);
    imageops::replace(
        &mut padded,
        img,
        ((ew - w) / 2) as i64,
        ((eh - h) / 2) as i64,
    );

    // imageproc turns clockwise for positive theta
    rotate_about_center(
        &padded,
        -(angle_deg as f32).to_radians(),
        Interpolation::Bicubic,
        TRANSPARENT,
    )
}

/// Bounds of pixels with non-zero alpha as `(x0, y0, x1, y1)`, right and
/// bottom exclusive. `None` for a fully transparent raster.
pub fn tight_bbox(img: &RgbaImage) -> Option<(u32, u32, u32, u32)> {
    let mut bounds: Option<(u32, u32, u32, u32)> = None;
    for (x, y, px) in img.enumerate_pixels() {
        if px.0[3] == 0 {
            continue;
        }
        bounds = Some(match bounds {
            None => (x, y, x + 1, y + 1),
            Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x + 1), y1.max(y + 1)),
        });
    }
    bounds
}

/// Samples a digit, a font size and an angle, and renders the rotated glyph.
pub struct GlyphPlacer<G> {
    rasterizer: G,
    font_size_lo: u32,
    font_size_hi: u32,
}

impl<G: GlyphRasterizer> GlyphPlacer<G> {
    pub fn new(rasterizer: G, font_sizes: (u32, u32)) -> Result<Self, LayoutError> {
        let (lo, hi) = font_sizes;
        if lo == 0 || lo > hi {
            return Err(LayoutError::FontSizeRange { lo, hi });
        }
        Ok(Self {
            rasterizer,
            font_size_lo: lo,
            font_size_hi: hi,
        })
    }

    pub fn generate<R: Rng>(&self, rng: &mut R) -> Result<RotatedGlyph, LayoutError> {
        let digit = DIGITS[rng.random_range(0..DIGITS.len())];
        let font_size = rng.random_range(self.font_size_lo..=self.font_size_hi);
        let angle = rng.random_range(0..360u32);

        let upright = self.rasterizer.rasterize(digit, font_size)?;
        RotatedGlyph::from_upright(digit, font_size, angle, &upright)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::SmallRng};

    /// Draws every digit as a solid block `font_size/2` wide, sitting in the
    /// top half of a `font_size/2 x 2*font_size` transparent raster.
    pub(crate) struct BlockRasterizer;

    impl GlyphRasterizer for BlockRasterizer {
        fn rasterize(&self, _digit: char, font_size: u32) -> Result<RgbaImage, LayoutError> {
            let w = (font_size / 2).max(1);
            let mut img = RgbaImage::from_pixel(w, font_size * 2, TRANSPARENT);
            for y in 0..font_size {
                for x in 0..w {
                    img.put_pixel(x, y, Rgba([0, 0, 0, 255]));
                }
            }
            Ok(img)
        }
    }

    struct BrokenRasterizer;

    impl GlyphRasterizer for BrokenRasterizer {
        fn rasterize(&self, digit: char, font_size: u32) -> Result<RgbaImage, LayoutError> {
            Err(LayoutError::Rasterize {
                digit,
                font_size,
                reason: "no font".into(),
            })
        }
    }

    #[test]
    fn tight_bbox_finds_opaque_region() {
        let mut img = RgbaImage::from_pixel(10, 8, TRANSPARENT);
        img.put_pixel(2, 3, Rgba([0, 0, 0, 255]));
        img.put_pixel(6, 5, Rgba([0, 0, 0, 10]));
        assert_eq!(tight_bbox(&img), Some((2, 3, 7, 6)));
    }

    #[test]
    fn tight_bbox_of_transparent_image_is_none() {
        let img = RgbaImage::from_pixel(4, 4, TRANSPARENT);
        assert_eq!(tight_bbox(&img), None);
    }

    #[test]
    fn upright_glyph_descriptor() {
        let upright = BlockRasterizer.rasterize('4', 40).unwrap();
        let g = RotatedGlyph::from_upright('4', 40, 0, &upright).unwrap();
        assert_eq!(g.image.dimensions(), (20, 80));
        assert_eq!(g.descriptor.pixel_width, 20);
        assert_eq!(g.descriptor.pixel_height, 40);
        assert_eq!(g.descriptor.center_offset, (10.0, 20.0));
    }

    #[test]
    fn quarter_turn_swaps_tight_extent() {
        let mut upright = RgbaImage::from_pixel(40, 20, TRANSPARENT);
        for y in 5..15 {
            for x in 0..40 {
                upright.put_pixel(x, y, Rgba([0, 0, 0, 255]));
            }
        }
        let g = RotatedGlyph::from_upright('1', 20, 90, &upright).unwrap();
        let d = g.descriptor;
        assert!((8..=13).contains(&d.pixel_width), "width {}", d.pixel_width);
        assert!((34..=42).contains(&d.pixel_height), "height {}", d.pixel_height);
    }

    #[test]
    fn rotation_expands_canvas() {
        let upright = RgbaImage::from_pixel(30, 10, Rgba([0, 0, 0, 255]));
        let rotated = rotate_expanded(&upright, 45);
        let (w, h) = rotated.dimensions();
        assert!(w >= 29 && h >= 29, "{w}x{h}");
    }

    #[test]
    fn generated_glyph_stays_in_configured_ranges() {
        let placer = GlyphPlacer::new(BlockRasterizer, (30, 60)).unwrap();
        let mut rng = SmallRng::seed_from_u64(11);
        for _ in 0..50 {
            let g = placer.generate(&mut rng).unwrap();
            let d = g.descriptor;
            assert!(DIGITS.contains(&d.digit));
            assert!((30..=60).contains(&d.font_size));
            assert!(d.angle < 360);
            assert!(d.pixel_width <= g.image.width());
            assert!(d.pixel_height <= g.image.height());
        }
    }

    #[test]
    fn invalid_font_range_is_rejected() {
        assert!(matches!(
            GlyphPlacer::new(BlockRasterizer, (80, 40)),
            Err(LayoutError::FontSizeRange { lo: 80, hi: 40 })
        ));
        assert!(GlyphPlacer::new(BlockRasterizer, (0, 10)).is_err());
    }

    #[test]
    fn rasterizer_failure_propagates() {
        let placer = GlyphPlacer::new(BrokenRasterizer, (50, 50)).unwrap();
        let mut rng = SmallRng::seed_from_u64(0);
        assert!(matches!(
            placer.generate(&mut rng),
            Err(LayoutError::Rasterize { font_size: 50, .. })
        ));
    }
}
