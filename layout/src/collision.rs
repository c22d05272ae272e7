/// Axis-aligned box in absolute canvas pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PixelBox {
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
}

impl PixelBox {
    pub fn new(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Self {
        Self {
            x_min,
            y_min,
            x_max,
            y_max,
        }
    }

    /// Box with top-left corner at `(x, y)` spanning `w`x`h`.
    pub fn at(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self::new(x as f64, y as f64, (x + w) as f64, (y + h) as f64)
    }
}

/// Separating-axis test on x and y. Touching edges count as overlap.
pub fn boxes_overlap(a: &PixelBox, b: &PixelBox) -> bool {
    !(a.x_max < b.x_min || a.x_min > b.x_max || a.y_max < b.y_min || a.y_min > b.y_max)
}

pub fn overlaps_any<'a>(candidate: &PixelBox, boxes: impl IntoIterator<Item = &'a PixelBox>) -> bool {
    boxes.into_iter().any(|b| boxes_overlap(candidate, b))
}
