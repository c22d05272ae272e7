/// Four rectangle corners in winding order: top-left, top-right, bottom-right, bottom-left.
pub type Corners = [(f64, f64); 4];

/// Rotates `(x, y)` about the origin by `-angle_deg`.
///
/// The negated angle turns a counter-clockwise rotation on screen (y axis
/// pointing down) into the usual math formula, which is how glyph images are
/// rotated before placement. Boxes reconstructed for drawing must go through
/// this function so both agree on direction.
pub fn rotate_point(x: f64, y: f64, angle_deg: f64) -> (f64, f64) {
    let theta = (-angle_deg).to_radians();
    let (sin, cos) = theta.sin_cos();
    (x * cos - y * sin, x * sin + y * cos)
}

pub fn rectangle_corners(x_center: f64, y_center: f64, width: f64, height: f64) -> Corners {
    let hw = width / 2.0;
    let hh = height / 2.0;
    [
        (x_center - hw, y_center - hh),
        (x_center + hw, y_center - hh),
        (x_center + hw, y_center + hh),
        (x_center - hw, y_center + hh),
    ]
}

/// Corners of a `width`x`height` rectangle rotated by `angle_deg` about its
/// own center, then moved to `(x_center, y_center)`.
pub fn rotated_rectangle_corners(
    x_center: f64,
    y_center: f64,
    width: f64,
    height: f64,
    angle_deg: f64,
) -> Corners {
    rectangle_corners(0.0, 0.0, width, height).map(|(x, y)| {
        let (rx, ry) = rotate_point(x, y, angle_deg);
        (rx + x_center, ry + y_center)
    })
}

/// Canvas size needed to hold a `width`x`height` raster after rotating it by
/// `angle_deg` about its center without clipping.
pub fn expanded_extent(width: u32, height: u32, angle_deg: f64) -> (u32, u32) {
    let corners = rotated_rectangle_corners(0.0, 0.0, width as f64, height as f64, angle_deg);
    let (mut min_x, mut max_x) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut min_y, mut max_y) = (f64::INFINITY, f64::NEG_INFINITY);
    for (x, y) in corners {
        min_x = min_x.min(x);
        max_x = max_x.max(x);
        min_y = min_y.min(y);
        max_y = max_y.max(y);
    }
    // round away float noise so axis-aligned angles keep the exact size
    let span = |lo: f64, hi: f64| ((hi - lo) * 1e6).round() / 1e6;
    (
        span(min_x, max_x).ceil() as u32,
        span(min_y, max_y).ceil() as u32,
    )
}
