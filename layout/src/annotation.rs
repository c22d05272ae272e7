use std::{fmt, str::FromStr};

use crate::error::LayoutError;

/// A glyph accepted onto the canvas, in pixel units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub digit: char,
    pub x_center: f64,
    pub y_center: f64,
    pub width: f64,
    pub height: f64,
    /// Degrees.
    pub angle: f64,
}

/// One label line: geometry as fractions of the canvas, angle as a fraction
/// of a full turn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NormalizedAnnotation {
    pub digit: char,
    pub x_center: f64,
    pub y_center: f64,
    pub width: f64,
    pub height: f64,
    pub angle: f64,
}

impl Placement {
    /// Center and size are clamped into `[0, 1]`; the angle is only scaled.
    pub fn normalize(&self, canvas_width: u32, canvas_height: u32) -> NormalizedAnnotation {
        let (w, h) = (canvas_width as f64, canvas_height as f64);
        let unit = |v: f64| v.clamp(0.0, 1.0);
        NormalizedAnnotation {
            digit: self.digit,
            x_center: unit(self.x_center / w),
            y_center: unit(self.y_center / h),
            width: unit(self.width / w),
            height: unit(self.height / h),
            angle: self.angle / 360.0,
        }
    }
}

impl NormalizedAnnotation {
    pub fn denormalize(&self, canvas_width: u32, canvas_height: u32) -> Placement {
        let (w, h) = (canvas_width as f64, canvas_height as f64);
        Placement {
            digit: self.digit,
            x_center: self.x_center * w,
            y_center: self.y_center * h,
            width: self.width * w,
            height: self.height * h,
            angle: self.angle * 360.0,
        }
    }
}

impl fmt::Display for NormalizedAnnotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {}",
            self.digit, self.x_center, self.y_center, self.width, self.height, self.angle
        )
    }
}

impl FromStr for NormalizedAnnotation {
    type Err = LayoutError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let bad = |reason: &str| LayoutError::ParseAnnotation {
            line: line.to_string(),
            reason: reason.to_string(),
        };

        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != 6 {
            return Err(bad("expected 6 fields"));
        }

        let mut chars = fields[0].chars();
        let digit = match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_digit() => c,
            _ => return Err(bad("label is not a single digit")),
        };

        let mut nums = [0.0; 5];
        for (slot, raw) in nums.iter_mut().zip(&fields[1..]) {
            *slot = raw.parse().map_err(|_| bad("not a number"))?;
        }
        let [x_center, y_center, width, height, angle] = nums;

        Ok(Self {
            digit,
            x_center,
            y_center,
            width,
            height,
            angle,
        })
    }
}

/// Parses every non-blank line of a label file.
pub fn parse_lines(text: &str) -> Result<Vec<NormalizedAnnotation>, LayoutError> {
    text.lines()
        .filter(|l| !l.trim().is_empty())
        .map(str::parse)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::{Rng, SeedableRng, rngs::SmallRng};

    fn placement(x: f64, y: f64, w: f64, h: f64, angle: f64) -> Placement {
        Placement {
            digit: '7',
            x_center: x,
            y_center: y,
            width: w,
            height: h,
            angle,
        }
    }

    #[test]
    fn normalizes_by_canvas_dimensions() {
        let n = placement(320.0, 160.0, 64.0, 32.0, 90.0).normalize(640, 320);
        assert_eq!(n.digit, '7');
        assert_relative_eq!(n.x_center, 0.5);
        assert_relative_eq!(n.y_center, 0.5);
        assert_relative_eq!(n.width, 0.1);
        assert_relative_eq!(n.height, 0.1);
        assert_relative_eq!(n.angle, 0.25);
    }

    #[test]
    fn clamps_geometry_but_not_angle() {
        let n = placement(-5.0, 700.0, 1000.0, -1.0, 720.0).normalize(640, 640);
        assert_eq!((n.x_center, n.y_center, n.width, n.height), (0.0, 1.0, 1.0, 0.0));
        assert_relative_eq!(n.angle, 2.0);
    }

    #[test]
    fn normalized_values_stay_in_unit_range() {
        let mut rng = SmallRng::seed_from_u64(3);
        for _ in 0..1000 {
            let p = placement(
                rng.random_range(-100.0..800.0),
                rng.random_range(-100.0..800.0),
                rng.random_range(0.0..900.0),
                rng.random_range(0.0..900.0),
                rng.random_range(0..360) as f64,
            );
            let n = p.normalize(640, 640);
            for v in [n.x_center, n.y_center, n.width, n.height] {
                assert!((0.0..=1.0).contains(&v), "{v}");
            }
            assert!((0.0..1.0).contains(&n.angle));
        }
    }

    #[test]
    fn line_format_field_order() {
        let n = NormalizedAnnotation {
            digit: '3',
            x_center: 0.5,
            y_center: 0.25,
            width: 0.125,
            height: 0.0625,
            angle: 0.75,
        };
        assert_eq!(n.to_string(), "3 0.5 0.25 0.125 0.0625 0.75");
        assert_eq!("3 0.5 0.25 0.125 0.0625 0.75".parse::<NormalizedAnnotation>().unwrap(), n);
    }

    #[test]
    fn denormalize_recovers_pixels() {
        let p = placement(100.0, 200.0, 40.0, 60.0, 45.0);
        let back = p.normalize(640, 480).denormalize(640, 480);
        assert_relative_eq!(back.x_center, 100.0, epsilon = 1e-9);
        assert_relative_eq!(back.y_center, 200.0, epsilon = 1e-9);
        assert_relative_eq!(back.width, 40.0, epsilon = 1e-9);
        assert_relative_eq!(back.height, 60.0, epsilon = 1e-9);
        assert_relative_eq!(back.angle, 45.0, epsilon = 1e-9);
    }

    #[test]
    fn rejects_malformed_lines() {
        for line in ["", "1 0.1 0.2 0.3 0.4", "12 0.1 0.2 0.3 0.4 0.5", "a 0.1 0.2 0.3 0.4 0.5", "1 x 0.2 0.3 0.4 0.5"] {
            assert!(line.parse::<NormalizedAnnotation>().is_err(), "{line:?}");
        }
    }

    #[test]
    fn parse_lines_skips_blank_lines() {
        let parsed = parse_lines("1 0.1 0.2 0.3 0.4 0.5\n\n9 0.5 0.5 0.1 0.1 0\n").unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[1].digit, '9');
        assert!(parse_lines("1 0.1\n").is_err());
    }
}
