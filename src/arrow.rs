//! Arrow geometry: connectors from the text block to secondary showcases.
//!
//! Every arrow is a shaft plus two head strokes. The head wings start as a
//! fixed offset below the end point and are then rotated to follow the
//! shaft. Coordinates are integer pixels, matching the point type the
//! showcase targets use; only the rotation itself runs in floating point.

use crate::buffer::{Path, PixelBuffer, StrokeStyle};
use crate::geometry::ShowcasePoint;
use crate::text::TextPlacement;
use std::f64::consts::PI;

/// Index of the showcase the text block sits next to; it gets no arrow.
pub const PRIMARY_ANCHOR_INDEX: usize = 0;

/// Shape parameters for arrows.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArrowStyle {
    pub stroke: StrokeStyle,
    /// Gap between the text anchor and the arrow tail.
    pub margin_from_text: i32,
    /// Distance added below the showcase edge for the arrow tip.
    pub margin_from_spot: i32,
    /// Wing offset from the tip before rotation, as (half-width, length).
    pub head_compensation: (i32, i32),
    /// Extra rotation for shafts pointing anywhere but up-right.
    pub rotation_offset: f64,
    /// Extra rotation for shafts pointing up-right (angle above 270).
    pub upward_rotation_offset: f64,
}

impl Default for ArrowStyle {
    fn default() -> Self {
        Self {
            stroke: StrokeStyle::default(),
            margin_from_text: 16,
            margin_from_spot: 100,
            head_compensation: (15, 21),
            rotation_offset: 60.0,
            upward_rotation_offset: 0.0,
        }
    }
}

/// A computed arrow, ready to stroke.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Arrow {
    pub start: (i32, i32),
    pub end: (i32, i32),
    pub wings: [(i32, i32); 2],
    /// Shaft angle in degrees.
    pub angle: f64,
}

impl Arrow {
    /// Tail to tip to first wing, then tip to second wing.
    #[must_use]
    pub fn path(&self) -> Path {
        let pt = |(x, y): (i32, i32)| (x as f32, y as f32);
        let (a, b, c, d) = (pt(self.start), pt(self.end), pt(self.wings[0]), pt(self.wings[1]));
        let mut path = Path::new();
        path.move_to(a.0, a.1).line_to(b.0, b.1).line_to(c.0, c.1);
        path.move_to(b.0, b.1).line_to(d.0, d.1);
        path
    }
}

/// Angle of the line from `a` to `b` in degrees.
///
/// 0 is three o'clock and angles grow clockwise in y-down coordinates, so
/// straight down is 90 and straight up is 270. Always in `[0, 360)`.
#[must_use]
pub fn angle_made_by_line(a: (i32, i32), b: (i32, i32)) -> f64 {
    let dx = f64::from(b.0) - f64::from(a.0);
    let dy = -(f64::from(b.1) - f64::from(a.1));

    let rads = dy.atan2(dx);
    let rads = if rads < 0.0 { rads.abs() } else { 2.0 * PI - rads };
    rads.to_degrees().rem_euclid(360.0)
}

/// Rotate the segment `a`-`b` by `angle` degrees about its midpoint.
///
/// The pivot uses integer halving with the absolute value taken on the
/// halved x sum but on the y sum before halving. Returns
/// `[ax, ay, bx, by]` after rotation.
#[must_use]
pub fn rotated_points(angle: f64, a: (i32, i32), b: (i32, i32)) -> [f32; 4] {
    let px = ((a.0 + b.0) / 2).abs() as f32;
    let py = ((a.1 + b.1).abs() / 2) as f32;
    let (sin, cos) = (angle as f32).to_radians().sin_cos();

    let rotate = |(x, y): (i32, i32)| {
        let (dx, dy) = (x as f32 - px, y as f32 - py);
        (cos * dx - sin * dy + px, sin * dx + cos * dy + py)
    };
    let (ax, ay) = rotate(a);
    let (bx, by) = rotate(b);
    [ax, ay, bx, by]
}

/// Builds arrows for the secondary showcases and strokes them.
#[derive(Clone, Debug, Default)]
pub struct ArrowRenderer {
    style: ArrowStyle,
}

impl ArrowRenderer {
    #[must_use]
    pub fn new(style: ArrowStyle) -> Self {
        Self { style }
    }

    #[must_use]
    pub fn style(&self) -> &ArrowStyle {
        &self.style
    }

    /// One arrow from the text anchor (`x`, `y`) to (`x_end`, `y_end`).
    ///
    /// `width` is the text box width; the tail sits at its horizontal middle.
    #[must_use]
    pub fn create_arrow(&self, x: f32, y: i32, x_end: i32, y_end: i32, width: f32) -> Arrow {
        let style = &self.style;
        let start = ((x + width / 2.0) as i32, y - style.margin_from_text);
        let end = (x_end, y_end + style.margin_from_spot);
        let angle = angle_made_by_line(start, end);

        let (dx, dy) = style.head_compensation;
        let mut wings = [(end.0 - dx, end.1 + dy), (end.0 + dx, end.1 + dy)];

        let rotation = if angle < 270.0 {
            Some(angle + style.rotation_offset)
        } else if angle > 270.0 {
            Some(-angle + style.upward_rotation_offset)
        } else {
            None
        };
        if let Some(rotation) = rotation {
            for wing in &mut wings {
                let r = rotated_points(rotation, end, *wing);
                *wing = (r[2] as i32, r[3] as i32);
            }
        }

        Arrow {
            start,
            end,
            wings,
            angle,
        }
    }

    /// Arrows for every valid showcase after the primary one.
    ///
    /// Arrows fan out under the text block: with `n` arrows the `i`-th
    /// (1-based) tail is shifted by `(i - (n + 1) / 2) * width / 4`. Tips
    /// land `blocked_radius` below each showcase centre.
    #[must_use]
    pub fn arrows_for(
        &self,
        placement: &TextPlacement,
        points: &[ShowcasePoint],
        blocked_radius: f32,
    ) -> Vec<Arrow> {
        let targets: Vec<ShowcasePoint> = points
            .iter()
            .skip(PRIMARY_ANCHOR_INDEX + 1)
            .copied()
            .filter(|p| p.is_valid())
            .collect();
        let n = targets.len() as f32;
        let width = placement.width;
        let mid_y = placement.start_y as i32;

        targets
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let spread = (i as f32 + 1.0 - (n + 1.0) / 2.0) * width / 4.0;
                let y_end = (p.y as f32 + blocked_radius) as i32;
                self.create_arrow(placement.start_x + spread, mid_y, p.x, y_end, width)
            })
            .collect()
    }

    /// Stroke `arrow` onto `surface`, its colour scaled by `opacity`.
    pub fn draw(&self, arrow: &Arrow, surface: &mut PixelBuffer, opacity: f32) {
        let mut stroke = self.style.stroke;
        stroke.color = stroke.color.multiply_alpha(opacity.clamp(0.0, 1.0));
        arrow.path().stroke(surface, &stroke);
    }
}
