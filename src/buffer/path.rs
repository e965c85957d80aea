//! Vector path primitive with anti-aliased stroking.

use super::{BlendMode, PixelBuffer};
use crate::color::Rgba;

/// Segments used to flatten one rounded corner.
const CORNER_STEPS: usize = 4;

/// Stroke parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokeStyle {
    pub color: Rgba,
    /// Full stroke width in pixels.
    pub width: f32,
    /// Radius used to round interior corners of each sub-path (0 = sharp).
    pub corner_radius: f32,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            color: Rgba::WHITE,
            width: 4.0,
            corner_radius: 8.0,
        }
    }
}

/// A polyline path made of one or more sub-paths.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Path {
    subpaths: Vec<Vec<(f32, f32)>>,
}

impl Path {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new sub-path at (x, y).
    pub fn move_to(&mut self, x: f32, y: f32) -> &mut Self {
        self.subpaths.push(vec![(x, y)]);
        self
    }

    /// Extend the current sub-path. Starts one at the origin if none exists.
    pub fn line_to(&mut self, x: f32, y: f32) -> &mut Self {
        match self.subpaths.last_mut() {
            Some(sub) => sub.push((x, y)),
            None => self.subpaths.push(vec![(0.0, 0.0), (x, y)]),
        }
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subpaths.iter().all(|s| s.len() < 2)
    }

    /// Sub-paths as point lists.
    #[must_use]
    pub fn subpaths(&self) -> &[Vec<(f32, f32)>] {
        &self.subpaths
    }

    /// Every straight segment of the path.
    pub fn segments(&self) -> impl Iterator<Item = ((f32, f32), (f32, f32))> + '_ {
        self.subpaths
            .iter()
            .flat_map(|sub| sub.windows(2).map(|w| (w[0], w[1])))
    }

    /// Bounding box as (left, top, right, bottom).
    #[must_use]
    pub fn bounds(&self) -> Option<(f32, f32, f32, f32)> {
        let mut points = self.subpaths.iter().flatten();
        let &(x, y) = points.next()?;
        Some(points.fold((x, y, x, y), |(l, t, r, b), &(x, y)| {
            (l.min(x), t.min(y), r.max(x), b.max(y))
        }))
    }

    /// Copy of this path with each interior corner replaced by a short curve.
    ///
    /// Each corner is cut back by at most half of either adjacent segment and
    /// bridged with a flattened quadratic whose control point is the vertex.
    #[must_use]
    pub fn rounded(&self, radius: f32) -> Self {
        if radius <= 0.0 {
            return self.clone();
        }
        let subpaths = self
            .subpaths
            .iter()
            .map(|sub| {
                if sub.len() < 3 {
                    return sub.clone();
                }
                let mut out = Vec::with_capacity(sub.len() * (CORNER_STEPS + 1));
                out.push(sub[0]);
                for w in sub.windows(3) {
                    let (prev, corner, next) = (w[0], w[1], w[2]);
                    let entry = toward(corner, prev, radius);
                    let exit = toward(corner, next, radius);
                    for step in 0..=CORNER_STEPS {
                        let t = step as f32 / CORNER_STEPS as f32;
                        out.push(quadratic(entry, corner, exit, t));
                    }
                }
                out.push(sub[sub.len() - 1]);
                out
            })
            .collect();
        Self { subpaths }
    }

    /// Stroke the path into `target`.
    ///
    /// Coverage is computed per pixel from the distance to the nearest
    /// segment, so overlapping segments never double-blend and joins come
    /// out round.
    pub fn stroke(&self, target: &mut PixelBuffer, style: &StrokeStyle) {
        if self.is_empty() || style.width <= 0.0 || style.color.is_transparent() {
            return;
        }
        let path = self.rounded(style.corner_radius);
        let Some((l, t, r, b)) = path.bounds() else {
            return;
        };
        let half = style.width / 2.0;
        let pad = half + 1.0;
        let (w, h) = target.size();
        if w == 0 || h == 0 {
            return;
        }

        let x0 = (l - pad).floor().max(0.0) as i64;
        let y0 = (t - pad).floor().max(0.0) as i64;
        let x1 = ((r + pad).ceil() as i64).min(i64::from(w) - 1);
        let y1 = ((b + pad).ceil() as i64).min(i64::from(h) - 1);
        if x0 > x1 || y0 > y1 {
            return;
        }

        let segments: Vec<_> = path.segments().collect();
        for y in y0..=y1 {
            let py = y as f32 + 0.5;
            for x in x0..=x1 {
                let px = x as f32 + 0.5;
                let d = segments
                    .iter()
                    .map(|&(a, b)| distance_to_segment((px, py), a, b))
                    .fold(f32::INFINITY, f32::min);
                let coverage = (half + 0.5 - d).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    target.put(x, y, style.color.multiply_alpha(coverage), BlendMode::Over);
                }
            }
        }
    }
}

/// Point at most `radius` away from `from` in the direction of `to`,
/// never past the midpoint.
fn toward(from: (f32, f32), to: (f32, f32), radius: f32) -> (f32, f32) {
    let (dx, dy) = (to.0 - from.0, to.1 - from.1);
    let len = dx.hypot(dy);
    if len <= f32::EPSILON {
        return from;
    }
    let t = (radius / len).min(0.5);
    (from.0 + dx * t, from.1 + dy * t)
}

fn quadratic(p0: (f32, f32), c: (f32, f32), p1: (f32, f32), t: f32) -> (f32, f32) {
    let u = 1.0 - t;
    (
        u * u * p0.0 + 2.0 * u * t * c.0 + t * t * p1.0,
        u * u * p0.1 + 2.0 * u * t * c.1 + t * t * p1.1,
    )
}

fn distance_to_segment(p: (f32, f32), a: (f32, f32), b: (f32, f32)) -> f32 {
    let (abx, aby) = (b.0 - a.0, b.1 - a.1);
    let len2 = abx * abx + aby * aby;
    let t = if len2 <= f32::EPSILON {
        0.0
    } else {
        (((p.0 - a.0) * abx + (p.1 - a.1) * aby) / len2).clamp(0.0, 1.0)
    };
    let (cx, cy) = (a.0 + abx * t, a.1 + aby * t);
    (p.0 - cx).hypot(p.1 - cy)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segments_respect_move_to() {
        let mut path = Path::new();
        path.move_to(0.0, 0.0).line_to(10.0, 0.0).line_to(10.0, 10.0);
        path.move_to(10.0, 0.0).line_to(20.0, 0.0);
        assert_eq!(path.segments().count(), 3);
        assert_eq!(path.bounds(), Some((0.0, 0.0, 20.0, 10.0)));
    }

    #[test]
    fn test_line_to_without_move_starts_at_origin() {
        let mut path = Path::new();
        path.line_to(5.0, 5.0);
        assert_eq!(path.subpaths()[0], vec![(0.0, 0.0), (5.0, 5.0)]);
    }

    #[test]
    fn test_rounded_keeps_endpoints() {
        let mut path = Path::new();
        path.move_to(0.0, 0.0).line_to(20.0, 0.0).line_to(20.0, 20.0);
        let rounded = path.rounded(8.0);
        let sub = &rounded.subpaths()[0];
        assert_eq!(sub.first(), Some(&(0.0, 0.0)));
        assert_eq!(sub.last(), Some(&(20.0, 20.0)));
        assert!(!sub.contains(&(20.0, 0.0)), "corner vertex must be cut");
    }

    #[test]
    fn test_stroke_covers_line_only() {
        let mut buf = PixelBuffer::new(20, 20);
        let mut path = Path::new();
        path.move_to(2.0, 10.0).line_to(18.0, 10.0);
        let style = StrokeStyle {
            color: Rgba::WHITE,
            width: 2.0,
            corner_radius: 0.0,
        };
        path.stroke(&mut buf, &style);

        assert_eq!(buf.get(10, 9), Some(Rgba::WHITE));
        assert!(buf.get(10, 2).unwrap().is_transparent());
        assert!(buf.get(10, 17).unwrap().is_transparent());
    }

    #[test]
    fn test_stroke_clips_offscreen() {
        let mut buf = PixelBuffer::new(10, 10);
        let mut path = Path::new();
        path.move_to(-100.0, -100.0).line_to(-50.0, -50.0);
        path.stroke(&mut buf, &StrokeStyle::default());
        assert!(buf.pixels().iter().all(|p| p.is_transparent()));
    }

    #[test]
    fn test_distance_to_degenerate_segment() {
        let d = distance_to_segment((3.0, 4.0), (0.0, 0.0), (0.0, 0.0));
        assert!((d - 5.0).abs() < 1e-6);
    }
}
