//! Showcase points, rectangles and the showcase area calculator.

use crate::drawer::ShowcaseDrawer;

/// A target coordinate in surface space.
///
/// Valid points are non-negative. Two sentinels exist: [`ShowcasePoint::UNSET`]
/// ("no target yet") and [`ShowcasePoint::REMOVED`] ("target removed").
/// Neither is ever drawn or hit-tested.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ShowcasePoint {
    pub x: i32,
    pub y: i32,
}

impl ShowcasePoint {
    /// No target has been resolved yet.
    pub const UNSET: Self = Self { x: -1, y: -1 };
    /// The target was removed; parked far off-screen.
    pub const REMOVED: Self = Self {
        x: 1_000_000,
        y: 1_000_000,
    };

    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// True when either coordinate is negative.
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.x < 0 || self.y < 0
    }

    /// True when either coordinate carries the removed-target marker.
    #[must_use]
    pub const fn is_removed(self) -> bool {
        self.x == Self::REMOVED.x || self.y == Self::REMOVED.y
    }

    /// Drawable and hit-testable.
    #[must_use]
    pub const fn is_valid(self) -> bool {
        !self.is_negative() && !self.is_removed()
    }

    /// Euclidean distance from this point to (`x`, `y`).
    #[must_use]
    pub fn distance_to(self, x: f32, y: f32) -> f64 {
        let dx = f64::from(x) - f64::from(self.x);
        let dy = f64::from(y) - f64::from(self.y);
        dx.hypot(dy)
    }
}

impl From<(i32, i32)> for ShowcasePoint {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// Integer rectangle with exclusive right/bottom edges.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    #[must_use]
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    #[must_use]
    pub const fn width(&self) -> i32 {
        self.right - self.left
    }

    #[must_use]
    pub const fn height(&self) -> i32 {
        self.bottom - self.top
    }

    #[must_use]
    pub const fn center_x(&self) -> i32 {
        (self.left + self.right) / 2
    }

    #[must_use]
    pub const fn center_y(&self) -> i32 {
        (self.top + self.bottom) / 2
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.left >= self.right || self.top >= self.bottom
    }
}

/// Tracks the rectangle occupied by the primary showcase hole.
#[derive(Clone, Debug, Default)]
pub struct ShowcaseAreaCalculator {
    rect: Rect,
}

impl ShowcaseAreaCalculator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Centre the drawer's showcase footprint on (`x`, `y`).
    ///
    /// Returns `true` when the rectangle moved, which is what makes the text
    /// layout recompute.
    pub fn calculate_showcase_rect(&mut self, x: f32, y: f32, drawer: &dyn ShowcaseDrawer) -> bool {
        let cx = x as i32;
        let cy = y as i32;
        let half_w = (drawer.showcase_width() / 2) as i32;
        let half_h = (drawer.showcase_height() / 2) as i32;

        let next = Rect::new(cx - half_w, cy - half_h, cx + half_w, cy + half_h);
        if next == self.rect {
            return false;
        }
        self.rect = next;
        true
    }

    #[must_use]
    pub fn showcase_rect(&self) -> Rect {
        self.rect
    }

    #[must_use]
    pub fn showcase_center_x(&self) -> i32 {
        self.rect.center_x()
    }

    #[must_use]
    pub fn showcase_center_y(&self) -> i32 {
        self.rect.center_y()
    }
}
