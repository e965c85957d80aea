//! Showcase targets.
//!
//! A target is anything that can report a point in surface space. The point
//! is resolved lazily, when a deferred showcase request is applied, so a
//! target backed by a host widget sees its settled layout.

use crate::geometry::ShowcasePoint;

/// Source of a showcase coordinate.
pub trait Target {
    fn point(&self) -> ShowcasePoint;
}

/// A fixed coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PointTarget(pub ShowcasePoint);

impl PointTarget {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self(ShowcasePoint::new(x, y))
    }
}

impl Target for PointTarget {
    fn point(&self) -> ShowcasePoint {
        self.0
    }
}

/// A target that always reports [`ShowcasePoint::REMOVED`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NoTarget;

impl Target for NoTarget {
    fn point(&self) -> ShowcasePoint {
        ShowcasePoint::REMOVED
    }
}

impl<F> Target for F
where
    F: Fn() -> ShowcasePoint,
{
    fn point(&self) -> ShowcasePoint {
        self()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_point_target() {
        assert_eq!(PointTarget::new(3, 4).point(), ShowcasePoint::new(3, 4));
        assert!(!NoTarget.point().is_valid());
    }

    #[test]
    fn test_closure_target_resolves_lazily() {
        let x = Cell::new(10);
        let target = || ShowcasePoint::new(x.get(), 5);
        x.set(20);
        assert_eq!(target.point(), ShowcasePoint::new(20, 5));
    }
}
