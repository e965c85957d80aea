//! Touch input and touch-routing policy.

use bitflags::bitflags;

/// Phase of a touch gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TouchAction {
    /// Finger down / button pressed.
    Down,
    /// Pointer moved while down.
    Move,
    /// Finger lifted / button released.
    Up,
    /// Gesture cancelled by the host.
    Cancel,
}

/// A touch in surface coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchEvent {
    pub x: f32,
    pub y: f32,
    pub action: TouchAction,
}

impl TouchEvent {
    #[must_use]
    pub const fn new(x: f32, y: f32, action: TouchAction) -> Self {
        Self { x, y, action }
    }

    #[must_use]
    pub const fn down(x: f32, y: f32) -> Self {
        Self::new(x, y, TouchAction::Down)
    }

    #[must_use]
    pub const fn up(x: f32, y: f32) -> Self {
        Self::new(x, y, TouchAction::Up)
    }

    #[must_use]
    pub const fn move_to(x: f32, y: f32) -> Self {
        Self::new(x, y, TouchAction::Move)
    }

    #[must_use]
    pub fn is_up(&self) -> bool {
        self.action == TouchAction::Up
    }
}

bitflags! {
    /// Touch handling switches.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct TouchFlags: u8 {
        /// Consume touches that land outside the showcase holes.
        const BLOCK_TOUCHES = 0b0001;
        /// Hide the overlay when a touch is released outside the holes.
        const HIDE_ON_TOUCH_OUTSIDE = 0b0010;
        /// Consume every touch, including those inside the holes.
        const BLOCK_ALL_TOUCHES = 0b0100;
    }
}

impl Default for TouchFlags {
    fn default() -> Self {
        Self::BLOCK_TOUCHES
    }
}

/// How per-hole verdicts combine when several showcase points are active.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TouchVerdictPolicy {
    /// Each point overwrites the previous verdict, so only the last active
    /// point decides whether the touch is consumed. Hide-on-outside still
    /// fires for the first point the release lands outside of.
    #[default]
    LastPointWins,
    /// A touch passes through if it lands inside any hole; it is consumed
    /// (or hides the overlay) only when it is outside all of them.
    OutsideAll,
}

/// Result of routing one touch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TouchOutcome {
    /// Not consumed; the host should deliver it to the content underneath.
    PassThrough,
    /// Consumed by the overlay.
    Consumed,
    /// Consumed, and the overlay started hiding.
    ConsumedAndHid,
}

impl TouchOutcome {
    /// Whether the host should treat the event as handled.
    #[must_use]
    pub const fn is_handled(self) -> bool {
        !matches!(self, Self::PassThrough)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_touch_constructors() {
        let up = TouchEvent::up(1.0, 2.0);
        assert!(up.is_up());
        assert!(!TouchEvent::down(1.0, 2.0).is_up());
        assert_eq!(TouchEvent::move_to(3.0, 4.0).action, TouchAction::Move);
    }

    #[test]
    fn test_default_flags_block_touches_only() {
        let flags = TouchFlags::default();
        assert!(flags.contains(TouchFlags::BLOCK_TOUCHES));
        assert!(!flags.contains(TouchFlags::HIDE_ON_TOUCH_OUTSIDE));
        assert!(!flags.contains(TouchFlags::BLOCK_ALL_TOUCHES));
    }

    #[test]
    fn test_outcome_handled() {
        assert!(!TouchOutcome::PassThrough.is_handled());
        assert!(TouchOutcome::Consumed.is_handled());
        assert!(TouchOutcome::ConsumedAndHid.is_handled());
    }
}
