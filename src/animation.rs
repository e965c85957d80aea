//! Show/hide animation capability.
//!
//! The overlay never blocks on an animation. It starts one through an
//! [`AnimationFactory`], keeps the returned [`AnimationHandle`], and later
//! learns about completion either immediately ([`Progress::Finished`]) or
//! from [`AnimationFactory::poll`]. A completion whose handle no longer
//! matches the overlay's current one is stale and ignored, so a new show or
//! hide simply supersedes whatever was in flight.

use crate::geometry::ShowcasePoint;
use std::time::{Duration, Instant};

/// Default duration of the indicator move in the animated showcase path.
pub const DEFAULT_MOVE_DURATION: Duration = Duration::from_millis(400);

/// Visibility state of the overlay.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AnimationState {
    #[default]
    Hidden,
    FadingIn,
    Visible,
    FadingOut,
}

impl AnimationState {
    /// True while the overlay is (becoming) visible.
    #[must_use]
    pub const fn is_showing(self) -> bool {
        matches!(self, Self::FadingIn | Self::Visible)
    }
}

/// Direction of a fade.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FadeKind {
    In,
    Out,
}

/// Identifies one started fade.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AnimationHandle {
    pub generation: u64,
    pub kind: FadeKind,
}

/// Whether a started animation already completed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Progress {
    Finished,
    Running,
}

/// A completion reported by [`AnimationFactory::poll`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Completion {
    Fade(AnimationHandle),
    TargetArrived(ShowcasePoint),
}

/// Animation capability used by the overlay.
pub trait AnimationFactory {
    fn fade_in(&mut self, duration: Duration, handle: AnimationHandle) -> Progress;

    fn fade_out(&mut self, duration: Duration, handle: AnimationHandle) -> Progress;

    /// Move the showcase indicator toward `point`.
    fn animate_target_to_point(&mut self, point: ShowcasePoint) -> Progress;

    /// Stop the animation behind `handle`. Its completion must not be reported.
    fn cancel(&mut self, _handle: AnimationHandle) {}

    /// Completions that happened by `now`, oldest first.
    fn poll(&mut self, _now: Instant) -> Vec<Completion> {
        Vec::new()
    }

    /// Overlay opacity at `now`, in `[0, 1]`. Backends without a running
    /// fade report the fully shown state.
    fn opacity(&self, _now: Instant) -> f32 {
        1.0
    }
}

/// Completes everything immediately. Suitable for tests and headless hosts.
#[derive(Clone, Copy, Debug, Default)]
pub struct InstantAnimations;

impl AnimationFactory for InstantAnimations {
    fn fade_in(&mut self, _duration: Duration, _handle: AnimationHandle) -> Progress {
        Progress::Finished
    }

    fn fade_out(&mut self, _duration: Duration, _handle: AnimationHandle) -> Progress {
        Progress::Finished
    }

    fn animate_target_to_point(&mut self, _point: ShowcasePoint) -> Progress {
        Progress::Finished
    }
}

#[derive(Clone, Copy, Debug)]
struct RunningFade {
    handle: AnimationHandle,
    duration: Duration,
    started: Option<Instant>,
}

#[derive(Clone, Copy, Debug)]
struct RunningMove {
    point: ShowcasePoint,
    started: Option<Instant>,
}

/// Clock-driven fades with linear opacity.
///
/// A fade's clock starts at the first [`poll`](AnimationFactory::poll) after
/// it was requested, so completion always comes after the start call.
#[derive(Clone, Debug)]
pub struct TimedAnimations {
    fade: Option<RunningFade>,
    moving: Option<RunningMove>,
    move_duration: Duration,
    last_opacity: f32,
}

impl Default for TimedAnimations {
    fn default() -> Self {
        Self::new()
    }
}

impl TimedAnimations {
    #[must_use]
    pub fn new() -> Self {
        Self {
            fade: None,
            moving: None,
            move_duration: DEFAULT_MOVE_DURATION,
            last_opacity: 0.0,
        }
    }

    #[must_use]
    pub fn with_move_duration(mut self, duration: Duration) -> Self {
        self.move_duration = duration;
        self
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.fade.is_some() || self.moving.is_some()
    }

    fn start_fade(&mut self, duration: Duration, handle: AnimationHandle) -> Progress {
        let target = match handle.kind {
            FadeKind::In => 1.0,
            FadeKind::Out => 0.0,
        };
        if duration.is_zero() {
            self.fade = None;
            self.last_opacity = target;
            return Progress::Finished;
        }
        self.fade = Some(RunningFade {
            handle,
            duration,
            started: None,
        });
        Progress::Running
    }
}

fn fraction(elapsed: Duration, total: Duration) -> f32 {
    if total.is_zero() {
        return 1.0;
    }
    (elapsed.as_secs_f32() / total.as_secs_f32()).clamp(0.0, 1.0)
}

impl AnimationFactory for TimedAnimations {
    fn fade_in(&mut self, duration: Duration, handle: AnimationHandle) -> Progress {
        self.start_fade(duration, handle)
    }

    fn fade_out(&mut self, duration: Duration, handle: AnimationHandle) -> Progress {
        self.start_fade(duration, handle)
    }

    fn animate_target_to_point(&mut self, point: ShowcasePoint) -> Progress {
        if self.move_duration.is_zero() {
            return Progress::Finished;
        }
        self.moving = Some(RunningMove {
            point,
            started: None,
        });
        Progress::Running
    }

    fn cancel(&mut self, handle: AnimationHandle) {
        if self.fade.is_some_and(|f| f.handle == handle) {
            self.fade = None;
        }
    }

    fn poll(&mut self, now: Instant) -> Vec<Completion> {
        let mut done = Vec::new();

        if let Some(fade) = self.fade.as_mut() {
            let started = *fade.started.get_or_insert(now);
            if now.saturating_duration_since(started) >= fade.duration {
                let handle = fade.handle;
                self.last_opacity = match handle.kind {
                    FadeKind::In => 1.0,
                    FadeKind::Out => 0.0,
                };
                self.fade = None;
                done.push(Completion::Fade(handle));
            }
        }

        if let Some(moving) = self.moving.as_mut() {
            let started = *moving.started.get_or_insert(now);
            if now.saturating_duration_since(started) >= self.move_duration {
                done.push(Completion::TargetArrived(moving.point));
                self.moving = None;
            }
        }

        done
    }

    fn opacity(&self, now: Instant) -> f32 {
        let Some(fade) = self.fade else {
            return self.last_opacity;
        };
        let t = match fade.started {
            Some(started) => fraction(now.saturating_duration_since(started), fade.duration),
            None => 0.0,
        };
        match fade.handle.kind {
            FadeKind::In => t,
            FadeKind::Out => 1.0 - t,
        }
    }
}
