//! Shared fixtures for overlay integration tests.

#![allow(clippy::nursery)] // Test infra prioritizes clarity over pedantry
#![allow(clippy::pedantic)] // Test infra prioritizes clarity over pedantry
#![allow(dead_code)]

use showcase_overlay::{
    AnimationFactory, AnimationHandle, Completion, InstantAnimations, MaterialShowcaseDrawer,
    MemoryShotStore, OverlayConfig, OverlayController, PointTarget, Progress, ShowcaseDrawer,
    ShowcaseEvent, ShowcasePoint, ShotStore, Target,
};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};
use tracing::Level;

pub const SURFACE: (u32, u32) = (400, 400);

pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_target(true)
        .with_test_writer()
        .try_init();
}

// ============================================================================
// Animations driven by the test
// ============================================================================

/// What the overlay asked the animation backend to do.
#[derive(Debug, Default)]
pub struct ManualState {
    pub started: Vec<AnimationHandle>,
    pub cancelled: Vec<AnimationHandle>,
    pub moves: Vec<ShowcasePoint>,
    ready: Vec<Completion>,
}

/// Animation backend whose fades only finish when the test says so.
///
/// Completions are delivered on the next `tick` even if the fade was
/// cancelled, like a backend that races its own cancellation.
#[derive(Clone, Debug, Default)]
pub struct ManualAnimations {
    pub state: Rc<RefCell<ManualState>>,
}

impl ManualAnimations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_started(&self) -> AnimationHandle {
        *self.state.borrow().started.last().expect("no fade started")
    }

    pub fn finish(&self, handle: AnimationHandle) {
        self.state.borrow_mut().ready.push(Completion::Fade(handle));
    }

    pub fn arrive(&self, point: ShowcasePoint) {
        self.state
            .borrow_mut()
            .ready
            .push(Completion::TargetArrived(point));
    }
}

impl AnimationFactory for ManualAnimations {
    fn fade_in(&mut self, _duration: Duration, handle: AnimationHandle) -> Progress {
        self.state.borrow_mut().started.push(handle);
        Progress::Running
    }

    fn fade_out(&mut self, _duration: Duration, handle: AnimationHandle) -> Progress {
        self.state.borrow_mut().started.push(handle);
        Progress::Running
    }

    fn animate_target_to_point(&mut self, point: ShowcasePoint) -> Progress {
        self.state.borrow_mut().moves.push(point);
        Progress::Running
    }

    fn cancel(&mut self, handle: AnimationHandle) {
        self.state.borrow_mut().cancelled.push(handle);
    }

    fn poll(&mut self, _now: Instant) -> Vec<Completion> {
        std::mem::take(&mut self.state.borrow_mut().ready)
    }
}

// ============================================================================
// Events
// ============================================================================

pub type EventLog = Rc<RefCell<Vec<ShowcaseEvent>>>;

pub fn record_events(overlay: &mut OverlayController) -> EventLog {
    let log: EventLog = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    overlay.set_on_showcase_event_listener(move |event: &ShowcaseEvent| {
        sink.borrow_mut().push(*event);
    });
    log
}

/// Events other than touch notifications.
pub fn lifecycle(log: &EventLog) -> Vec<ShowcaseEvent> {
    log.borrow()
        .iter()
        .copied()
        .filter(|e| !matches!(e, ShowcaseEvent::TouchBlocked { .. }))
        .collect()
}

// ============================================================================
// Builders
// ============================================================================

pub fn build(
    config: OverlayConfig,
    drawer: impl ShowcaseDrawer + 'static,
    animations: impl AnimationFactory + 'static,
    store: impl ShotStore + 'static,
) -> OverlayController {
    let mut overlay = OverlayController::new(
        config,
        Box::new(drawer),
        Box::new(animations),
        Box::new(store),
    )
    .expect("valid config");
    overlay.on_global_layout(SURFACE.0, SURFACE.1);
    overlay
}

/// Laid-out overlay with instant animations and a private shot store.
pub fn instant(config: OverlayConfig, radius: f32) -> OverlayController {
    build(
        config,
        MaterialShowcaseDrawer::with_radius(radius),
        InstantAnimations,
        MemoryShotStore::new(),
    )
}

pub fn targets(points: &[(i32, i32)]) -> Vec<Box<dyn Target>> {
    points
        .iter()
        .map(|&(x, y)| Box::new(PointTarget::new(x, y)) as Box<dyn Target>)
        .collect()
}

/// Request `points` and advance time past the showcase delay.
pub fn apply(overlay: &mut OverlayController, points: &[(i32, i32)]) {
    let now = Instant::now();
    overlay.set_showcase(targets(points), false, now);
    overlay.tick(now + Duration::from_secs(1));
}

pub fn shared_store() -> Rc<MemoryShotStore> {
    Rc::new(MemoryShotStore::new())
}
