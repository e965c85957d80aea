//! The overlay controller.
//!
//! [`OverlayController`] owns every piece of per-overlay state: the active
//! showcase points, the mask compositor, the text layout, the one-shot flag
//! and the show/hide state machine. Hosts drive it with four kinds of calls:
//!
//! - layout: [`on_global_layout`](OverlayController::on_global_layout)
//! - time: [`tick`](OverlayController::tick), which applies deferred
//!   showcase requests and delivers animation completions
//! - input: [`on_touch`](OverlayController::on_touch)
//! - frames: [`draw`](OverlayController::draw)
//!
//! # Examples
//!
//! ```
//! use showcase_overlay::{
//!     AnimationState, InstantAnimations, MaterialShowcaseDrawer, MemoryShotStore,
//!     OverlayConfig, OverlayController, PixelBuffer, PointTarget, Target,
//! };
//! use std::time::{Duration, Instant};
//!
//! let mut overlay = OverlayController::new(
//!     OverlayConfig::default(),
//!     Box::new(MaterialShowcaseDrawer::new()),
//!     Box::new(InstantAnimations),
//!     Box::new(MemoryShotStore::new()),
//! )
//! .unwrap();
//! overlay.on_global_layout(400, 400);
//!
//! let now = Instant::now();
//! let targets: Vec<Box<dyn Target>> = vec![Box::new(PointTarget::new(100, 100))];
//! overlay.set_showcase(targets, false, now);
//! overlay.tick(now + Duration::from_millis(100));
//! overlay.show();
//! assert_eq!(overlay.state(), AnimationState::Visible);
//!
//! let mut surface = PixelBuffer::new(400, 400);
//! let frame = overlay.draw(&mut surface);
//! assert_eq!(frame.holes_drawn, 1);
//! ```

mod frame;

pub use frame::FrameReport;

use crate::animation::{
    AnimationFactory, AnimationHandle, AnimationState, Completion, FadeKind, Progress,
};
use crate::arrow::ArrowRenderer;
use crate::buffer::PixelBuffer;
use crate::color::Rgba;
use crate::compositor::MaskCompositor;
use crate::config::{EndControl, OverlayConfig};
use crate::drawer::ShowcaseDrawer;
use crate::error::{Error, Result};
use crate::event::{LogLevel, ShowcaseEvent, ShowcaseEventListener, emit_log};
use crate::geometry::{Rect, ShowcaseAreaCalculator, ShowcasePoint};
use crate::input::{TouchEvent, TouchFlags, TouchOutcome, TouchVerdictPolicy};
use crate::shot::{ShotStateStore, ShotStore};
use crate::target::Target;
use crate::text::{TextAlignment, TextLayoutEngine, TextPaint, TextPlacement, TextPosition};
use std::collections::VecDeque;
use std::fmt;
use std::time::{Duration, Instant};

/// A showcase request waiting for layout to settle.
struct PendingShowcase {
    due: Instant,
    targets: Vec<Box<dyn Target>>,
    animate: bool,
}

/// Showcase overlay state and orchestration.
pub struct OverlayController {
    compositor: MaskCompositor,
    area: ShowcaseAreaCalculator,
    text: TextLayoutEngine,
    /// Showcase rectangle the current text placement was computed against.
    text_rect: Rect,
    arrows: ArrowRenderer,
    shots: ShotStateStore,
    animator: Box<dyn AnimationFactory>,
    listener: Option<Box<dyn ShowcaseEventListener>>,

    showcases: Vec<ShowcasePoint>,
    pending: VecDeque<PendingShowcase>,
    has_no_target: bool,

    state: AnimationState,
    current_animation: Option<AnimationHandle>,
    generation: u64,
    surface_visible: bool,
    /// Time of the latest `tick`, used to sample fade opacity when drawing.
    last_tick: Option<Instant>,

    width: u32,
    height: u32,
    touch: TouchFlags,
    touch_policy: TouchVerdictPolicy,
    fade_in: Duration,
    fade_out: Duration,
    showcase_delay: Duration,
    scale_multiplier: f32,
    showcase_colour: Rgba,
    background_colour: Rgba,
    end_control: EndControl,
    button_override: Option<Box<dyn FnMut()>>,
    torn_down: bool,
}

impl OverlayController {
    /// Build an overlay from a validated configuration.
    ///
    /// Reads the one-shot flag once, here, if `config.single_shot` is set.
    pub fn new(
        config: OverlayConfig,
        drawer: Box<dyn ShowcaseDrawer>,
        animator: Box<dyn AnimationFactory>,
        store: Box<dyn ShotStore>,
    ) -> Result<Self> {
        config.validate()?;

        let mut compositor = MaskCompositor::new(drawer);
        compositor.set_colours(config.showcase_colour, config.background_colour);

        let mut shots = ShotStateStore::new(store);
        if let Some(id) = config.single_shot {
            shots.set_single_shot(id);
        }

        Ok(Self {
            compositor,
            area: ShowcaseAreaCalculator::new(),
            text: TextLayoutEngine::new(
                config.text,
                config.text_padding,
                config.action_bar_offset,
                config.center_text,
            ),
            text_rect: Rect::default(),
            arrows: ArrowRenderer::new(config.arrow),
            shots,
            animator,
            listener: None,
            showcases: Vec::new(),
            pending: VecDeque::new(),
            has_no_target: false,
            state: AnimationState::Hidden,
            current_animation: None,
            generation: 0,
            surface_visible: false,
            last_tick: None,
            width: 0,
            height: 0,
            touch: config.touch,
            touch_policy: config.touch_policy,
            fade_in: config.fade_in,
            fade_out: config.fade_out,
            showcase_delay: config.showcase_delay,
            scale_multiplier: config.scale_multiplier,
            showcase_colour: config.showcase_colour,
            background_colour: config.background_colour,
            end_control: config.end_control,
            button_override: None,
            torn_down: false,
        })
    }

    // ---------------------------------------------------------------
    // Accessors
    // ---------------------------------------------------------------

    /// Current show/hide state.
    #[must_use]
    pub fn state(&self) -> AnimationState {
        self.state
    }

    /// True from `show()` until the fade-out completes.
    #[must_use]
    pub fn is_showing(&self) -> bool {
        self.state != AnimationState::Hidden
    }

    /// Overlay opacity at `now`, in `[0, 1]`.
    ///
    /// Sampled from the animation backend while a fade runs; a settled
    /// overlay is drawn at full strength.
    #[must_use]
    pub fn opacity(&self, now: Instant) -> f32 {
        match self.state {
            AnimationState::FadingIn | AnimationState::FadingOut => {
                self.animator.opacity(now).clamp(0.0, 1.0)
            }
            AnimationState::Visible | AnimationState::Hidden => 1.0,
        }
    }

    /// Whether the host surface is on screen and receiving touches.
    #[must_use]
    pub fn is_surface_visible(&self) -> bool {
        self.surface_visible
    }

    /// Active showcase points in insertion order.
    #[must_use]
    pub fn showcases(&self) -> &[ShowcasePoint] {
        &self.showcases
    }

    /// True in text-only mode, after a showcase request with no targets.
    #[must_use]
    pub fn has_no_target(&self) -> bool {
        self.has_no_target
    }

    /// Whether a real showcase is on screen, as opposed to text-only mode or
    /// only removed targets.
    #[must_use]
    pub fn has_showcase_view(&self) -> bool {
        !self.has_no_target && self.showcases.iter().any(|p| !p.is_removed())
    }

    /// True once this single-shot overlay has been shown, here or earlier.
    #[must_use]
    pub fn has_shot(&self) -> bool {
        self.shots.has_shot()
    }

    /// Whether a one-shot id is configured.
    #[must_use]
    pub fn is_single_shot(&self) -> bool {
        self.shots.is_single_shot()
    }

    /// Showcase requests not yet applied.
    #[must_use]
    pub fn pending_showcases(&self) -> usize {
        self.pending.len()
    }

    /// Whether the mask buffer is currently allocated.
    #[must_use]
    pub fn has_buffer(&self) -> bool {
        self.compositor.has_buffer()
    }

    /// The mask as composed by the last frame, if allocated.
    #[must_use]
    pub fn mask(&self) -> Option<&PixelBuffer> {
        self.compositor.buffer()
    }

    /// Hit-test and arrow offset radius of the active drawer.
    #[must_use]
    pub fn blocked_radius(&self) -> f32 {
        self.compositor.blocked_radius()
    }

    /// Text placement from the last recalculation.
    #[must_use]
    pub fn text_placement(&self) -> TextPlacement {
        self.text.placement()
    }

    /// Measured surface size from the last layout pass.
    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Current touch handling switches.
    #[must_use]
    pub fn touch_flags(&self) -> TouchFlags {
        self.touch
    }

    /// The dismiss control as currently configured.
    #[must_use]
    pub fn end_control(&self) -> &EndControl {
        &self.end_control
    }

    // ---------------------------------------------------------------
    // Listener and one-shot
    // ---------------------------------------------------------------

    /// Receive lifecycle and touch events, replacing any previous listener.
    pub fn set_on_showcase_event_listener(&mut self, listener: impl ShowcaseEventListener + 'static) {
        self.listener = Some(Box::new(listener));
    }

    /// Stop delivering events.
    pub fn clear_on_showcase_event_listener(&mut self) {
        self.listener = None;
    }

    /// Make this overlay single-shot under `id`, reading the stored flag.
    pub fn set_single_shot(&mut self, id: i64) {
        self.shots.set_single_shot(id);
    }

    fn emit(&mut self, event: ShowcaseEvent) {
        if let Some(listener) = self.listener.as_mut() {
            listener.on_event(&event);
        }
    }

    // ---------------------------------------------------------------
    // Layout and deferred showcases
    // ---------------------------------------------------------------

    /// Record the measured surface size and resize the mask to match.
    pub fn on_global_layout(&mut self, width: u32, height: u32) {
        if (width, height) != (self.width, self.height) {
            self.width = width;
            self.height = height;
            self.text.invalidate();
        }
        if !self.shots.has_shot() {
            self.update_bitmap();
        }
    }

    fn update_bitmap(&mut self) {
        if self.torn_down || self.width == 0 || self.height == 0 {
            return;
        }
        self.compositor.ensure_buffer(self.width, self.height);
    }

    /// Queue a showcase request, applied by the first `tick` at or after
    /// `now + showcase_delay`.
    ///
    /// An empty `targets` list switches to text-only mode. With `animate`,
    /// each point is handed to the animation capability instead of being
    /// appended directly; only a single animated target is meaningful, since
    /// every target drives the same indicator.
    pub fn set_showcase(&mut self, targets: Vec<Box<dyn Target>>, animate: bool, now: Instant) {
        if self.torn_down {
            return;
        }
        self.pending.push_back(PendingShowcase {
            due: now + self.showcase_delay,
            targets,
            animate,
        });
    }

    /// Apply due showcase requests, then deliver animation completions.
    pub fn tick(&mut self, now: Instant) {
        if self.torn_down {
            return;
        }
        self.last_tick = Some(now);
        while self.pending.front().is_some_and(|p| p.due <= now) {
            if let Some(request) = self.pending.pop_front() {
                self.apply_showcase(request);
            }
        }
        for completion in self.animator.poll(now) {
            match completion {
                Completion::Fade(handle) => self.complete_fade(handle),
                Completion::TargetArrived(point) => self.set_showcase_position(point),
            }
        }
    }

    fn apply_showcase(&mut self, request: PendingShowcase) {
        if self.shots.has_shot() {
            emit_log(LogLevel::Debug, "showcase request ignored: already shot");
            return;
        }
        self.update_bitmap();

        if request.targets.is_empty() {
            self.has_no_target = true;
            self.text.invalidate();
            emit_log(LogLevel::Debug, "showcase applied without target");
            return;
        }
        self.has_no_target = false;
        if request.animate && request.targets.len() > 1 {
            emit_log(
                LogLevel::Warn,
                &format!(
                    "{} animated targets share one indicator; only the last move is meaningful",
                    request.targets.len()
                ),
            );
        }

        for target in &request.targets {
            let point = target.point();
            if request.animate {
                if self.animator.animate_target_to_point(point) == Progress::Finished {
                    self.set_showcase_position(point);
                }
            } else {
                self.set_showcase_position(point);
            }
        }
        emit_log(
            LogLevel::Debug,
            &format!("showcase applied, {} active point(s)", self.showcases.len()),
        );
    }

    /// Append a showcase point. Ignored once the overlay has been shot.
    pub fn set_showcase_position(&mut self, point: ShowcasePoint) {
        if self.shots.has_shot() {
            return;
        }
        self.showcases.push(point);
        self.text.invalidate();
    }

    /// Drop pending work, stop animations and free the mask. Later ticks,
    /// showcase requests and shows are ignored.
    pub fn teardown(&mut self) {
        self.pending.clear();
        if let Some(handle) = self.current_animation.take() {
            self.animator.cancel(handle);
        }
        self.compositor.release();
        self.torn_down = true;
        emit_log(LogLevel::Debug, "overlay torn down");
    }

    // ---------------------------------------------------------------
    // Show / hide state machine
    // ---------------------------------------------------------------

    fn set_state(&mut self, next: AnimationState) {
        if self.state != next {
            emit_log(
                LogLevel::Debug,
                &format!("animation state {:?} -> {:?}", self.state, next),
            );
            self.state = next;
        }
    }

    fn next_handle(&mut self, kind: FadeKind) -> AnimationHandle {
        self.generation += 1;
        AnimationHandle {
            generation: self.generation,
            kind,
        }
    }

    fn cancel_current(&mut self) {
        if let Some(handle) = self.current_animation.take() {
            self.animator.cancel(handle);
        }
    }

    /// Start fading in. No-op while already fading in or visible.
    pub fn show(&mut self) {
        if self.torn_down || self.state.is_showing() {
            return;
        }
        self.cancel_current();
        if !self.shots.has_shot() {
            self.update_bitmap();
        }
        self.set_state(AnimationState::FadingIn);
        self.emit(ShowcaseEvent::Shown);

        self.surface_visible = true;
        let handle = self.next_handle(FadeKind::In);
        self.current_animation = Some(handle);
        if self.animator.fade_in(self.fade_in, handle) == Progress::Finished {
            self.complete_fade(handle);
        }
    }

    /// Release the mask, persist the one-shot flag, notify and start fading out.
    ///
    /// The flag is persisted on every call; the fade only starts when the
    /// overlay is fading in or visible.
    pub fn hide(&mut self) {
        self.compositor.release();
        if self.shots.store_shot() {
            emit_log(LogLevel::Debug, "one-shot flag stored");
        }
        if !self.state.is_showing() {
            return;
        }
        self.cancel_current();
        self.emit(ShowcaseEvent::HideRequested);
        self.set_state(AnimationState::FadingOut);

        let handle = self.next_handle(FadeKind::Out);
        self.current_animation = Some(handle);
        if self.animator.fade_out(self.fade_out, handle) == Progress::Finished {
            self.complete_fade(handle);
        }
    }

    /// Go straight to hidden, without events or animation.
    pub fn hide_immediate(&mut self) {
        self.cancel_current();
        self.set_state(AnimationState::Hidden);
        self.surface_visible = false;
    }

    /// Host attachment: show, or stay hidden if this overlay was already shot.
    pub fn attach(&mut self) {
        if self.shots.has_shot() {
            self.hide_immediate();
        } else {
            self.show();
        }
    }

    /// Deliver a fade completion. Completions for superseded fades are ignored.
    pub fn complete_fade(&mut self, handle: AnimationHandle) {
        if self.current_animation != Some(handle) {
            emit_log(
                LogLevel::Debug,
                &format!("ignoring stale completion {handle:?}"),
            );
            return;
        }
        self.current_animation = None;
        match handle.kind {
            FadeKind::In => self.set_state(AnimationState::Visible),
            FadeKind::Out => {
                self.set_state(AnimationState::Hidden);
                self.surface_visible = false;
                self.emit(ShowcaseEvent::DidHide);
            }
        }
    }

    // ---------------------------------------------------------------
    // Touch
    // ---------------------------------------------------------------

    /// Route one touch. Returns whether the overlay consumed it.
    pub fn on_touch(&mut self, event: TouchEvent) -> TouchOutcome {
        if !self.surface_visible {
            return TouchOutcome::PassThrough;
        }
        let outcome = self.route_touch(event);
        if outcome.is_handled() {
            self.emit(ShowcaseEvent::TouchBlocked {
                x: event.x,
                y: event.y,
            });
        }
        outcome
    }

    fn route_touch(&mut self, event: TouchEvent) -> TouchOutcome {
        if self.touch.contains(TouchFlags::BLOCK_ALL_TOUCHES) {
            return TouchOutcome::Consumed;
        }
        let radius = f64::from(self.compositor.blocked_radius());
        let block = self.touch.contains(TouchFlags::BLOCK_TOUCHES);
        let hide_outside = self.touch.contains(TouchFlags::HIDE_ON_TOUCH_OUTSIDE);
        let distances: Vec<f64> = self
            .showcases
            .iter()
            .filter(|p| p.is_valid())
            .map(|p| p.distance_to(event.x, event.y))
            .collect();
        if distances.is_empty() {
            return TouchOutcome::PassThrough;
        }

        let consumed = match self.touch_policy {
            TouchVerdictPolicy::LastPointWins => {
                let mut consumed = false;
                for distance in distances {
                    if event.is_up() && hide_outside && distance > radius {
                        return self.hide_from_touch();
                    }
                    consumed = block && distance > radius;
                }
                consumed
            }
            TouchVerdictPolicy::OutsideAll => {
                let outside = distances.iter().all(|d| *d > radius);
                if outside && event.is_up() && hide_outside {
                    return self.hide_from_touch();
                }
                block && outside
            }
        };
        if consumed {
            TouchOutcome::Consumed
        } else {
            TouchOutcome::PassThrough
        }
    }

    /// Hide in response to a release outside the holes. Reports a hide only
    /// if the overlay was showing; a second release during fade-out is just
    /// consumed.
    fn hide_from_touch(&mut self) -> TouchOutcome {
        let was_showing = self.state.is_showing();
        self.hide();
        if was_showing {
            TouchOutcome::ConsumedAndHid
        } else {
            TouchOutcome::Consumed
        }
    }

    pub fn set_blocks_touches(&mut self, block: bool) {
        self.touch.set(TouchFlags::BLOCK_TOUCHES, block);
    }

    pub fn set_hide_on_touch_outside(&mut self, hide: bool) {
        self.touch.set(TouchFlags::HIDE_ON_TOUCH_OUTSIDE, hide);
    }

    pub fn set_block_all_touches(&mut self, block: bool) {
        self.touch.set(TouchFlags::BLOCK_ALL_TOUCHES, block);
    }

    pub fn set_touch_policy(&mut self, policy: TouchVerdictPolicy) {
        self.touch_policy = policy;
    }

    // ---------------------------------------------------------------
    // End control
    // ---------------------------------------------------------------

    /// Swap the dismiss control. Fails if the control cannot be clicked.
    pub fn replace_end_control(&mut self, control: EndControl) -> Result<()> {
        control.validate()?;
        self.end_control = control;
        Ok(())
    }

    pub fn set_button_text(&mut self, text: impl Into<String>) {
        self.end_control.label = text.into();
    }

    pub fn hide_button(&mut self) {
        self.end_control.visible = false;
    }

    pub fn show_button(&mut self) {
        self.end_control.visible = true;
    }

    /// Run `handler` instead of hiding when the end control is clicked.
    /// Ignored once the overlay has been shot.
    pub fn override_button_click(&mut self, handler: impl FnMut() + 'static) {
        if self.shots.has_shot() {
            return;
        }
        self.button_override = Some(Box::new(handler));
    }

    pub fn clear_button_override(&mut self) {
        self.button_override = None;
    }

    /// Click the end control. Returns `false` if it is hidden.
    pub fn click_end_control(&mut self) -> bool {
        if !self.end_control.visible {
            return false;
        }
        match self.button_override.as_mut() {
            Some(handler) => handler(),
            None => self.hide(),
        }
        true
    }

    // ---------------------------------------------------------------
    // Style
    // ---------------------------------------------------------------

    pub fn set_fade_durations(&mut self, fade_in: Duration, fade_out: Duration) {
        self.fade_in = fade_in;
        self.fade_out = fade_out;
    }

    pub fn set_scale_multiplier(&mut self, scale: f32) -> Result<()> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(Error::InvalidArgument(format!(
                "scale multiplier must be finite and positive, got {scale}"
            )));
        }
        self.scale_multiplier = scale;
        Ok(())
    }

    /// Replace the drawer, carrying over the current colours.
    pub fn set_showcase_drawer(&mut self, drawer: Box<dyn ShowcaseDrawer>) {
        self.compositor.set_drawer(drawer);
        self.compositor
            .set_colours(self.showcase_colour, self.background_colour);
        self.text.invalidate();
    }

    pub fn set_showcase_colour(&mut self, colour: Rgba) {
        self.showcase_colour = colour;
        self.compositor.set_colours(colour, self.background_colour);
    }

    pub fn set_background_colour(&mut self, colour: Rgba) {
        self.background_colour = colour;
        self.compositor.set_colours(self.showcase_colour, colour);
    }

    pub fn set_content_title(&mut self, title: impl Into<String>) {
        self.text.set_title(title);
    }

    pub fn set_content_text(&mut self, text: impl Into<String>) {
        self.text.set_detail(text);
    }

    pub fn set_title_paint(&mut self, paint: TextPaint) {
        self.text.set_title_paint(paint);
    }

    pub fn set_detail_paint(&mut self, paint: TextPaint) {
        self.text.set_detail_paint(paint);
    }

    pub fn set_title_alignment(&mut self, alignment: TextAlignment) {
        self.text.set_title_alignment(alignment);
    }

    pub fn set_detail_alignment(&mut self, alignment: TextAlignment) {
        self.text.set_detail_alignment(alignment);
    }

    pub fn set_text_compensation(&mut self, width: f32, height: f32) {
        self.text.set_compensation(width, height);
    }

    pub fn set_center_text(&mut self, center: bool) {
        self.text.set_center_text(center);
    }

    pub fn force_text_position(&mut self, position: TextPosition) {
        self.text.force_position(position);
    }
}

impl fmt::Debug for OverlayController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverlayController")
            .field("state", &self.state)
            .field("showcases", &self.showcases)
            .field("pending", &self.pending.len())
            .field("has_no_target", &self.has_no_target)
            .field("size", &(self.width, self.height))
            .field("touch", &self.touch)
            .field("shots", &self.shots)
            .field("compositor", &self.compositor)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::InstantAnimations;
    use crate::drawer::MaterialShowcaseDrawer;
    use crate::shot::MemoryShotStore;
    use crate::target::PointTarget;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn overlay(config: OverlayConfig) -> OverlayController {
        let mut o = OverlayController::new(
            config,
            Box::new(MaterialShowcaseDrawer::with_radius(40.0)),
            Box::new(InstantAnimations),
            Box::new(MemoryShotStore::new()),
        )
        .unwrap();
        o.on_global_layout(400, 400);
        o
    }

    fn place(o: &mut OverlayController, points: &[(i32, i32)]) {
        let now = Instant::now();
        let targets: Vec<Box<dyn Target>> = points
            .iter()
            .map(|&(x, y)| Box::new(PointTarget::new(x, y)) as Box<dyn Target>)
            .collect();
        o.set_showcase(targets, false, now);
        o.tick(now + Duration::from_millis(100));
    }

    fn recorder(o: &mut OverlayController) -> Rc<RefCell<Vec<ShowcaseEvent>>> {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        o.set_on_showcase_event_listener(move |e: &ShowcaseEvent| sink.borrow_mut().push(*e));
        events
    }

    // ============================================
    // Construction
    // ============================================

    #[test]
    fn test_new_rejects_invalid_config() {
        let result = OverlayController::new(
            OverlayConfig {
                scale_multiplier: 0.0,
                ..OverlayConfig::default()
            },
            Box::new(MaterialShowcaseDrawer::new()),
            Box::new(InstantAnimations),
            Box::new(MemoryShotStore::new()),
        );
        assert!(matches!(result, Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_layout_allocates_mask() {
        let o = overlay(OverlayConfig::default());
        assert!(o.has_buffer());
        assert_eq!(o.mask().map(PixelBuffer::size), Some((400, 400)));
    }

    // ============================================
    // Deferred showcases
    // ============================================

    #[test]
    fn test_showcase_waits_for_delay() {
        let mut o = overlay(OverlayConfig::default());
        let now = Instant::now();
        o.set_showcase(vec![Box::new(PointTarget::new(10, 10))], false, now);
        o.tick(now + Duration::from_millis(99));
        assert!(o.showcases().is_empty());
        assert_eq!(o.pending_showcases(), 1);
        o.tick(now + Duration::from_millis(100));
        assert_eq!(o.showcases(), &[ShowcasePoint::new(10, 10)]);
    }

    #[test]
    fn test_points_append() {
        let mut o = overlay(OverlayConfig::default());
        place(&mut o, &[(10, 10)]);
        place(&mut o, &[(20, 20), (30, 30)]);
        assert_eq!(o.showcases().len(), 3);
        assert!(o.has_showcase_view());
    }

    #[test]
    fn test_empty_targets_is_text_only() {
        let mut o = overlay(OverlayConfig::default());
        place(&mut o, &[]);
        assert!(o.has_no_target());
        assert!(!o.has_showcase_view());
    }

    #[test]
    fn test_teardown_cancels_pending() {
        let mut o = overlay(OverlayConfig::default());
        let now = Instant::now();
        o.set_showcase(vec![Box::new(PointTarget::new(10, 10))], false, now);
        o.teardown();
        o.tick(now + Duration::from_secs(1));
        assert!(o.showcases().is_empty());
        assert!(!o.has_buffer());
        o.show();
        assert_eq!(o.state(), AnimationState::Hidden);
    }

    // ============================================
    // State machine
    // ============================================

    #[test]
    fn test_show_hide_cycle_with_instant_animations() {
        let mut o = overlay(OverlayConfig::default());
        let events = recorder(&mut o);
        o.show();
        assert_eq!(o.state(), AnimationState::Visible);
        assert!(o.is_surface_visible());
        o.hide();
        assert_eq!(o.state(), AnimationState::Hidden);
        assert!(!o.is_surface_visible());
        assert!(!o.has_buffer());
        assert_eq!(
            *events.borrow(),
            vec![
                ShowcaseEvent::Shown,
                ShowcaseEvent::HideRequested,
                ShowcaseEvent::DidHide
            ]
        );
    }

    #[test]
    fn test_hide_when_hidden_emits_nothing() {
        let mut o = overlay(OverlayConfig::default());
        let events = recorder(&mut o);
        o.hide();
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn test_attach_when_shot_stays_hidden() {
        let store = Rc::new(MemoryShotStore::new());
        store.store_shot(9);
        let mut o = OverlayController::new(
            OverlayConfig::default().single_shot(9),
            Box::new(MaterialShowcaseDrawer::new()),
            Box::new(InstantAnimations),
            Box::new(Rc::clone(&store)),
        )
        .unwrap();
        let events = recorder(&mut o);
        o.attach();
        assert_eq!(o.state(), AnimationState::Hidden);
        assert!(events.borrow().is_empty());
    }

    // ============================================
    // Touch
    // ============================================

    #[test]
    fn test_touch_outside_radius_is_consumed() {
        let mut o = overlay(OverlayConfig::default());
        place(&mut o, &[(100, 100)]);
        o.show();
        assert_eq!(o.on_touch(TouchEvent::down(130.0, 140.0)), TouchOutcome::Consumed);
        assert_eq!(o.on_touch(TouchEvent::down(110.0, 110.0)), TouchOutcome::PassThrough);
    }

    #[test]
    fn test_touch_passes_when_hidden() {
        let mut o = overlay(OverlayConfig::default());
        place(&mut o, &[(100, 100)]);
        assert_eq!(o.on_touch(TouchEvent::down(300.0, 300.0)), TouchOutcome::PassThrough);
    }

    #[test]
    fn test_last_point_wins_vs_outside_all() {
        let mut o = overlay(OverlayConfig::default());
        place(&mut o, &[(100, 100), (300, 300)]);
        o.show();
        // Inside the first hole, outside the last one.
        let touch = TouchEvent::down(100.0, 100.0);
        assert_eq!(o.on_touch(touch), TouchOutcome::Consumed);
        o.set_touch_policy(TouchVerdictPolicy::OutsideAll);
        assert_eq!(o.on_touch(touch), TouchOutcome::PassThrough);
    }

    #[test]
    fn test_hide_on_touch_outside() {
        let mut o = overlay(OverlayConfig::default().hide_on_touch_outside());
        place(&mut o, &[(100, 100)]);
        o.show();
        assert_eq!(o.on_touch(TouchEvent::down(300.0, 300.0)), TouchOutcome::Consumed);
        assert_eq!(
            o.on_touch(TouchEvent::up(300.0, 300.0)),
            TouchOutcome::ConsumedAndHid
        );
        assert_eq!(o.state(), AnimationState::Hidden);
    }

    #[test]
    fn test_block_all_touches() {
        let mut o = overlay(OverlayConfig::default());
        place(&mut o, &[(100, 100)]);
        o.show();
        o.set_block_all_touches(true);
        assert_eq!(o.on_touch(TouchEvent::down(100.0, 100.0)), TouchOutcome::Consumed);
    }

    // ============================================
    // End control
    // ============================================

    #[test]
    fn test_end_control_click_hides() {
        let mut o = overlay(OverlayConfig::default());
        o.show();
        assert!(o.click_end_control());
        assert_eq!(o.state(), AnimationState::Hidden);
    }

    #[test]
    fn test_end_control_override_and_hidden_button() {
        let mut o = overlay(OverlayConfig::default());
        o.show();
        let clicks = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&clicks);
        o.override_button_click(move || *counter.borrow_mut() += 1);
        assert!(o.click_end_control());
        assert_eq!(*clicks.borrow(), 1);
        assert_eq!(o.state(), AnimationState::Visible);

        o.hide_button();
        assert!(!o.click_end_control());
        assert_eq!(*clicks.borrow(), 1);
    }

    #[test]
    fn test_replace_end_control_validates() {
        let mut o = overlay(OverlayConfig::default());
        let bad = EndControl {
            clickable: false,
            ..EndControl::new("Nope")
        };
        assert!(matches!(o.replace_end_control(bad), Err(Error::InvalidArgument(_))));
        assert_eq!(o.end_control().label, "OK");
        assert!(o.replace_end_control(EndControl::new("Got it")).is_ok());
        assert_eq!(o.end_control().label, "Got it");
    }

    #[test]
    fn test_scale_multiplier_validation() {
        let mut o = overlay(OverlayConfig::default());
        assert!(o.set_scale_multiplier(2.0).is_ok());
        assert!(o.set_scale_multiplier(f32::NAN).is_err());
    }
}
