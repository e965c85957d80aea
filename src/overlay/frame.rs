//! Per-frame composition.

use super::OverlayController;
use crate::arrow::{Arrow, PRIMARY_ANCHOR_INDEX};
use crate::buffer::PixelBuffer;
use crate::event::{LogLevel, emit_log};
use crate::geometry::Rect;
use crate::text::TextFrame;
use std::time::Instant;

/// What one call to [`OverlayController::draw`] did.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameReport {
    /// The overlay drew nothing; the host should draw its default background.
    pub bypassed: bool,
    pub holes_drawn: usize,
    /// Opacity the mask and arrows were composited at. Hosts apply it to
    /// the text they rasterise.
    pub opacity: f32,
    /// Text to rasterise, present whenever the frame was not bypassed.
    pub text: Option<TextFrame>,
    /// Arrows already stroked onto the surface.
    pub arrows: Vec<Arrow>,
}

impl FrameReport {
    fn bypassed() -> Self {
        Self {
            bypassed: true,
            ..Self::default()
        }
    }
}

impl OverlayController {
    /// Lazy text recalculation, run before any compositing.
    pub fn on_pre_draw(&mut self) {
        let primary = self.showcases.get(PRIMARY_ANCHOR_INDEX).copied();
        let rect = match primary {
            Some(p) if p.is_valid() && self.has_showcase_view() => {
                self.area
                    .calculate_showcase_rect(p.x as f32, p.y as f32, self.compositor.drawer());
                self.area.showcase_rect()
            }
            _ => Rect::default(),
        };
        if rect != self.text_rect {
            self.text_rect = rect;
            self.text.invalidate();
        }
        self.text
            .recalculate_if_needed(self.width, self.height, self.text_rect);
    }

    /// Whether this frame must fall back to the host's default drawing.
    #[must_use]
    pub fn should_bypass(&self) -> bool {
        !self.compositor.has_buffer()
            || self.shots.has_shot()
            || self.showcases.iter().any(|p| p.is_negative())
    }

    /// Compose one frame onto `surface`.
    ///
    /// Order: bypass check, erase, holes and blit, text, arrows. Fades are
    /// sampled at the time of the latest [`tick`](OverlayController::tick).
    pub fn draw(&mut self, surface: &mut PixelBuffer) -> FrameReport {
        self.on_pre_draw();

        if self.should_bypass() {
            if self.state.is_showing() && !self.compositor.has_buffer() {
                emit_log(LogLevel::Warn, "frame bypassed: no mask buffer while showing");
            }
            return FrameReport::bypassed();
        }

        let opacity = self.opacity(self.last_tick.unwrap_or_else(Instant::now));
        self.compositor.erase();

        let mut holes_drawn = 0;
        if !self.has_no_target {
            for p in self.showcases.iter().filter(|p| p.is_valid()) {
                self.compositor
                    .draw_showcase(p.x as f32, p.y as f32, self.scale_multiplier);
                holes_drawn += 1;
            }
            self.compositor.draw_to_canvas(surface, opacity);
        }

        let text = self.text.layout();

        let mut arrows = Vec::new();
        if !self.has_no_target && !self.showcases.is_empty() {
            arrows = self.arrows.arrows_for(
                &text.placement,
                &self.showcases,
                self.compositor.blocked_radius(),
            );
            for arrow in &arrows {
                self.arrows.draw(arrow, surface, opacity);
            }
        }

        FrameReport {
            bypassed: false,
            holes_drawn,
            opacity,
            text: Some(text),
            arrows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::InstantAnimations;
    use crate::color::Rgba;
    use crate::config::OverlayConfig;
    use crate::drawer::MaterialShowcaseDrawer;
    use crate::geometry::ShowcasePoint;
    use crate::shot::MemoryShotStore;
    use crate::text::TextPosition;

    fn overlay() -> OverlayController {
        let mut o = OverlayController::new(
            OverlayConfig::default(),
            Box::new(MaterialShowcaseDrawer::with_radius(20.0)),
            Box::new(InstantAnimations),
            Box::new(MemoryShotStore::new()),
        )
        .unwrap();
        o.on_global_layout(200, 200);
        o
    }

    #[test]
    fn test_bypass_without_buffer() {
        let mut o = OverlayController::new(
            OverlayConfig::default(),
            Box::new(MaterialShowcaseDrawer::new()),
            Box::new(InstantAnimations),
            Box::new(MemoryShotStore::new()),
        )
        .unwrap();
        let mut surface = PixelBuffer::filled(10, 10, Rgba::WHITE);
        assert!(o.draw(&mut surface).bypassed);
        assert!(surface.pixels().iter().all(|p| *p == Rgba::WHITE));
    }

    #[test]
    fn test_bypass_on_negative_point() {
        let mut o = overlay();
        o.set_showcase_position(ShowcasePoint::new(50, 50));
        o.set_showcase_position(ShowcasePoint::new(-1, 30));
        let mut surface = PixelBuffer::filled(200, 200, Rgba::WHITE);
        let report = o.draw(&mut surface);
        assert!(report.bypassed);
        assert!(report.arrows.is_empty());
        assert!(surface.pixels().iter().all(|p| *p == Rgba::WHITE));
    }

    #[test]
    fn test_removed_point_is_skipped_not_bypassed() {
        let mut o = overlay();
        o.set_showcase_position(ShowcasePoint::new(50, 50));
        o.set_showcase_position(ShowcasePoint::REMOVED);
        let mut surface = PixelBuffer::filled(200, 200, Rgba::WHITE);
        let report = o.draw(&mut surface);
        assert!(!report.bypassed);
        assert_eq!(report.holes_drawn, 1);
        assert!(report.arrows.is_empty());
    }

    #[test]
    fn test_hole_leaves_surface_clear() {
        let mut o = overlay();
        o.set_showcase_position(ShowcasePoint::new(50, 50));
        let mut surface = PixelBuffer::filled(200, 200, Rgba::WHITE);
        let report = o.draw(&mut surface);
        assert_eq!(report.holes_drawn, 1);
        assert_eq!(surface.get(50, 50), Some(Rgba::WHITE));
        assert_ne!(surface.get(150, 5), Some(Rgba::WHITE));
    }

    #[test]
    fn test_text_recalculated_before_compositing() {
        let mut o = overlay();
        o.set_showcase_position(ShowcasePoint::new(50, 50));
        o.on_pre_draw();
        let before = o.text_placement();
        o.force_text_position(TextPosition::Below);
        let mut surface = PixelBuffer::new(200, 200);
        let report = o.draw(&mut surface);
        let placement = report.text.unwrap().placement;
        assert_ne!(placement, before);
        assert_eq!(placement.position, TextPosition::Below);
        assert_eq!(placement.y, 70.0 + 24.0);
    }

    #[test]
    fn test_arrows_for_secondary_points() {
        let mut o = overlay();
        for p in [(20, 20), (60, 20), (100, 20), (140, 20)] {
            o.set_showcase_position(p.into());
        }
        let mut surface = PixelBuffer::new(200, 200);
        let report = o.draw(&mut surface);
        assert_eq!(report.holes_drawn, 4);
        assert_eq!(report.arrows.len(), 3);
    }

    #[test]
    fn test_shot_overlay_bypasses() {
        let mut o = OverlayController::new(
            OverlayConfig::default().single_shot(5),
            Box::new(MaterialShowcaseDrawer::with_radius(20.0)),
            Box::new(InstantAnimations),
            Box::new(MemoryShotStore::new()),
        )
        .unwrap();
        o.on_global_layout(200, 200);
        o.set_showcase_position(ShowcasePoint::new(50, 50));
        o.show();
        o.hide();
        o.on_global_layout(200, 200);
        assert!(!o.has_buffer());
        let mut surface = PixelBuffer::new(200, 200);
        assert!(o.draw(&mut surface).bypassed);
    }
}
