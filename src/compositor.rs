//! Mask compositor: owns the offscreen mask buffer and delegates painting
//! to the active [`ShowcaseDrawer`].

use crate::buffer::PixelBuffer;
use crate::color::Rgba;
use crate::drawer::ShowcaseDrawer;
use crate::event::{LogLevel, emit_log};

/// Offscreen mask plus the drawer that paints into it.
#[derive(Debug)]
pub struct MaskCompositor {
    drawer: Box<dyn ShowcaseDrawer>,
    buffer: Option<PixelBuffer>,
}

impl MaskCompositor {
    #[must_use]
    pub fn new(drawer: Box<dyn ShowcaseDrawer>) -> Self {
        Self {
            drawer,
            buffer: None,
        }
    }

    /// Make sure a buffer of exactly `width` x `height` exists.
    ///
    /// Allocates on first use and reallocates only when the size differs,
    /// releasing the old buffer first. Zero-sized requests are ignored.
    /// Returns `true` when a new buffer was allocated.
    pub fn ensure_buffer(&mut self, width: u32, height: u32) -> bool {
        if width == 0 || height == 0 {
            return false;
        }
        if self.buffer.as_ref().is_some_and(|b| b.size() == (width, height)) {
            return false;
        }
        self.release();
        self.buffer = Some(PixelBuffer::new(width, height));
        emit_log(
            LogLevel::Debug,
            &format!("mask buffer allocated at {width}x{height}"),
        );
        true
    }

    /// Drop the mask buffer. Returns `true` if one was held.
    pub fn release(&mut self) -> bool {
        let released = self.buffer.take().is_some();
        if released {
            emit_log(LogLevel::Debug, "mask buffer released");
        }
        released
    }

    #[must_use]
    pub fn has_buffer(&self) -> bool {
        self.buffer.is_some()
    }

    #[must_use]
    pub fn buffer(&self) -> Option<&PixelBuffer> {
        self.buffer.as_ref()
    }

    /// Reset the mask to the background colour.
    pub fn erase(&mut self) {
        if let Some(buffer) = self.buffer.as_mut() {
            self.drawer.erase(buffer);
        }
    }

    /// Carve one hole at (`x`, `y`).
    pub fn draw_showcase(&mut self, x: f32, y: f32, scale: f32) {
        if let Some(buffer) = self.buffer.as_mut() {
            self.drawer.draw_showcase(buffer, x, y, scale);
        }
    }

    /// Composite the mask onto `surface` at `opacity`.
    pub fn draw_to_canvas(&self, surface: &mut PixelBuffer, opacity: f32) {
        if let Some(buffer) = self.buffer.as_ref() {
            self.drawer.draw_to_canvas(surface, buffer, opacity);
        }
    }

    #[must_use]
    pub fn drawer(&self) -> &dyn ShowcaseDrawer {
        self.drawer.as_ref()
    }

    /// Swap the drawer, keeping the buffer.
    pub fn set_drawer(&mut self, drawer: Box<dyn ShowcaseDrawer>) {
        self.drawer = drawer;
    }

    pub fn set_colours(&mut self, showcase: Rgba, background: Rgba) {
        self.drawer.set_showcase_colour(showcase);
        self.drawer.set_background_colour(background);
    }

    #[must_use]
    pub fn blocked_radius(&self) -> f32 {
        self.drawer.blocked_radius()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drawer::MaterialShowcaseDrawer;

    fn compositor() -> MaskCompositor {
        let mut c = MaskCompositor::new(Box::new(MaterialShowcaseDrawer::with_radius(5.0)));
        c.set_colours(Rgba::HOLO_BLUE, Rgba::from_argb(128, 80, 80, 80));
        c
    }

    // ============================================
    // Buffer lifecycle
    // ============================================

    #[test]
    fn test_allocates_once_per_size() {
        let mut c = compositor();
        assert!(!c.has_buffer());
        assert!(c.ensure_buffer(20, 10));
        assert!(!c.ensure_buffer(20, 10));
        assert!(c.ensure_buffer(30, 10));
        assert_eq!(c.buffer().map(PixelBuffer::size), Some((30, 10)));
    }

    #[test]
    fn test_zero_size_is_ignored() {
        let mut c = compositor();
        assert!(!c.ensure_buffer(0, 10));
        assert!(!c.has_buffer());
    }

    #[test]
    fn test_release_then_reallocate() {
        let mut c = compositor();
        c.ensure_buffer(8, 8);
        assert!(c.release());
        assert!(!c.release());
        assert!(!c.has_buffer());
        assert!(c.ensure_buffer(8, 8));
    }

    // ============================================
    // Painting
    // ============================================

    #[test]
    fn test_paint_without_buffer_is_noop() {
        let mut c = compositor();
        c.erase();
        c.draw_showcase(4.0, 4.0, 1.0);
        let mut surface = PixelBuffer::filled(4, 4, Rgba::WHITE);
        c.draw_to_canvas(&mut surface, 1.0);
        assert!(surface.pixels().iter().all(|p| *p == Rgba::WHITE));
    }

    #[test]
    fn test_erase_draw_is_repeatable() {
        let mut c = compositor();
        c.ensure_buffer(40, 40);
        let frame = |c: &mut MaskCompositor| {
            c.erase();
            c.draw_showcase(10.0, 10.0, 1.0);
            c.draw_showcase(30.0, 25.0, 1.0);
            c.buffer().cloned()
        };
        let first = frame(&mut c).unwrap();
        let second = frame(&mut c).unwrap();
        assert!(first.bits_eq(&second));
    }

    #[test]
    fn test_blit_keeps_hole_clear() {
        let mut c = compositor();
        c.ensure_buffer(20, 20);
        c.erase();
        c.draw_showcase(10.0, 10.0, 1.0);
        let mut surface = PixelBuffer::filled(20, 20, Rgba::WHITE);
        c.draw_to_canvas(&mut surface, 1.0);
        assert_eq!(surface.get(10, 10), Some(Rgba::WHITE));
        assert_ne!(surface.get(0, 0), Some(Rgba::WHITE));
    }
}
