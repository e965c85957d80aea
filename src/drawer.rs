//! Showcase drawers: the pluggable look of a showcase hole.
//!
//! The overlay only talks to [`ShowcaseDrawer`]; which style is in use
//! (holo ring, translucent halo, plain material disc) never leaks into the
//! controller. Every drawer carves holes with [`BlendMode::Replace`], so
//! drawing several holes in sequence composites them into one buffer and
//! repeating the same sequence after an erase is pixel-identical.

use crate::buffer::{BlendMode, PixelBuffer};
use crate::color::Rgba;
use std::fmt;

/// Default hole radius of the holo-style drawer.
pub const STANDARD_RADIUS: f32 = 94.0;
/// Width of the holo ring drawn around the hole.
pub const STANDARD_RING_WIDTH: f32 = 6.0;
/// Inner (clear) radius of the new-style drawer.
pub const NEW_STYLE_INNER_RADIUS: f32 = 96.0;
/// Outer (translucent halo) radius of the new-style drawer.
pub const NEW_STYLE_OUTER_RADIUS: f32 = 128.0;
/// Halo alpha of the new-style drawer (60%).
pub const NEW_STYLE_HALO_ALPHA: u8 = 153;
/// Hole radius of the material drawer.
pub const MATERIAL_RADIUS: f32 = 128.0;

/// Drawing capability for one showcase style.
pub trait ShowcaseDrawer: fmt::Debug {
    fn set_showcase_colour(&mut self, colour: Rgba);

    fn set_background_colour(&mut self, colour: Rgba);

    /// Reset every pixel of `buffer` to the background colour.
    fn erase(&self, buffer: &mut PixelBuffer);

    /// Paint one hole centred at (`x`, `y`), scaled by `scale`.
    fn draw_showcase(&self, buffer: &mut PixelBuffer, x: f32, y: f32, scale: f32);

    /// Composite the finished mask onto the presentation surface at
    /// `opacity` in `[0, 1]`.
    fn draw_to_canvas(&self, surface: &mut PixelBuffer, buffer: &PixelBuffer, opacity: f32) {
        surface.blit_over(buffer, opacity);
    }

    /// Footprint width used for text placement.
    fn showcase_width(&self) -> u32;

    /// Footprint height used for text placement.
    fn showcase_height(&self) -> u32;

    /// Radius shared by touch hit-testing and arrow end-point offsetting.
    fn blocked_radius(&self) -> f32;
}

fn diameter(radius: f32) -> u32 {
    (radius * 2.0).round().max(0.0) as u32
}

/// Holo style: a clear hole ringed in the showcase colour.
#[derive(Clone, Debug)]
pub struct StandardShowcaseDrawer {
    radius: f32,
    ring_width: f32,
    showcase_colour: Rgba,
    background_colour: Rgba,
}

impl StandardShowcaseDrawer {
    #[must_use]
    pub fn new() -> Self {
        Self::with_radius(STANDARD_RADIUS)
    }

    #[must_use]
    pub fn with_radius(radius: f32) -> Self {
        Self {
            radius,
            ring_width: STANDARD_RING_WIDTH,
            showcase_colour: Rgba::HOLO_BLUE,
            background_colour: Rgba::TRANSPARENT,
        }
    }
}

impl Default for StandardShowcaseDrawer {
    fn default() -> Self {
        Self::new()
    }
}

impl ShowcaseDrawer for StandardShowcaseDrawer {
    fn set_showcase_colour(&mut self, colour: Rgba) {
        self.showcase_colour = colour;
    }

    fn set_background_colour(&mut self, colour: Rgba) {
        self.background_colour = colour;
    }

    fn erase(&self, buffer: &mut PixelBuffer) {
        buffer.fill(self.background_colour);
    }

    fn draw_showcase(&self, buffer: &mut PixelBuffer, x: f32, y: f32, scale: f32) {
        let inner = self.radius * scale;
        let outer = (self.radius + self.ring_width) * scale;
        buffer.fill_circle(x, y, outer, self.background_colour, BlendMode::Replace);
        buffer.fill_ring(x, y, inner, outer, self.showcase_colour);
        buffer.fill_circle(x, y, inner, Rgba::TRANSPARENT, BlendMode::Replace);
    }

    fn showcase_width(&self) -> u32 {
        diameter(self.radius + self.ring_width)
    }

    fn showcase_height(&self) -> u32 {
        diameter(self.radius + self.ring_width)
    }

    fn blocked_radius(&self) -> f32 {
        self.radius
    }
}

/// New style: a translucent halo in the showcase colour around a clear core.
#[derive(Clone, Debug)]
pub struct NewShowcaseDrawer {
    inner_radius: f32,
    outer_radius: f32,
    showcase_colour: Rgba,
    background_colour: Rgba,
}

impl NewShowcaseDrawer {
    #[must_use]
    pub fn new() -> Self {
        Self::with_radii(NEW_STYLE_INNER_RADIUS, NEW_STYLE_OUTER_RADIUS)
    }

    #[must_use]
    pub fn with_radii(inner_radius: f32, outer_radius: f32) -> Self {
        Self {
            inner_radius,
            outer_radius: outer_radius.max(inner_radius),
            showcase_colour: Rgba::HOLO_BLUE,
            background_colour: Rgba::TRANSPARENT,
        }
    }

    fn halo_colour(&self) -> Rgba {
        self.showcase_colour
            .with_alpha(f32::from(NEW_STYLE_HALO_ALPHA) / 255.0)
    }
}

impl Default for NewShowcaseDrawer {
    fn default() -> Self {
        Self::new()
    }
}

impl ShowcaseDrawer for NewShowcaseDrawer {
    fn set_showcase_colour(&mut self, colour: Rgba) {
        self.showcase_colour = colour;
    }

    fn set_background_colour(&mut self, colour: Rgba) {
        self.background_colour = colour;
    }

    fn erase(&self, buffer: &mut PixelBuffer) {
        buffer.fill(self.background_colour);
    }

    fn draw_showcase(&self, buffer: &mut PixelBuffer, x: f32, y: f32, scale: f32) {
        buffer.fill_circle(x, y, self.outer_radius * scale, self.halo_colour(), BlendMode::Replace);
        buffer.fill_circle(x, y, self.inner_radius * scale, Rgba::TRANSPARENT, BlendMode::Replace);
    }

    fn showcase_width(&self) -> u32 {
        diameter(self.outer_radius)
    }

    fn showcase_height(&self) -> u32 {
        diameter(self.outer_radius)
    }

    fn blocked_radius(&self) -> f32 {
        self.inner_radius
    }
}

/// Material style: a plain clear disc.
#[derive(Clone, Debug)]
pub struct MaterialShowcaseDrawer {
    radius: f32,
    background_colour: Rgba,
}

impl MaterialShowcaseDrawer {
    #[must_use]
    pub fn new() -> Self {
        Self::with_radius(MATERIAL_RADIUS)
    }

    #[must_use]
    pub fn with_radius(radius: f32) -> Self {
        Self {
            radius,
            background_colour: Rgba::TRANSPARENT,
        }
    }
}

impl Default for MaterialShowcaseDrawer {
    fn default() -> Self {
        Self::new()
    }
}

impl ShowcaseDrawer for MaterialShowcaseDrawer {
    // No tint: the material hole is a plain cut-out.
    fn set_showcase_colour(&mut self, _colour: Rgba) {}

    fn set_background_colour(&mut self, colour: Rgba) {
        self.background_colour = colour;
    }

    fn erase(&self, buffer: &mut PixelBuffer) {
        buffer.fill(self.background_colour);
    }

    fn draw_showcase(&self, buffer: &mut PixelBuffer, x: f32, y: f32, scale: f32) {
        buffer.fill_circle(x, y, self.radius * scale, Rgba::TRANSPARENT, BlendMode::Replace);
    }

    fn showcase_width(&self) -> u32 {
        diameter(self.radius)
    }

    fn showcase_height(&self) -> u32 {
        diameter(self.radius)
    }

    fn blocked_radius(&self) -> f32 {
        self.radius
    }
}
