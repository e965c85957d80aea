//! Raster surfaces for mask compositing.
//!
//! [`PixelBuffer`] is the one raster type in the crate. It backs both the
//! offscreen mask buffer owned by the compositor and the presentation surface
//! handed to [`OverlayController::draw`](crate::overlay::OverlayController::draw).
//!
//! Two write modes exist:
//! - [`BlendMode::Replace`] writes the colour as-is. Holes are carved this way,
//!   so painting the same hole twice leaves the buffer unchanged.
//! - [`BlendMode::Over`] composites with Porter-Duff "over", used for rings,
//!   strokes and the final blit.

mod path;

pub use path::{Path, StrokeStyle};

use crate::color::Rgba;
use crate::error::{Error, Result};

/// How a colour is written into a pixel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BlendMode {
    /// Overwrite the destination (alpha included).
    Replace,
    /// Porter-Duff "over".
    #[default]
    Over,
}

/// A 2D RGBA pixel surface in row-major order.
#[derive(Clone, Debug, PartialEq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
}

impl PixelBuffer {
    /// Create a new pixel buffer filled with transparent black.
    ///
    /// Uses saturating multiplication so absurd dimensions cannot overflow.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        let size = (width as usize).saturating_mul(height as usize);
        Self {
            width,
            height,
            pixels: vec![Rgba::TRANSPARENT; size],
        }
    }

    /// Create a buffer, rejecting zero-sized dimensions.
    pub fn try_new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }
        Ok(Self::new(width, height))
    }

    /// Create a buffer filled with a single colour.
    #[must_use]
    pub fn filled(width: u32, height: u32, color: Rgba) -> Self {
        let mut buffer = Self::new(width, height);
        buffer.fill(color);
        buffer
    }

    /// Compute pixel index with overflow protection.
    #[inline]
    fn pixel_index(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let row_offset = (y as usize).checked_mul(self.width as usize)?;
        let idx = row_offset.checked_add(x as usize)?;
        if idx < self.pixels.len() {
            Some(idx)
        } else {
            None
        }
    }

    /// Width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// (width, height).
    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Raw pixel data.
    #[must_use]
    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    /// Estimated byte size of the pixel storage.
    #[must_use]
    pub fn byte_size(&self) -> usize {
        self.pixels.len() * std::mem::size_of::<Rgba>()
    }

    /// Get pixel at (x, y).
    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> Option<Rgba> {
        self.pixel_index(x, y).map(|idx| self.pixels[idx])
    }

    /// Set pixel at (x, y). Out-of-bounds writes are ignored.
    pub fn set(&mut self, x: u32, y: u32, color: Rgba) {
        if let Some(idx) = self.pixel_index(x, y) {
            self.pixels[idx] = color;
        }
    }

    /// Write a pixel with signed coordinates using the given mode.
    #[inline]
    pub fn put(&mut self, x: i64, y: i64, color: Rgba, mode: BlendMode) {
        if x < 0 || y < 0 || x > i64::from(u32::MAX) || y > i64::from(u32::MAX) {
            return;
        }
        if let Some(idx) = self.pixel_index(x as u32, y as u32) {
            let dst = &mut self.pixels[idx];
            *dst = match mode {
                BlendMode::Replace => color,
                BlendMode::Over => color.blend_over(*dst),
            };
        }
    }

    /// Fill entire buffer with a color.
    pub fn fill(&mut self, color: Rgba) {
        self.pixels.fill(color);
    }

    /// Fill a disc centred at (`cx`, `cy`).
    ///
    /// A pixel belongs to the disc when its centre lies within `radius`.
    /// With [`BlendMode::Replace`] the result depends only on the geometry,
    /// never on what was in the buffer before.
    pub fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Rgba, mode: BlendMode) {
        if radius.is_nan() || radius <= 0.0 || !cx.is_finite() || !cy.is_finite() {
            return;
        }
        let r2 = radius * radius;
        let Some((x0, y0, x1, y1)) = self.clip_box(cx - radius, cy - radius, cx + radius, cy + radius)
        else {
            return;
        };

        for y in y0..=y1 {
            let dy = y as f32 + 0.5 - cy;
            for x in x0..=x1 {
                let dx = x as f32 + 0.5 - cx;
                if dx * dx + dy * dy <= r2 {
                    self.put(i64::from(x), i64::from(y), color, mode);
                }
            }
        }
    }

    /// Composite an annulus (`inner` < distance <= `outer`) over the buffer.
    pub fn fill_ring(&mut self, cx: f32, cy: f32, inner: f32, outer: f32, color: Rgba) {
        if outer.is_nan() || outer <= inner || !cx.is_finite() || !cy.is_finite() {
            return;
        }
        let (i2, o2) = (inner.max(0.0).powi(2), outer * outer);
        let Some((x0, y0, x1, y1)) = self.clip_box(cx - outer, cy - outer, cx + outer, cy + outer)
        else {
            return;
        };

        for y in y0..=y1 {
            let dy = y as f32 + 0.5 - cy;
            for x in x0..=x1 {
                let dx = x as f32 + 0.5 - cx;
                let d2 = dx * dx + dy * dy;
                if d2 > i2 && d2 <= o2 {
                    self.put(i64::from(x), i64::from(y), color, BlendMode::Over);
                }
            }
        }
    }

    /// Composite `src` over this buffer, scaling its alpha by `opacity`.
    ///
    /// Only the overlapping region (anchored at the origin) is touched.
    pub fn blit_over(&mut self, src: &Self, opacity: f32) {
        let opacity = opacity.clamp(0.0, 1.0);
        if opacity <= 0.0 {
            return;
        }
        let w = self.width.min(src.width) as usize;
        let h = self.height.min(src.height) as usize;
        let (dst_stride, src_stride) = (self.width as usize, src.width as usize);

        for y in 0..h {
            let dst_row = &mut self.pixels[y * dst_stride..y * dst_stride + w];
            let src_row = &src.pixels[y * src_stride..y * src_stride + w];
            for (dst, &s) in dst_row.iter_mut().zip(src_row) {
                let s = if opacity < 1.0 { s.multiply_alpha(opacity) } else { s };
                *dst = s.blend_over(*dst);
            }
        }
    }

    /// Pixel-exact equality, treating NaN payloads as distinct.
    #[must_use]
    pub fn bits_eq(&self, other: &Self) -> bool {
        self.size() == other.size()
            && self
                .pixels
                .iter()
                .zip(&other.pixels)
                .all(|(a, b)| a.bits_eq(*b))
    }

    /// Clamp a float box to pixel indices inside the buffer.
    fn clip_box(&self, left: f32, top: f32, right: f32, bottom: f32) -> Option<(u32, u32, u32, u32)> {
        if self.width == 0 || self.height == 0 {
            return None;
        }
        let max_x = (self.width - 1) as f32;
        let max_y = (self.height - 1) as f32;
        if right < 0.0 || bottom < 0.0 || left > max_x + 1.0 || top > max_y + 1.0 {
            return None;
        }
        let x0 = left.floor().clamp(0.0, max_x) as u32;
        let y0 = top.floor().clamp(0.0, max_y) as u32;
        let x1 = right.ceil().clamp(0.0, max_x) as u32;
        let y1 = bottom.ceil().clamp(0.0, max_y) as u32;
        Some((x0, y0, x1, y1))
    }
}
