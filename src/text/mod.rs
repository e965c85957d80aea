//! Text placement for the explanatory title and detail block.
//!
//! The engine picks one of four regions around the showcase rectangle
//! (left, above, right, below), sizes the text box inside it and exposes
//! the anchor arrows start from. Layout is lazy: mutations only set a dirty
//! flag and [`TextLayoutEngine::recalculate_if_needed`] does the work on
//! the next frame.
//!
//! Key types:
//!
//! - [`TextBlock`]: title, detail and their styling
//! - [`TextPlacement`]: the chosen box and its arrow anchor
//! - [`TextFrame`]: wrapped lines ready for a host to rasterise

mod wrap;

pub use wrap::{WrappedLine, measure, wrap_text};

use crate::color::Rgba;
use crate::geometry::Rect;

/// Default gap between the text box and surface or showcase edges.
pub const DEFAULT_TEXT_PADDING: f32 = 24.0;

/// Where the text block sits relative to the showcase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextPosition {
    Left,
    Above,
    Right,
    Below,
    /// Pick the region with the most free area.
    #[default]
    Unset,
}

impl TextPosition {
    /// Candidate order; the first maximum wins ties.
    pub const CANDIDATES: [Self; 4] = [Self::Left, Self::Above, Self::Right, Self::Below];
}

/// Horizontal alignment of lines inside the text box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextAlignment {
    #[default]
    Normal,
    Center,
    Opposite,
}

/// Colour and metrics for one run of text.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextPaint {
    pub color: Rgba,
    /// Font size in pixels.
    pub size: f32,
    /// Horizontal advance per terminal column.
    pub advance: f32,
}

impl TextPaint {
    #[must_use]
    pub const fn new(color: Rgba, size: f32, advance: f32) -> Self {
        Self {
            color,
            size,
            advance,
        }
    }

    #[must_use]
    pub const fn title() -> Self {
        Self::new(Rgba::WHITE, 24.0, 13.0)
    }

    #[must_use]
    pub const fn detail() -> Self {
        Self::new(Rgba::WHITE, 16.0, 9.0)
    }

    #[must_use]
    pub fn line_height(&self) -> f32 {
        self.size * 1.25
    }
}

impl Default for TextPaint {
    fn default() -> Self {
        Self::detail()
    }
}

/// Title, detail and how to present them.
#[derive(Clone, Debug, PartialEq)]
pub struct TextBlock {
    pub title: String,
    pub detail: String,
    pub title_paint: TextPaint,
    pub detail_paint: TextPaint,
    pub title_alignment: TextAlignment,
    pub detail_alignment: TextAlignment,
    pub forced_position: TextPosition,
    /// Added to the placement origin to get the arrow anchor.
    pub compensation: (f32, f32),
}

impl Default for TextBlock {
    fn default() -> Self {
        Self {
            title: String::new(),
            detail: String::new(),
            title_paint: TextPaint::title(),
            detail_paint: TextPaint::detail(),
            title_alignment: TextAlignment::Normal,
            detail_alignment: TextAlignment::Normal,
            forced_position: TextPosition::Unset,
            compensation: (0.0, 0.0),
        }
    }
}

impl TextBlock {
    #[must_use]
    pub fn has_text(&self) -> bool {
        !self.title.is_empty() || !self.detail.is_empty()
    }
}

/// The box text is drawn in, plus the arrow anchor.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TextPlacement {
    pub position: TextPosition,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    /// Arrow anchor: origin plus compensation.
    pub start_x: f32,
    pub start_y: f32,
}

/// Which run a line belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextRole {
    Title,
    Detail,
}

/// One laid-out line. `y` is the top of the line box.
#[derive(Clone, Debug, PartialEq)]
pub struct TextLine {
    pub role: TextRole,
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub paint: TextPaint,
}

/// Everything a host needs to draw this frame's text.
#[derive(Clone, Debug, PartialEq)]
pub struct TextFrame {
    pub placement: TextPlacement,
    pub lines: Vec<TextLine>,
    /// Total height of all lines.
    pub height: f32,
}

/// Lazy text placement state.
#[derive(Clone, Debug)]
pub struct TextLayoutEngine {
    block: TextBlock,
    padding: f32,
    action_bar_offset: f32,
    center_text: bool,
    placement: TextPlacement,
    needs_recalculation: bool,
}

impl TextLayoutEngine {
    #[must_use]
    pub fn new(block: TextBlock, padding: f32, action_bar_offset: f32, center_text: bool) -> Self {
        Self {
            block,
            padding,
            action_bar_offset,
            center_text,
            placement: TextPlacement::default(),
            needs_recalculation: true,
        }
    }

    #[must_use]
    pub fn block(&self) -> &TextBlock {
        &self.block
    }

    /// Mark the layout stale.
    pub fn invalidate(&mut self) {
        self.needs_recalculation = true;
    }

    #[must_use]
    pub fn needs_recalculation(&self) -> bool {
        self.needs_recalculation
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.block.title = title.into();
        self.invalidate();
    }

    pub fn set_detail(&mut self, detail: impl Into<String>) {
        self.block.detail = detail.into();
        self.invalidate();
    }

    pub fn set_title_paint(&mut self, paint: TextPaint) {
        self.block.title_paint = paint;
        self.invalidate();
    }

    pub fn set_detail_paint(&mut self, paint: TextPaint) {
        self.block.detail_paint = paint;
        self.invalidate();
    }

    pub fn set_title_alignment(&mut self, alignment: TextAlignment) {
        self.block.title_alignment = alignment;
        self.invalidate();
    }

    pub fn set_detail_alignment(&mut self, alignment: TextAlignment) {
        self.block.detail_alignment = alignment;
        self.invalidate();
    }

    pub fn set_compensation(&mut self, width: f32, height: f32) {
        self.block.compensation = (width, height);
        self.invalidate();
    }

    pub fn force_position(&mut self, position: TextPosition) {
        self.block.forced_position = position;
        self.invalidate();
    }

    pub fn set_center_text(&mut self, center: bool) {
        self.center_text = center;
        self.invalidate();
    }

    #[must_use]
    pub fn center_text(&self) -> bool {
        self.center_text
    }

    /// Last computed placement.
    #[must_use]
    pub fn placement(&self) -> TextPlacement {
        self.placement
    }

    /// Recompute the placement if dirty. Returns `true` when it ran.
    pub fn recalculate_if_needed(&mut self, width: u32, height: u32, showcase: Rect) -> bool {
        if !self.needs_recalculation {
            return false;
        }
        self.placement = self.calculate_text_position(width, height, showcase);
        self.needs_recalculation = false;
        true
    }

    /// Choose the region and compute the text box for a `width` x `height`
    /// surface around `showcase`.
    ///
    /// In centre mode a box above or below the showcase is half the usual
    /// width and horizontally centred on the surface; a box to the left or
    /// right is pushed down by a quarter of the height.
    #[must_use]
    pub fn calculate_text_position(&self, width: u32, height: u32, showcase: Rect) -> TextPlacement {
        let w = width as f32;
        let h = height as f32;
        let pad = self.padding;

        let position = match self.block.forced_position {
            TextPosition::Unset => best_position(w, h, showcase),
            forced => forced,
        };

        let (mut x, mut y, mut box_width) = match position {
            TextPosition::Left => (pad, pad, showcase.left as f32 - 2.0 * pad),
            TextPosition::Above => (pad, pad + self.action_bar_offset, w - 2.0 * pad),
            TextPosition::Right => {
                let right = showcase.right as f32;
                (right + pad, pad, w - right - 2.0 * pad)
            }
            TextPosition::Below | TextPosition::Unset => {
                (pad, showcase.bottom as f32 + pad, w - 2.0 * pad)
            }
        };

        if self.center_text {
            match position {
                TextPosition::Left | TextPosition::Right => y += h / 4.0,
                TextPosition::Above | TextPosition::Below | TextPosition::Unset => {
                    box_width = (box_width / 2.0).max(0.0);
                    x = (w - box_width) / 2.0;
                }
            }
        } else if position == TextPosition::Below {
            y += self.action_bar_offset;
        }

        box_width = box_width.max(0.0);
        let (comp_w, comp_h) = self.block.compensation;
        TextPlacement {
            position,
            x,
            y,
            width: box_width,
            start_x: x + comp_w,
            start_y: y + comp_h,
        }
    }

    /// Wrap title and detail into the current placement.
    #[must_use]
    pub fn layout(&self) -> TextFrame {
        let placement = self.placement;
        let mut lines = Vec::new();
        let mut y = placement.y;

        let runs = [
            (TextRole::Title, &self.block.title, self.block.title_paint, self.block.title_alignment),
            (TextRole::Detail, &self.block.detail, self.block.detail_paint, self.block.detail_alignment),
        ];
        for (role, text, paint, alignment) in runs {
            for wrapped in wrap_text(text, placement.width, paint.advance) {
                let x = match alignment {
                    TextAlignment::Normal => placement.x,
                    TextAlignment::Center => placement.x + (placement.width - wrapped.width) / 2.0,
                    TextAlignment::Opposite => placement.x + placement.width - wrapped.width,
                };
                lines.push(TextLine {
                    role,
                    text: wrapped.text,
                    x,
                    y,
                    width: wrapped.width,
                    paint,
                });
                y += paint.line_height();
            }
        }

        TextFrame {
            placement,
            lines,
            height: y - placement.y,
        }
    }
}

/// Free-area score of each candidate region, clamped at zero.
fn region_areas(w: f32, h: f32, showcase: Rect) -> [f32; 4] {
    [
        showcase.left as f32 * h,
        showcase.top as f32 * w,
        (w - showcase.right as f32) * h,
        (h - showcase.bottom as f32) * w,
    ]
    .map(|area| area.max(0.0))
}

fn best_position(w: f32, h: f32, showcase: Rect) -> TextPosition {
    let areas = region_areas(w, h, showcase);
    let mut best = 0;
    for (i, area) in areas.iter().enumerate().skip(1) {
        if *area > areas[best] {
            best = i;
        }
    }
    TextPosition::CANDIDATES[best]
}
