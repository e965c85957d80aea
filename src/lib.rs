//! `showcase_overlay` - showcase overlay engine
//!
//! Dims a surface with a translucent mask, punches showcase holes at target
//! points, places an explanatory text block beside them, connects the text
//! to secondary targets with arrows and remembers whether a one-shot overlay
//! was already shown.
//!
//! The host owns the window, fonts and persistence; this crate owns the
//! geometry, compositing, touch routing and the show/hide state machine.

// Crate-level lint configuration
#![allow(dead_code)] // Public API functions not yet used internally
#![allow(clippy::cast_possible_truncation)] // Intentional coordinate casts
#![allow(clippy::cast_sign_loss)] // Intentional coordinate conversions
#![allow(clippy::cast_precision_loss)] // Intentional for geometry math
#![allow(clippy::cast_possible_wrap)] // Intentional coordinate conversions
#![allow(clippy::module_name_repetitions)] // Allow text::TextBlock etc
#![allow(clippy::missing_errors_doc)] // Docs WIP
#![allow(clippy::missing_panics_doc)] // Docs WIP
#![allow(clippy::missing_const_for_fn)] // Many functions could be const, not critical
#![allow(clippy::doc_markdown)] // Allow technical names without backticks
#![allow(clippy::use_self)] // Allow explicit type names in impl blocks
#![allow(clippy::needless_pass_by_value)] // Allow pass by value for small Copy types
#![allow(clippy::suboptimal_flops)] // Standard math notation is clearer than mul_add
#![allow(clippy::cast_lossless)] // as casts are fine for primitive widening
#![allow(clippy::items_after_statements)] // Common pattern in tests
#![allow(clippy::semicolon_if_nothing_returned)] // Style preference

pub mod animation;
pub mod arrow;
pub mod buffer;
pub mod color;
pub mod compositor;
pub mod config;
pub mod drawer;
pub mod error;
pub mod event;
pub mod geometry;
pub mod input;
pub mod overlay;
pub mod shot;
pub mod target;
pub mod text;

// Re-export core types at crate root
pub use color::Rgba;
pub use error::{Error, Result};
pub use event::{
    LogLevel, ShowcaseEvent, ShowcaseEventListener, clear_log_callback, emit_log,
    set_log_callback,
};

// Re-export the drawing surface
pub use buffer::{BlendMode, Path, PixelBuffer, StrokeStyle};

// Re-export geometry and layout types
pub use arrow::{Arrow, ArrowRenderer, ArrowStyle, angle_made_by_line, rotated_points};
pub use geometry::{Rect, ShowcaseAreaCalculator, ShowcasePoint};
pub use text::{
    TextAlignment, TextBlock, TextFrame, TextLayoutEngine, TextLine, TextPaint, TextPlacement,
    TextPosition,
};

// Re-export collaborators
pub use animation::{
    AnimationFactory, AnimationHandle, AnimationState, Completion, FadeKind, InstantAnimations,
    Progress, TimedAnimations,
};
pub use compositor::MaskCompositor;
pub use drawer::{
    MaterialShowcaseDrawer, NewShowcaseDrawer, ShowcaseDrawer, StandardShowcaseDrawer,
};
pub use input::{TouchAction, TouchEvent, TouchFlags, TouchOutcome, TouchVerdictPolicy};
pub use shot::{MemoryShotStore, ShotStateStore, ShotStore};
pub use target::{NoTarget, PointTarget, Target};

// Re-export the controller
pub use config::{EndControl, OverlayConfig};
pub use overlay::{FrameReport, OverlayController};
