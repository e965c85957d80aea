//! Overlay configuration.

use crate::arrow::ArrowStyle;
use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::input::{TouchFlags, TouchVerdictPolicy};
use crate::text::{DEFAULT_TEXT_PADDING, TextBlock};
use std::time::Duration;

/// Default fade duration in each direction.
pub const DEFAULT_FADE: Duration = Duration::from_millis(400);
/// Delay before a showcase request is applied.
pub const DEFAULT_SHOWCASE_DELAY: Duration = Duration::from_millis(100);

/// The dismiss control shown with the overlay.
#[derive(Clone, Debug, PartialEq)]
pub struct EndControl {
    pub label: String,
    pub clickable: bool,
    pub visible: bool,
    pub tint: Rgba,
}

impl EndControl {
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    /// Reject controls the overlay cannot use.
    pub fn validate(&self) -> Result<()> {
        if !self.clickable {
            return Err(Error::InvalidArgument(format!(
                "end control \"{}\" must be clickable",
                self.label
            )));
        }
        Ok(())
    }
}

impl Default for EndControl {
    fn default() -> Self {
        Self {
            label: "OK".to_string(),
            clickable: true,
            visible: true,
            tint: Rgba::HOLO_BLUE,
        }
    }
}

/// Overlay configuration options.
///
/// Validated once by [`OverlayController::new`](crate::overlay::OverlayController::new).
#[derive(Clone, Debug, PartialEq)]
pub struct OverlayConfig {
    /// Show at most once under this id.
    pub single_shot: Option<i64>,
    pub touch: TouchFlags,
    pub touch_policy: TouchVerdictPolicy,
    pub fade_in: Duration,
    pub fade_out: Duration,
    pub showcase_delay: Duration,
    pub background_colour: Rgba,
    pub showcase_colour: Rgba,
    /// Applied to every hole.
    pub scale_multiplier: f32,
    pub center_text: bool,
    pub text: TextBlock,
    pub text_padding: f32,
    /// Vertical space reserved for a host toolbar.
    pub action_bar_offset: f32,
    pub end_control: EndControl,
    pub arrow: ArrowStyle,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            single_shot: None,
            touch: TouchFlags::default(),
            touch_policy: TouchVerdictPolicy::default(),
            fade_in: DEFAULT_FADE,
            fade_out: DEFAULT_FADE,
            showcase_delay: DEFAULT_SHOWCASE_DELAY,
            background_colour: Rgba::from_argb(128, 80, 80, 80),
            showcase_colour: Rgba::HOLO_BLUE,
            scale_multiplier: 1.0,
            center_text: false,
            text: TextBlock::default(),
            text_padding: DEFAULT_TEXT_PADDING,
            action_bar_offset: 0.0,
            end_control: EndControl::default(),
            arrow: ArrowStyle::default(),
        }
    }
}

impl OverlayConfig {
    /// Enable hide-on-touch-outside. Also turns on touch blocking, since a
    /// touch that passes through cannot also dismiss the overlay.
    #[must_use]
    pub fn hide_on_touch_outside(mut self) -> Self {
        self.touch |= TouchFlags::HIDE_ON_TOUCH_OUTSIDE | TouchFlags::BLOCK_TOUCHES;
        self
    }

    #[must_use]
    pub fn single_shot(mut self, id: i64) -> Self {
        self.single_shot = Some(id);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.scale_multiplier.is_finite() || self.scale_multiplier <= 0.0 {
            return Err(Error::InvalidArgument(format!(
                "scale multiplier must be finite and positive, got {}",
                self.scale_multiplier
            )));
        }
        if !self.text_padding.is_finite() || self.text_padding < 0.0 {
            return Err(Error::InvalidArgument(format!(
                "text padding must be finite and non-negative, got {}",
                self.text_padding
            )));
        }
        if !self.action_bar_offset.is_finite() {
            return Err(Error::InvalidArgument(
                "action bar offset must be finite".to_string(),
            ));
        }
        self.end_control.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = OverlayConfig::default();
        assert_eq!(config.touch, TouchFlags::BLOCK_TOUCHES);
        assert_eq!(config.fade_in, Duration::from_millis(400));
        assert_eq!(config.showcase_delay, Duration::from_millis(100));
        assert_eq!(config.background_colour.to_argb_u32(), 0x8050_5050);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_hide_on_touch_outside_implies_blocking() {
        let config = OverlayConfig {
            touch: TouchFlags::empty(),
            ..OverlayConfig::default()
        }
        .hide_on_touch_outside();
        assert!(config.touch.contains(TouchFlags::BLOCK_TOUCHES));
        assert!(config.touch.contains(TouchFlags::HIDE_ON_TOUCH_OUTSIDE));
    }

    #[test]
    fn test_rejects_bad_scale() {
        for scale in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            let config = OverlayConfig {
                scale_multiplier: scale,
                ..OverlayConfig::default()
            };
            assert!(matches!(config.validate(), Err(Error::InvalidArgument(_))));
        }
    }

    #[test]
    fn test_rejects_unclickable_end_control() {
        let config = OverlayConfig {
            end_control: EndControl {
                clickable: false,
                ..EndControl::new("Done")
            },
            ..OverlayConfig::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidArgument(_))));
    }
}
