//! Construction-time configuration.

use std::fmt;

use carousel_animation::{AnimationSpec, Easing, SpringSpec};
use carousel_foundation::gesture_constants::{
    CONTAINER_PADDING, DRAG_BUFFER, GAP, VELOCITY_THRESHOLD,
};
use carousel_foundation::{DragThresholds, TrackGeometry};
use web_time::Duration;

/// Autoplay delay used when none is configured.
pub const DEFAULT_AUTOPLAY_DELAY: Duration = Duration::from_millis(3000);

/// Duration of the indicator dot scale animation.
pub const INDICATOR_TWEEN_MS: u64 = 150;

/// Carousel configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarouselConfig {
    /// Container width in logical pixels.
    pub base_width: f32,
    pub container_padding: f32,
    pub gap: f32,
    pub autoplay: bool,
    pub autoplay_delay: Duration,
    pub pause_on_hover: bool,
    pub looping: bool,
    /// Render cards as circles. Has no effect on navigation.
    pub round: bool,
    pub drag_buffer: f32,
    pub velocity_threshold: f32,
    pub spring: SpringSpec,
    pub indicator_tween: AnimationSpec,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            base_width: 300.0,
            container_padding: CONTAINER_PADDING,
            gap: GAP,
            autoplay: false,
            autoplay_delay: DEFAULT_AUTOPLAY_DELAY,
            pause_on_hover: false,
            looping: false,
            round: false,
            drag_buffer: DRAG_BUFFER,
            velocity_threshold: VELOCITY_THRESHOLD,
            spring: SpringSpec::carousel(),
            indicator_tween: AnimationSpec::tween(INDICATOR_TWEEN_MS, Easing::EaseOut),
        }
    }
}

/// A configuration value the carousel had to correct.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigIssue {
    /// Padding leaves no room for the card.
    NegativeItemWidth { base_width: f32, container_padding: f32 },
    NonFiniteValue { field: &'static str },
    NegativeValue { field: &'static str, value: f32 },
    ZeroAutoplayDelay,
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigIssue::NegativeItemWidth {
                base_width,
                container_padding,
            } => write!(
                f,
                "base width {base_width} is narrower than twice the padding {container_padding}"
            ),
            ConfigIssue::NonFiniteValue { field } => write!(f, "{field} is not a finite number"),
            ConfigIssue::NegativeValue { field, value } => {
                write!(f, "{field} is negative ({value})")
            }
            ConfigIssue::ZeroAutoplayDelay => write!(f, "autoplay delay is zero"),
        }
    }
}

impl CarouselConfig {
    pub fn with_base_width(mut self, base_width: f32) -> Self {
        self.base_width = base_width;
        self
    }

    pub fn with_autoplay(mut self, autoplay: bool) -> Self {
        self.autoplay = autoplay;
        self
    }

    pub fn with_autoplay_delay(mut self, delay: Duration) -> Self {
        self.autoplay_delay = delay;
        self
    }

    pub fn with_pause_on_hover(mut self, pause_on_hover: bool) -> Self {
        self.pause_on_hover = pause_on_hover;
        self
    }

    pub fn with_looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    pub fn with_round(mut self, round: bool) -> Self {
        self.round = round;
        self
    }

    pub fn with_spring(mut self, spring: SpringSpec) -> Self {
        self.spring = spring;
        self
    }

    pub fn with_drag_thresholds(mut self, thresholds: DragThresholds) -> Self {
        self.drag_buffer = thresholds.drag_buffer;
        self.velocity_threshold = thresholds.velocity_threshold;
        self
    }

    pub fn geometry(&self) -> TrackGeometry {
        TrackGeometry::new(self.base_width, self.container_padding, self.gap)
    }

    pub fn drag_thresholds(&self) -> DragThresholds {
        DragThresholds {
            drag_buffer: self.drag_buffer,
            velocity_threshold: self.velocity_threshold,
        }
    }

    /// Lists every configuration problem. A too-narrow base width is left
    /// to [`TrackGeometry`], which clamps the card width to zero.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        let lengths = [
            ("base_width", self.base_width),
            ("container_padding", self.container_padding),
            ("gap", self.gap),
            ("drag_buffer", self.drag_buffer),
            ("velocity_threshold", self.velocity_threshold),
        ];
        for (field, value) in lengths {
            if !value.is_finite() {
                issues.push(ConfigIssue::NonFiniteValue { field });
            } else if value < 0.0 {
                issues.push(ConfigIssue::NegativeValue { field, value });
            }
        }
        if self.base_width.is_finite()
            && self.container_padding.is_finite()
            && self.base_width - 2.0 * self.container_padding < 0.0
        {
            issues.push(ConfigIssue::NegativeItemWidth {
                base_width: self.base_width,
                container_padding: self.container_padding,
            });
        }
        if self.autoplay_delay.is_zero() {
            issues.push(ConfigIssue::ZeroAutoplayDelay);
        }
        issues
    }

    /// Returns a copy with every invalid value clamped, logging each fix.
    pub fn sanitized(mut self) -> Self {
        let issues = self.validate();
        for issue in &issues {
            log::warn!("carousel config: {issue}");
        }
        for value in [
            &mut self.base_width,
            &mut self.container_padding,
            &mut self.gap,
            &mut self.drag_buffer,
            &mut self.velocity_threshold,
        ] {
            *value = if value.is_finite() { value.max(0.0) } else { 0.0 };
        }
        if self.autoplay_delay.is_zero() {
            self.autoplay_delay = DEFAULT_AUTOPLAY_DELAY;
        }
        self
    }
}
