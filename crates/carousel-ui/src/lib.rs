//! Stateful carousel: position state machine, motion controller, autoplay
//! and the [`Carousel`] facade that ties them to pointer input.
//!
//! The host owns a [`carousel_core::RuntimeHandle`] and drains its frame
//! callbacks once per frame; autoplay is driven by calling
//! [`Carousel::tick`] whenever [`Carousel::next_wake_time`] has passed.

pub mod autoplay;
pub mod carousel;
pub mod config;
pub mod indicator;
pub mod motion;
pub mod position;

pub use autoplay::AutoplayScheduler;
pub use carousel::{CardLayout, Carousel, PendingRequest};
pub use config::{CarouselConfig, ConfigIssue, DEFAULT_AUTOPLAY_DELAY};
pub use indicator::{DotIndicators, IndicatorDot, ACTIVE_DOT_SCALE, INACTIVE_DOT_SCALE};
pub use motion::{AnimationPhase, MotionController};
pub use position::{PositionEvent, PositionState, Transition, TransitionMode};

pub use carousel_foundation::{CarouselItem, DragDirection, ItemId, PointerEvent, RenderSequence};

pub mod prelude {
    pub use crate::carousel::{CardLayout, Carousel};
    pub use crate::config::CarouselConfig;
    pub use crate::indicator::IndicatorDot;
    pub use crate::motion::AnimationPhase;
    pub use crate::position::TransitionMode;
    pub use carousel_foundation::{CarouselItem, PointerEvent};
}
