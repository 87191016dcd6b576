//! Dot indicators, one per original item.

use carousel_animation::{Animatable, AnimationSpec, AnimationType};
use carousel_core::RuntimeHandle;
use smallvec::SmallVec;

/// Scale of the highlighted dot.
pub const ACTIVE_DOT_SCALE: f32 = 1.2;
pub const INACTIVE_DOT_SCALE: f32 = 1.0;

/// Snapshot of one dot for rendering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorDot {
    pub index: usize,
    pub active: bool,
    pub scale: f32,
}

pub struct DotIndicators {
    runtime: RuntimeHandle,
    scales: SmallVec<[Animatable<f32>; 8]>,
    active: usize,
    tween: AnimationSpec,
}

impl DotIndicators {
    pub fn new(count: usize, active: usize, runtime: RuntimeHandle, tween: AnimationSpec) -> Self {
        let mut indicators = Self {
            runtime,
            scales: SmallVec::new(),
            active,
            tween,
        };
        indicators.resize(count, active);
        indicators
    }

    pub fn len(&self) -> usize {
        self.scales.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scales.is_empty()
    }

    pub fn active(&self) -> usize {
        self.active
    }

    /// Rebuilds the dots for a new item count without animating.
    pub fn resize(&mut self, count: usize, active: usize) {
        for scale in &mut self.scales {
            scale.stop();
        }
        self.active = active;
        self.scales = (0..count)
            .map(|index| Animatable::new(self.rest_scale(index), self.runtime.clone()))
            .collect();
    }

    /// Moves the highlight, tweening the old and new dots.
    pub fn set_active(&mut self, active: usize) {
        if active == self.active || active >= self.scales.len() {
            return;
        }
        let previous = std::mem::replace(&mut self.active, active);
        let animation = AnimationType::Tween(self.tween);
        if let Some(scale) = self.scales.get_mut(previous) {
            scale.animateTo(INACTIVE_DOT_SCALE, animation);
        }
        self.scales[active].animateTo(ACTIVE_DOT_SCALE, animation);
    }

    pub fn dots(&self) -> SmallVec<[IndicatorDot; 8]> {
        self.scales
            .iter()
            .enumerate()
            .map(|(index, scale)| IndicatorDot {
                index,
                active: index == self.active,
                scale: scale.value(),
            })
            .collect()
    }

    /// Stops every running scale animation.
    pub fn cancel(&mut self) {
        for scale in &mut self.scales {
            scale.stop();
        }
    }

    fn rest_scale(&self, index: usize) -> f32 {
        if index == self.active {
            ACTIVE_DOT_SCALE
        } else {
            INACTIVE_DOT_SCALE
        }
    }
}

impl std::fmt::Debug for DotIndicators {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DotIndicators")
            .field("count", &self.scales.len())
            .field("active", &self.active)
            .finish()
    }
}
