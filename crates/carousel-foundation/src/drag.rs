//! Drag gesture tracking and release interpretation.
//!
//! [`DragTracker`] follows one pointer from press to release and reports the
//! net horizontal displacement and release velocity. [`interpret_drag`]
//! turns that pair into a step direction. Neither knows anything about
//! carousel indices.

use crate::gesture_constants::{DRAG_BUFFER, MAX_FLING_VELOCITY, VELOCITY_THRESHOLD};
use crate::pointer::{PointerEvent, PointerEventKind};
use crate::velocity_tracker::VelocityTracker1D;

/// Outcome of a drag release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragDirection {
    /// Move to the previous card (pointer went right).
    Retreat,
    /// Snap back to the current card.
    Hold,
    /// Move to the next card (pointer went left).
    Advance,
}

impl DragDirection {
    /// Index step: -1, 0 or +1.
    pub fn step(self) -> i32 {
        match self {
            DragDirection::Retreat => -1,
            DragDirection::Hold => 0,
            DragDirection::Advance => 1,
        }
    }
}

/// Distance and velocity thresholds for release interpretation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragThresholds {
    pub drag_buffer: f32,
    pub velocity_threshold: f32,
}

impl Default for DragThresholds {
    fn default() -> Self {
        Self {
            drag_buffer: DRAG_BUFFER,
            velocity_threshold: VELOCITY_THRESHOLD,
        }
    }
}

/// Decides the step for a release with the given displacement and velocity.
///
/// Advance wins when the pointer travelled left past the buffer or flicked
/// left faster than the threshold; retreat is the mirror image; anything
/// else holds.
pub fn interpret_drag(offset_x: f32, velocity_x: f32, thresholds: DragThresholds) -> DragDirection {
    let DragThresholds {
        drag_buffer,
        velocity_threshold,
    } = thresholds;
    if offset_x < -drag_buffer || velocity_x < -velocity_threshold {
        DragDirection::Advance
    } else if offset_x > drag_buffer || velocity_x > velocity_threshold {
        DragDirection::Retreat
    } else {
        DragDirection::Hold
    }
}

/// In-flight drag movement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragUpdate {
    /// Displacement since the press.
    pub offset: f32,
    /// Displacement since the previous update.
    pub delta: f32,
}

/// End of a drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragRelease {
    pub offset: f32,
    pub velocity: f32,
    /// `true` when the platform cancelled the gesture.
    pub cancelled: bool,
}

/// What a pointer event meant for the tracked drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragEvent {
    Started,
    Moved(DragUpdate),
    Released(DragRelease),
    /// Event did not belong to an active drag.
    Ignored,
}

#[derive(Debug, Clone, Copy)]
struct ActiveDrag {
    start_x: f32,
    last_x: f32,
}

/// Follows a single pointer from press to release.
#[derive(Debug, Clone, Default)]
pub struct DragTracker {
    active: Option<ActiveDrag>,
    velocity: VelocityTracker1D,
}

impl DragTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    /// Current displacement since the press, if dragging.
    pub fn offset(&self) -> Option<f32> {
        self.active.map(|drag| drag.last_x - drag.start_x)
    }

    pub fn handle(&mut self, event: PointerEvent) -> DragEvent {
        match event.kind {
            PointerEventKind::Down => self.press(event.x, event.uptime_ms),
            PointerEventKind::Move => self.move_to(event.x, event.uptime_ms),
            PointerEventKind::Up => self.release(event.x, event.uptime_ms),
            PointerEventKind::Cancel => self.cancel(),
        }
    }

    pub fn press(&mut self, x: f32, uptime_ms: i64) -> DragEvent {
        self.velocity.reset();
        self.velocity.add_data_point(uptime_ms, x);
        self.active = Some(ActiveDrag {
            start_x: x,
            last_x: x,
        });
        DragEvent::Started
    }

    pub fn move_to(&mut self, x: f32, uptime_ms: i64) -> DragEvent {
        let Some(drag) = self.active.as_mut() else {
            return DragEvent::Ignored;
        };
        let delta = x - drag.last_x;
        drag.last_x = x;
        let offset = x - drag.start_x;
        self.velocity.add_data_point(uptime_ms, x);
        log::trace!("drag move offset={offset} delta={delta}");
        DragEvent::Moved(DragUpdate { offset, delta })
    }

    pub fn release(&mut self, x: f32, uptime_ms: i64) -> DragEvent {
        let Some(drag) = self.active.take() else {
            return DragEvent::Ignored;
        };
        self.velocity.add_data_point(uptime_ms, x);
        let velocity = self.velocity.calculate_velocity_with_max(MAX_FLING_VELOCITY);
        self.velocity.reset();
        DragEvent::Released(DragRelease {
            offset: x - drag.start_x,
            velocity,
            cancelled: false,
        })
    }

    pub fn cancel(&mut self) -> DragEvent {
        let Some(drag) = self.active.take() else {
            return DragEvent::Ignored;
        };
        self.velocity.reset();
        DragEvent::Released(DragRelease {
            offset: drag.last_x - drag.start_x,
            velocity: 0.0,
            cancelled: true,
        })
    }
}

#[cfg(test)]
#[path = "tests/drag_tests.rs"]
mod tests;
