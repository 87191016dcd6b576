//! Motion controller: the animated track offset and drag plumbing.
//!
//! The controller knows how to move the track but not where to; the
//! position state machine decides targets and the carousel wires the two
//! together through the completion callback of [`MotionController::animate_to`].

use carousel_animation::{Animatable, AnimationType, SpringSpec};
use carousel_core::RuntimeHandle;
use carousel_foundation::{
    interpret_drag, DragConstraints, DragDirection, DragEvent, DragThresholds, DragTracker,
    TrackGeometry,
};

use crate::position::TransitionMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationPhase {
    Idle,
    /// A transition (spring or teleport) is in flight; drags are refused.
    Animating,
}

pub struct MotionController {
    offset: Animatable<f32>,
    geometry: TrackGeometry,
    spring: SpringSpec,
    thresholds: DragThresholds,
    constraints: Option<DragConstraints>,
    phase: AnimationPhase,
    mode: TransitionMode,
    drag: DragTracker,
    /// Track offset when the current drag began.
    drag_origin: f32,
}

impl MotionController {
    pub fn new(
        runtime: RuntimeHandle,
        geometry: TrackGeometry,
        spring: SpringSpec,
        thresholds: DragThresholds,
        index: usize,
    ) -> Self {
        Self {
            offset: Animatable::new(geometry.offset_for(index), runtime),
            geometry,
            spring,
            thresholds,
            constraints: None,
            phase: AnimationPhase::Idle,
            mode: TransitionMode::Spring,
            drag: DragTracker::new(),
            drag_origin: 0.0,
        }
    }

    pub fn offset(&self) -> f32 {
        self.offset.value()
    }

    pub fn geometry(&self) -> TrackGeometry {
        self.geometry
    }

    pub fn phase(&self) -> AnimationPhase {
        self.phase
    }

    /// Mode of the current (or most recent) transition.
    pub fn mode(&self) -> TransitionMode {
        self.mode
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    /// Bounds applied while dragging; `None` for looping tracks.
    pub fn set_constraints(&mut self, constraints: Option<DragConstraints>) {
        self.constraints = constraints;
    }

    pub fn constraints(&self) -> Option<DragConstraints> {
        self.constraints
    }

    /// Starts a drag. Refused while a transition is in flight.
    pub fn begin_drag(&mut self, x: f32, uptime_ms: i64) -> bool {
        if self.phase == AnimationPhase::Animating {
            log::trace!("drag refused while animating");
            return false;
        }
        self.offset.stop();
        self.drag_origin = self.offset.value();
        self.drag.press(x, uptime_ms);
        true
    }

    /// Moves the track with the pointer, within the drag constraints.
    pub fn drag_to(&mut self, x: f32, uptime_ms: i64) {
        if let DragEvent::Moved(update) = self.drag.move_to(x, uptime_ms) {
            let raw = self.drag_origin + update.offset;
            let offset = match self.constraints {
                Some(constraints) => constraints.clamp(raw),
                None => raw,
            };
            self.offset.snapTo(offset);
        }
    }

    /// Ends the drag and interprets it. `None` if no drag was active.
    pub fn end_drag(&mut self, x: f32, uptime_ms: i64) -> Option<DragDirection> {
        match self.drag.release(x, uptime_ms) {
            DragEvent::Released(release) => Some(self.on_drag_end(release.offset, release.velocity)),
            _ => None,
        }
    }

    /// Aborts the drag. `true` if one was active; the caller should settle
    /// the track back onto the current index.
    pub fn cancel_drag(&mut self) -> bool {
        matches!(self.drag.cancel(), DragEvent::Released(_))
    }

    /// Direction for a release with the given pointer displacement and velocity.
    pub fn on_drag_end(&self, offset: f32, velocity: f32) -> DragDirection {
        let direction = interpret_drag(offset, velocity, self.thresholds);
        log::debug!("drag released offset={offset} velocity={velocity} -> {direction:?}");
        direction
    }

    /// Starts the transition to `index`.
    ///
    /// `on_complete` runs once, from a frame callback, when the transition
    /// settles on its own. A spring travels there; an instant transition
    /// moves the offset before returning and completes on the next frame.
    pub fn animate_to(
        &mut self,
        index: usize,
        mode: TransitionMode,
        on_complete: impl FnOnce() + 'static,
    ) {
        let target = self.geometry.offset_for(index);
        let animation = match mode {
            TransitionMode::Spring => AnimationType::Spring(self.spring),
            TransitionMode::Instant => AnimationType::Snap,
        };
        self.phase = AnimationPhase::Animating;
        self.mode = mode;
        self.offset
            .animateToThen(target, animation, move |_| on_complete());
    }

    /// Marks the in-flight transition as fully settled.
    pub fn settle(&mut self) {
        self.phase = AnimationPhase::Idle;
    }

    /// `true` when the offset already rests on `index`.
    pub fn is_at(&self, index: usize) -> bool {
        (self.offset.value() - self.geometry.offset_for(index)).abs() < self.spring.position_threshold
    }

    /// Cancels everything and places the track on `index` without animating.
    pub fn jump_to(&mut self, index: usize) {
        self.drag.cancel();
        self.offset.snapTo(self.geometry.offset_for(index));
        self.phase = AnimationPhase::Idle;
        self.mode = TransitionMode::Instant;
    }

    /// Drops any pending transition and its completion callback.
    pub fn cancel(&mut self) {
        self.drag.cancel();
        self.offset.stop();
        self.phase = AnimationPhase::Idle;
    }
}

impl std::fmt::Debug for MotionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MotionController")
            .field("offset", &self.offset.value())
            .field("phase", &self.phase)
            .field("mode", &self.mode)
            .field("dragging", &self.drag.is_dragging())
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/motion_tests.rs"]
mod tests;
