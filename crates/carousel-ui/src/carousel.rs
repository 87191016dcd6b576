//! The carousel facade.
//!
//! [`Carousel`] wires the pieces together: pointer and autoplay input become
//! [`PositionEvent`]s, the position state machine decides the transition and
//! the motion controller runs it. Animation completions come back through a
//! weak handle, so a dropped carousel never receives them.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use carousel_core::RuntimeHandle;
use carousel_foundation::{
    CarouselItem, DragConstraints, DragDirection, PointerEvent, PointerEventKind,
    RenderSequence, TrackGeometry,
};
use smallvec::SmallVec;
use web_time::Instant;

use crate::autoplay::AutoplayScheduler;
use crate::config::CarouselConfig;
use crate::indicator::{DotIndicators, IndicatorDot};
use crate::motion::{AnimationPhase, MotionController};
use crate::position::{PositionEvent, PositionState, Transition, TransitionMode};

/// A move request parked while a transition is in flight. Latest wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingRequest {
    Move(i32),
    Absolute(usize),
}

impl PendingRequest {
    fn from_event(event: PositionEvent) -> Option<Self> {
        match event {
            PositionEvent::RequestMove(step) => Some(Self::Move(step)),
            PositionEvent::RequestAbsolute(index) => Some(Self::Absolute(index)),
            PositionEvent::AnimationCompleted => None,
        }
    }
}

impl From<PendingRequest> for PositionEvent {
    fn from(request: PendingRequest) -> Self {
        match request {
            PendingRequest::Move(step) => PositionEvent::RequestMove(step),
            PendingRequest::Absolute(index) => PositionEvent::RequestAbsolute(index),
        }
    }
}

/// Size and shape of every card.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardLayout {
    pub width: f32,
    /// Square cards when round; otherwise the height follows the content.
    pub height: Option<f32>,
    pub round: bool,
}

type Shared<T> = Rc<RefCell<CarouselInner<T>>>;

struct CarouselInner<T> {
    config: CarouselConfig,
    items: Vec<Rc<CarouselItem<T>>>,
    sequence: RenderSequence<T>,
    position: PositionState,
    motion: MotionController,
    autoplay: AutoplayScheduler,
    indicators: DotIndicators,
    pending: Option<PendingRequest>,
    hovered: bool,
    disposed: bool,
}

/// A looping, drag-interactive carousel.
///
/// Cloning yields another handle to the same carousel.
pub struct Carousel<T: 'static> {
    inner: Shared<T>,
}

impl<T: 'static> Clone for Carousel<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: 'static> Carousel<T> {
    /// Builds a carousel resting on the first item. Autoplay, when enabled,
    /// is armed one delay after `now`.
    pub fn new(
        items: Vec<CarouselItem<T>>,
        config: CarouselConfig,
        runtime: RuntimeHandle,
        now: Instant,
    ) -> Self {
        let config = config.sanitized();
        let items: Vec<_> = items.into_iter().map(Rc::new).collect();
        let sequence = RenderSequence::build(&items, config.looping);
        let position = PositionState::new(sequence.len(), config.looping);
        let geometry = config.geometry();
        let mut motion = MotionController::new(
            runtime.clone(),
            geometry,
            config.spring,
            config.drag_thresholds(),
            position.index(),
        );
        motion.set_constraints(constraints_for(&geometry, &sequence));
        let indicators = DotIndicators::new(
            sequence.item_count(),
            position.active_index(),
            runtime,
            config.indicator_tween,
        );

        let mut inner = CarouselInner {
            config,
            items,
            sequence,
            position,
            motion,
            autoplay: AutoplayScheduler::new(config.autoplay_delay),
            indicators,
            pending: None,
            hovered: false,
            disposed: false,
        };
        inner.sync_autoplay(now);
        log::debug!(
            "carousel created items={} looping={} index={}",
            inner.sequence.item_count(),
            config.looping,
            inner.position.index()
        );

        Self {
            inner: Rc::new(RefCell::new(inner)),
        }
    }

    /// Replaces the items. The index is clamped into the new sequence and
    /// any running transition is dropped.
    pub fn set_items(&self, items: Vec<CarouselItem<T>>, now: Instant) {
        let mut inner = self.inner.borrow_mut();
        if inner.disposed {
            return;
        }
        inner.items = items.into_iter().map(Rc::new).collect();
        let looping = inner.config.looping;
        inner.rebuild(looping, now);
    }

    /// Turns looping on or off, restarting at the first item.
    pub fn set_looping(&self, looping: bool, now: Instant) {
        let mut inner = self.inner.borrow_mut();
        if inner.disposed || inner.config.looping == looping {
            return;
        }
        inner.config.looping = looping;
        inner.rebuild(looping, now);
    }

    /// Feeds a raw pointer event through the drag gesture.
    pub fn pointer_input(&self, event: PointerEvent) {
        match event.kind {
            PointerEventKind::Down => {
                self.begin_drag(event.x, event.uptime_ms);
            }
            PointerEventKind::Move => self.drag_to(event.x, event.uptime_ms),
            PointerEventKind::Up => {
                self.end_drag(event.x, event.uptime_ms);
            }
            PointerEventKind::Cancel => self.cancel_drag(),
        }
    }

    /// Starts a drag. Refused while animating or when there is nothing to show.
    pub fn begin_drag(&self, x: f32, uptime_ms: i64) -> bool {
        let mut inner = self.inner.borrow_mut();
        if inner.disposed || inner.sequence.is_empty() {
            return false;
        }
        inner.motion.begin_drag(x, uptime_ms)
    }

    pub fn drag_to(&self, x: f32, uptime_ms: i64) {
        let mut inner = self.inner.borrow_mut();
        if !inner.disposed {
            inner.motion.drag_to(x, uptime_ms);
        }
    }

    /// Ends the drag and moves by the interpreted direction.
    pub fn end_drag(&self, x: f32, uptime_ms: i64) -> Option<DragDirection> {
        let direction = {
            let mut inner = self.inner.borrow_mut();
            if inner.disposed {
                return None;
            }
            inner.motion.end_drag(x, uptime_ms)?
        };
        Self::dispatch(&self.inner, PositionEvent::RequestMove(direction.step()));
        Some(direction)
    }

    /// Aborts the drag and settles back onto the current item.
    pub fn cancel_drag(&self) {
        let cancelled = {
            let mut inner = self.inner.borrow_mut();
            !inner.disposed && inner.motion.cancel_drag()
        };
        if cancelled {
            Self::dispatch(&self.inner, PositionEvent::RequestMove(0));
        }
    }

    pub fn pointer_entered(&self) {
        let mut inner = self.inner.borrow_mut();
        if inner.disposed {
            return;
        }
        inner.hovered = true;
        if inner.config.pause_on_hover {
            log::trace!("autoplay paused on hover");
            inner.autoplay.pause();
        }
    }

    pub fn pointer_exited(&self, now: Instant) {
        let mut inner = self.inner.borrow_mut();
        if inner.disposed {
            return;
        }
        inner.hovered = false;
        if inner.config.pause_on_hover {
            log::trace!("autoplay resumed");
            inner.autoplay.resume(now);
        }
    }

    /// Navigates to an item by its index in the original list. During a drag
    /// the request waits until the release has settled.
    pub fn select(&self, active_index: usize) {
        let render_index = {
            let inner = self.inner.borrow();
            if inner.disposed || inner.sequence.is_empty() {
                return;
            }
            inner.position.render_index_for_active(active_index)
        };
        Self::dispatch(&self.inner, PositionEvent::RequestAbsolute(render_index));
    }

    /// Moves by `step` items. Zero settles the track on the current item.
    pub fn request_move(&self, step: i32) {
        Self::dispatch(&self.inner, PositionEvent::RequestMove(step));
    }

    /// Drives autoplay. Returns `true` when the tick requested an advance.
    pub fn tick(&self, now: Instant) -> bool {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.disposed || !inner.autoplay.tick(now) {
                return false;
            }
            if inner.motion.is_dragging() {
                log::trace!("autoplay tick skipped during drag");
                return false;
            }
            let position = inner.position;
            if !position.is_looping() && position.index() + 1 >= position.render_len() {
                log::trace!("autoplay reached the last item");
                return false;
            }
        }
        Self::dispatch(&self.inner, PositionEvent::RequestMove(1));
        true
    }

    /// When the host should call [`tick`](Self::tick) next.
    pub fn next_wake_time(&self) -> Option<Instant> {
        let inner = self.inner.borrow();
        if inner.disposed {
            None
        } else {
            inner.autoplay.next_tick_time()
        }
    }

    pub fn active_index(&self) -> usize {
        self.inner.borrow().position.active_index()
    }

    pub fn render_index(&self) -> usize {
        self.inner.borrow().position.index()
    }

    pub fn offset(&self) -> f32 {
        self.inner.borrow().motion.offset()
    }

    pub fn phase(&self) -> AnimationPhase {
        self.inner.borrow().motion.phase()
    }

    pub fn transition_mode(&self) -> TransitionMode {
        self.inner.borrow().motion.mode()
    }

    pub fn is_dragging(&self) -> bool {
        self.inner.borrow().motion.is_dragging()
    }

    pub fn pending_request(&self) -> Option<PendingRequest> {
        self.inner.borrow().pending
    }

    pub fn is_autoplay_active(&self) -> bool {
        self.inner.borrow().autoplay.is_active()
    }

    pub fn is_hovered(&self) -> bool {
        self.inner.borrow().hovered
    }

    pub fn render_sequence(&self) -> RenderSequence<T> {
        self.inner.borrow().sequence.clone()
    }

    pub fn config(&self) -> CarouselConfig {
        self.inner.borrow().config
    }

    pub fn geometry(&self) -> TrackGeometry {
        self.inner.borrow().motion.geometry()
    }

    pub fn card_layout(&self) -> CardLayout {
        let inner = self.inner.borrow();
        let width = inner.motion.geometry().item_width;
        CardLayout {
            width,
            height: inner.config.round.then_some(width),
            round: inner.config.round,
        }
    }

    /// Y-axis tilt of the card at `render_index` for the current offset.
    pub fn card_rotation(&self, render_index: usize) -> f32 {
        let inner = self.inner.borrow();
        inner
            .motion
            .geometry()
            .card_rotation_degrees(render_index, inner.motion.offset())
    }

    /// Perspective origin for the card currently at rest.
    pub fn perspective_origin_x(&self) -> f32 {
        let inner = self.inner.borrow();
        inner
            .motion
            .geometry()
            .perspective_origin_x(inner.position.index())
    }

    pub fn indicators(&self) -> SmallVec<[IndicatorDot; 8]> {
        self.inner.borrow().indicators.dots()
    }

    /// Stops autoplay and drops any pending completion. Later calls are ignored.
    pub fn dispose(&self) {
        let mut inner = self.inner.borrow_mut();
        if inner.disposed {
            return;
        }
        inner.disposed = true;
        inner.autoplay.stop();
        inner.motion.cancel();
        inner.indicators.cancel();
        inner.pending = None;
        log::debug!("carousel disposed");
    }

    pub fn is_disposed(&self) -> bool {
        self.inner.borrow().disposed
    }

    fn dispatch(this: &Shared<T>, event: PositionEvent) {
        let weak = Rc::downgrade(this);
        let follow_up = {
            let mut inner = this.borrow_mut();
            if inner.disposed {
                return;
            }
            match event {
                PositionEvent::AnimationCompleted => inner.complete(&weak),
                request => inner.request(request, &weak),
            }
        };
        if let Some(request) = follow_up {
            Self::dispatch(this, request.into());
        }
    }
}

impl<T: 'static> CarouselInner<T> {
    /// Parks the request while the track is busy. Returns a parked request
    /// that can run now because this one left the track idle.
    fn request(
        &mut self,
        event: PositionEvent,
        weak: &Weak<RefCell<Self>>,
    ) -> Option<PendingRequest> {
        if self.motion.is_dragging() || self.motion.phase() == AnimationPhase::Animating {
            log::debug!("parking {event:?} until the track is free");
            self.pending = PendingRequest::from_event(event);
            return None;
        }
        let (next, transition) = self.position.apply(event);
        self.position = next;
        match transition {
            Some(transition) => self.start(transition, weak),
            // A clamped request after a drag leaves the track off its rest.
            None if !self.sequence.is_empty() && !self.motion.is_at(next.index()) => self.start(
                Transition {
                    index: next.index(),
                    mode: TransitionMode::Spring,
                },
                weak,
            ),
            None => {}
        }
        match self.motion.phase() {
            AnimationPhase::Idle => self.pending.take(),
            AnimationPhase::Animating => None,
        }
    }

    /// Returns the parked request once the track is idle again.
    fn complete(&mut self, weak: &Weak<RefCell<Self>>) -> Option<PendingRequest> {
        if self.position.is_on_clone() {
            log::trace!("landed on boundary clone {}", self.position.index());
        }
        let (next, transition) = self.position.apply(PositionEvent::AnimationCompleted);
        self.position = next;
        if let Some(transition) = transition {
            log::debug!("teleport to render index {}", transition.index);
            self.start(transition, weak);
            return None;
        }
        self.motion.settle();
        log::trace!("settled at render index {}", next.index());
        self.pending.take()
    }

    fn start(&mut self, transition: Transition, weak: &Weak<RefCell<Self>>) {
        log::debug!(
            "transition to render index {} ({:?})",
            transition.index,
            transition.mode
        );
        let weak = weak.clone();
        self.motion
            .animate_to(transition.index, transition.mode, move || {
                if let Some(strong) = weak.upgrade() {
                    Carousel::<T>::dispatch(&strong, PositionEvent::AnimationCompleted);
                }
            });
        self.indicators.set_active(self.position.active_index());
    }

    fn rebuild(&mut self, looping: bool, now: Instant) {
        self.sequence = RenderSequence::build(&self.items, looping);
        self.position = self.position.rebuild(self.sequence.len(), looping);
        self.pending = None;
        self.motion.jump_to(self.position.index());
        let constraints = constraints_for(&self.motion.geometry(), &self.sequence);
        self.motion.set_constraints(constraints);
        self.indicators
            .resize(self.sequence.item_count(), self.position.active_index());
        self.sync_autoplay(now);
        log::debug!(
            "carousel rebuilt items={} looping={looping} index={}",
            self.sequence.item_count(),
            self.position.index()
        );
    }

    /// Autoplay runs only when enabled and there is more than one item.
    fn sync_autoplay(&mut self, now: Instant) {
        let wanted = self.config.autoplay && self.sequence.item_count() > 1;
        if wanted && !self.autoplay.is_running() {
            if self.hovered && self.config.pause_on_hover {
                self.autoplay.pause();
            }
            self.autoplay.start(now);
        } else if !wanted && self.autoplay.is_running() {
            self.autoplay.stop();
        }
    }
}

fn constraints_for<T>(
    geometry: &TrackGeometry,
    sequence: &RenderSequence<T>,
) -> Option<DragConstraints> {
    (!sequence.is_looping()).then(|| DragConstraints::for_track(geometry, sequence.len()))
}

impl<T: 'static> std::fmt::Debug for Carousel<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Carousel")
            .field("position", &inner.position)
            .field("motion", &inner.motion)
            .field("pending", &inner.pending)
            .field("disposed", &inner.disposed)
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/carousel_tests.rs"]
mod tests;
