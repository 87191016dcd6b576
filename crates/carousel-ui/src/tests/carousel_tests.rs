use super::*;

use crate::config::DEFAULT_AUTOPLAY_DELAY;
use carousel_foundation::DragThresholds;
use web_time::Duration;

const FRAME_NANOS: u64 = 16_666_667;
const PITCH: f32 = 284.0;

struct Harness {
    runtime: RuntimeHandle,
    frame_time: u64,
}

impl Harness {
    fn new() -> Self {
        Self {
            runtime: RuntimeHandle::new(),
            frame_time: 0,
        }
    }

    fn carousel(&self, count: u64, config: CarouselConfig, now: Instant) -> Carousel<&'static str> {
        Carousel::new(items(count), config, self.runtime.clone(), now)
    }

    fn settle(&mut self) {
        for _ in 0..1000 {
            if !self.runtime.has_pending_frame_callbacks() {
                return;
            }
            self.frame_time += FRAME_NANOS;
            self.runtime.drain_frame_callbacks(self.frame_time);
        }
        panic!("frame callbacks never settled");
    }

    fn frame(&mut self) {
        self.frame_time += FRAME_NANOS;
        self.runtime.drain_frame_callbacks(self.frame_time);
    }
}

fn items(count: u64) -> Vec<CarouselItem<&'static str>> {
    (0..count).map(|id| CarouselItem::new(id, "card")).collect()
}

fn looping() -> CarouselConfig {
    CarouselConfig::default().with_looping(true)
}

#[test]
fn looping_carousel_rests_on_first_original() {
    let harness = Harness::new();
    let carousel = harness.carousel(5, looping(), Instant::now());
    assert_eq!(carousel.render_index(), 1);
    assert_eq!(carousel.active_index(), 0);
    assert_eq!(carousel.offset(), -PITCH);
    assert_eq!(carousel.render_sequence().len(), 7);
    assert_eq!(carousel.indicators().len(), 5);
    assert_eq!(carousel.phase(), AnimationPhase::Idle);
    assert_eq!(carousel.card_rotation(1), 0.0);
}

#[test]
fn advancing_onto_trailing_clone_teleports_to_first() {
    let mut harness = Harness::new();
    let carousel = harness.carousel(3, looping(), Instant::now());
    carousel.select(2);
    harness.settle();
    assert_eq!(carousel.render_index(), 3);

    carousel.request_move(1);
    assert_eq!(carousel.render_index(), 4);
    assert_eq!(carousel.active_index(), 0);
    harness.settle();

    assert_eq!(carousel.render_index(), 1);
    assert_eq!(carousel.offset(), -PITCH);
    assert_eq!(carousel.transition_mode(), TransitionMode::Instant);
    assert_eq!(carousel.phase(), AnimationPhase::Idle);
}

#[test]
fn retreating_onto_leading_clone_teleports_to_last() {
    let mut harness = Harness::new();
    let carousel = harness.carousel(3, looping(), Instant::now());
    carousel.request_move(-1);
    assert_eq!(carousel.render_index(), 0);
    harness.settle();

    assert_eq!(carousel.render_index(), 3);
    assert_eq!(carousel.active_index(), 2);
    assert_eq!(carousel.offset(), -3.0 * PITCH);
}

#[test]
fn requests_while_animating_are_coalesced() {
    let mut harness = Harness::new();
    let carousel = harness.carousel(5, looping(), Instant::now());
    carousel.request_move(1);
    harness.frame();
    carousel.request_move(1);
    carousel.select(4);
    assert_eq!(carousel.pending_request(), Some(PendingRequest::Absolute(5)));
    assert_eq!(carousel.render_index(), 2);

    harness.settle();
    assert_eq!(carousel.render_index(), 5);
    assert_eq!(carousel.pending_request(), None);
    assert_eq!(carousel.offset(), -5.0 * PITCH);
}

#[test]
fn drag_is_disabled_while_animating() {
    let mut harness = Harness::new();
    let carousel = harness.carousel(4, looping(), Instant::now());
    carousel.request_move(1);
    assert!(!carousel.begin_drag(100.0, 0));
    assert!(!carousel.is_dragging());

    harness.settle();
    assert!(carousel.begin_drag(100.0, 1000));
    assert!(carousel.is_dragging());
}

#[test]
fn drag_release_advances_one_item() {
    let mut harness = Harness::new();
    let carousel = harness.carousel(4, CarouselConfig::default(), Instant::now());
    carousel.pointer_input(PointerEvent::down(200.0, 0));
    carousel.pointer_input(PointerEvent::moved(120.0, 16));
    assert_eq!(carousel.offset(), -80.0);
    carousel.pointer_input(PointerEvent::up(120.0, 500));
    assert_eq!(carousel.render_index(), 1);

    harness.settle();
    assert_eq!(carousel.offset(), -PITCH);
}

#[test]
fn short_drag_springs_back_to_rest() {
    let mut harness = Harness::new();
    let config = looping().with_drag_thresholds(DragThresholds {
        drag_buffer: 50.0,
        velocity_threshold: 500.0,
    });
    let carousel = harness.carousel(3, config, Instant::now());
    assert!(carousel.begin_drag(0.0, 0));
    carousel.drag_to(-30.0, 16);
    assert_eq!(carousel.end_drag(-30.0, 400), Some(DragDirection::Hold));
    assert_eq!(carousel.phase(), AnimationPhase::Animating);

    harness.settle();
    assert_eq!(carousel.render_index(), 1);
    assert_eq!(carousel.offset(), -PITCH);
    assert_eq!(carousel.phase(), AnimationPhase::Idle);
}

#[test]
fn single_card_release_stays_put() {
    let mut harness = Harness::new();
    let carousel = harness.carousel(1, CarouselConfig::default(), Instant::now());
    assert!(carousel.begin_drag(0.0, 0));
    carousel.drag_to(-100.0, 16);
    assert_eq!(carousel.offset(), 0.0, "single card cannot be pulled away");

    assert_eq!(carousel.end_drag(-100.0, 400), Some(DragDirection::Advance));
    harness.settle();
    assert_eq!(carousel.render_index(), 0);
    assert_eq!(carousel.offset(), 0.0);
    assert_eq!(carousel.phase(), AnimationPhase::Idle);
}

#[test]
fn cancelled_drag_settles_on_current_item() {
    let mut harness = Harness::new();
    let carousel = harness.carousel(3, looping(), Instant::now());
    carousel.begin_drag(0.0, 0);
    carousel.drag_to(-150.0, 16);
    carousel.cancel_drag();
    assert_eq!(carousel.phase(), AnimationPhase::Animating);

    harness.settle();
    assert_eq!(carousel.render_index(), 1);
    assert_eq!(carousel.offset(), -PITCH);
}

#[test]
fn selection_during_drag_waits_for_release() {
    let mut harness = Harness::new();
    let carousel = harness.carousel(5, looping(), Instant::now());
    assert!(carousel.begin_drag(200.0, 0));
    carousel.select(3);
    assert_eq!(carousel.pending_request(), Some(PendingRequest::Absolute(4)));
    assert_eq!(carousel.render_index(), 1);
    assert_eq!(carousel.phase(), AnimationPhase::Idle);

    carousel.drag_to(150.0, 16);
    assert_eq!(carousel.offset(), -PITCH - 50.0);
    carousel.end_drag(150.0, 400);
    harness.settle();

    assert_eq!(carousel.render_index(), 4);
    assert_eq!(carousel.offset(), -4.0 * PITCH);
    assert_eq!(carousel.phase(), AnimationPhase::Idle);
    assert_eq!(carousel.pending_request(), None);
    assert!(carousel.begin_drag(100.0, 2000));
}

#[test]
fn move_during_cancelled_drag_runs_after_snap_back() {
    let mut harness = Harness::new();
    let carousel = harness.carousel(4, looping(), Instant::now());
    assert!(carousel.begin_drag(0.0, 0));
    carousel.drag_to(-40.0, 16);
    carousel.request_move(1);
    carousel.cancel_drag();
    assert_eq!(carousel.render_index(), 1);
    assert_eq!(carousel.pending_request(), Some(PendingRequest::Move(1)));

    harness.settle();
    assert_eq!(carousel.render_index(), 2);
    assert_eq!(carousel.offset(), -2.0 * PITCH);
    assert_eq!(carousel.phase(), AnimationPhase::Idle);
}

#[test]
fn dot_selection_maps_to_render_index() {
    let mut harness = Harness::new();
    let carousel = harness.carousel(5, looping(), Instant::now());
    carousel.select(2);
    assert_eq!(carousel.render_index(), 3);
    harness.settle();
    let dots = carousel.indicators();
    assert!(dots[2].active);
    assert_eq!(dots[2].scale, crate::indicator::ACTIVE_DOT_SCALE);
}

#[test]
fn single_item_never_arms_autoplay() {
    let start = Instant::now();
    let harness = Harness::new();
    let carousel = harness.carousel(1, looping().with_autoplay(true), start);
    assert_eq!(carousel.next_wake_time(), None);
    assert!(!carousel.tick(start + Duration::from_secs(30)));
    assert!(!harness.runtime.has_pending_frame_callbacks());
}

#[test]
fn autoplay_stops_at_last_item_without_looping() {
    let start = Instant::now();
    let mut harness = Harness::new();
    let config = CarouselConfig::default().with_autoplay(true);
    let carousel = harness.carousel(2, config, start);
    assert_eq!(carousel.next_wake_time(), Some(start + DEFAULT_AUTOPLAY_DELAY));

    assert!(carousel.tick(start + Duration::from_secs(3)));
    harness.settle();
    assert_eq!(carousel.render_index(), 1);

    assert!(!carousel.tick(start + Duration::from_secs(6)));
    assert_eq!(carousel.render_index(), 1);
}

#[test]
fn autoplay_skips_ticks_during_drag() {
    let start = Instant::now();
    let harness = Harness::new();
    let carousel = harness.carousel(3, looping().with_autoplay(true), start);
    carousel.begin_drag(0.0, 0);
    assert!(!carousel.tick(start + Duration::from_secs(3)));
    assert_eq!(carousel.render_index(), 1);
    assert!(carousel.is_dragging());
}

#[test]
fn hover_pauses_autoplay_when_configured() {
    let start = Instant::now();
    let harness = Harness::new();
    let config = looping().with_autoplay(true).with_pause_on_hover(true);
    let carousel = harness.carousel(3, config, start);

    carousel.pointer_entered();
    assert!(carousel.is_hovered());
    assert_eq!(carousel.next_wake_time(), None);
    assert!(!carousel.tick(start + Duration::from_secs(10)));

    let left = start + Duration::from_secs(10);
    carousel.pointer_exited(left);
    assert_eq!(carousel.next_wake_time(), Some(left + DEFAULT_AUTOPLAY_DELAY));
}

#[test]
fn shrinking_items_clamps_the_index() {
    let mut harness = Harness::new();
    let now = Instant::now();
    let carousel = harness.carousel(6, CarouselConfig::default(), now);
    carousel.select(5);
    harness.settle();

    carousel.set_items(items(3), now);
    assert_eq!(carousel.render_index(), 2);
    assert_eq!(carousel.offset(), -2.0 * PITCH);
    assert_eq!(carousel.indicators().len(), 3);
}

#[test]
fn toggling_loop_restarts_at_first_item() {
    let mut harness = Harness::new();
    let now = Instant::now();
    let carousel = harness.carousel(4, CarouselConfig::default(), now);
    carousel.select(3);
    harness.settle();

    carousel.set_looping(true, now);
    assert_eq!(carousel.render_index(), 1);
    assert_eq!(carousel.render_sequence().len(), 6);
    assert_eq!(carousel.offset(), -PITCH);
}

#[test]
fn empty_carousel_is_static() {
    let harness = Harness::new();
    let now = Instant::now();
    let carousel = harness.carousel(0, looping().with_autoplay(true), now);
    assert!(!carousel.begin_drag(0.0, 0));
    carousel.select(3);
    carousel.request_move(1);
    assert_eq!(carousel.active_index(), 0);
    assert_eq!(carousel.render_index(), 0);
    assert_eq!(carousel.next_wake_time(), None);
    assert!(carousel.indicators().is_empty());
}

#[test]
fn dispose_drops_pending_work() {
    let mut harness = Harness::new();
    let start = Instant::now();
    let carousel = harness.carousel(3, looping().with_autoplay(true), start);
    carousel.request_move(1);
    carousel.dispose();

    harness.settle();
    assert!(carousel.is_disposed());
    assert_eq!(carousel.render_index(), 2);
    assert_eq!(carousel.phase(), AnimationPhase::Idle);
    assert_eq!(carousel.next_wake_time(), None);
    assert!(!carousel.tick(start + Duration::from_secs(5)));
    assert!(!carousel.begin_drag(0.0, 0));
}

#[test]
fn round_layout_uses_square_cards() {
    let harness = Harness::new();
    let carousel = harness.carousel(2, CarouselConfig::default().with_round(true), Instant::now());
    let layout = carousel.card_layout();
    assert_eq!(layout.width, 268.0);
    assert_eq!(layout.height, Some(268.0));
    assert!(layout.round);
}
