//! Assertion utilities for robot testing

use carousel_ui::{AnimationPhase, Carousel};

/// Assert that a value is within an expected range.
///
/// Spring settling lands exactly on target, but offsets observed mid-flight
/// only match within a tolerance.
pub fn assert_approx_eq(actual: f32, expected: f32, tolerance: f32, msg: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "{}: expected {} (±{}), got {} (diff: {})",
        msg,
        expected,
        tolerance,
        actual,
        diff
    );
}

/// Assert that the carousel is idle at `render_index` with the track at its
/// resting offset.
pub fn assert_resting_on<T: 'static>(carousel: &Carousel<T>, render_index: usize) {
    assert_eq!(
        carousel.phase(),
        AnimationPhase::Idle,
        "carousel still animating"
    );
    assert_eq!(carousel.render_index(), render_index, "render index");
    let pitch = carousel.geometry().pitch;
    assert_approx_eq(
        carousel.offset(),
        -(render_index as f32) * pitch,
        0.01,
        "resting offset",
    );
}
