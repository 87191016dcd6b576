//! Robot testing harness for headless carousel tests
//!
//! The robot owns a [`RuntimeHandle`] and a virtual clock. Every simulated
//! frame drains the frame callbacks at the virtual frame time and then
//! offers the same instant to autoplay, the way a host event loop would.
//!
//! # Example
//!
//! ```
//! use carousel_testing::CarouselRobot;
//! use carousel_ui::{CarouselConfig, CarouselItem};
//!
//! let items = (0..3).map(|id| CarouselItem::new(id, ())).collect();
//! let mut robot = CarouselRobot::new(items, CarouselConfig::default().with_looping(true));
//!
//! robot.drag(200.0, 100.0, 150);
//! robot.wait_for_idle();
//! assert_eq!(robot.carousel().active_index(), 1);
//! ```

use carousel_core::RuntimeHandle;
use carousel_ui::{Carousel, CarouselConfig, CarouselItem};
use web_time::{Duration, Instant};

/// ~60 FPS.
pub const FRAME_NANOS: u64 = 16_666_667;

/// Gives up waiting for idle after this many frames.
const MAX_IDLE_FRAMES: usize = 10_000;

/// Drives a [`Carousel`] with simulated frames, pointer gestures and hover.
pub struct CarouselRobot<T: 'static> {
    runtime: RuntimeHandle,
    carousel: Carousel<T>,
    origin: Instant,
    elapsed_nanos: u64,
}

impl<T: 'static> CarouselRobot<T> {
    /// Creates a carousel at virtual time zero.
    pub fn new(items: Vec<CarouselItem<T>>, config: CarouselConfig) -> Self {
        let runtime = RuntimeHandle::new();
        let origin = Instant::now();
        let carousel = Carousel::new(items, config, runtime.clone(), origin);
        Self {
            runtime,
            carousel,
            origin,
            elapsed_nanos: 0,
        }
    }

    pub fn carousel(&self) -> &Carousel<T> {
        &self.carousel
    }

    pub fn runtime(&self) -> &RuntimeHandle {
        &self.runtime
    }

    /// Current virtual time.
    pub fn now(&self) -> Instant {
        self.origin + Duration::from_nanos(self.elapsed_nanos)
    }

    /// Virtual time since creation, as used for pointer timestamps.
    pub fn uptime_ms(&self) -> i64 {
        (self.elapsed_nanos / 1_000_000) as i64
    }

    /// Advances one frame.
    pub fn advance_frame(&mut self) {
        self.step(FRAME_NANOS);
    }

    /// Advances the virtual clock by `millis`, frame by frame.
    pub fn advance_time(&mut self, millis: u64) {
        let mut remaining = millis * 1_000_000;
        while remaining > 0 {
            let step = remaining.min(FRAME_NANOS);
            self.step(step);
            remaining -= step;
        }
    }

    /// Advances frames until no frame callbacks remain. Returns the number
    /// of frames it took.
    pub fn wait_for_idle(&mut self) -> usize {
        let mut frames = 0;
        while self.runtime.has_pending_frame_callbacks() {
            assert!(
                frames < MAX_IDLE_FRAMES,
                "carousel did not settle within {MAX_IDLE_FRAMES} frames"
            );
            self.advance_frame();
            frames += 1;
        }
        frames
    }

    /// Presses at `from_x`, moves to `to_x` over `duration_ms` of frames and
    /// releases. Returns whether the carousel accepted the drag.
    pub fn drag(&mut self, from_x: f32, to_x: f32, duration_ms: u64) -> bool {
        let accepted = self.carousel.begin_drag(from_x, self.uptime_ms());
        let frames = (duration_ms * 1_000_000).div_ceil(FRAME_NANOS).max(1);
        for frame in 1..=frames {
            self.advance_frame();
            let fraction = frame as f32 / frames as f32;
            self.carousel
                .drag_to(from_x + (to_x - from_x) * fraction, self.uptime_ms());
        }
        self.carousel.end_drag(to_x, self.uptime_ms());
        accepted
    }

    /// A quick two-frame swipe.
    pub fn fling(&mut self, from_x: f32, to_x: f32) -> bool {
        self.drag(from_x, to_x, 32)
    }

    pub fn hover(&mut self) {
        self.carousel.pointer_entered();
    }

    pub fn leave(&mut self) {
        let now = self.now();
        self.carousel.pointer_exited(now);
    }

    /// Clicks the indicator dot for `active_index`.
    pub fn click_dot(&mut self, active_index: usize) {
        self.carousel.select(active_index);
    }

    fn step(&mut self, nanos: u64) {
        self.elapsed_nanos += nanos;
        self.runtime.drain_frame_callbacks(self.elapsed_nanos);
        if self.carousel.tick(self.now()) {
            log::trace!("autoplay advanced at {} ms", self.uptime_ms());
        }
    }
}
