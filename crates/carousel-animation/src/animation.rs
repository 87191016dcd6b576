//! Animated values driven by the runtime's frame clock.
//!
//! Note: This module uses camelCase for the animation entry points (animateTo, snapTo)
//! to keep the Compose-style API surface.

#![allow(non_snake_case)]

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use carousel_core::{FrameCallbackRegistration, RuntimeHandle};

/// Trait for types that can be linearly interpolated.
pub trait Lerp {
    fn lerp(&self, target: &Self, fraction: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        self + (target - self) * fraction
    }
}

/// Trait for values that can participate in spring animations.
pub trait SpringScalar: Lerp + Clone {
    /// Convert the value to `f32` for physics calculations.
    fn to_f32(&self) -> f32;

    /// Determine whether the current value is close enough to the target to
    /// consider the spring finished.
    fn is_near_target(current: &Self, target: &Self, threshold: f32) -> bool {
        (current.to_f32() - target.to_f32()).abs() < threshold
    }
}

impl SpringScalar for f32 {
    fn to_f32(&self) -> f32 {
        *self
    }
}

/// Easing curves for tween animations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    LinearEasing,
    EaseOut,
    EaseInOut,
    /// Material standard curve.
    FastOutSlowInEasing,
}

impl Easing {
    /// Apply the easing function to a linear fraction [0, 1].
    pub fn transform(&self, fraction: f32) -> f32 {
        match self {
            Easing::LinearEasing => fraction,
            Easing::EaseOut => cubic_bezier(0.0, 0.0, 0.58, 1.0, fraction),
            Easing::EaseInOut => cubic_bezier(0.42, 0.0, 0.58, 1.0, fraction),
            Easing::FastOutSlowInEasing => cubic_bezier(0.4, 0.0, 0.2, 1.0, fraction),
        }
    }
}

/// Evaluates a CSS-style cubic bezier timing curve at `fraction`.
fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, fraction: f32) -> f32 {
    if fraction <= 0.0 {
        return 0.0;
    }
    if fraction >= 1.0 {
        return 1.0;
    }

    let coefficients = |p1: f32, p2: f32| {
        let c = 3.0 * p1;
        let b = 3.0 * (p2 - p1) - c;
        (1.0 - c - b, b, c)
    };
    let (ax, bx, cx) = coefficients(x1, x2);
    let (ay, by, cy) = coefficients(y1, y2);
    let sample = |a: f32, b: f32, c: f32, t: f32| ((a * t + b) * t + c) * t;
    let slope = |t: f32| (3.0 * ax * t + 2.0 * bx) * t + cx;

    // Newton-Raphson first, bisection when the slope flattens out.
    let mut t = fraction;
    for _ in 0..8 {
        let error = sample(ax, bx, cx, t) - fraction;
        if error.abs() < 1e-6 {
            return sample(ay, by, cy, t);
        }
        let dx = slope(t);
        if dx.abs() < 1e-6 {
            break;
        }
        t = (t - error / dx).clamp(0.0, 1.0);
    }

    let (mut lo, mut hi) = (0.0f32, 1.0f32);
    t = fraction;
    for _ in 0..16 {
        let error = sample(ax, bx, cx, t) - fraction;
        if error.abs() < 1e-6 {
            break;
        }
        if error > 0.0 {
            hi = t;
        } else {
            lo = t;
        }
        t = 0.5 * (lo + hi);
    }
    sample(ay, by, cy, t)
}

/// Tween specification combining duration and easing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSpec {
    pub duration_millis: u64,
    pub easing: Easing,
    pub delay_millis: u64,
}

impl AnimationSpec {
    pub fn tween(duration_millis: u64, easing: Easing) -> Self {
        Self {
            duration_millis,
            easing,
            delay_millis: 0,
        }
    }

    pub fn linear(duration_millis: u64) -> Self {
        Self::tween(duration_millis, Easing::LinearEasing)
    }

    pub fn with_delay(mut self, delay_millis: u64) -> Self {
        self.delay_millis = delay_millis;
        self
    }
}

impl Default for AnimationSpec {
    fn default() -> Self {
        Self::tween(300, Easing::FastOutSlowInEasing)
    }
}

/// Spring animation configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringSpec {
    /// Damping ratio. 1.0 = critically damped, < 1.0 = under-damped (bouncy), > 1.0 = over-damped.
    pub damping_ratio: f32,
    /// Stiffness constant. Higher values = faster animation.
    pub stiffness: f32,
    /// Velocity threshold to stop animation, in progress units per second.
    pub velocity_threshold: f32,
    /// Position threshold to stop animation, in value units.
    pub position_threshold: f32,
}

impl SpringSpec {
    pub fn default_spring() -> Self {
        Self {
            damping_ratio: 1.0,
            stiffness: 1500.0,
            velocity_threshold: 0.01,
            position_threshold: 0.001,
        }
    }

    /// Builds a spring from an absolute damping coefficient (unit mass), the
    /// parameterisation used by most web motion libraries.
    pub fn from_stiffness_damping(stiffness: f32, damping: f32) -> Self {
        let stiffness = stiffness.max(f32::EPSILON);
        Self {
            damping_ratio: damping.max(0.0) / (2.0 * stiffness.sqrt()),
            stiffness,
            ..Self::default_spring()
        }
    }

    /// Track spring: stiffness 300, damping 30, settled within a hundredth of a pixel.
    pub fn carousel() -> Self {
        Self {
            position_threshold: 0.01,
            ..Self::from_stiffness_damping(300.0, 30.0)
        }
    }
}

impl Default for SpringSpec {
    fn default() -> Self {
        Self::default_spring()
    }
}

/// Animation type specification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationType {
    /// Time-based tween animation.
    Tween(AnimationSpec),
    /// Physics-based spring animation.
    Spring(SpringSpec),
    /// Zero-duration jump. The value changes immediately; completion is
    /// reported on the next frame.
    Snap,
}

impl Default for AnimationType {
    fn default() -> Self {
        AnimationType::Tween(AnimationSpec::default())
    }
}

/// Fixed integration step for spring physics (~60 fps).
const SPRING_TIMESTEP_SECS: f32 = 0.016;

type EndListener<T> = Box<dyn FnOnce(T)>;

/// Animated value holder. Clones share the same underlying animation.
pub struct Animatable<T: SpringScalar + 'static> {
    inner: Rc<RefCell<AnimatableInner<T>>>,
}

struct AnimatableInner<T: SpringScalar + 'static> {
    runtime: RuntimeHandle,
    current: T,
    start: T,
    target: T,
    /// Spring progress from `start` (0.0) to `target` (1.0).
    progress: f32,
    /// Spring velocity in progress units per second.
    velocity: f32,
    animation_type: AnimationType,
    start_time_nanos: Option<u64>,
    last_frame_nanos: Option<u64>,
    registration: Option<FrameCallbackRegistration>,
    on_end: Option<EndListener<T>>,
}

impl<T: SpringScalar + 'static> AnimatableInner<T> {
    fn cancel(&mut self) {
        if let Some(registration) = self.registration.take() {
            registration.cancel();
        }
        self.on_end = None;
        self.start_time_nanos = None;
        self.last_frame_nanos = None;
        self.velocity = 0.0;
    }

    fn settle(&mut self) -> Option<(EndListener<T>, T)> {
        self.current = self.target.clone();
        self.start = self.target.clone();
        self.progress = 1.0;
        self.velocity = 0.0;
        self.start_time_nanos = None;
        self.last_frame_nanos = None;
        self.on_end
            .take()
            .map(|listener| (listener, self.target.clone()))
    }
}

impl<T: SpringScalar + 'static> Animatable<T> {
    pub fn new(initial: T, runtime: RuntimeHandle) -> Self {
        let inner = AnimatableInner {
            runtime,
            current: initial.clone(),
            start: initial.clone(),
            target: initial,
            progress: 1.0,
            velocity: 0.0,
            animation_type: AnimationType::default(),
            start_time_nanos: None,
            last_frame_nanos: None,
            registration: None,
            on_end: None,
        };
        Self {
            inner: Rc::new(RefCell::new(inner)),
        }
    }

    /// Animate to the target value using the specified animation.
    pub fn animateTo(&mut self, target: T, animation: AnimationType) {
        self.start_animation(target, animation, None);
    }

    /// Animate to `target` and call `on_end` with the settled value once the
    /// animation finishes on its own. Interrupted animations drop the
    /// listener without calling it.
    pub fn animateToThen(
        &mut self,
        target: T,
        animation: AnimationType,
        on_end: impl FnOnce(T) + 'static,
    ) {
        self.start_animation(target, animation, Some(Box::new(on_end)));
    }

    fn start_animation(
        &mut self,
        target: T,
        animation: AnimationType,
        on_end: Option<EndListener<T>>,
    ) {
        {
            let mut inner = self.inner.borrow_mut();
            inner.cancel();
            inner.start = inner.current.clone();
            inner.target = target.clone();
            inner.progress = 0.0;
            inner.animation_type = animation;
            inner.on_end = on_end;
            if animation == AnimationType::Snap {
                inner.current = target.clone();
                inner.start = target;
                inner.progress = 1.0;
            }
        }
        Self::schedule_frame(&self.inner);
    }

    /// Snap immediately to the target value without animating.
    pub fn snapTo(&mut self, target: T) {
        let mut inner = self.inner.borrow_mut();
        inner.cancel();
        inner.current = target.clone();
        inner.start = target.clone();
        inner.target = target;
        inner.progress = 1.0;
    }

    /// Stops any running animation, leaving the value where it is.
    pub fn stop(&mut self) {
        let mut inner = self.inner.borrow_mut();
        inner.cancel();
        inner.target = inner.current.clone();
        inner.start = inner.current.clone();
        inner.progress = 1.0;
    }

    pub fn value(&self) -> T {
        self.inner.borrow().current.clone()
    }

    pub fn target(&self) -> T {
        self.inner.borrow().target.clone()
    }

    pub fn animation_type(&self) -> AnimationType {
        self.inner.borrow().animation_type
    }

    pub fn is_running(&self) -> bool {
        self.inner.borrow().registration.is_some()
    }

    fn schedule_frame(this: &Rc<RefCell<AnimatableInner<T>>>) {
        let clock = {
            let inner = this.borrow();
            if inner.registration.is_some() {
                return;
            }
            inner.runtime.frame_clock()
        };
        let weak = Rc::downgrade(this);
        let registration = clock.with_frame_nanos(move |time| {
            if let Some(strong) = weak.upgrade() {
                Self::on_frame(&strong, time);
            }
        });
        if registration.is_active() {
            this.borrow_mut().registration = Some(registration);
        } else {
            log::debug!("frame clock disposed; animation abandoned");
        }
    }

    fn on_frame(this: &Rc<RefCell<AnimatableInner<T>>>, frame_time_nanos: u64) {
        let mut schedule_next = false;
        let mut finished = None;
        {
            let mut inner = this.borrow_mut();
            inner.registration = None;

            match inner.animation_type {
                AnimationType::Snap => {
                    finished = inner.settle();
                }
                AnimationType::Tween(spec) => {
                    let start_time = *inner.start_time_nanos.get_or_insert(frame_time_nanos);
                    let elapsed_nanos = frame_time_nanos.saturating_sub(start_time);
                    let delay_nanos = spec.delay_millis * 1_000_000;

                    if elapsed_nanos < delay_nanos {
                        schedule_next = true;
                    } else {
                        let duration_nanos = (spec.duration_millis * 1_000_000).max(1);
                        let linear_progress = ((elapsed_nanos - delay_nanos) as f32
                            / duration_nanos as f32)
                            .clamp(0.0, 1.0);
                        if linear_progress >= 1.0 {
                            finished = inner.settle();
                        } else {
                            let eased = spec.easing.transform(linear_progress);
                            inner.current = inner.start.lerp(&inner.target, eased);
                            schedule_next = true;
                        }
                    }
                }
                AnimationType::Spring(spec) => {
                    let last = inner.last_frame_nanos.replace(frame_time_nanos);
                    if T::is_near_target(&inner.start, &inner.target, spec.position_threshold)
                        && inner.velocity == 0.0
                    {
                        // Nothing to travel; report completion right away.
                        finished = inner.settle();
                    } else if let Some(last) = last {
                        let dt = frame_time_nanos.saturating_sub(last) as f32 / 1_000_000_000.0;
                        let damping = 2.0 * spec.damping_ratio * spec.stiffness.sqrt();

                        // Semi-implicit Euler over the real frame delta.
                        let mut simulated = 0.0f32;
                        while simulated < dt {
                            let step = SPRING_TIMESTEP_SECS.min(dt - simulated);
                            let displacement = inner.progress - 1.0;
                            let force = -spec.stiffness * displacement - damping * inner.velocity;
                            inner.velocity += force * step;
                            inner.progress += inner.velocity * step;
                            simulated += step;
                        }
                        let progress = inner.progress.clamp(-1.0, 2.0);
                        inner.current = inner.start.lerp(&inner.target, progress);

                        let at_rest = inner.velocity.abs() < spec.velocity_threshold;
                        let near_target = T::is_near_target(
                            &inner.current,
                            &inner.target,
                            spec.position_threshold,
                        );
                        if at_rest && near_target {
                            finished = inner.settle();
                        } else {
                            schedule_next = true;
                        }
                    } else {
                        // First frame only anchors the timeline.
                        schedule_next = true;
                    }
                }
            }
        }

        if schedule_next {
            Self::schedule_frame(this);
        }
        if let Some((listener, value)) = finished {
            listener(value);
        }
    }
}

impl<T: SpringScalar + 'static> Clone for Animatable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: SpringScalar + fmt::Debug + 'static> fmt::Debug for Animatable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Animatable")
            .field("current", &inner.current)
            .field("target", &inner.target)
            .field("animation_type", &inner.animation_type)
            .field("running", &inner.registration.is_some())
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/animation_tests.rs"]
mod tests;
