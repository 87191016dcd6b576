//! Animation primitives for the carousel
//!
//! Provides frame-clock driven tweens, springs and zero-duration snaps.

#![allow(non_snake_case)]

pub mod animation;

pub use animation::*;

pub mod prelude {
    pub use crate::animation::{
        Animatable, AnimationSpec, AnimationType, Easing, Lerp, SpringScalar, SpringSpec,
    };
}
