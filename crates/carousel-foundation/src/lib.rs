//! Foundation pieces of the carousel: item sequencing, track geometry and
//! drag gesture interpretation.
//!
//! Everything here is pure data and arithmetic; the stateful carousel lives
//! in `carousel-ui`.

pub mod drag;
pub mod geometry;
pub mod gesture_constants;
pub mod pointer;
pub mod sequence;
pub mod velocity_tracker;

pub use drag::{
    interpret_drag, DragDirection, DragEvent, DragRelease, DragThresholds, DragTracker,
    DragUpdate,
};
pub use geometry::{DragConstraints, TrackGeometry};
pub use pointer::{PointerEvent, PointerEventKind};
pub use sequence::{CarouselItem, ItemId, RenderEntry, RenderSequence};
pub use velocity_tracker::VelocityTracker1D;

pub mod prelude {
    pub use crate::drag::{interpret_drag, DragDirection, DragThresholds};
    pub use crate::geometry::{DragConstraints, TrackGeometry};
    pub use crate::gesture_constants::*;
    pub use crate::pointer::PointerEvent;
    pub use crate::sequence::{CarouselItem, RenderSequence};
}
