//! Shared gesture and layout constants for the carousel track.
//!
//! All distances are logical pixels; velocities are logical pixels per second.

/// Minimum pointer travel past which a drag release counts as a move.
///
/// Zero means any nonzero displacement in a direction is enough, leaving
/// velocity to disambiguate quick flicks with almost no net travel.
pub const DRAG_BUFFER: f32 = 0.0;

/// Release velocity beyond which a flick moves the carousel regardless of
/// how far the pointer travelled.
pub const VELOCITY_THRESHOLD: f32 = 500.0;

/// Gap between adjacent cards.
pub const GAP: f32 = 16.0;

/// Inner padding of the carousel container on each side.
pub const CONTAINER_PADDING: f32 = 16.0;

/// Maximum release velocity reported by the drag tracker.
pub const MAX_FLING_VELOCITY: f32 = 8_000.0;
