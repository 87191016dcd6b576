//! Minimal pointer event model for a horizontal track.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEventKind {
    Down,
    Move,
    Up,
    Cancel,
}

/// Pointer sample in track-local coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    /// Horizontal position in logical pixels.
    pub x: f32,
    /// Monotonic timestamp in milliseconds.
    pub uptime_ms: i64,
}

impl PointerEvent {
    pub fn new(kind: PointerEventKind, x: f32, uptime_ms: i64) -> Self {
        Self { kind, x, uptime_ms }
    }

    pub fn down(x: f32, uptime_ms: i64) -> Self {
        Self::new(PointerEventKind::Down, x, uptime_ms)
    }

    pub fn moved(x: f32, uptime_ms: i64) -> Self {
        Self::new(PointerEventKind::Move, x, uptime_ms)
    }

    pub fn up(x: f32, uptime_ms: i64) -> Self {
        Self::new(PointerEventKind::Up, x, uptime_ms)
    }

    pub fn cancel(x: f32, uptime_ms: i64) -> Self {
        Self::new(PointerEventKind::Cancel, x, uptime_ms)
    }
}
