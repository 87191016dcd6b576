//! Track geometry: card width, pitch and drag bounds.

/// Per-card width and the offset step between adjacent cards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackGeometry {
    pub item_width: f32,
    /// `item_width + gap`.
    pub pitch: f32,
}

impl TrackGeometry {
    /// Derives card width and pitch from the container width.
    ///
    /// A padding larger than half the base width would produce a negative
    /// card width; that is clamped to zero instead of failing. The clamp is
    /// silent here, `CarouselConfig::sanitized` reports it.
    pub fn new(base_width: f32, container_padding: f32, gap: f32) -> Self {
        let raw_width = base_width - 2.0 * container_padding;
        let item_width = if raw_width.is_finite() {
            raw_width.max(0.0)
        } else {
            0.0
        };
        let gap = if gap.is_finite() { gap.max(0.0) } else { 0.0 };
        Self {
            item_width,
            pitch: item_width + gap,
        }
    }

    /// Resting track offset for a render index.
    #[inline]
    pub fn offset_for(&self, render_index: usize) -> f32 {
        -(render_index as f32) * self.pitch
    }

    /// Horizontal perspective origin that keeps the centred card upright.
    pub fn perspective_origin_x(&self, render_index: usize) -> f32 {
        render_index as f32 * self.pitch + self.item_width / 2.0
    }

    /// Y-axis tilt of the card at `render_index` for a track offset.
    ///
    /// Linear and unclamped: 0° when the card is centred, +90° once the track
    /// has moved one pitch past it, -90° one pitch before it.
    pub fn card_rotation_degrees(&self, render_index: usize, offset: f32) -> f32 {
        if self.pitch <= 0.0 {
            return 0.0;
        }
        let rest = self.offset_for(render_index);
        (rest - offset) / self.pitch * 90.0
    }
}

/// Bounds for freeform drag tracking on a non-looping track.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragConstraints {
    pub min: f32,
    pub max: f32,
}

impl DragConstraints {
    /// `[-pitch × (len - 1), 0]`, so the first and last cards cannot be
    /// dragged past the viewport edge.
    pub fn for_track(geometry: &TrackGeometry, render_len: usize) -> Self {
        Self {
            min: -geometry.pitch * render_len.saturating_sub(1) as f32,
            max: 0.0,
        }
    }

    #[inline]
    pub fn clamp(&self, offset: f32) -> f32 {
        offset.clamp(self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture_constants::{CONTAINER_PADDING, GAP};

    #[test]
    fn default_track_pitch() {
        let geometry = TrackGeometry::new(300.0, CONTAINER_PADDING, GAP);
        assert_eq!(geometry.item_width, 268.0);
        assert_eq!(geometry.pitch, 284.0);
        assert_eq!(geometry.offset_for(3), -852.0);
        assert_eq!(geometry.offset_for(0), 0.0);
    }

    #[test]
    fn negative_width_clamps_to_zero() {
        let geometry = TrackGeometry::new(20.0, 16.0, 16.0);
        assert_eq!(geometry.item_width, 0.0);
        assert_eq!(geometry.pitch, 16.0);

        let degenerate = TrackGeometry::new(f32::NAN, 16.0, 16.0);
        assert_eq!(degenerate.item_width, 0.0);
    }

    #[test]
    fn rotation_follows_offset_linearly() {
        let geometry = TrackGeometry::new(300.0, 16.0, 16.0);
        assert_eq!(geometry.card_rotation_degrees(2, geometry.offset_for(2)), 0.0);
        assert_eq!(geometry.card_rotation_degrees(2, geometry.offset_for(3)), 90.0);
        assert_eq!(geometry.card_rotation_degrees(2, geometry.offset_for(1)), -90.0);
        // Unclamped beyond one pitch.
        assert_eq!(geometry.card_rotation_degrees(2, geometry.offset_for(0)), -180.0);
    }

    #[test]
    fn perspective_origin_tracks_centred_card() {
        let geometry = TrackGeometry::new(300.0, 16.0, 16.0);
        assert_eq!(geometry.perspective_origin_x(0), 134.0);
        assert_eq!(geometry.perspective_origin_x(2), 702.0);
    }

    #[test]
    fn drag_constraints_cover_whole_track() {
        let geometry = TrackGeometry::new(300.0, 16.0, 16.0);
        let constraints = DragConstraints::for_track(&geometry, 4);
        assert_eq!(constraints.min, -852.0);
        assert_eq!(constraints.max, 0.0);
        assert_eq!(constraints.clamp(40.0), 0.0);
        assert_eq!(constraints.clamp(-900.0), -852.0);
        assert_eq!(constraints.clamp(-400.0), -400.0);

        let empty = DragConstraints::for_track(&geometry, 0);
        assert_eq!(empty.clamp(-50.0), 0.0);
    }
}
