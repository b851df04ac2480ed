//! Container height interpolation

use crate::easing::Easing;
use crate::primitive::{AnimationPrimitive, FrameEffect};

/// Interpolates the container height from one value to another
///
/// Intermediate frames round to the nearest pixel; the final frame writes
/// `to` exactly so rounding never drifts the settled height.
#[derive(Clone, Debug)]
pub struct HeightAnimation {
    from: u32,
    to: u32,
    duration_ms: u32,
    start_offset_ms: u32,
    easing: Easing,
}

impl HeightAnimation {
    pub fn new(from: u32, to: u32, duration_ms: u32) -> Self {
        Self {
            from,
            to,
            duration_ms,
            start_offset_ms: 0,
            easing: Easing::Decelerate,
        }
    }

    pub fn with_start_offset(mut self, offset_ms: u32) -> Self {
        self.start_offset_ms = offset_ms;
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Height at eased progress `t`
    pub fn height_at(&self, t: f32) -> u32 {
        if t >= 1.0 {
            return self.to;
        }
        let from = self.from as f32;
        let to = self.to as f32;
        (from + (to - from) * t).round().max(0.0) as u32
    }
}

impl AnimationPrimitive for HeightAnimation {
    fn duration_ms(&self) -> u32 {
        self.duration_ms
    }

    fn start_offset_ms(&self) -> u32 {
        self.start_offset_ms
    }

    fn easing(&self) -> Easing {
        self.easing
    }

    fn frame(&self, t: f32) -> FrameEffect {
        FrameEffect::Height {
            px: self.height_at(t),
            request_layout: self.changes_bounds(),
        }
    }

    fn changes_bounds(&self) -> bool {
        true
    }
}
