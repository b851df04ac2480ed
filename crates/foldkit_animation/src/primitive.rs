//! The animation primitive contract
//!
//! A primitive knows its duration, its start offset, its easing, and how to
//! turn eased progress into a [`FrameEffect`]. It holds no clock of its own;
//! the [`Timeline`](crate::Timeline) that owns it decides when it runs.

use std::fmt;

use foldkit_core::Projective2D;

use crate::easing::Easing;

/// Which layer of a strip a transform addresses
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StripFace {
    /// The whole strip, back face and front face together
    Whole,
    /// Only the front face drawn over the strip's lower edge
    Front,
}

/// A strip layer inside the animation container
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StripTarget {
    /// Strip position, counted from the top of the container
    pub index: usize,
    pub face: StripFace,
}

impl StripTarget {
    pub const fn whole(index: usize) -> Self {
        Self {
            index,
            face: StripFace::Whole,
        }
    }

    pub const fn front(index: usize) -> Self {
        Self {
            index,
            face: StripFace::Front,
        }
    }
}

/// What a primitive asks its owner to do for one frame
#[derive(Clone, Debug, PartialEq)]
pub enum FrameEffect {
    /// Draw a strip layer through `matrix`
    Transform {
        target: StripTarget,
        matrix: Projective2D,
    },
    /// Drop any transform from a strip layer
    ResetTransform(StripTarget),
    /// Resize the container
    Height {
        px: u32,
        /// Whether the host should run a layout pass after resizing
        request_layout: bool,
    },
}

/// A single timed animation step
pub trait AnimationPrimitive: fmt::Debug {
    /// Active duration in milliseconds
    fn duration_ms(&self) -> u32;

    /// Absolute delay from the start of the owning timeline
    fn start_offset_ms(&self) -> u32;

    fn easing(&self) -> Easing;

    /// The effect at eased progress `t`
    fn frame(&self, t: f32) -> FrameEffect;

    /// Emit the `t = 0` frame as soon as the timeline starts
    fn fills_before(&self) -> bool {
        false
    }

    /// Keep the final frame after finishing instead of resetting
    fn fills_after(&self) -> bool {
        false
    }

    /// Whether frames change the bounds the host lays out
    fn changes_bounds(&self) -> bool {
        false
    }

    /// The effect that undoes this primitive when it does not fill after
    fn reset(&self) -> Option<FrameEffect> {
        None
    }

    /// Sample at linear time `t`, applying this primitive's easing
    fn sample(&self, t: f32) -> FrameEffect {
        self.frame(self.easing().apply(t))
    }
}
