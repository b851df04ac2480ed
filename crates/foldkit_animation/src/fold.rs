//! Perspective fold rotation
//!
//! Rotates one strip layer about its top or bottom edge through 90 degrees.
//! At 90 degrees the strip is edge-on and collapses onto its anchor line.
//!
//! | mode          | from | to  | anchor |
//! |---------------|------|-----|--------|
//! | `FoldUp`      | 0    | 90  | top    |
//! | `FoldDown`    | 0    | -90 | bottom |
//! | `UnfoldUp`    | -90  | 0   | bottom |
//! | `UnfoldDown`  | 90   | 0   | top    |

use std::fmt;
use std::str::FromStr;

use foldkit_core::{PerspectiveCamera, Projective2D, Size};

use crate::easing::Easing;
use crate::error::AnimationError;
use crate::primitive::{AnimationPrimitive, FrameEffect, StripTarget};

/// Direction and anchor of a fold rotation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FoldMode {
    FoldUp,
    FoldDown,
    UnfoldUp,
    UnfoldDown,
}

/// Edge of the strip the rotation axis runs through
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Anchor {
    Top,
    Bottom,
}

impl FoldMode {
    pub const ALL: [FoldMode; 4] = [
        FoldMode::FoldUp,
        FoldMode::FoldDown,
        FoldMode::UnfoldUp,
        FoldMode::UnfoldDown,
    ];

    /// `(from, to)` in degrees
    pub fn degrees(&self) -> (f32, f32) {
        match self {
            FoldMode::FoldUp => (0.0, 90.0),
            FoldMode::FoldDown => (0.0, -90.0),
            FoldMode::UnfoldUp => (-90.0, 0.0),
            FoldMode::UnfoldDown => (90.0, 0.0),
        }
    }

    pub fn anchor(&self) -> Anchor {
        match self {
            FoldMode::FoldUp | FoldMode::UnfoldDown => Anchor::Top,
            FoldMode::FoldDown | FoldMode::UnfoldUp => Anchor::Bottom,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FoldMode::FoldUp => "fold_up",
            FoldMode::FoldDown => "fold_down",
            FoldMode::UnfoldUp => "unfold_up",
            FoldMode::UnfoldDown => "unfold_down",
        }
    }
}

impl fmt::Display for FoldMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FoldMode {
    type Err = AnimationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FoldMode::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| AnimationError::UnsupportedMode(s.to_string()))
    }
}

impl TryFrom<u8> for FoldMode {
    type Error = AnimationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        FoldMode::ALL
            .get(value as usize)
            .copied()
            .ok_or_else(|| AnimationError::UnsupportedMode(value.to_string()))
    }
}

/// Rotation of one strip layer about its top or bottom edge
#[derive(Clone, Debug)]
pub struct FoldAnimation {
    mode: FoldMode,
    camera: PerspectiveCamera,
    duration_ms: u32,
    start_offset_ms: u32,
    easing: Easing,
    target: StripTarget,
    size: Size,
}

impl FoldAnimation {
    /// Create a rotation; `camera_height` is the camera's distance from the strip plane
    pub fn new(mode: FoldMode, camera_height: u32, duration_ms: u32) -> Self {
        Self {
            mode,
            camera: PerspectiveCamera::new(camera_height as f32),
            duration_ms,
            start_offset_ms: 0,
            easing: Easing::Decelerate,
            target: StripTarget::whole(0),
            size: Size::default(),
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

    /// Bind the rotation to a strip layer of the given size
    pub fn with_target(mut self, target: StripTarget, size: Size) -> Self {
        self.target = target;
        self.size = size;
        self
    }

    /// Rotation angle at eased progress `t`
    pub fn angle_at(&self, t: f32) -> f32 {
        let (from, to) = self.mode.degrees();
        from + (to - from) * t
    }

    /// Rotation center in layer coordinates
    pub fn center(&self) -> (f32, f32) {
        let center_y = match self.mode.anchor() {
            Anchor::Top => 0.0,
            Anchor::Bottom => self.size.height,
        };
        (self.size.width / 2.0, center_y)
    }

    /// Layer transform at eased progress `t`
    pub fn matrix_at(&self, t: f32) -> Projective2D {
        let (center_x, center_y) = self.center();
        self.camera
            .rotate_x_about(self.angle_at(t), center_x, center_y)
    }
}

impl AnimationPrimitive for FoldAnimation {
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
        FrameEffect::Transform {
            target: self.target,
            matrix: self.matrix_at(t),
        }
    }

    fn fills_before(&self) -> bool {
        true
    }

    fn fills_after(&self) -> bool {
        true
    }

    fn reset(&self) -> Option<FrameEffect> {
        Some(FrameEffect::ResetTransform(self.target))
    }
}
