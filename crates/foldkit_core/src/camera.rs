//! Perspective camera for X-axis rotations
//!
//! The camera sits on the negative Z axis looking at the `z = 0` plane. A
//! rotation about the X axis swings points with positive `y` into positive
//! `z` (away from the viewer) for positive angles, and the perspective divide
//! shrinks whatever moved away. The result is a [`Projective2D`] that maps
//! rotated-plane coordinates back onto the screen plane.

use crate::geometry::Projective2D;

/// Camera distance is given in points; projection works in pixels.
pub const PIXELS_PER_CAMERA_UNIT: f32 = 72.0;

/// A perspective camera placed at `(0, 0, -distance)`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PerspectiveCamera {
    distance: f32,
}

impl PerspectiveCamera {
    /// Create a camera `distance` units away from the screen plane
    pub fn new(distance: f32) -> Self {
        Self {
            distance: distance.abs().max(f32::EPSILON),
        }
    }

    /// Distance from the screen plane in pixels
    pub fn distance_px(&self) -> f32 {
        self.distance * PIXELS_PER_CAMERA_UNIT
    }

    /// Projective matrix for a rotation of `degrees` about the X axis through the origin
    ///
    /// `(x, y)` becomes `(x, y*cos, y*sin)` in 3D and is projected back with
    /// `w = 1 + y*sin / d`.
    pub fn rotate_x(&self, degrees: f32) -> Projective2D {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Projective2D {
            rows: [
                [1.0, 0.0, 0.0],
                [0.0, cos, 0.0],
                [0.0, sin / self.distance_px(), 1.0],
            ],
        }
    }

    /// Rotation about a horizontal axis through `(center_x, center_y)`
    ///
    /// The anchor point is left where it was: translate to origin, rotate,
    /// translate back.
    pub fn rotate_x_about(&self, degrees: f32, center_x: f32, center_y: f32) -> Projective2D {
        self.rotate_x(degrees)
            .pre_translate(-center_x, -center_y)
            .post_translate(center_x, center_y)
    }
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self::new(8.0)
    }
}
