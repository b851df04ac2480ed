//! Foldkit Core
//!
//! Foundation types shared by the fold animation engine:
//!
//! - **Color**: RGBA color with hex parsing, used for back-side fills
//! - **Geometry**: points, sizes, and the 3x3 projective matrix that a
//!   perspective rotation produces
//! - **Camera**: a perspective camera that turns an X-axis rotation into a
//!   2D projective transform
//! - **Snapshot**: an opaque fixed-size RGBA image that can be cropped and
//!   filled with a solid color
//!
//! # Example
//!
//! ```rust
//! use foldkit_core::{Color, PerspectiveCamera, Snapshot};
//!
//! let content = Snapshot::solid(320, 200, Color::WHITE);
//! let strip = content.crop(0, 50, 320, 50).unwrap();
//! assert_eq!(strip.height(), 50);
//!
//! let camera = PerspectiveCamera::new(30.0);
//! let matrix = camera.rotate_x(45.0);
//! assert!(matrix.map_point(foldkit_core::Point::new(0.0, 10.0)).is_some());
//! ```

pub mod camera;
pub mod color;
pub mod error;
pub mod geometry;
pub mod snapshot;

pub use camera::PerspectiveCamera;
pub use color::Color;
pub use error::{CoreError, Result};
pub use geometry::{Point, Projective2D, Size};
pub use snapshot::Snapshot;
