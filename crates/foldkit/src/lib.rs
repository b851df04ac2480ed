//! Foldkit
//!
//! A folding cell: a compact title view that unfolds, strip by strip, into
//! a taller content view, and folds back the same way.
//!
//! # Features
//!
//! - **Strip planning**: splits the content height into strips, with the
//!   first flip always exactly one title high
//! - **Snapshot slicing**: cuts the content into strips and pairs each with
//!   the face that folds over it
//! - **Choreography**: perspective rotations and container height changes
//!   scheduled to finish together
//! - **State machine**: folded/unfolded with a single in-flight transition
//! - **Host abstraction**: any view hierarchy implementing [`FoldHost`];
//!   [`HeadlessHost`] renders frames in software
//!
//! # Example
//!
//! ```rust
//! use foldkit::{FoldController, HeadlessHost};
//! use foldkit_animation::AnimationScheduler;
//! use foldkit_core::{Color, Snapshot};
//!
//! let scheduler = AnimationScheduler::new();
//! let host = HeadlessHost::new(
//!     Snapshot::solid(320, 80, Color::BLUE),
//!     Snapshot::solid(320, 300, Color::WHITE),
//! );
//! let mut cell = FoldController::new(host, scheduler.handle());
//!
//! cell.toggle(false).unwrap();
//! while cell.pump() {
//!     scheduler.advance(16.0);
//! }
//! assert!(cell.is_unfolded());
//! assert_eq!(cell.host().height(), 300);
//! ```

pub mod choreography;
pub mod config;
pub mod controller;
pub mod error;
pub mod headless;
pub mod host;
pub mod planner;
pub mod slicer;

pub use choreography::{height_timeline, rotation_timeline, segment_duration, FoldDirection};
pub use config::FoldConfig;
pub use controller::{FoldController, FoldState};
pub use error::{FoldError, Result};
pub use headless::HeadlessHost;
pub use host::{CellPart, FoldHost};
pub use planner::{plan_strip_heights, StripHeightPlan};
pub use slicer::{slice_snapshots, FrontFace, StripDescriptor};
