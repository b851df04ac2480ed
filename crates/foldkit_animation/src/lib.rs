//! Foldkit Animation System
//!
//! Timed primitives and the timelines that chain them.
//!
//! # Features
//!
//! - **Fold Rotations**: 90 degree perspective rotations about a strip's top or bottom edge
//! - **Height Transitions**: container height interpolation with exact final values
//! - **Timelines**: serial chains where each primitive's completion triggers the next
//! - **Start Offsets**: absolute per-primitive delays for overlap scheduling
//! - **Scheduler**: a tick-driven scheduler that buffers frame effects per timeline
//!
//! Primitives never touch a view. Each frame they produce a [`FrameEffect`]
//! which the owner of the timeline applies to whatever it animates.

pub mod easing;
pub mod error;
pub mod fold;
pub mod height;
pub mod primitive;
pub mod scheduler;
pub mod timeline;

pub use easing::Easing;
pub use error::{AnimationError, Result};
pub use fold::{FoldAnimation, FoldMode};
pub use height::HeightAnimation;
pub use primitive::{AnimationPrimitive, FrameEffect, StripFace, StripTarget};
pub use scheduler::{AnimationScheduler, SchedulerHandle, TimelineId};
pub use timeline::{chain, Timeline, TimelineEvent};
