//! Serial timelines
//!
//! [`chain`] turns a list of independent primitives into one [`Timeline`]:
//! the completion of primitive `i` triggers primitive `i + 1`. Chaining
//! decides the order; each primitive's absolute start offset decides when it
//! becomes active once triggered. A triggered primitive runs from
//! `max(trigger_time, start_offset)`.
//!
//! A timeline reports everything it does as [`TimelineEvent`]s. The final
//! [`TimelineEvent::Finished`] is emitted exactly once.

use crate::primitive::{AnimationPrimitive, FrameEffect};

/// Something that happened while advancing a timeline
#[derive(Clone, Debug, PartialEq)]
pub enum TimelineEvent {
    /// A frame to apply
    Frame(FrameEffect),
    /// Primitive `index` reached its end and triggered its successor
    PrimitiveFinished { index: usize },
    /// The last primitive finished
    Finished,
}

/// Wire primitives into a serial chain
pub fn chain(primitives: Vec<Box<dyn AnimationPrimitive>>) -> Timeline {
    Timeline::new(primitives)
}

/// A serial chain of primitives
#[derive(Debug)]
pub struct Timeline {
    primitives: Vec<Box<dyn AnimationPrimitive>>,
    /// Primitive that has been triggered and not yet finished
    cursor: Option<usize>,
    /// When the current primitive was triggered, in timeline milliseconds
    trigger_ms: f32,
    elapsed_ms: f32,
    playing: bool,
    finished: bool,
}

impl Timeline {
    pub fn new(primitives: Vec<Box<dyn AnimationPrimitive>>) -> Self {
        Self {
            primitives,
            cursor: None,
            trigger_ms: 0.0,
            elapsed_ms: 0.0,
            playing: false,
            finished: false,
        }
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    pub fn primitives(&self) -> &[Box<dyn AnimationPrimitive>] {
        &self.primitives
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Time from start until the last primitive finishes
    pub fn total_duration_ms(&self) -> u32 {
        self.primitives.iter().fold(0, |end, p| {
            end.max(p.start_offset_ms()) + p.duration_ms()
        })
    }

    /// Start from the beginning
    ///
    /// Primitives that fill before emit their first frame right away, so
    /// layers waiting for their turn already show their starting pose.
    pub fn start(&mut self, out: &mut Vec<TimelineEvent>) {
        self.elapsed_ms = 0.0;
        self.trigger_ms = 0.0;
        self.finished = false;
        self.playing = true;
        self.cursor = if self.primitives.is_empty() {
            None
        } else {
            Some(0)
        };

        out.extend(
            self.primitives
                .iter()
                .filter(|p| p.fills_before())
                .map(|p| TimelineEvent::Frame(p.sample(0.0))),
        );
    }

    /// Halt without emitting `Finished`
    pub fn stop(&mut self) {
        self.playing = false;
    }

    /// Advance by `dt_ms`, appending events to `out`
    ///
    /// Time left over when a primitive finishes carries into its successor,
    /// so a long frame can finish several primitives at once.
    pub fn tick(&mut self, dt_ms: f32, out: &mut Vec<TimelineEvent>) {
        if !self.playing {
            return;
        }
        self.elapsed_ms += dt_ms.max(0.0);

        while let Some(index) = self.cursor {
            let primitive = &self.primitives[index];
            let active_ms = self.trigger_ms.max(primitive.start_offset_ms() as f32);
            let local_ms = self.elapsed_ms - active_ms;
            if local_ms < 0.0 {
                // Triggered but still inside its start offset.
                return;
            }

            let duration = primitive.duration_ms() as f32;
            let t = if duration <= 0.0 {
                1.0
            } else {
                (local_ms / duration).min(1.0)
            };
            out.push(TimelineEvent::Frame(primitive.sample(t)));
            if t < 1.0 {
                return;
            }

            if !primitive.fills_after() {
                if let Some(reset) = primitive.reset() {
                    out.push(TimelineEvent::Frame(reset));
                }
            }
            out.push(TimelineEvent::PrimitiveFinished { index });
            tracing::trace!("timeline primitive {} finished at {}ms", index, active_ms + duration);

            self.trigger_ms = active_ms + duration;
            self.cursor = (index + 1 < self.primitives.len()).then_some(index + 1);
        }

        self.playing = false;
        self.finished = true;
        out.push(TimelineEvent::Finished);
    }
}
