//! Animation scheduler
//!
//! Owns every registered timeline and advances them each frame. Timelines
//! never call back into their owners; each tick buffers the events a
//! timeline produced, and the owner drains them through its
//! [`SchedulerHandle`]:
//!
//! ```ignore
//! let scheduler = AnimationScheduler::new();
//! let handle = scheduler.handle();
//! let id = handle.register_timeline(timeline).unwrap();
//! handle.start_timeline(id);
//!
//! // Host frame loop
//! scheduler.advance(16.0);
//! for event in handle.drain_events(id) {
//!     // apply event
//! }
//! ```
//!
//! All work happens on the thread driving the frame loop, so shared state is
//! an `Rc<RefCell<_>>` rather than a mutex.

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Instant;

use slotmap::{new_key_type, SlotMap};

use crate::timeline::{Timeline, TimelineEvent};

new_key_type! {
    /// Handle to a registered timeline
    pub struct TimelineId;
}

struct TimelineSlot {
    timeline: Timeline,
    /// Events produced since the owner last drained them
    pending: Vec<TimelineEvent>,
}

/// Internal state of the animation scheduler
struct SchedulerInner {
    timelines: SlotMap<TimelineId, TimelineSlot>,
    last_frame: Instant,
}

impl SchedulerInner {
    fn advance(&mut self, dt_ms: f32) -> bool {
        for (_, slot) in self.timelines.iter_mut() {
            slot.timeline.tick(dt_ms, &mut slot.pending);
        }

        // Finished timelines stay registered until their owner removes
        // them, so buffered events are never lost.
        self.timelines.iter().any(|(_, s)| s.timeline.is_playing())
    }
}

/// The scheduler that ticks all registered timelines
///
/// Held by whoever runs the frame loop; components receive a
/// [`SchedulerHandle`].
pub struct AnimationScheduler {
    inner: Rc<RefCell<SchedulerInner>>,
}

impl AnimationScheduler {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(SchedulerInner {
                timelines: SlotMap::with_key(),
                last_frame: Instant::now(),
            })),
        }
    }

    /// Get a handle to this scheduler for passing to components
    pub fn handle(&self) -> SchedulerHandle {
        SchedulerHandle {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Tick all timelines by the wall-clock time since the previous tick
    ///
    /// Returns true if any timeline is still playing.
    pub fn tick(&self) -> bool {
        let mut inner = self.inner.borrow_mut();
        let now = Instant::now();
        let dt_ms = (now - inner.last_frame).as_secs_f32() * 1000.0;
        inner.last_frame = now;
        inner.advance(dt_ms)
    }

    /// Tick all timelines by a fixed step
    ///
    /// Returns true if any timeline is still playing.
    pub fn advance(&self, dt_ms: f32) -> bool {
        let mut inner = self.inner.borrow_mut();
        inner.last_frame = Instant::now();
        inner.advance(dt_ms)
    }

    /// Check if any timeline is still playing
    pub fn has_active_animations(&self) -> bool {
        self.inner
            .borrow()
            .timelines
            .iter()
            .any(|(_, s)| s.timeline.is_playing())
    }

    /// Get the number of registered timelines
    pub fn timeline_count(&self) -> usize {
        self.inner.borrow().timelines.len()
    }
}

impl Default for AnimationScheduler {
    fn default() -> Self {
        Self::new()
    }
}

/// A weak handle to the animation scheduler
///
/// It won't keep the scheduler alive; once the scheduler is dropped every
/// operation becomes a no-op.
#[derive(Clone)]
pub struct SchedulerHandle {
    inner: Weak<RefCell<SchedulerInner>>,
}

impl SchedulerHandle {
    /// Register a timeline and return its ID
    pub fn register_timeline(&self, timeline: Timeline) -> Option<TimelineId> {
        self.inner.upgrade().map(|inner| {
            let mut guard = inner.borrow_mut();
            // A fresh registration should not inherit a stale frame delta.
            guard.last_frame = Instant::now();
            guard.timelines.insert(TimelineSlot {
                timeline,
                pending: Vec::new(),
            })
        })
    }

    /// Start a timeline; its fill-before frames are buffered immediately
    pub fn start_timeline(&self, id: TimelineId) {
        if let Some(inner) = self.inner.upgrade() {
            if let Some(slot) = inner.borrow_mut().timelines.get_mut(id) {
                slot.timeline.start(&mut slot.pending);
            }
        }
    }

    /// Stop a timeline without finishing it
    pub fn stop_timeline(&self, id: TimelineId) {
        if let Some(inner) = self.inner.upgrade() {
            if let Some(slot) = inner.borrow_mut().timelines.get_mut(id) {
                slot.timeline.stop();
            }
        }
    }

    /// Check if timeline is playing
    pub fn is_timeline_playing(&self, id: TimelineId) -> bool {
        self.inner
            .upgrade()
            .and_then(|inner| {
                inner
                    .borrow()
                    .timelines
                    .get(id)
                    .map(|s| s.timeline.is_playing())
            })
            .unwrap_or(false)
    }

    /// Take every event buffered for a timeline
    pub fn drain_events(&self, id: TimelineId) -> Vec<TimelineEvent> {
        self.inner
            .upgrade()
            .and_then(|inner| {
                inner
                    .borrow_mut()
                    .timelines
                    .get_mut(id)
                    .map(|s| std::mem::take(&mut s.pending))
            })
            .unwrap_or_default()
    }

    /// Remove a timeline
    pub fn remove_timeline(&self, id: TimelineId) {
        if let Some(inner) = self.inner.upgrade() {
            inner.borrow_mut().timelines.remove(id);
        }
    }

    /// Check if the scheduler is still alive
    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::easing::Easing;
    use crate::height::HeightAnimation;
    use crate::primitive::{AnimationPrimitive, FrameEffect};
    use crate::timeline::chain;

    fn grow(from: u32, to: u32) -> Timeline {
        let step: Box<dyn AnimationPrimitive> =
            Box::new(HeightAnimation::new(from, to, 100).with_easing(Easing::Linear));
        chain(vec![step])
    }

    #[test]
    fn test_scheduler_advance() {
        let scheduler = AnimationScheduler::new();
        let handle = scheduler.handle();

        let id = handle.register_timeline(grow(0, 100)).unwrap();
        handle.start_timeline(id);
        assert!(handle.is_timeline_playing(id));

        assert!(scheduler.advance(40.0));
        assert_eq!(
            handle.drain_events(id),
            vec![TimelineEvent::Frame(FrameEffect::Height {
                px: 40,
                request_layout: true
            })]
        );

        assert!(!scheduler.advance(60.0));
        let events = handle.drain_events(id);
        assert_eq!(events.last(), Some(&TimelineEvent::Finished));
        assert!(handle.drain_events(id).is_empty());
    }

    #[test]
    fn test_timelines_are_independent() {
        let scheduler = AnimationScheduler::new();
        let handle = scheduler.handle();

        let a = handle.register_timeline(grow(0, 100)).unwrap();
        let b = handle.register_timeline(grow(100, 0)).unwrap();
        handle.start_timeline(a);

        scheduler.advance(50.0);
        assert_eq!(handle.drain_events(a).len(), 1);
        assert!(handle.drain_events(b).is_empty());
        assert_eq!(scheduler.timeline_count(), 2);

        handle.remove_timeline(b);
        assert_eq!(scheduler.timeline_count(), 1);
    }

    #[test]
    fn test_handle_weak_reference() {
        let handle = {
            let scheduler = AnimationScheduler::new();
            scheduler.handle()
        };

        // Scheduler is dropped, handle should not be alive
        assert!(!handle.is_alive());

        // Operations should safely no-op
        assert!(handle.register_timeline(grow(0, 1)).is_none());
    }

    #[test]
    fn test_stopped_timeline_is_inactive() {
        let scheduler = AnimationScheduler::new();
        let handle = scheduler.handle();
        let id = handle.register_timeline(grow(0, 100)).unwrap();
        handle.start_timeline(id);
        handle.stop_timeline(id);
        assert!(!scheduler.has_active_animations());
    }
}
