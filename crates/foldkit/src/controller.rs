//! Folding cell state machine
//!
//! A cell is either folded (title visible) or unfolded (content visible).
//! Orthogonal to that, a transition may be in flight. While one is, every
//! toggle request is dropped; there is no way to abort a transition, so at
//! most one exists per cell.
//!
//! A transition is started synchronously by [`FoldController::toggle`] and
//! completed by [`FoldController::pump`], which the host calls after each
//! scheduler tick to apply the buffered frames.

use foldkit_animation::{FrameEffect, SchedulerHandle, TimelineEvent, TimelineId};
use tracing::{debug, warn};

use crate::choreography::{
    height_timeline, rotation_timeline, segment_duration, FoldDirection,
};
use crate::config::FoldConfig;
use crate::error::{FoldError, Result};
use crate::host::{CellPart, FoldHost};
use crate::planner::plan_strip_heights;
use crate::slicer::slice_snapshots;

/// Resting state of a folding cell
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FoldState {
    #[default]
    Folded,
    Unfolded,
}

/// The transition currently in flight
#[derive(Debug)]
struct Transition {
    direction: FoldDirection,
    rotation: TimelineId,
    height: TimelineId,
    rotation_done: bool,
    height_done: bool,
    /// Container height once the transition settles
    end_height: u32,
}

impl Transition {
    fn is_complete(&self) -> bool {
        self.rotation_done && self.height_done
    }
}

/// Drives fold and unfold transitions for one cell
pub struct FoldController<H: FoldHost> {
    host: H,
    config: FoldConfig,
    scheduler: SchedulerHandle,
    state: FoldState,
    transition: Option<Transition>,
}

impl<H: FoldHost> FoldController<H> {
    /// Create a folded cell with default settings
    pub fn new(host: H, scheduler: SchedulerHandle) -> Self {
        Self::with_config(host, scheduler, FoldConfig::default())
    }

    pub fn with_config(host: H, scheduler: SchedulerHandle, config: FoldConfig) -> Self {
        Self {
            host,
            config,
            scheduler,
            state: FoldState::Folded,
            transition: None,
        }
    }

    /// Replace the settings; the next transition picks them up
    pub fn configure(&mut self, config: FoldConfig) {
        self.config = config;
    }

    pub fn config(&self) -> &FoldConfig {
        &self.config
    }

    pub fn state(&self) -> FoldState {
        self.state
    }

    pub fn is_unfolded(&self) -> bool {
        self.state == FoldState::Unfolded
    }

    /// Whether a transition is in flight
    pub fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Switch to the other state
    ///
    /// Dropped while a transition is in flight. `instant` switches without
    /// animating.
    pub fn toggle(&mut self, instant: bool) -> Result<()> {
        if self.transition.is_some() {
            debug!("FoldController: toggle dropped, transition in flight");
            return Ok(());
        }
        match self.state {
            FoldState::Unfolded => self.fold(instant),
            FoldState::Folded => self.unfold(instant),
        }
    }

    /// Unfold the cell; a no-op when already unfolded or animating
    pub fn unfold(&mut self, instant: bool) -> Result<()> {
        if self.state == FoldState::Unfolded || self.transition.is_some() {
            return Ok(());
        }
        if !self.has_parts() {
            return Ok(());
        }

        if instant {
            let width = self.host.width();
            let content_height = self.host.measure(CellPart::Content, width);
            self.host.set_visible(CellPart::Title, false);
            self.host.set_visible(CellPart::Content, true);
            self.host.set_height(content_height);
            self.host.request_layout();
            self.state = FoldState::Unfolded;
            debug!("FoldController: unfolded instantly to {}px", content_height);
            return Ok(());
        }

        self.start_transition(FoldDirection::Unfold)?;
        self.host.request_layout();
        Ok(())
    }

    /// Fold the cell; a no-op when already folded or animating
    pub fn fold(&mut self, instant: bool) -> Result<()> {
        if self.state == FoldState::Folded || self.transition.is_some() {
            return Ok(());
        }
        if !self.has_parts() {
            return Ok(());
        }

        if instant {
            let width = self.host.width();
            let title_height = self.host.measure(CellPart::Title, width);
            self.host.set_visible(CellPart::Content, false);
            self.host.set_visible(CellPart::Title, true);
            self.host.set_height(title_height);
            self.host.request_layout();
            self.state = FoldState::Folded;
            debug!("FoldController: folded instantly to {}px", title_height);
            return Ok(());
        }

        self.start_transition(FoldDirection::Fold)
    }

    /// Apply buffered frames and finish the transition once both timelines end
    ///
    /// Returns true while a transition is still in flight.
    pub fn pump(&mut self) -> bool {
        let Some(transition) = self.transition.as_mut() else {
            return false;
        };

        if !self.scheduler.is_alive() {
            warn!("FoldController: scheduler dropped mid-transition, settling immediately");
            transition.rotation_done = true;
            transition.height_done = true;
        }

        for event in self.scheduler.drain_events(transition.rotation) {
            if apply_event(&mut self.host, event) {
                transition.rotation_done = true;
            }
        }
        for event in self.scheduler.drain_events(transition.height) {
            if apply_event(&mut self.host, event) {
                transition.height_done = true;
            }
        }

        if transition.is_complete() {
            self.finish_transition();
            return false;
        }
        true
    }

    fn has_parts(&self) -> bool {
        let present =
            self.host.has_part(CellPart::Title) && self.host.has_part(CellPart::Content);
        if !present {
            debug!("FoldController: title or content view missing, nothing to toggle");
        }
        present
    }

    /// Everything fallible runs before the first view mutation.
    fn start_transition(&mut self, direction: FoldDirection) -> Result<()> {
        if !self.scheduler.is_alive() {
            return Err(FoldError::SchedulerUnavailable);
        }

        let width = self.host.width();
        let title = self.host.render_to_image(CellPart::Title, width);
        let content = self.host.render_to_image(CellPart::Content, width);

        let plan = plan_strip_heights(
            title.height(),
            content.height(),
            self.config.additional_flips,
        )?;
        let strips = slice_snapshots(&plan, &title, &content, self.config.back_side_color)?;

        let end_height = match direction {
            FoldDirection::Unfold => plan.total(),
            FoldDirection::Fold => plan.title_height(),
        };
        let segment_ms = segment_duration(self.config.duration_ms, strips.len());
        let rotation = rotation_timeline(direction, &strips, segment_ms, self.config.camera_height);
        let height = height_timeline(direction, &plan, segment_ms * 2);

        let (Some(rotation), Some(height)) = (
            self.scheduler.register_timeline(rotation),
            self.scheduler.register_timeline(height),
        ) else {
            return Err(FoldError::SchedulerUnavailable);
        };

        self.host.set_visible(CellPart::Title, false);
        self.host.set_visible(CellPart::Content, false);
        self.host.mount_strips(&strips);

        self.scheduler.start_timeline(rotation);
        self.scheduler.start_timeline(height);
        self.transition = Some(Transition {
            direction,
            rotation,
            height,
            rotation_done: false,
            height_done: false,
            end_height,
        });

        debug!(
            "FoldController: {:?} started with {} strips, plan {:?}, {}ms per segment",
            direction,
            strips.len(),
            plan.as_slice(),
            segment_ms
        );
        Ok(())
    }

    fn finish_transition(&mut self) {
        let Some(transition) = self.transition.take() else {
            return;
        };
        self.scheduler.remove_timeline(transition.rotation);
        self.scheduler.remove_timeline(transition.height);
        self.host.unmount_strips();
        self.host.set_height(transition.end_height);
        self.host.request_layout();

        match transition.direction {
            FoldDirection::Unfold => {
                self.host.set_visible(CellPart::Content, true);
                self.state = FoldState::Unfolded;
            }
            FoldDirection::Fold => {
                self.host.set_visible(CellPart::Content, false);
                self.host.set_visible(CellPart::Title, true);
                self.state = FoldState::Folded;
            }
        }
        debug!("FoldController: {:?} finished", transition.direction);
    }
}

impl<H: FoldHost> Drop for FoldController<H> {
    fn drop(&mut self) {
        if let Some(transition) = self.transition.take() {
            self.scheduler.remove_timeline(transition.rotation);
            self.scheduler.remove_timeline(transition.height);
        }
    }
}

/// Apply one timeline event; returns true on `Finished`
fn apply_event<H: FoldHost>(host: &mut H, event: TimelineEvent) -> bool {
    match event {
        TimelineEvent::Frame(FrameEffect::Transform { target, matrix }) => {
            host.apply_transform(target, &matrix);
        }
        TimelineEvent::Frame(FrameEffect::ResetTransform(target)) => {
            host.reset_transform(target);
        }
        TimelineEvent::Frame(FrameEffect::Height { px, request_layout }) => {
            host.set_height(px);
            if request_layout {
                host.request_layout();
            }
        }
        TimelineEvent::PrimitiveFinished { index } => {
            tracing::trace!("FoldController: primitive {} finished", index);
        }
        TimelineEvent::Finished => return true,
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::HeadlessHost;
    use foldkit_animation::AnimationScheduler;
    use foldkit_core::{Color, Snapshot};

    fn cell(title: u32, content: u32) -> HeadlessHost {
        HeadlessHost::new(
            Snapshot::solid(60, title, Color::BLUE),
            Snapshot::solid(60, content, Color::WHITE),
        )
    }

    /// Advance in 10ms steps until the transition settles; returns elapsed ms
    fn run(controller: &mut FoldController<HeadlessHost>, scheduler: &AnimationScheduler) -> u32 {
        let mut elapsed = 0;
        controller.pump();
        while controller.is_animating() {
            scheduler.advance(10.0);
            elapsed += 10;
            controller.pump();
            assert!(elapsed <= 10_000, "transition never settled");
        }
        elapsed
    }

    #[test]
    fn test_animated_unfold() {
        let scheduler = AnimationScheduler::new();
        let mut controller = FoldController::new(cell(100, 470), scheduler.handle());

        controller.toggle(false).unwrap();
        assert!(controller.is_animating());
        assert_eq!(controller.state(), FoldState::Folded);
        let host = controller.host();
        assert!(!host.is_visible(CellPart::Title));
        assert!(!host.is_visible(CellPart::Content));
        assert_eq!(host.mounted_strip_count(), 4);
        assert_eq!(host.layout_requests(), 1);
        assert_eq!(scheduler.timeline_count(), 2);

        assert_eq!(run(&mut controller, &scheduler), 750);
        assert!(controller.is_unfolded());
        let host = controller.host();
        assert!(host.is_visible(CellPart::Content));
        assert!(!host.is_visible(CellPart::Title));
        assert_eq!(host.height(), 470);
        assert_eq!(host.mounted_strip_count(), 0);
        assert_eq!(scheduler.timeline_count(), 0);
    }

    #[test]
    fn test_height_grows_during_unfold() {
        let scheduler = AnimationScheduler::new();
        let mut controller = FoldController::new(cell(100, 470), scheduler.handle());
        controller.toggle(false).unwrap();

        let mut heights = Vec::new();
        controller.pump();
        while controller.is_animating() {
            scheduler.advance(10.0);
            controller.pump();
            heights.push(controller.host().height());
        }
        assert!(heights.windows(2).all(|pair| pair[0] <= pair[1]));
        assert_eq!(heights.last(), Some(&470));
    }

    #[test]
    fn test_toggle_dropped_while_animating() {
        let scheduler = AnimationScheduler::new();
        let mut controller = FoldController::new(cell(100, 470), scheduler.handle());

        controller.toggle(false).unwrap();
        scheduler.advance(200.0);
        controller.pump();
        controller.toggle(false).unwrap();
        controller.toggle(true).unwrap();
        assert!(controller.is_animating());
        assert_eq!(scheduler.timeline_count(), 2);

        run(&mut controller, &scheduler);
        assert!(controller.is_unfolded());
    }

    #[test]
    fn test_animated_fold() {
        let scheduler = AnimationScheduler::new();
        let mut controller = FoldController::new(cell(100, 470), scheduler.handle());
        controller.toggle(true).unwrap();
        assert!(controller.is_unfolded());

        controller.toggle(false).unwrap();
        assert!(controller.is_animating());
        assert_eq!(run(&mut controller, &scheduler), 750);
        assert_eq!(controller.state(), FoldState::Folded);
        let host = controller.host();
        assert!(host.is_visible(CellPart::Title));
        assert!(!host.is_visible(CellPart::Content));
        assert_eq!(host.height(), 100);
    }

    #[test]
    fn test_instant_round_trip() {
        let scheduler = AnimationScheduler::new();
        let mut controller = FoldController::new(cell(100, 470), scheduler.handle());

        controller.toggle(true).unwrap();
        assert!(controller.is_unfolded());
        assert!(!controller.is_animating());
        assert_eq!(controller.host().height(), 470);

        controller.toggle(true).unwrap();
        assert_eq!(controller.state(), FoldState::Folded);
        assert_eq!(controller.host().height(), 100);
        assert!(controller.host().is_visible(CellPart::Title));
        assert_eq!(scheduler.timeline_count(), 0);

        controller.toggle(true).unwrap();
        assert!(controller.is_unfolded());
        assert_eq!(controller.host().height(), 470);
    }

    #[test]
    fn test_explicit_fold_and_unfold_are_idempotent() {
        let scheduler = AnimationScheduler::new();
        let mut controller = FoldController::new(cell(100, 470), scheduler.handle());

        controller.fold(false).unwrap();
        assert!(!controller.is_animating());
        controller.unfold(true).unwrap();
        controller.unfold(false).unwrap();
        assert!(!controller.is_animating());
        assert!(controller.is_unfolded());
    }

    #[test]
    fn test_two_strip_cell() {
        let scheduler = AnimationScheduler::new();
        let mut controller = FoldController::new(cell(50, 100), scheduler.handle());

        controller.toggle(false).unwrap();
        assert_eq!(controller.host().mounted_strip_count(), 1);
        assert_eq!(run(&mut controller, &scheduler), 1000);
        assert!(controller.is_unfolded());
        assert_eq!(controller.host().height(), 100);
    }

    #[test]
    fn test_missing_part_is_ignored() {
        let scheduler = AnimationScheduler::new();
        let host = HeadlessHost::title_only(Snapshot::solid(60, 100, Color::BLUE));
        let mut controller = FoldController::new(host, scheduler.handle());

        controller.toggle(false).unwrap();
        controller.toggle(true).unwrap();
        assert_eq!(controller.state(), FoldState::Folded);
        assert!(!controller.is_animating());
        assert!(controller.host().is_visible(CellPart::Title));
    }

    #[test]
    fn test_invalid_configuration_leaves_cell_untouched() {
        let scheduler = AnimationScheduler::new();
        let config = FoldConfig::default().with_additional_flips(1);
        let mut controller = FoldController::with_config(cell(50, 200), scheduler.handle(), config);

        let err = controller.toggle(false).unwrap_err();
        assert!(err.is_invalid_configuration());
        assert_eq!(controller.state(), FoldState::Folded);
        assert!(!controller.is_animating());
        let host = controller.host();
        assert!(host.is_visible(CellPart::Title));
        assert!(!host.is_visible(CellPart::Content));
        assert_eq!(host.mounted_strip_count(), 0);
        assert_eq!(host.height(), 50);
        assert_eq!(host.layout_requests(), 0);
        assert_eq!(scheduler.timeline_count(), 0);

        // A valid configuration on the same cell works.
        controller.configure(FoldConfig::default().with_additional_flips(2));
        controller.toggle(false).unwrap();
        run(&mut controller, &scheduler);
        assert!(controller.is_unfolded());
    }

    #[test]
    fn test_content_too_small() {
        let scheduler = AnimationScheduler::new();
        let mut controller = FoldController::new(cell(100, 150), scheduler.handle());
        assert_eq!(
            controller.toggle(false),
            Err(FoldError::ContentTooSmall {
                title: 100,
                content: 150
            })
        );
        assert!(controller.host().is_visible(CellPart::Title));
    }

    #[test]
    fn test_scheduler_dropped() {
        let scheduler = AnimationScheduler::new();
        let mut controller = FoldController::new(cell(100, 470), scheduler.handle());
        controller.toggle(false).unwrap();
        drop(scheduler);

        assert!(!controller.pump());
        assert!(controller.is_unfolded());
        assert!(controller.host().is_visible(CellPart::Content));

        assert_eq!(controller.host().height(), 470);

        assert_eq!(
            controller.toggle(false),
            Err(FoldError::SchedulerUnavailable)
        );
        assert!(controller.is_unfolded());
    }

    #[test]
    fn test_scheduler_dropped_mid_fold_restores_title_height() {
        let scheduler = AnimationScheduler::new();
        let mut controller = FoldController::new(cell(100, 470), scheduler.handle());
        controller.toggle(true).unwrap();
        controller.toggle(false).unwrap();
        controller.pump();
        scheduler.advance(50.0);
        controller.pump();
        assert!(controller.host().height() > 100);
        let layouts = controller.host().layout_requests();
        drop(scheduler);

        assert!(!controller.pump());
        assert_eq!(controller.state(), FoldState::Folded);
        let host = controller.host();
        assert!(host.is_visible(CellPart::Title));
        assert!(!host.is_visible(CellPart::Content));
        assert_eq!(host.height(), 100);
        assert!(host.layout_requests() > layouts);
    }

    #[test]
    fn test_dropping_cell_mid_transition_releases_timelines() {
        let scheduler = AnimationScheduler::new();
        for _ in 0..5 {
            let mut controller = FoldController::new(cell(100, 470), scheduler.handle());
            controller.toggle(false).unwrap();
            scheduler.advance(100.0);
            controller.pump();
            assert!(controller.is_animating());
        }
        scheduler.advance(2000.0);
        assert_eq!(scheduler.timeline_count(), 0);
    }

    #[test]
    fn test_direct_unfold_requests_layout() {
        let scheduler = AnimationScheduler::new();
        let mut controller = FoldController::new(cell(100, 470), scheduler.handle());
        controller.unfold(true).unwrap();
        assert_eq!(controller.host().layout_requests(), 1);

        let mut controller = FoldController::new(cell(100, 470), scheduler.handle());
        controller.unfold(false).unwrap();
        assert_eq!(controller.host().layout_requests(), 1);
    }
}
