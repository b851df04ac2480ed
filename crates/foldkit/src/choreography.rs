//! Timeline construction for fold transitions
//!
//! A transition runs two timelines side by side: rotations over the strips
//! and height changes over the container. Both are built from the same
//! per-segment duration so they end together.
//!
//! Unfolding walks the strips top to bottom. The title face folds down
//! behind the first strip, then every following strip swings down into
//! place and hands over to its own front face. Folding replays this bottom
//! to top with the opposite rotations.

use foldkit_animation::{
    chain, AnimationPrimitive, FoldAnimation, FoldMode, HeightAnimation, StripTarget, Timeline,
};
use foldkit_core::Size;

use crate::planner::StripHeightPlan;
use crate::slicer::StripDescriptor;

/// Which way a transition runs
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FoldDirection {
    /// Folded to unfolded
    Unfold,
    /// Unfolded to folded
    Fold,
}

/// Duration of one 90 degree rotation
///
/// Each strip contributes up to two sequential quarter turns, so the total
/// is split into `2 * strip_count` segments.
pub fn segment_duration(total_ms: u32, strip_count: usize) -> u32 {
    let segments = (strip_count.max(1) * 2) as u32;
    total_ms / segments
}

fn whole_size(strip: &StripDescriptor) -> Size {
    Size::new(strip.width() as f32, strip.height as f32)
}

fn front_size(strip: &StripDescriptor) -> Size {
    Size::new(strip.width() as f32, strip.front.height() as f32)
}

/// Build the rotation timeline; offsets accumulate one segment per rotation
pub fn rotation_timeline(
    direction: FoldDirection,
    strips: &[StripDescriptor],
    segment_ms: u32,
    camera_height: u32,
) -> Timeline {
    let Some(last) = strips.len().checked_sub(1) else {
        return chain(Vec::new());
    };
    let mut primitives: Vec<Box<dyn AnimationPrimitive>> = Vec::with_capacity(last * 2);
    let mut offset = 0;
    let mut push = |mode: FoldMode, target: StripTarget, size: Size| {
        primitives.push(Box::new(
            FoldAnimation::new(mode, camera_height, segment_ms)
                .with_start_offset(offset)
                .with_target(target, size),
        ));
        offset += segment_ms;
    };

    match direction {
        FoldDirection::Unfold => {
            for (i, strip) in strips.iter().enumerate() {
                if i != 0 {
                    push(FoldMode::UnfoldDown, StripTarget::whole(i), whole_size(strip));
                }
                if i != last {
                    push(FoldMode::FoldDown, StripTarget::front(i), front_size(strip));
                }
            }
        }
        FoldDirection::Fold => {
            // `step` counts from the bottom strip.
            for (step, (i, strip)) in strips.iter().enumerate().rev().enumerate() {
                if step != 0 {
                    push(FoldMode::UnfoldUp, StripTarget::front(i), front_size(strip));
                }
                if step != last {
                    push(FoldMode::FoldUp, StripTarget::whole(i), whole_size(strip));
                }
            }
        }
    }

    chain(primitives)
}

/// Build the height timeline
///
/// One segment per animated strip after the first, each lasting two
/// rotation segments, so the container grows in step with the strips and
/// both timelines end together. The final segment also absorbs the last
/// planned strip, which never rotates. A plan of exactly two strips still
/// gets one segment.
pub fn height_timeline(
    direction: FoldDirection,
    plan: &StripHeightPlan,
    segment_ms: u32,
) -> Timeline {
    let mut boundaries: Vec<u32> = plan
        .iter()
        .scan(0, |height, &strip| {
            *height += strip;
            Some(*height)
        })
        .collect();
    if boundaries.len() > 2 {
        boundaries.remove(boundaries.len() - 2);
    }

    let segments = boundaries.windows(2).map(|pair| (pair[0], pair[1]));
    let primitives: Vec<Box<dyn AnimationPrimitive>> = match direction {
        FoldDirection::Unfold => segments
            .map(|(from, to)| {
                Box::new(HeightAnimation::new(from, to, segment_ms)) as Box<dyn AnimationPrimitive>
            })
            .collect(),
        FoldDirection::Fold => segments
            .rev()
            .map(|(from, to)| {
                Box::new(HeightAnimation::new(to, from, segment_ms)) as Box<dyn AnimationPrimitive>
            })
            .collect(),
    };

    chain(primitives)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::plan_strip_heights;
    use crate::slicer::slice_snapshots;
    use foldkit_animation::{FrameEffect, StripFace, TimelineEvent};
    use foldkit_core::{Color, Snapshot};

    fn strips_for(title: u32, content: u32, flips: u32) -> (StripHeightPlan, Vec<StripDescriptor>) {
        let plan = plan_strip_heights(title, content, flips).unwrap();
        let strips = slice_snapshots(
            &plan,
            &Snapshot::solid(60, title, Color::BLUE),
            &Snapshot::solid(60, content, Color::WHITE),
            Color::GRAY,
        )
        .unwrap();
        (plan, strips)
    }

    fn faces(timeline: &Timeline) -> Vec<(usize, StripFace)> {
        timeline
            .primitives()
            .iter()
            .filter_map(|p| match p.sample(0.0) {
                FrameEffect::Transform { target, .. } => Some((target.index, target.face)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_segment_duration() {
        assert_eq!(segment_duration(1000, 4), 125);
        assert_eq!(segment_duration(1000, 3), 166);
        assert_eq!(segment_duration(1000, 1), 500);
    }

    #[test]
    fn test_unfold_order() {
        let (_, strips) = strips_for(100, 470, 0);
        assert_eq!(strips.len(), 4);
        let timeline = rotation_timeline(FoldDirection::Unfold, &strips, 100, 30);
        assert_eq!(
            faces(&timeline),
            vec![
                (0, StripFace::Front),
                (1, StripFace::Whole),
                (1, StripFace::Front),
                (2, StripFace::Whole),
                (2, StripFace::Front),
                (3, StripFace::Whole),
            ]
        );
        let offsets: Vec<u32> = timeline
            .primitives()
            .iter()
            .map(|p| p.start_offset_ms())
            .collect();
        assert_eq!(offsets, vec![0, 100, 200, 300, 400, 500]);
        assert_eq!(timeline.total_duration_ms(), 600);
    }

    #[test]
    fn test_fold_order() {
        let (_, strips) = strips_for(100, 470, 0);
        let timeline = rotation_timeline(FoldDirection::Fold, &strips, 100, 30);
        assert_eq!(
            faces(&timeline),
            vec![
                (3, StripFace::Whole),
                (2, StripFace::Front),
                (2, StripFace::Whole),
                (1, StripFace::Front),
                (1, StripFace::Whole),
                (0, StripFace::Front),
            ]
        );
    }

    #[test]
    fn test_single_strip_has_no_rotations() {
        let (_, strips) = strips_for(50, 100, 0);
        let timeline = rotation_timeline(FoldDirection::Unfold, &strips, 250, 30);
        assert!(timeline.is_empty());
    }

    #[test]
    fn test_height_segments() {
        let (plan, _) = strips_for(100, 250, 3);
        let describe = |timeline: &Timeline| -> Vec<u32> {
            timeline
                .primitives()
                .iter()
                .map(|p| match p.sample(1.0) {
                    FrameEffect::Height { px, .. } => px,
                    other => panic!("unexpected {:?}", other),
                })
                .collect()
        };

        let expand = height_timeline(FoldDirection::Unfold, &plan, 80);
        assert_eq!(describe(&expand), vec![200, 218, 250]);

        let collapse = height_timeline(FoldDirection::Fold, &plan, 80);
        assert_eq!(describe(&collapse), vec![218, 200, 100]);
        assert_eq!(collapse.total_duration_ms(), 240);

        let (plan, _) = strips_for(50, 100, 0);
        let single = height_timeline(FoldDirection::Unfold, &plan, 80);
        assert_eq!(describe(&single), vec![100]);
    }

    #[test]
    fn test_timelines_end_together() {
        let (plan, strips) = strips_for(100, 470, 0);
        let segment = segment_duration(1000, strips.len());
        let mut rotation = rotation_timeline(FoldDirection::Unfold, &strips, segment, 30);
        let mut height = height_timeline(FoldDirection::Unfold, &plan, segment * 2);

        let mut events = Vec::new();
        rotation.start(&mut events);
        height.start(&mut events);
        assert_eq!(rotation.total_duration_ms(), height.total_duration_ms());
        for _ in 0..74 {
            rotation.tick(10.0, &mut events);
            height.tick(10.0, &mut events);
        }
        assert!(!rotation.is_finished() && !height.is_finished());
        rotation.tick(10.0, &mut events);
        height.tick(10.0, &mut events);
        assert!(rotation.is_finished());
        assert!(height.is_finished());
        let finished = events
            .iter()
            .filter(|e| **e == TimelineEvent::Finished)
            .count();
        assert_eq!(finished, 2);
    }
}
