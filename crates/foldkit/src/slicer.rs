//! Snapshot slicing
//!
//! Cuts the content snapshot into one strip per planned height and pairs
//! each strip with the face drawn over its lower edge: the title for the
//! first strip, a back-side placeholder for the following ones. The last
//! planned strip never folds over anything, so it has no front face and is
//! left out of the animated list.

use foldkit_core::{Color, Snapshot};

use crate::error::Result;
use crate::planner::StripHeightPlan;

/// The face drawn over a strip's lower edge
#[derive(Clone, Debug, PartialEq)]
pub enum FrontFace {
    /// The title snapshot; only the first strip carries it
    Title(Snapshot),
    /// The reverse of the next strip, filled with the back-side color
    BackSide {
        color: Color,
        width: u32,
        height: u32,
    },
    /// Nothing folds over this strip
    None,
}

impl FrontFace {
    pub fn height(&self) -> u32 {
        match self {
            FrontFace::Title(snapshot) => snapshot.height(),
            FrontFace::BackSide { height, .. } => *height,
            FrontFace::None => 0,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, FrontFace::None)
    }

    /// Rasterize the face; `None` for [`FrontFace::None`]
    pub fn to_snapshot(&self) -> Option<Snapshot> {
        match self {
            FrontFace::Title(snapshot) => Some(snapshot.clone()),
            FrontFace::BackSide {
                color,
                width,
                height,
            } => Some(Snapshot::solid(*width, *height, *color)),
            FrontFace::None => None,
        }
    }
}

/// One horizontal slice of the cell
#[derive(Clone, Debug, PartialEq)]
pub struct StripDescriptor {
    pub front: FrontFace,
    /// Crop of the content snapshot at this strip's offset
    pub back: Snapshot,
    pub height: u32,
    /// Distance from the top of the content
    pub offset: u32,
}

impl StripDescriptor {
    pub fn width(&self) -> u32 {
        self.back.width()
    }
}

/// Build the animated strips for a plan
///
/// Offsets accumulate over every planned strip, including the final one
/// that is dropped from the result.
pub fn slice_snapshots(
    plan: &StripHeightPlan,
    title: &Snapshot,
    content: &Snapshot,
    back_side_color: Color,
) -> Result<Vec<StripDescriptor>> {
    let width = title.width();
    let last = plan.len() - 1;
    let mut strips = Vec::with_capacity(last);

    for (i, (offset, &height)) in plan.offsets().zip(plan.iter()).enumerate() {
        let back = content.crop(0, offset, width, height)?;
        let front = if i == last {
            FrontFace::None
        } else if i == 0 {
            FrontFace::Title(title.clone())
        } else {
            FrontFace::BackSide {
                color: back_side_color,
                width,
                height: plan[i + 1],
            }
        };

        if front.is_none() {
            continue;
        }
        strips.push(StripDescriptor {
            front,
            back,
            height,
            offset,
        });
    }

    Ok(strips)
}
