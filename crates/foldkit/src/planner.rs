//! Strip height planning
//!
//! Splits the content height into the strips that fold one after another.
//! The first two strips always match the title height, so the first flip
//! (title folding away to reveal the top of the content) is guaranteed.
//! Whatever is left is divided either into a requested number of extra
//! strips or, in auto mode, into title-height strips plus a shorter tail.

use std::ops::Deref;

use smallvec::SmallVec;

use crate::error::{FoldError, Result};

/// Ordered strip heights, top to bottom
///
/// Always at least two entries that sum to the content height.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StripHeightPlan {
    heights: SmallVec<[u32; 8]>,
}

impl StripHeightPlan {
    pub fn as_slice(&self) -> &[u32] {
        &self.heights
    }

    /// Sum of all strips, equal to the content height
    pub fn total(&self) -> u32 {
        self.heights.iter().sum()
    }

    /// Vertical offset of every strip from the top
    pub fn offsets(&self) -> impl Iterator<Item = u32> + '_ {
        self.heights.iter().scan(0, |offset, &height| {
            let top = *offset;
            *offset += height;
            Some(top)
        })
    }

    pub fn title_height(&self) -> u32 {
        self.heights[0]
    }
}

impl Deref for StripHeightPlan {
    type Target = [u32];

    fn deref(&self) -> &[u32] {
        &self.heights
    }
}

/// Compute strip heights for a cell
///
/// `additional_flips == 0` selects auto mode. With explicit flips the
/// remaining height is divided evenly and the whole integer remainder goes to
/// the first extra strip; no extra strip may be taller than the title.
pub fn plan_strip_heights(title: u32, content: u32, additional_flips: u32) -> Result<StripHeightPlan> {
    let remaining = title
        .checked_mul(2)
        .and_then(|two_titles| content.checked_sub(two_titles))
        .ok_or(FoldError::ContentTooSmall { title, content })?;

    let mut heights: SmallVec<[u32; 8]> = SmallVec::new();
    heights.push(title);
    heights.push(title);

    if remaining == 0 {
        return Ok(StripHeightPlan { heights });
    }

    if additional_flips > 0 {
        let part_height = remaining / additional_flips;
        let remainder = remaining % additional_flips;
        if part_height == 0 {
            return Err(FoldError::TooManyFlips {
                flips: additional_flips,
                remaining,
            });
        }
        if part_height + remainder > title {
            return Err(FoldError::TooFewFlips {
                flips: additional_flips,
                part_height: part_height + remainder,
                title,
            });
        }
        heights.push(part_height + remainder);
        heights.extend((1..additional_flips).map(|_| part_height));
    } else {
        // A zero title leaves no room for any strip of positive height.
        if title == 0 {
            return Err(FoldError::ContentTooSmall { title, content });
        }
        let full_parts = remaining / title;
        let rest = remaining % title;
        heights.extend((0..full_parts).map(|_| title));
        if rest > 0 {
            heights.push(rest);
        }
    }

    Ok(StripHeightPlan { heights })
}
