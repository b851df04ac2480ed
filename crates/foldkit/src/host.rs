//! Host capability interface
//!
//! The fold engine never touches a concrete UI toolkit. Everything it needs
//! from the view hierarchy goes through [`FoldHost`]; each toolkit provides
//! one implementation. [`HeadlessHost`](crate::HeadlessHost) is the software
//! implementation used for tests and offline rendering.

use foldkit_animation::StripTarget;
use foldkit_core::{Projective2D, Snapshot};

use crate::slicer::StripDescriptor;

/// The two children of a folding cell
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CellPart {
    /// Compact view shown while folded
    Title,
    /// Expanded view shown while unfolded
    Content,
}

/// What the fold engine needs from the host view hierarchy
///
/// Strip layers are addressed by their index in the slice passed to
/// [`mount_strips`](FoldHost::mount_strips), top to bottom.
pub trait FoldHost {
    /// Whether the cell has this child
    fn has_part(&self, part: CellPart) -> bool;

    /// Width of the cell in pixels
    fn width(&self) -> u32;

    /// Measured height of a child laid out at `width`
    fn measure(&mut self, part: CellPart, width: u32) -> u32;

    /// Render a child into an image `width` pixels wide
    fn render_to_image(&mut self, part: CellPart, width: u32) -> Snapshot;

    fn set_visible(&mut self, part: CellPart, visible: bool);

    /// Set the height the cell occupies in its parent layout
    fn set_height(&mut self, height: u32);

    fn request_layout(&mut self);

    /// Create the animation container holding one layer pair per strip
    fn mount_strips(&mut self, strips: &[StripDescriptor]);

    /// Draw a strip layer through a projective transform
    fn apply_transform(&mut self, target: StripTarget, transform: &Projective2D);

    /// Draw a strip layer untransformed
    fn reset_transform(&mut self, target: StripTarget);

    /// Hide and remove the animation container
    fn unmount_strips(&mut self);
}
