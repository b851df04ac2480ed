//! Software host
//!
//! Holds the two cell views as pre-rendered snapshots and records every
//! call the controller makes. [`HeadlessHost::compose`] rasterizes the
//! current frame, projecting each strip layer through its transform.

use foldkit_animation::{StripFace, StripTarget};
use foldkit_core::{Point, Projective2D, Snapshot};
use image::{Pixel, RgbaImage};
use tracing::trace;

use crate::host::{CellPart, FoldHost};
use crate::slicer::StripDescriptor;

#[derive(Clone, Debug)]
struct MountedStrip {
    back: Snapshot,
    front: Option<Snapshot>,
    height: u32,
    offset: u32,
    whole: Projective2D,
    front_transform: Projective2D,
}

impl MountedStrip {
    fn transform_mut(&mut self, face: StripFace) -> &mut Projective2D {
        match face {
            StripFace::Whole => &mut self.whole,
            StripFace::Front => &mut self.front_transform,
        }
    }
}

/// In-memory [`FoldHost`]
#[derive(Clone, Debug)]
pub struct HeadlessHost {
    title: Option<Snapshot>,
    content: Option<Snapshot>,
    width: u32,
    title_visible: bool,
    content_visible: bool,
    height: u32,
    layout_requests: usize,
    strips: Vec<MountedStrip>,
}

impl HeadlessHost {
    /// A folded cell showing `title`
    pub fn new(title: Snapshot, content: Snapshot) -> Self {
        let width = title.width();
        let height = title.height();
        Self {
            title: Some(title),
            content: Some(content),
            width,
            title_visible: true,
            content_visible: false,
            height,
            layout_requests: 0,
            strips: Vec::new(),
        }
    }

    /// A cell missing its content view
    pub fn title_only(title: Snapshot) -> Self {
        let mut host = Self::new(title, Snapshot::transparent(1, 1));
        host.content = None;
        host
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_visible(&self, part: CellPart) -> bool {
        match part {
            CellPart::Title => self.title_visible,
            CellPart::Content => self.content_visible,
        }
    }

    /// Number of layout passes requested so far
    pub fn layout_requests(&self) -> usize {
        self.layout_requests
    }

    pub fn mounted_strip_count(&self) -> usize {
        self.strips.len()
    }

    /// Current transform of a strip layer, if mounted
    pub fn transform(&self, target: StripTarget) -> Option<&Projective2D> {
        self.strips.get(target.index).map(|strip| match target.face {
            StripFace::Whole => &strip.whole,
            StripFace::Front => &strip.front_transform,
        })
    }

    /// Rasterize the cell at its current height
    pub fn compose(&self) -> RgbaImage {
        let mut canvas = RgbaImage::new(self.width, self.height);

        if self.strips.is_empty() {
            if self.title_visible {
                if let Some(title) = &self.title {
                    draw(&mut canvas, title, &Projective2D::IDENTITY);
                }
            }
            if self.content_visible {
                if let Some(content) = &self.content {
                    draw(&mut canvas, content, &Projective2D::IDENTITY);
                }
            }
            return canvas;
        }

        for strip in &self.strips {
            let placed = strip.whole.post_translate(0.0, strip.offset as f32);
            draw(&mut canvas, &strip.back, &placed);
            if let Some(front) = &strip.front {
                // The front face hangs from the strip's lower edge.
                let front_y = strip.height.saturating_sub(front.height()) as f32;
                let face = placed.then(&strip.front_transform.post_translate(0.0, front_y));
                draw(&mut canvas, front, &face);
            }
        }
        canvas
    }

    fn snapshot(&self, part: CellPart) -> Option<&Snapshot> {
        match part {
            CellPart::Title => self.title.as_ref(),
            CellPart::Content => self.content.as_ref(),
        }
    }
}

/// Draw `layer` onto `canvas` through `transform` by inverse mapping
///
/// Layers seen edge-on have a singular transform and are skipped.
fn draw(canvas: &mut RgbaImage, layer: &Snapshot, transform: &Projective2D) {
    let Some(inverse) = transform.invert() else {
        return;
    };
    let source = layer.as_image();
    let (src_w, src_h) = (source.width() as f32, source.height() as f32);

    for (x, y, dst) in canvas.enumerate_pixels_mut() {
        let center = Point::new(x as f32 + 0.5, y as f32 + 0.5);
        let Some(p) = inverse.map_point(center) else {
            continue;
        };
        if p.x < 0.0 || p.y < 0.0 || p.x >= src_w || p.y >= src_h {
            continue;
        }
        let src = source.get_pixel(p.x as u32, p.y as u32);
        if src[3] == u8::MAX {
            *dst = *src;
        } else {
            dst.blend(src);
        }
    }
}

impl FoldHost for HeadlessHost {
    fn has_part(&self, part: CellPart) -> bool {
        self.snapshot(part).is_some()
    }

    fn width(&self) -> u32 {
        self.width
    }

    fn measure(&mut self, part: CellPart, _width: u32) -> u32 {
        self.snapshot(part).map_or(0, Snapshot::height)
    }

    fn render_to_image(&mut self, part: CellPart, width: u32) -> Snapshot {
        self.snapshot(part)
            .cloned()
            .unwrap_or_else(|| Snapshot::transparent(width.max(1), 1))
    }

    fn set_visible(&mut self, part: CellPart, visible: bool) {
        match part {
            CellPart::Title => self.title_visible = visible,
            CellPart::Content => self.content_visible = visible,
        }
    }

    fn set_height(&mut self, height: u32) {
        self.height = height;
    }

    fn request_layout(&mut self) {
        self.layout_requests += 1;
    }

    fn mount_strips(&mut self, strips: &[StripDescriptor]) {
        self.strips = strips
            .iter()
            .map(|strip| MountedStrip {
                back: strip.back.clone(),
                front: strip.front.to_snapshot(),
                height: strip.height,
                offset: strip.offset,
                whole: Projective2D::IDENTITY,
                front_transform: Projective2D::IDENTITY,
            })
            .collect();
    }

    fn apply_transform(&mut self, target: StripTarget, transform: &Projective2D) {
        match self.strips.get_mut(target.index) {
            Some(strip) => *strip.transform_mut(target.face) = *transform,
            None => trace!("HeadlessHost: no strip {} mounted", target.index),
        }
    }

    fn reset_transform(&mut self, target: StripTarget) {
        self.apply_transform(target, &Projective2D::IDENTITY);
    }

    fn unmount_strips(&mut self) {
        self.strips.clear();
    }
}
