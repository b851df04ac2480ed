//! Synthetic cell views for offline runs

use anyhow::Result;
use foldkit_core::{Color, Snapshot};
use image::{Rgba, RgbaImage};

const TITLE_COLOR: u32 = 0x3F51B5;
const CONTENT_COLORS: [u32; 2] = [0xFAFAFA, 0xE0E0E0];
const BAND_HEIGHT: u32 = 20;

/// A title bar with a square badge on the left
pub fn title(width: u32, height: u32) -> Result<Snapshot> {
    let fill = Rgba(Color::from_hex(TITLE_COLOR).to_rgba8());
    let badge = Rgba(Color::WHITE.to_rgba8());
    let inset = height / 4;
    let image = RgbaImage::from_fn(width, height, |x, y| {
        let in_badge = x >= inset && x < height - inset && y >= inset && y < height - inset;
        if in_badge {
            badge
        } else {
            fill
        }
    });
    Ok(Snapshot::from_image(image)?)
}

/// Alternating horizontal bands, so each strip is recognizable on its own
pub fn content(width: u32, height: u32) -> Result<Snapshot> {
    let bands = CONTENT_COLORS.map(|hex| Rgba(Color::from_hex(hex).to_rgba8()));
    let image = RgbaImage::from_fn(width, height, |_, y| {
        bands[((y / BAND_HEIGHT) % 2) as usize]
    });
    Ok(Snapshot::from_image(image)?)
}
