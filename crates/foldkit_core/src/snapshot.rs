//! Fixed-size RGBA snapshots
//!
//! A snapshot is the rasterized look of a view at one instant. The fold
//! engine never draws into a snapshot; it only crops pieces out of one and
//! creates solid placeholders.

use image::{imageops, Rgba, RgbaImage};

use crate::color::Color;
use crate::error::{CoreError, Result};

/// An immutable RGBA image of fixed size
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    image: RgbaImage,
}

impl Snapshot {
    /// Wrap an existing RGBA buffer
    pub fn from_image(image: RgbaImage) -> Result<Self> {
        if image.width() == 0 || image.height() == 0 {
            return Err(CoreError::EmptyImage {
                width: image.width(),
                height: image.height(),
            });
        }
        Ok(Self { image })
    }

    /// A fully transparent snapshot
    pub fn transparent(width: u32, height: u32) -> Self {
        Self::solid(width, height, Color::TRANSPARENT)
    }

    /// A snapshot filled with a single color
    pub fn solid(width: u32, height: u32, color: Color) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, Rgba(color.to_rgba8())),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Pixel at `(x, y)`, or `None` outside the image
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        self.image
            .get_pixel_checked(x, y)
            .map(|px| Color::from_rgba8(px.0))
    }

    /// Copy out the rectangle `[x, x + width) x [y, y + height)`
    pub fn crop(&self, x: u32, y: u32, width: u32, height: u32) -> Result<Snapshot> {
        let fits_x = x.checked_add(width).is_some_and(|r| r <= self.width());
        let fits_y = y.checked_add(height).is_some_and(|b| b <= self.height());
        if !fits_x || !fits_y {
            return Err(CoreError::CropOutOfBounds {
                x,
                y,
                width,
                height,
                image_width: self.width(),
                image_height: self.height(),
            });
        }
        let image = imageops::crop_imm(&self.image, x, y, width, height).to_image();
        Ok(Snapshot { image })
    }

    pub fn as_image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }
}
