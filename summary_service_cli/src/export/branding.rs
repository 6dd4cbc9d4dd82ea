use crate::error::ExportError;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use std::io::Cursor;
use std::path::Path;

const BADGE_W: u32 = 360;
const BADGE_H: u32 = 120;

/// Brand logo shown in the PDF header and at the top of DOCX exports.
#[derive(Debug, Clone)]
pub struct Logo {
    image: RgbImage,
}

impl Logo {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, image::ImageError> {
        Ok(Self {
            image: image::open(path)?.to_rgb8(),
        })
    }

    /// Built-in badge used when no `LOGO_PATH` is configured: an indigo
    /// gradient bar with a light disc on the left.
    pub fn generated() -> Self {
        let (cx, cy, r) = (BADGE_H as f32 / 2.0, BADGE_H as f32 / 2.0, BADGE_H as f32 * 0.32);
        let image = RgbImage::from_fn(BADGE_W, BADGE_H, |x, y| {
            let dx = x as f32 - cx;
            let dy = y as f32 - cy;
            if dx * dx + dy * dy <= r * r {
                return Rgb([236, 233, 255]);
            }
            let t = x as f32 / BADGE_W as f32;
            Rgb([
                (48.0 + 60.0 * t) as u8,
                (38.0 + 30.0 * t) as u8,
                (140.0 + 80.0 * t) as u8,
            ])
        });
        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Raw RGB8 samples, row-major.
    pub fn rgb_pixels(&self) -> &[u8] {
        self.image.as_raw()
    }

    pub fn to_png(&self) -> Result<Vec<u8>, ExportError> {
        let mut buf = Vec::new();
        DynamicImage::ImageRgb8(self.image.clone())
            .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)?;
        Ok(buf)
    }
}
