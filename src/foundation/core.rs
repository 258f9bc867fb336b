use crate::foundation::error::{CardsceneError, CardsceneResult};

pub use kurbo::{Affine, Point, Rect, Vec2};

/// Pixel dimensions of a raster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> CardsceneResult<Self> {
        if width == 0 || height == 0 {
            return Err(CardsceneError::validation(format!(
                "canvas must be non-empty, got {width}x{height}"
            )));
        }
        Ok(Self { width, height })
    }

    pub fn of(image: &image::RgbaImage) -> Self {
        let (width, height) = image.dimensions();
        Self { width, height }
    }

    pub fn longest_side(self) -> u32 {
        self.width.max(self.height)
    }

    pub fn rect(self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }
}
