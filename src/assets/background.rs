use std::path::{Path, PathBuf};

use anyhow::Context;
use image::{RgbaImage, imageops::FilterType};
use rand::{Rng, RngCore};

use crate::{
    assets::decode::{is_image_path, read_image},
    foundation::{
        core::Canvas,
        error::{CardsceneError, CardsceneResult},
    },
};

/// Backdrop raster that finished scenes are pasted onto.
#[derive(Clone, Debug)]
pub struct Background {
    image: RgbaImage,
}

impl Background {
    pub fn new(image: RgbaImage) -> CardsceneResult<Self> {
        Canvas::new(image.width(), image.height())?;
        Ok(Self { image })
    }

    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> CardsceneResult<Self> {
        Canvas::new(width, height)?;
        Ok(Self {
            image: RgbaImage::from_pixel(width, height, image::Rgba(rgba)),
        })
    }

    pub fn size(&self) -> Canvas {
        Canvas::of(&self.image)
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Stretch to `width x height`; a no-op clone when the size already matches.
    pub fn resized(&self, width: u32, height: u32) -> RgbaImage {
        if self.image.dimensions() == (width, height) {
            return self.image.clone();
        }
        image::imageops::resize(&self.image, width, height, FilterType::Triangle)
    }
}

/// Supplier of backgrounds for successive scenes.
///
/// Takes `&self` so one source can be shared across worker threads.
pub trait BackgroundSource: Send + Sync {
    fn sample(&self, rng: &mut dyn RngCore) -> CardsceneResult<Background>;
}

/// Picks a random image file from a directory, decoding it on demand.
#[derive(Clone, Debug)]
pub struct BackgroundDir {
    paths: Vec<PathBuf>,
}

impl BackgroundDir {
    pub fn open(dir: &Path) -> CardsceneResult<Self> {
        let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)
            .with_context(|| format!("list backgrounds '{}'", dir.display()))?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.is_file() && is_image_path(p))
            .collect();
        if paths.is_empty() {
            return Err(CardsceneError::validation(format!(
                "no background images found in '{}'",
                dir.display()
            )));
        }
        paths.sort();
        Ok(Self { paths })
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

impl BackgroundSource for BackgroundDir {
    fn sample(&self, rng: &mut dyn RngCore) -> CardsceneResult<Background> {
        let path = &self.paths[rng.random_range(0..self.paths.len())];
        Background::new(read_image(path)?)
    }
}

/// Constant-colour backdrop.
#[derive(Clone, Copy, Debug)]
pub struct SolidBackground {
    pub rgba: [u8; 4],
}

impl BackgroundSource for SolidBackground {
    fn sample(&self, _rng: &mut dyn RngCore) -> CardsceneResult<Background> {
        Background::solid(1, 1, self.rgba)
    }
}
