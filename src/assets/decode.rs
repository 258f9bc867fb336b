use std::path::Path;

use anyhow::Context;
use image::RgbaImage;

use crate::foundation::error::{CardsceneError, CardsceneResult};

/// Decode encoded image bytes into straight-alpha RGBA8.
pub fn decode_image(bytes: &[u8]) -> CardsceneResult<RgbaImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    Ok(dyn_img.to_rgba8())
}

/// Read and decode an image file into straight-alpha RGBA8.
pub fn read_image(path: &Path) -> CardsceneResult<RgbaImage> {
    let bytes =
        std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
    let dyn_img = image::load_from_memory(&bytes)
        .with_context(|| format!("decode image '{}'", path.display()))?;
    Ok(dyn_img.to_rgba8())
}

/// Parse a JSON document from disk, mapping parse failures to [`CardsceneError::Serde`].
pub(crate) fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> CardsceneResult<T> {
    let bytes = std::fs::read(path).with_context(|| format!("read '{}'", path.display()))?;
    serde_json::from_slice(&bytes)
        .map_err(|e| CardsceneError::serde(format!("parse '{}': {e}", path.display())))
}

pub(crate) fn is_image_path(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| {
            matches!(
                e.to_ascii_lowercase().as_str(),
                "png" | "jpg" | "jpeg" | "bmp" | "webp"
            )
        })
        .unwrap_or(false)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
