use image::RgbaImage;

use crate::foundation::{
    core::{Affine, Point},
    error::{CardsceneError, CardsceneResult},
    math::{premultiply, unpremultiply},
};

/// Resample `src` through `affine` (source -> output pixel space) into a `width x height`
/// raster. Bilinear filtering runs on premultiplied values so transparent borders do not
/// bleed dark fringes; samples outside the source are transparent.
pub fn warp_rgba(
    src: &RgbaImage,
    affine: Affine,
    width: u32,
    height: u32,
) -> CardsceneResult<RgbaImage> {
    if affine.determinant().abs() <= f64::EPSILON {
        return Err(CardsceneError::geometry("cannot warp through a singular transform"));
    }
    let inv = affine.inverse();
    let mut out = RgbaImage::new(width, height);
    for (x, y, px) in out.enumerate_pixels_mut() {
        let p = inv * Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
        px.0 = sample_bilinear(src, p.x - 0.5, p.y - 0.5);
    }
    Ok(out)
}

fn sample_bilinear(src: &RgbaImage, x: f64, y: f64) -> [u8; 4] {
    let (w, h) = (i64::from(src.width()), i64::from(src.height()));
    if x <= -1.0 || y <= -1.0 || x >= w as f64 || y >= h as f64 {
        return [0, 0, 0, 0];
    }

    let x0 = x.floor();
    let y0 = y.floor();
    let fx = x - x0;
    let fy = y - y0;
    let (x0, y0) = (x0 as i64, y0 as i64);

    let fetch = |xi: i64, yi: i64| -> [f64; 4] {
        if xi < 0 || yi < 0 || xi >= w || yi >= h {
            return [0.0; 4];
        }
        premultiply(src.get_pixel(xi as u32, yi as u32).0).map(f64::from)
    };

    let taps = [
        (fetch(x0, y0), (1.0 - fx) * (1.0 - fy)),
        (fetch(x0 + 1, y0), fx * (1.0 - fy)),
        (fetch(x0, y0 + 1), (1.0 - fx) * fy),
        (fetch(x0 + 1, y0 + 1), fx * fy),
    ];

    let mut acc = [0.0f64; 4];
    for (px, weight) in taps {
        for (a, c) in acc.iter_mut().zip(px) {
            *a += c * weight;
        }
    }
    unpremultiply(acc.map(|c| c.round().clamp(0.0, 255.0) as u8))
}

#[cfg(test)]
#[path = "../../tests/unit/transform/warp.rs"]
mod tests;
