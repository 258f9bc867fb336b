use rand::Rng;

use crate::foundation::{
    core::{Affine, Point, Vec2},
    error::{CardsceneError, CardsceneResult},
};

/// An affine map plus the output canvas that fully contains its image of the source.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FittedAffine {
    /// Source pixel space to output pixel space.
    pub affine: Affine,
    pub width: u32,
    pub height: u32,
}

/// Compose `linear` with the translation that moves the image of `[0,w]x[0,h]` to the
/// origin, and size the output to its bounding box. Nothing is ever cropped.
pub fn fit_output(linear: Affine, width: u32, height: u32) -> CardsceneResult<FittedAffine> {
    if width == 0 || height == 0 {
        return Err(CardsceneError::geometry("cannot fit an empty source raster"));
    }
    if !linear.is_finite() {
        return Err(CardsceneError::geometry("transform is not finite"));
    }

    let (w, h) = (f64::from(width), f64::from(height));
    let corners = [
        Point::new(0.0, 0.0),
        Point::new(w, 0.0),
        Point::new(w, h),
        Point::new(0.0, h),
    ]
    .map(|p| linear * p);

    let (mut min, mut max) = (corners[0], corners[0]);
    for p in &corners[1..] {
        min = Point::new(min.x.min(p.x), min.y.min(p.y));
        max = Point::new(max.x.max(p.x), max.y.max(p.y));
    }

    let out_w = ceil_px(max.x - min.x)?;
    let out_h = ceil_px(max.y - min.y)?;
    Ok(FittedAffine {
        affine: Affine::translate(Vec2::new(-min.x, -min.y)) * linear,
        width: out_w,
        height: out_h,
    })
}

fn ceil_px(extent: f64) -> CardsceneResult<u32> {
    // Rotations produce extents like 99.99999999 for exact integers.
    let snapped = (extent - 1e-6).ceil().max(1.0);
    if !snapped.is_finite() || snapped > f64::from(u32::MAX) {
        return Err(CardsceneError::geometry(format!(
            "fitted extent {extent} is out of range"
        )));
    }
    Ok(snapped as u32)
}

pub fn rotation(angle_deg: f64) -> Affine {
    Affine::rotate(angle_deg.to_radians())
}

/// Uniform scale followed by a horizontal shear of `shear_deg`.
pub fn scale_shear(scale: f64, shear_deg: f64) -> Affine {
    Affine::skew(shear_deg.to_radians().tan(), 0.0) * Affine::scale(scale)
}

/// Uniform draw from the inclusive range `[lo, hi]`; a collapsed range yields `lo`.
pub fn sample_range<R: Rng + ?Sized>(rng: &mut R, range: [f64; 2]) -> f64 {
    let [lo, hi] = range;
    if hi <= lo {
        return lo;
    }
    rng.random_range(lo..=hi)
}

#[cfg(test)]
#[path = "../../tests/unit/transform/affine.rs"]
mod tests;
