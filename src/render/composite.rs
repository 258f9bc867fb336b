use image::RgbaImage;

use crate::foundation::math::{mul_div255_u8, premultiply, unpremultiply};

pub type PremulRgba8 = [u8; 4];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// How a foreground raster is merged into its destination.
pub enum CompositeMode {
    /// Any source pixel with non-zero alpha replaces the destination pixel verbatim.
    Binary,
    /// Straight-alpha source-over, computed in premultiplied space.
    #[default]
    Alpha,
}

/// Premultiplied source-over.
pub fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    if src[3] == 0 {
        return dst;
    }
    let inv = 255u16 - u16::from(src[3]);

    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = src[i].saturating_add(mul_div255_u8(u16::from(dst[i]), inv));
    }
    out
}

/// Paste `src` into `dst` with its top-left corner at `anchor`. Parts falling outside `dst`
/// are clipped; later pastes win.
pub fn paste(dst: &mut RgbaImage, src: &RgbaImage, anchor: (i64, i64), mode: CompositeMode) {
    let (dw, dh) = (i64::from(dst.width()), i64::from(dst.height()));
    let (sw, sh) = (i64::from(src.width()), i64::from(src.height()));
    let (ax, ay) = anchor;

    let x_start = ax.max(0);
    let y_start = ay.max(0);
    let x_end = (ax + sw).min(dw);
    let y_end = (ay + sh).min(dh);
    if x_start >= x_end || y_start >= y_end {
        return;
    }

    for y in y_start..y_end {
        for x in x_start..x_end {
            let s = src.get_pixel((x - ax) as u32, (y - ay) as u32).0;
            if s[3] == 0 {
                continue;
            }
            let d = dst.get_pixel_mut(x as u32, y as u32);
            d.0 = match mode {
                CompositeMode::Binary => s,
                CompositeMode::Alpha => unpremultiply(over(premultiply(d.0), premultiply(s))),
            };
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
