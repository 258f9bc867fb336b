use image::RgbaImage;

use crate::{
    assets::card::Card,
    foundation::{
        core::{Affine, Point, Vec2},
        error::CardsceneResult,
    },
    geometry::polygon::Polygon,
    transform::{
        affine::{fit_output, rotation},
        warp::warp_rgba,
    },
};

/// A card rotated about its centre and positioned in scene coordinates.
#[derive(Clone, Debug)]
pub struct RotatedCard {
    pub label: String,
    /// Rotated raster on a canvas sized to contain the whole card.
    pub image: RgbaImage,
    /// Scene position of the raster's top-left corner.
    pub anchor: (i64, i64),
    /// Whole-card outline in scene coordinates.
    pub outline: Polygon,
    /// Symbol hulls in scene coordinates, same order as [`Card::hulls`].
    pub symbols: Vec<Polygon>,
}

/// Rotate `card` by `angle_deg` and centre it (to the nearest pixel) on `center`.
///
/// Raster and polygons go through the same affine map, so the outlines track the pixels
/// exactly up to the integer anchor.
pub fn rotate_card(card: &Card, angle_deg: f64, center: Point) -> CardsceneResult<RotatedCard> {
    let (w, h) = card.size();
    let fitted = fit_output(rotation(angle_deg), w, h)?;

    let local_center = fitted.affine * Point::new(f64::from(w) * 0.5, f64::from(h) * 0.5);
    let anchor = (
        (center.x - local_center.x).round() as i64,
        (center.y - local_center.y).round() as i64,
    );

    let image = warp_rgba(card.image(), fitted.affine, fitted.width, fitted.height)?;
    let to_scene = Affine::translate(Vec2::new(anchor.0 as f64, anchor.1 as f64)) * fitted.affine;

    Ok(RotatedCard {
        label: card.value().to_string(),
        image,
        anchor,
        outline: card.outline().transformed(to_scene),
        symbols: card
            .symbol_polygons()
            .iter()
            .map(|p| p.transformed(to_scene))
            .collect(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/scene/rotate.rs"]
mod tests;
