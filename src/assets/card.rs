use std::path::{Path, PathBuf};

use anyhow::Context;
use image::RgbaImage;
use rand::Rng;

use crate::{
    assets::decode::{is_image_path, read_image, read_json},
    foundation::{
        core::Point,
        error::{CardsceneError, CardsceneResult},
    },
    geometry::polygon::Polygon,
};

/// One photographed card with the outlines of its printed corner symbols.
///
/// Construction validates geometry, so every `Card` that reaches the placement code has a
/// non-empty raster and at least one in-bounds hull.
#[derive(Clone, Debug)]
pub struct Card {
    value: String,
    image: RgbaImage,
    hulls: Vec<Vec<Point>>,
}

impl Card {
    pub fn new(
        value: impl Into<String>,
        image: RgbaImage,
        hulls: Vec<Vec<Point>>,
    ) -> CardsceneResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(CardsceneError::validation("card value must be non-empty"));
        }
        let (w, h) = image.dimensions();
        if w == 0 || h == 0 {
            return Err(CardsceneError::validation(format!(
                "card '{value}' has non-positive size {w}x{h}"
            )));
        }
        if hulls.is_empty() {
            return Err(CardsceneError::validation(format!(
                "card '{value}' has no symbol hulls"
            )));
        }
        for (idx, hull) in hulls.iter().enumerate() {
            if hull.len() < 3 {
                return Err(CardsceneError::validation(format!(
                    "card '{value}' hull {idx} has fewer than 3 points"
                )));
            }
            let in_bounds = |p: &Point| {
                p.x.is_finite()
                    && p.y.is_finite()
                    && p.x >= 0.0
                    && p.y >= 0.0
                    && p.x < f64::from(w)
                    && p.y < f64::from(h)
            };
            if let Some(p) = hull.iter().find(|p| !in_bounds(p)) {
                return Err(CardsceneError::validation(format!(
                    "card '{value}' hull {idx} point ({}, {}) lies outside {w}x{h}",
                    p.x, p.y
                )));
            }
        }
        Ok(Self {
            value,
            image,
            hulls,
        })
    }

    /// Class name of the card.
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// `(width, height)` in pixels.
    pub fn size(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// Half of the card diagonal; any rotation about the centre stays within this radius.
    pub fn radius(&self) -> f64 {
        let (w, h) = self.size();
        f64::from(w).hypot(f64::from(h)) * 0.5
    }

    pub fn hulls(&self) -> &[Vec<Point>] {
        &self.hulls
    }

    /// Hulls as labelled polygons in card-local coordinates.
    pub fn symbol_polygons(&self) -> Vec<Polygon> {
        self.hulls
            .iter()
            .map(|h| Polygon::new(self.value.clone(), h.clone()))
            .collect()
    }

    /// Whole-card outline in card-local coordinates.
    pub fn outline(&self) -> Polygon {
        let (w, h) = self.size();
        Polygon::rect(self.value.clone(), f64::from(w), f64::from(h))
    }
}

/// On-disk annotation written next to each card scan.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct CardAnnotation {
    /// Symbol outlines as `[[x, y], ...]` point lists.
    pub hulls: Vec<Vec<[f64; 2]>>,
    pub width: u32,
    pub height: u32,
}

impl CardAnnotation {
    pub fn into_card(self, value: &str, image: RgbaImage) -> CardsceneResult<Card> {
        if image.dimensions() != (self.width, self.height) {
            return Err(CardsceneError::validation(format!(
                "card '{value}' annotation size {}x{} does not match image {}x{}",
                self.width,
                self.height,
                image.width(),
                image.height()
            )));
        }
        let hulls = self
            .hulls
            .into_iter()
            .map(|h| h.into_iter().map(|[x, y]| Point::new(x, y)).collect())
            .collect();
        Card::new(value, image, hulls)
    }
}

/// All cards available to a dataset run.
#[derive(Clone, Debug, Default)]
pub struct CardDeck {
    cards: Vec<Card>,
}

impl CardDeck {
    pub fn new(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    /// Load `dir/images/<value>.<ext>` with `dir/annotations/<value>.json`.
    #[tracing::instrument]
    pub fn load_dir(dir: &Path) -> CardsceneResult<Self> {
        let images_dir = dir.join("images");
        let annotations_dir = dir.join("annotations");

        let mut paths: Vec<PathBuf> = std::fs::read_dir(&images_dir)
            .with_context(|| format!("list card images '{}'", images_dir.display()))?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.is_file() && is_image_path(p))
            .collect();
        paths.sort();

        let mut cards = Vec::with_capacity(paths.len());
        for path in paths {
            let value = path
                .file_stem()
                .and_then(|s| s.to_str())
                .ok_or_else(|| {
                    CardsceneError::validation(format!(
                        "card image '{}' has no usable file stem",
                        path.display()
                    ))
                })?
                .to_string();
            let annotation: CardAnnotation =
                read_json(&annotations_dir.join(format!("{value}.json")))?;
            let image = read_image(&path)?;
            cards.push(annotation.into_card(&value, image)?);
        }

        if cards.is_empty() {
            return Err(CardsceneError::validation(format!(
                "no card images found in '{}'",
                images_dir.display()
            )));
        }
        tracing::debug!(count = cards.len(), "loaded card deck");
        Ok(Self { cards })
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Draw `k` distinct cards in random order.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R, k: usize) -> CardsceneResult<Vec<Card>> {
        if k == 0 || k > self.cards.len() {
            return Err(CardsceneError::validation(format!(
                "cannot draw {k} distinct cards from a deck of {}",
                self.cards.len()
            )));
        }
        Ok(rand::seq::index::sample(rng, self.cards.len(), k)
            .into_iter()
            .map(|i| self.cards[i].clone())
            .collect())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/card.rs"]
mod tests;
