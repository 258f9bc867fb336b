use image::{RgbaImage, imageops::FilterType};
use rand::Rng;

use crate::{
    assets::{background::Background, card::Card},
    foundation::{
        core::{Canvas, Vec2},
        error::{CardsceneError, CardsceneResult},
    },
    render::composite::{CompositeMode, paste},
    scene::{
        config::SceneConfig,
        placement::{PlacementGeometry, PlacementPlanner},
        rotate::{RotatedCard, rotate_card},
        visibility::{Candidate, PlacementOutcome, VisibilityLedger, place_with_retry},
    },
    transform::{
        affine::{fit_output, sample_range, scale_shear},
        warp::warp_rgba,
    },
};

/// Per-scene placement counters, kept for dataset-quality auditing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SceneStats {
    pub cards_requested: usize,
    pub cards_placed: usize,
    /// Cards left out after the retry budget ran out.
    pub cards_dropped: usize,
    /// Placement attempts across all cards, accepted or not.
    pub attempts: u64,
    /// Symbols of earlier cards that lost their label to occlusion.
    pub symbols_dropped: usize,
}

impl SceneStats {
    pub fn merge(&mut self, other: &SceneStats) {
        self.cards_requested += other.cards_requested;
        self.cards_placed += other.cards_placed;
        self.cards_dropped += other.cards_dropped;
        self.attempts += other.attempts;
        self.symbols_dropped += other.symbols_dropped;
    }
}

/// A scene under construction: the transparent card canvas plus its visibility ledger.
///
/// Owns both exclusively; each step consumes the scene and returns the next stage.
#[derive(Clone, Debug)]
pub struct Scene {
    image: RgbaImage,
    ledger: VisibilityLedger,
    stats: SceneStats,
}

/// Finished square raster with the ledger still in working (pre-resize) coordinates.
#[derive(Clone, Debug)]
pub struct RenderedScene {
    pub image: RgbaImage,
    /// Side of the square working canvas the ledger is expressed in.
    pub working_side: u32,
    /// Side of `image`.
    pub output_side: u32,
    pub ledger: VisibilityLedger,
    pub stats: SceneStats,
}

impl Scene {
    /// Place `cards` left to right, later cards on top, and track which symbols stay visible.
    #[tracing::instrument(skip(cards, config, rng), fields(cards = cards.len()))]
    pub fn compose<R: Rng + ?Sized>(
        cards: &[Card],
        config: &SceneConfig,
        rng: &mut R,
    ) -> CardsceneResult<Self> {
        config.validate()?;
        if cards.is_empty() {
            return Err(CardsceneError::validation("a scene needs at least one card"));
        }

        let geometry = PlacementGeometry::from_cards(cards)?;
        let mut planner = PlacementPlanner::new(config.placement, geometry, cards.len())?;
        let canvas = planner.canvas();
        let mut image = RgbaImage::new(canvas.width, canvas.height);
        let mut ledger = VisibilityLedger::default();
        let mut stats = SceneStats {
            cards_requested: cards.len(),
            ..SceneStats::default()
        };
        let policy = config.retry_policy();

        for card in cards {
            let cell = planner.next_cell()?;
            let outcome = place_with_retry(&ledger, &policy, |_| {
                let center = cell.sample_center(&mut *rng);
                let angle = sample_range(&mut *rng, config.rotation_deg);
                let rotated = rotate_card(card, angle, center)?;
                Ok(candidate(rotated))
            })?;

            match outcome {
                PlacementOutcome::Placed {
                    ledger: next,
                    payload,
                    attempts,
                    symbols_dropped,
                } => {
                    paste(&mut image, &payload.0, payload.1, config.composite);
                    ledger = next;
                    stats.cards_placed += 1;
                    stats.attempts += u64::from(attempts);
                    stats.symbols_dropped += symbols_dropped;
                }
                PlacementOutcome::Dropped {
                    attempts,
                    fully_occluded,
                } => {
                    tracing::warn!(
                        card = card.value(),
                        attempts,
                        hidden = ?fully_occluded,
                        "dropping card: every placement hid an earlier card"
                    );
                    stats.cards_dropped += 1;
                    stats.attempts += u64::from(attempts);
                }
            }
        }

        Ok(Self {
            image,
            ledger,
            stats,
        })
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn ledger(&self) -> &VisibilityLedger {
        &self.ledger
    }

    pub fn stats(&self) -> SceneStats {
        self.stats
    }

    pub fn canvas(&self) -> Canvas {
        Canvas::of(&self.image)
    }

    /// Random scale/shear of the whole scene, applied to raster and ledger alike.
    pub fn apply_global_transform<R: Rng + ?Sized>(
        self,
        config: &SceneConfig,
        rng: &mut R,
    ) -> CardsceneResult<Self> {
        let scale = sample_range(rng, config.global.scale);
        let shear = sample_range(rng, config.global.shear_deg);
        self.with_scale_shear(scale, shear)
    }

    /// Deterministic form of [`Scene::apply_global_transform`]; the output canvas grows to
    /// fit so nothing is cropped.
    pub fn with_scale_shear(self, scale: f64, shear_deg: f64) -> CardsceneResult<Self> {
        let canvas = self.canvas();
        let fitted = fit_output(scale_shear(scale, shear_deg), canvas.width, canvas.height)?;
        let image = warp_rgba(&self.image, fitted.affine, fitted.width, fitted.height)?;
        let ledger = self.ledger.map_polygons(|p| p.transformed(fitted.affine));
        Ok(Self {
            image,
            ledger,
            stats: self.stats,
        })
    }

    /// Paste the scene at a random offset onto a square background sized
    /// `background_scale` times its longest side, then resize to `output_size`.
    pub fn merge_onto_background<R: Rng + ?Sized>(
        self,
        background: &Background,
        config: &SceneConfig,
        rng: &mut R,
    ) -> CardsceneResult<RenderedScene> {
        let canvas = self.canvas();
        let longest = canvas.longest_side();
        let scaled = (f64::from(longest) * config.background_scale).ceil();
        if !scaled.is_finite() || scaled > f64::from(u32::MAX) {
            return Err(CardsceneError::geometry(format!(
                "working canvas {scaled} is out of range"
            )));
        }
        let side = (scaled as u32).max(longest);

        let dx = rng.random_range(0..=side - canvas.width);
        let dy = rng.random_range(0..=side - canvas.height);

        let mut working = background.resized(side, side);
        paste(
            &mut working,
            &self.image,
            (i64::from(dx), i64::from(dy)),
            CompositeMode::Alpha,
        );
        let offset = Vec2::new(f64::from(dx), f64::from(dy));
        let ledger = self.ledger.map_polygons(|p| p.translated(offset));

        let output_side = config.output_size;
        let image = if side == output_side {
            working
        } else {
            image::imageops::resize(&working, output_side, output_side, FilterType::Triangle)
        };

        Ok(RenderedScene {
            image,
            working_side: side,
            output_side,
            ledger,
            stats: self.stats,
        })
    }
}

fn candidate(rotated: RotatedCard) -> Candidate<(RgbaImage, (i64, i64))> {
    Candidate {
        label: rotated.label,
        outline: rotated.outline,
        symbols: rotated.symbols,
        payload: (rotated.image, rotated.anchor),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/compose.rs"]
mod tests;
