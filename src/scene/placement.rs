use rand::Rng;

use crate::{
    assets::card::Card,
    foundation::{
        core::{Canvas, Point},
        error::{CardsceneError, CardsceneResult},
    },
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Strategy for laying out card centre cells.
pub enum PlacementScheme {
    /// Any number of cells, left to right along the horizontal midline.
    #[default]
    Strip,
    /// Exactly two cells mirrored about the vertical midline.
    Pair,
}

/// Per-scene layout scalars derived from the card set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlacementGeometry {
    pub max_width: u32,
    /// Safe rotation radius: ceil of the largest half-diagonal, plus one pixel for rounding.
    pub max_radius: u32,
    /// Side of a placement cell.
    pub bbox_size: u32,
    /// Gap between a cell and the vertical line halfway to its neighbour.
    pub bbox_offset: u32,
    /// Horizontal stride between consecutive cells.
    pub bbox_spacing: u32,
}

impl PlacementGeometry {
    pub fn from_cards(cards: &[Card]) -> CardsceneResult<Self> {
        Self::from_dimensions(cards.iter().map(Card::size))
    }

    pub fn from_dimensions<I>(dims: I) -> CardsceneResult<Self>
    where
        I: IntoIterator<Item = (u32, u32)>,
    {
        let mut max_width = 0u32;
        let mut max_half_diag = 0.0f64;
        let mut any = false;
        for (w, h) in dims {
            if w == 0 || h == 0 {
                return Err(CardsceneError::validation(format!(
                    "card size must be positive, got {w}x{h}"
                )));
            }
            any = true;
            max_width = max_width.max(w);
            max_half_diag = max_half_diag.max(f64::from(w).hypot(f64::from(h)) * 0.5);
        }
        if !any {
            return Err(CardsceneError::validation(
                "placement needs at least one card",
            ));
        }

        let bbox_size = max_width / 4;
        let bbox_offset = max_width / 6;
        Ok(Self {
            max_width,
            max_radius: max_half_diag.ceil() as u32 + 1,
            bbox_size,
            bbox_offset,
            bbox_spacing: bbox_size + 2 * bbox_offset,
        })
    }

    pub fn bbox_half(&self) -> u32 {
        self.bbox_size / 2
    }

    /// Scene canvas large enough for `count` cells plus a full rotation radius on every side.
    pub fn canvas(&self, count: usize) -> CardsceneResult<Canvas> {
        let count = u32::try_from(count)
            .map_err(|_| CardsceneError::validation("too many cards for one scene"))?;
        if count == 0 {
            return Err(CardsceneError::validation("scene requires at least one card"));
        }
        let width = (count - 1)
            .checked_mul(self.bbox_spacing)
            .and_then(|v| v.checked_add(2 * self.max_radius + self.bbox_size))
            .ok_or_else(|| CardsceneError::geometry("scene canvas width overflows"))?;
        let height = 2 * (self.max_radius + self.bbox_half());
        Canvas::new(width, height)
    }
}

/// Inclusive integer rectangle a card centre is drawn from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlacementCell {
    pub x_min: i64,
    pub x_max: i64,
    pub y_min: i64,
    pub y_max: i64,
}

impl PlacementCell {
    /// Uniform integer point inside the cell.
    pub fn sample_center<R: Rng + ?Sized>(&self, rng: &mut R) -> Point {
        let x = rng.random_range(self.x_min..=self.x_max);
        let y = rng.random_range(self.y_min..=self.y_max);
        Point::new(x as f64, y as f64)
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x_min as f64
            && p.x <= self.x_max as f64
            && p.y >= self.y_min as f64
            && p.y <= self.y_max as f64
    }
}

/// Hands out one placement cell per card, in placement order.
#[derive(Clone, Debug)]
pub struct PlacementPlanner {
    scheme: PlacementScheme,
    geometry: PlacementGeometry,
    canvas: Canvas,
    count: usize,
    issued: usize,
    cursor: i64,
}

impl PlacementPlanner {
    pub fn new(
        scheme: PlacementScheme,
        geometry: PlacementGeometry,
        count: usize,
    ) -> CardsceneResult<Self> {
        if scheme == PlacementScheme::Pair && count != 2 {
            return Err(CardsceneError::validation(format!(
                "pair placement needs exactly 2 cards, got {count}"
            )));
        }
        let canvas = geometry.canvas(count)?;
        Ok(Self {
            scheme,
            geometry,
            canvas,
            count,
            issued: 0,
            cursor: i64::from(geometry.max_radius),
        })
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn geometry(&self) -> PlacementGeometry {
        self.geometry
    }

    /// Next cell to the right; errors once every card has had its cell.
    pub fn next_cell(&mut self) -> CardsceneResult<PlacementCell> {
        if self.issued >= self.count {
            return Err(CardsceneError::validation(format!(
                "placement planner sized for {} cards was asked for more",
                self.count
            )));
        }
        let g = self.geometry;
        let size = i64::from(g.bbox_size);
        let center_y = i64::from(g.max_radius + g.bbox_half());
        let half = i64::from(g.bbox_half());

        let x_min = match self.scheme {
            PlacementScheme::Strip => self.cursor,
            PlacementScheme::Pair => {
                let center_x = i64::from(self.canvas.width / 2);
                let offset = i64::from(g.bbox_offset);
                if self.issued == 0 {
                    center_x - size - offset
                } else {
                    center_x + offset
                }
            }
        };

        self.issued += 1;
        self.cursor += i64::from(g.bbox_spacing);
        Ok(PlacementCell {
            x_min,
            x_max: x_min + size,
            y_min: center_y - half,
            y_max: center_y + half,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/placement.rs"]
mod tests;
