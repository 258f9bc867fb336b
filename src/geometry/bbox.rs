use crate::geometry::polygon::Polygon;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Axis-aligned box in pixel coordinates, `x1 <= x2` and `y1 <= y2`.
pub struct BoundingBox {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub label: String,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Box as `(center_x, center_y, width, height)` divided by the output side length.
pub struct NormalizedBox {
    pub center_x: f64,
    pub center_y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    /// Point extrema of `polygon`; `None` for an empty outline.
    pub fn from_polygon(polygon: &Polygon) -> Option<Self> {
        let first = polygon.points.first()?;
        let mut b = Self {
            x1: first.x,
            y1: first.y,
            x2: first.x,
            y2: first.y,
            label: polygon.label.clone(),
        };
        for p in &polygon.points[1..] {
            b.x1 = b.x1.min(p.x);
            b.y1 = b.y1.min(p.y);
            b.x2 = b.x2.max(p.x);
            b.y2 = b.y2.max(p.y);
        }
        Some(b)
    }

    pub fn width(&self) -> f64 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> f64 {
        self.y2 - self.y1
    }

    pub fn is_degenerate(&self) -> bool {
        !(self.width() > 0.0 && self.height() > 0.0)
    }

    pub fn padded(&self, pad: f64) -> Self {
        Self {
            x1: self.x1 - pad,
            y1: self.y1 - pad,
            x2: self.x2 + pad,
            y2: self.y2 + pad,
            label: self.label.clone(),
        }
    }

    pub fn clamped(&self, width: f64, height: f64) -> Self {
        Self {
            x1: self.x1.clamp(0.0, width),
            y1: self.y1.clamp(0.0, height),
            x2: self.x2.clamp(0.0, width),
            y2: self.y2.clamp(0.0, height),
            label: self.label.clone(),
        }
    }

    /// Linear rescale of all four coordinates.
    pub fn projected(&self, scale: f64) -> Self {
        Self {
            x1: self.x1 * scale,
            y1: self.y1 * scale,
            x2: self.x2 * scale,
            y2: self.y2 * scale,
            label: self.label.clone(),
        }
    }

    pub fn normalized(&self, side: f64) -> NormalizedBox {
        NormalizedBox {
            center_x: (self.x1 + self.x2) * 0.5 / side,
            center_y: (self.y1 + self.y2) * 0.5 / side,
            width: self.width() / side,
            height: self.height() / side,
        }
    }
}

impl NormalizedBox {
    /// Inverse of [`BoundingBox::normalized`].
    pub fn denormalized(&self, side: f64, label: impl Into<String>) -> BoundingBox {
        let cx = self.center_x * side;
        let cy = self.center_y * side;
        let hw = self.width * side * 0.5;
        let hh = self.height * side * 0.5;
        BoundingBox {
            x1: cx - hw,
            y1: cy - hh,
            x2: cx + hw,
            y2: cy + hh,
            label: label.into(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/bbox.rs"]
mod tests;
