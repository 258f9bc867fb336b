//! Labelled polygons and the clipping routine used for occlusion bookkeeping.

use crate::{
    foundation::core::{Affine, Canvas, Point, Vec2},
    geometry::bbox::BoundingBox,
};

/// Areas at or below this are treated as zero.
pub const AREA_EPSILON: f64 = 1e-9;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Ordered outline of a shape, tagged with the card value it belongs to.
pub struct Polygon {
    /// Card value (class name) this outline belongs to.
    pub label: String,
    /// Outline vertices; the closing edge is implicit.
    pub points: Vec<Point>,
}

impl Polygon {
    pub fn new(label: impl Into<String>, points: Vec<Point>) -> Self {
        Self {
            label: label.into(),
            points,
        }
    }

    /// Axis-aligned rectangle `[0, width] x [0, height]`, clockwise in image space.
    pub fn rect(label: impl Into<String>, width: f64, height: f64) -> Self {
        Self::new(
            label,
            vec![
                Point::new(0.0, 0.0),
                Point::new(width, 0.0),
                Point::new(width, height),
                Point::new(0.0, height),
            ],
        )
    }

    /// Shoelace area with orientation sign.
    pub fn signed_area(&self) -> f64 {
        signed_area(&self.points)
    }

    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    pub fn is_degenerate(&self) -> bool {
        self.points.len() < 3 || self.area() <= AREA_EPSILON
    }

    /// Area of `self ∩ clip`.
    ///
    /// `clip` must be convex. `self` may be any simple polygon; Sutherland-Hodgman can leave
    /// zero-width bridges for concave subjects but those contribute no area.
    pub fn intersection_area(&self, clip: &Polygon) -> f64 {
        if self.is_degenerate() || clip.is_degenerate() {
            return 0.0;
        }
        signed_area(&clip_convex(&self.points, &clip.points)).abs()
    }

    /// Fraction of `self` left uncovered by `cover`, in `[0, 1]`.
    ///
    /// A degenerate polygon has nothing left to see and reports `0.0`.
    pub fn uncovered_fraction(&self, cover: &Polygon) -> f64 {
        let area = self.area();
        if self.points.len() < 3 || area <= AREA_EPSILON {
            return 0.0;
        }
        ((area - self.intersection_area(cover)) / area).clamp(0.0, 1.0)
    }

    pub fn translated(&self, delta: Vec2) -> Self {
        self.transformed(Affine::translate(delta))
    }

    pub fn transformed(&self, affine: Affine) -> Self {
        Self {
            label: self.label.clone(),
            points: self.points.iter().map(|&p| affine * p).collect(),
        }
    }

    /// Rescale from one pixel frame into another of a different resolution.
    pub fn projected(&self, from: Canvas, to: Canvas) -> Self {
        let sx = f64::from(to.width) / f64::from(from.width);
        let sy = f64::from(to.height) / f64::from(from.height);
        self.transformed(Affine::scale_non_uniform(sx, sy))
    }

    pub fn bounding_box(&self) -> Option<BoundingBox> {
        BoundingBox::from_polygon(self)
    }
}

fn signed_area(points: &[Point]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut twice = 0.0;
    for (i, a) in points.iter().enumerate() {
        let b = points[(i + 1) % points.len()];
        twice += a.x * b.y - b.x * a.y;
    }
    twice * 0.5
}

fn cross(o: Point, a: Point, b: Point) -> f64 {
    (a - o).cross(b - o)
}

/// Sutherland-Hodgman clip of `subject` against the convex polygon `clip`.
pub fn clip_convex(subject: &[Point], clip: &[Point]) -> Vec<Point> {
    let orient = signed_area(clip).signum();
    if orient == 0.0 {
        return Vec::new();
    }

    let mut output = subject.to_vec();
    for (i, &a) in clip.iter().enumerate() {
        if output.is_empty() {
            break;
        }
        let b = clip[(i + 1) % clip.len()];
        let inside = |p: Point| cross(a, b, p) * orient >= 0.0;

        let input = std::mem::take(&mut output);
        let mut prev = input[input.len() - 1];
        for &cur in &input {
            match (inside(prev), inside(cur)) {
                (true, true) => output.push(cur),
                (true, false) => output.extend(edge_crossing(prev, cur, a, b)),
                (false, true) => {
                    output.extend(edge_crossing(prev, cur, a, b));
                    output.push(cur);
                }
                (false, false) => {}
            }
            prev = cur;
        }
    }
    output
}

fn edge_crossing(s: Point, e: Point, a: Point, b: Point) -> Option<Point> {
    let edge = b - a;
    let dir = e - s;
    let denom = edge.cross(dir);
    if denom.abs() <= f64::EPSILON {
        return None;
    }
    let t = edge.cross(a - s) / denom;
    Some(s + dir * t)
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/polygon.rs"]
mod tests;
