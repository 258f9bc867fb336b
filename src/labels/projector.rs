use std::fmt;

use crate::{
    assets::classes::ClassMap,
    foundation::error::{CardsceneError, CardsceneResult},
    geometry::bbox::{BoundingBox, NormalizedBox},
    scene::{compose::RenderedScene, visibility::VisibilityLedger},
};

/// One training label: class id plus a box normalized by the output side length.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LabelLine {
    pub class_id: u32,
    pub center_x: f64,
    pub center_y: f64,
    pub width: f64,
    pub height: f64,
}

impl LabelLine {
    /// `class_id center_x center_y width height`, six decimals.
    pub fn to_line(&self) -> String {
        self.to_string()
    }

    pub fn normalized(&self) -> NormalizedBox {
        NormalizedBox {
            center_x: self.center_x,
            center_y: self.center_y,
            width: self.width,
            height: self.height,
        }
    }
}

impl fmt::Display for LabelLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:.6} {:.6} {:.6} {:.6}",
            self.class_id, self.center_x, self.center_y, self.width, self.height
        )
    }
}

/// Turns retained symbol polygons into normalized label lines.
#[derive(Clone, Copy, Debug)]
pub struct LabelProjector<'a> {
    classes: &'a ClassMap,
    padding_px: f64,
}

impl<'a> LabelProjector<'a> {
    pub fn new(classes: &'a ClassMap, padding_px: f64) -> CardsceneResult<Self> {
        if !padding_px.is_finite() || padding_px < 0.0 {
            return Err(CardsceneError::validation(
                "label padding must be finite and >= 0",
            ));
        }
        Ok(Self {
            classes,
            padding_px,
        })
    }

    /// Pixel boxes in the `output_side` frame, one per retained symbol that survives
    /// clamping, in ledger order.
    ///
    /// Every label is resolved before anything is returned, so an unknown card value
    /// yields an error and never a partial label set.
    pub fn boxes(
        &self,
        ledger: &VisibilityLedger,
        working_side: u32,
        output_side: u32,
    ) -> CardsceneResult<Vec<(u32, BoundingBox)>> {
        if working_side == 0 || output_side == 0 {
            return Err(CardsceneError::geometry(format!(
                "cannot project labels from {working_side}px to {output_side}px"
            )));
        }
        let scale = f64::from(output_side) / f64::from(working_side);
        let side = f64::from(output_side);

        let mut out = Vec::with_capacity(ledger.symbol_count());
        for entry in ledger.entries() {
            let class_id = self.classes.id_for(&entry.label)?;
            for polygon in &entry.symbols {
                let Some(raw) = polygon.bounding_box() else {
                    continue;
                };
                let b = raw
                    .projected(scale)
                    .padded(self.padding_px)
                    .clamped(side, side);
                if b.is_degenerate() {
                    continue;
                }
                out.push((class_id, b));
            }
        }
        Ok(out)
    }

    pub fn project(
        &self,
        ledger: &VisibilityLedger,
        working_side: u32,
        output_side: u32,
    ) -> CardsceneResult<Vec<LabelLine>> {
        let side = f64::from(output_side);
        Ok(self
            .boxes(ledger, working_side, output_side)?
            .into_iter()
            .map(|(class_id, b)| {
                let n = b.normalized(side);
                LabelLine {
                    class_id,
                    center_x: n.center_x,
                    center_y: n.center_y,
                    width: n.width,
                    height: n.height,
                }
            })
            .collect())
    }

    pub fn project_scene(&self, scene: &RenderedScene) -> CardsceneResult<Vec<LabelLine>> {
        self.project(&scene.ledger, scene.working_side, scene.output_side)
    }
}

/// Label file body: one line per label, newline terminated.
pub fn format_labels(lines: &[LabelLine]) -> String {
    let mut out = String::new();
    for line in lines {
        out.push_str(&line.to_line());
        out.push('\n');
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/labels/projector.rs"]
mod tests;
