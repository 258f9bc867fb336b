use crate::{
    foundation::error::{CardsceneError, CardsceneResult},
    render::composite::CompositeMode,
    scene::{
        placement::PlacementScheme,
        visibility::{FullOcclusionPolicy, RetryPolicy},
    },
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
/// Tunables for composing one scene.
///
/// Every field has a default, so `{}` is a valid configuration.
pub struct SceneConfig {
    /// How card centres are laid out.
    pub placement: PlacementScheme,
    /// Per-card rotation range in degrees, inclusive.
    pub rotation_deg: [f64; 2],
    /// Placement attempts per card before the card is dropped.
    pub max_attempts: u32,
    /// Minimum uncovered fraction (exclusive) for a symbol to stay labelled.
    pub visibility_threshold: f64,
    /// What to do when a placement would hide every remaining symbol of an earlier card.
    pub full_occlusion: FullOcclusionPolicy,
    /// Merge mode for cards into the scene canvas.
    pub composite: CompositeMode,
    /// Scene-level scale/shear.
    pub global: GlobalTransformConfig,
    /// Side length of the square output raster.
    pub output_size: u32,
    /// Working background side as a multiple of the transformed scene's longest side.
    pub background_scale: f64,
    /// Extra margin around each emitted box, in output pixels.
    pub bbox_padding_px: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalTransformConfig {
    /// Uniform scale range, inclusive.
    pub scale: [f64; 2],
    /// Horizontal shear range in degrees, inclusive.
    pub shear_deg: [f64; 2],
}

impl Default for GlobalTransformConfig {
    fn default() -> Self {
        Self {
            scale: [0.65, 1.0],
            shear_deg: [-10.0, 10.0],
        }
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            placement: PlacementScheme::default(),
            rotation_deg: [-180.0, 180.0],
            max_attempts: 3,
            visibility_threshold: 0.5,
            full_occlusion: FullOcclusionPolicy::default(),
            composite: CompositeMode::default(),
            global: GlobalTransformConfig::default(),
            output_size: 640,
            background_scale: 1.25,
            bbox_padding_px: 3.0,
        }
    }
}

impl SceneConfig {
    pub fn validate(&self) -> CardsceneResult<()> {
        validate_range(self.rotation_deg, "rotation_deg")?;
        if self.max_attempts == 0 {
            return Err(CardsceneError::validation("max_attempts must be >= 1"));
        }
        if !self.visibility_threshold.is_finite()
            || !(0.0..1.0).contains(&self.visibility_threshold)
        {
            return Err(CardsceneError::validation(
                "visibility_threshold must be finite and in [0, 1)",
            ));
        }
        validate_range(self.global.scale, "global.scale")?;
        if self.global.scale[0] <= 0.0 {
            return Err(CardsceneError::validation("global.scale must be > 0"));
        }
        validate_range(self.global.shear_deg, "global.shear_deg")?;
        if self.global.shear_deg.iter().any(|s| s.abs() >= 80.0) {
            return Err(CardsceneError::validation(
                "global.shear_deg must stay within (-80, 80)",
            ));
        }
        if self.output_size == 0 {
            return Err(CardsceneError::validation("output_size must be > 0"));
        }
        if !self.background_scale.is_finite() || self.background_scale < 1.0 {
            return Err(CardsceneError::validation(
                "background_scale must be finite and >= 1",
            ));
        }
        if !self.bbox_padding_px.is_finite() || self.bbox_padding_px < 0.0 {
            return Err(CardsceneError::validation(
                "bbox_padding_px must be finite and >= 0",
            ));
        }
        Ok(())
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts,
            visibility_threshold: self.visibility_threshold,
            full_occlusion: self.full_occlusion,
        }
    }
}

fn validate_range(range: [f64; 2], field: &str) -> CardsceneResult<()> {
    let [lo, hi] = range;
    if !lo.is_finite() || !hi.is_finite() || lo > hi {
        return Err(CardsceneError::validation(format!(
            "{field} must be a finite [lo, hi] pair with lo <= hi"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/scene/config.rs"]
mod tests;
