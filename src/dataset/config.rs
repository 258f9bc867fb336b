use std::path::{Path, PathBuf};

use crate::{
    assets::decode::read_json,
    dataset::split::SplitRatios,
    foundation::error::{CardsceneError, CardsceneResult},
    scene::{config::SceneConfig, placement::PlacementScheme},
};

/// Neutral grey used when no background directory is configured.
pub const DEFAULT_BACKGROUND_RGBA: [u8; 4] = [128, 128, 128, 255];

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
/// A whole dataset run, usually loaded from `dataset.json`.
pub struct DatasetConfig {
    /// Directory holding `images/` and `annotations/` for every card.
    pub cards_dir: PathBuf,
    /// Directory of background images; a solid colour is used when absent.
    #[serde(default)]
    pub backgrounds_dir: Option<PathBuf>,
    #[serde(default = "default_background_rgba")]
    pub background_rgba: [u8; 4],
    /// JSON object mapping card values to class ids.
    pub class_mapping: PathBuf,
    pub output_dir: PathBuf,
    #[serde(default = "default_scenes")]
    pub scenes: usize,
    #[serde(default = "default_cards_per_scene")]
    pub cards_per_scene: usize,
    #[serde(default)]
    pub seed: u64,
    /// Worker threads; `None` lets rayon pick.
    #[serde(default)]
    pub threads: Option<usize>,
    #[serde(default)]
    pub split: SplitRatios,
    #[serde(default)]
    pub scene: SceneConfig,
}

fn default_background_rgba() -> [u8; 4] {
    DEFAULT_BACKGROUND_RGBA
}

fn default_scenes() -> usize {
    100
}

fn default_cards_per_scene() -> usize {
    3
}

impl DatasetConfig {
    /// Load and validate a config file. Relative paths are taken relative to the file.
    pub fn from_path(path: &Path) -> CardsceneResult<Self> {
        let config: Self = read_json(path)?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        let config = config.resolved_against(base);
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(json: &str) -> CardsceneResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| CardsceneError::serde(format!("parse dataset config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Prefix every relative path with `base`.
    pub fn resolved_against(mut self, base: &Path) -> Self {
        let resolve = |p: PathBuf| if p.is_relative() { base.join(p) } else { p };
        self.cards_dir = resolve(self.cards_dir);
        self.backgrounds_dir = self.backgrounds_dir.map(resolve);
        self.class_mapping = resolve(self.class_mapping);
        self.output_dir = resolve(self.output_dir);
        self
    }

    pub fn validate(&self) -> CardsceneResult<()> {
        if self.scenes == 0 {
            return Err(CardsceneError::validation("scenes must be >= 1"));
        }
        if self.cards_per_scene == 0 {
            return Err(CardsceneError::validation("cards_per_scene must be >= 1"));
        }
        if self.scene.placement == PlacementScheme::Pair && self.cards_per_scene != 2 {
            return Err(CardsceneError::validation(
                "pair placement requires cards_per_scene = 2",
            ));
        }
        if self.threads == Some(0) {
            return Err(CardsceneError::validation(
                "threads must be >= 1 when set",
            ));
        }
        self.split.validate()?;
        self.scene.validate()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/dataset/config.rs"]
mod tests;
