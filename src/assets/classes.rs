use std::{collections::BTreeMap, path::Path};

use crate::{
    assets::decode::read_json,
    foundation::error::{CardsceneError, CardsceneResult},
};

/// Card value to training class id.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct ClassMap {
    ids: BTreeMap<String, u32>,
}

impl ClassMap {
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, u32)>,
        S: Into<String>,
    {
        Self {
            ids: pairs.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Load a JSON object such as `{"Ah": 0, "Kh": 1}`.
    pub fn from_path(path: &Path) -> CardsceneResult<Self> {
        let map: Self = read_json(path)?;
        if map.ids.is_empty() {
            return Err(CardsceneError::validation(format!(
                "class mapping '{}' is empty",
                path.display()
            )));
        }
        Ok(map)
    }

    /// Missing names are a hard error: a wrong label is worse than no label.
    pub fn id_for(&self, name: &str) -> CardsceneResult<u32> {
        self.ids
            .get(name)
            .copied()
            .ok_or_else(|| CardsceneError::label(format!("no class id for card value '{name}'")))
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
