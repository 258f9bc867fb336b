/// Convenience result type used across cardscene.
pub type CardsceneResult<T> = Result<T, CardsceneError>;

/// Top-level error taxonomy used by scene and dataset APIs.
///
/// Placement exhaustion has no variant. A card that cannot be placed is dropped and
/// counted in [`crate::SceneStats`].
#[derive(thiserror::Error, Debug)]
pub enum CardsceneError {
    /// Invalid card geometry, configuration, or other caller-provided data.
    #[error("validation error: {0}")]
    Validation(String),

    /// A transform or canvas computation produced unusable geometry.
    #[error("geometry error: {0}")]
    Geometry(String),

    /// A label could not be resolved to a class id.
    #[error("label error: {0}")]
    Label(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CardsceneError {
    /// Build a [`CardsceneError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`CardsceneError::Geometry`] value.
    pub fn geometry(msg: impl Into<String>) -> Self {
        Self::Geometry(msg.into())
    }

    /// Build a [`CardsceneError::Label`] value.
    pub fn label(msg: impl Into<String>) -> Self {
        Self::Label(msg.into())
    }

    /// Build a [`CardsceneError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
