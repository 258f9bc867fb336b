//! cardscene composes synthetic playing-card scenes for object-detection training.
//!
//! Cards are rotated and laid out left to right, each partially covering the ones before it.
//! A visibility ledger tracks which printed symbols stay identifiable, so every emitted
//! bounding box points at a symbol that is actually visible in the final image.
//!
//! - Load cards into a [`CardDeck`] and pick a [`BackgroundSource`]
//! - Render one scene with [`render_scene`], or a whole split dataset with [`render_dataset`]
//! - Labels come out as [`LabelLine`]s, normalized by the output side length
#![forbid(unsafe_code)]

mod assets;
mod dataset;
mod foundation;
mod geometry;
mod labels;
mod render;
mod scene;
mod transform;

pub use crate::foundation::core::{Affine, Canvas, Point, Rect, Vec2};
pub use crate::foundation::error::{CardsceneError, CardsceneResult};
pub use crate::foundation::math::scene_seed;

pub use crate::assets::background::{Background, BackgroundDir, BackgroundSource, SolidBackground};
pub use crate::assets::card::{Card, CardAnnotation, CardDeck};
pub use crate::assets::classes::ClassMap;
pub use crate::assets::decode::{decode_image, read_image};
pub use crate::dataset::config::{DEFAULT_BACKGROUND_RGBA, DatasetConfig};
pub use crate::dataset::split::{Split, SplitRatios};
pub use crate::dataset::writer::{DatasetLayout, scene_stem, write_labels, write_png};
pub use crate::geometry::bbox::{BoundingBox, NormalizedBox};
pub use crate::geometry::polygon::{AREA_EPSILON, Polygon, clip_convex};
pub use crate::labels::projector::{LabelLine, LabelProjector, format_labels};
pub use crate::render::composite::{CompositeMode, over, paste};
pub use crate::render::pipeline::{
    DatasetSources, DatasetStats, SceneOutput, render_dataset, render_dataset_with, render_scene,
};
pub use crate::scene::compose::{RenderedScene, Scene, SceneStats};
pub use crate::scene::config::{GlobalTransformConfig, SceneConfig};
pub use crate::scene::placement::{
    PlacementCell, PlacementGeometry, PlacementPlanner, PlacementScheme,
};
pub use crate::scene::rotate::{RotatedCard, rotate_card};
pub use crate::scene::visibility::{
    Candidate, FullOcclusionPolicy, LedgerEntry, Occlusion, PlacementOutcome, Proposal,
    RetryPolicy, VisibilityLedger, is_visible, place_with_retry,
};
pub use crate::transform::affine::{FittedAffine, fit_output, rotation, sample_range, scale_shear};
pub use crate::transform::warp::warp_rgba;
