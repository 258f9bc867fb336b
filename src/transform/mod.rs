//! Affine helpers shared by the per-card rotation and the scene-level scale/shear.

pub(crate) mod affine;
pub(crate) mod warp;
