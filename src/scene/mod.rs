//! Scene composition: card layout, occlusion bookkeeping and the final background merge.

pub(crate) mod compose;
pub(crate) mod config;
pub(crate) mod placement;
pub(crate) mod rotate;
pub(crate) mod visibility;
