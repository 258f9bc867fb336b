pub(crate) mod config;
pub(crate) mod split;
pub(crate) mod writer;
