pub(crate) mod projector;
