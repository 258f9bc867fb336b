pub(crate) mod background;
pub(crate) mod card;
pub(crate) mod classes;
pub(crate) mod decode;
