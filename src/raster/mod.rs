pub(crate) mod blit;
pub(crate) mod blur;
pub(crate) mod buffer;
pub(crate) mod primitives;
