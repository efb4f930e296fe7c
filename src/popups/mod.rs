pub(crate) mod choreography;
pub(crate) mod engine;
pub(crate) mod popup;
