pub(crate) mod rasterizer;
