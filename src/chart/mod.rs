pub(crate) mod annotate;
pub(crate) mod raster;
pub(crate) mod scale;
pub(crate) mod svg;
