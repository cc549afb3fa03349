pub(crate) mod raster;
pub(crate) mod source;
pub(crate) mod text;
