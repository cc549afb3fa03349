pub(crate) mod collage;
pub(crate) mod surface;
