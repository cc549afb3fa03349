use std::collections::VecDeque;
use std::path::PathBuf;

use rayon::prelude::*;

use crate::assets::raster::RasterImage;
use crate::foundation::error::FourcutResult;

/// Capability that delivers decoded images to a capture session.
///
/// A camera adapter, a photo-library picker, and a test fixture all fit behind this one
/// operation. Each call yields the images produced by one user action; an empty vec means the
/// action was cancelled.
pub trait ImageSource {
    /// Produce zero or more decoded images.
    fn produce(&mut self) -> FourcutResult<Vec<RasterImage>>;
}

/// Canned images handed out one per `produce` call.
#[derive(Debug, Default)]
pub struct FixtureSource {
    queue: VecDeque<RasterImage>,
}

impl FixtureSource {
    /// Queue `images` for delivery in order.
    pub fn new(images: impl IntoIterator<Item = RasterImage>) -> Self {
        Self {
            queue: images.into_iter().collect(),
        }
    }

    /// Images not yet delivered.
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl ImageSource for FixtureSource {
    fn produce(&mut self) -> FourcutResult<Vec<RasterImage>> {
        Ok(self.queue.pop_front().into_iter().collect())
    }
}

/// Decodes a fixed list of image files, all at once on the first call.
#[derive(Debug, Clone)]
pub struct FileSource {
    paths: Vec<PathBuf>,
    drained: bool,
}

impl FileSource {
    /// Source backed by `paths`, delivered in the given order.
    pub fn new(paths: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
            drained: false,
        }
    }
}

impl ImageSource for FileSource {
    fn produce(&mut self) -> FourcutResult<Vec<RasterImage>> {
        if self.drained {
            return Ok(Vec::new());
        }
        self.drained = true;
        tracing::debug!(count = self.paths.len(), "decoding image files");
        self.paths.par_iter().map(RasterImage::open).collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/source.rs"]
mod tests;
