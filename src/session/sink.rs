use std::path::PathBuf;

use anyhow::Context as _;

use crate::foundation::error::FourcutResult;
use crate::render::collage::CollageResult;

/// Confirmation that a collage was persisted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SaveNotice {
    /// Where the collage was written, for sinks that write to the filesystem.
    pub location: Option<PathBuf>,
    /// Saved width in pixels.
    pub width: u32,
    /// Saved height in pixels.
    pub height: u32,
}

/// Persistence collaborator for finished collages.
///
/// A successful `save` returns the notice a UI uses to confirm; on failure no notice exists.
pub trait CollageSink {
    /// Persist `result`.
    fn save(&mut self, result: &CollageResult) -> FourcutResult<SaveNotice>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    saved: Vec<CollageResult>,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collages saved so far, oldest first.
    pub fn saved(&self) -> &[CollageResult] {
        &self.saved
    }
}

impl CollageSink for InMemorySink {
    fn save(&mut self, result: &CollageResult) -> FourcutResult<SaveNotice> {
        self.saved.push(result.clone());
        Ok(SaveNotice {
            location: None,
            width: result.width(),
            height: result.height(),
        })
    }
}

/// Writes each collage as a PNG file, creating parent directories as needed.
#[derive(Debug, Clone)]
pub struct PngFileSink {
    out_path: PathBuf,
}

impl PngFileSink {
    /// Sink writing to `out_path` (overwritten on every save).
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
        }
    }
}

impl CollageSink for PngFileSink {
    fn save(&mut self, result: &CollageResult) -> FourcutResult<SaveNotice> {
        if let Some(parent) = self.out_path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        let png = result.image().encode_png()?;
        std::fs::write(&self.out_path, png)
            .with_context(|| format!("write png '{}'", self.out_path.display()))?;
        tracing::info!(path = %self.out_path.display(), "collage saved");
        Ok(SaveNotice {
            location: Some(self.out_path.clone()),
            width: result.width(),
            height: result.height(),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/sink.rs"]
mod tests;
