use crate::assets::raster::RasterImage;
use crate::assets::source::ImageSource;
use crate::foundation::core::{CUT_COUNT, SlotIndex};
use crate::foundation::error::FourcutResult;
use crate::render::collage::{CollageRenderer, CollageResult};
use crate::scene::canvas::CanvasSpec;
use crate::scene::overlay::OverlaySet;

/// Where a capture session stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    /// No base image yet.
    Empty,
    /// Holding `1..=3` base images.
    Capturing(usize),
    /// All four base images present; the collage has been rendered.
    Ready,
}

/// Outcome of delivering one captured base image.
#[derive(Debug)]
pub enum CaptureEvent {
    /// Stored; `count` base images are now held.
    Accepted {
        /// Base images held after this capture.
        count: usize,
    },
    /// This was the fourth image; the collage was rendered from the current overlays.
    Completed(CollageResult),
    /// The session was already `Ready`; the image was dropped.
    Ignored,
}

/// Accumulates base images and overlays, and renders once the fourth base image lands.
///
/// Single-writer: the session is mutated only through `&mut self`, and rendering reads a
/// snapshot of the images at the moment of the `Ready` transition.
#[derive(Debug)]
pub struct CaptureSession {
    canvas: CanvasSpec,
    renderer: CollageRenderer,
    base_images: Vec<RasterImage>,
    overlays: OverlaySet,
}

impl CaptureSession {
    /// Start an empty session with a default renderer.
    pub fn new(canvas: CanvasSpec) -> Self {
        Self::with_renderer(canvas, CollageRenderer::new())
    }

    /// Start an empty session that renders with `renderer`.
    pub fn with_renderer(canvas: CanvasSpec, renderer: CollageRenderer) -> Self {
        Self {
            canvas,
            renderer,
            base_images: Vec::with_capacity(CUT_COUNT),
            overlays: OverlaySet::new(),
        }
    }

    /// Current state.
    pub fn state(&self) -> SessionState {
        match self.base_images.len() {
            0 => SessionState::Empty,
            n if n < CUT_COUNT => SessionState::Capturing(n),
            _ => SessionState::Ready,
        }
    }

    /// Canvas the session renders with.
    pub fn canvas(&self) -> &CanvasSpec {
        &self.canvas
    }

    /// Base images captured so far, in capture order.
    pub fn base_images(&self) -> &[RasterImage] {
        &self.base_images
    }

    /// Current overlay assignments.
    pub fn overlays(&self) -> &OverlaySet {
        &self.overlays
    }

    /// Deliver one captured image.
    ///
    /// The fourth accepted image triggers the render. If rendering fails the session still
    /// becomes `Ready` and the error is returned; no partial collage is produced.
    #[tracing::instrument(skip_all, fields(state = ?self.state()))]
    pub fn on_base_image_captured(&mut self, image: RasterImage) -> FourcutResult<CaptureEvent> {
        if self.base_images.len() >= CUT_COUNT {
            tracing::warn!("session already ready; ignoring capture");
            return Ok(CaptureEvent::Ignored);
        }

        self.base_images.push(image);
        let count = self.base_images.len();
        if count < CUT_COUNT {
            tracing::debug!(count, "base image accepted");
            return Ok(CaptureEvent::Accepted { count });
        }

        tracing::info!(overlays = self.overlays.len(), "all cuts captured; rendering collage");
        let result = self
            .renderer
            .render(&self.base_images, &self.overlays, &self.canvas)?;
        Ok(CaptureEvent::Completed(result))
    }

    /// Assign an overlay to `slot`, replacing any previous one. Allowed in every state; does
    /// not re-render.
    pub fn on_overlay_selected(
        &mut self,
        slot: SlotIndex,
        image: RasterImage,
    ) -> Option<RasterImage> {
        tracing::debug!(%slot, "overlay selected");
        self.overlays.set(slot, image)
    }

    /// Pull images from `source` until it runs dry or the session completes.
    ///
    /// Returns the collage if one was rendered during this call.
    pub fn feed_from(
        &mut self,
        source: &mut dyn ImageSource,
    ) -> FourcutResult<Option<CollageResult>> {
        loop {
            let batch = source.produce()?;
            if batch.is_empty() {
                return Ok(None);
            }
            for image in batch {
                if let CaptureEvent::Completed(result) = self.on_base_image_captured(image)? {
                    return Ok(Some(result));
                }
            }
        }
    }

    /// Drop all base images and overlays, returning to `Empty`.
    pub fn reset(&mut self) {
        self.base_images.clear();
        self.overlays = OverlaySet::new();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/capture.rs"]
mod tests;
