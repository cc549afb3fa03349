//! fourcut composites four photographs into a single "four-cut" collage.
//!
//! The pipeline is one-shot and pure:
//!
//! 1. **Capture**: a [`CaptureSession`] accumulates base images (from any [`ImageSource`]) and
//!    per-cut overlays in an [`OverlaySet`].
//! 2. **Layout**: [`rect_for`] resolves each cut's rectangle on a 2x2 grid described by a
//!    [`CanvasSpec`].
//! 3. **Render**: when the fourth base image lands, [`CollageRenderer::render`] draws each base
//!    scale-to-fill into its rect, its overlay on top, then the caption into the footer band.
//! 4. **Persist**: the [`CollageResult`] is handed to a [`CollageSink`].
//!
//! Rendering performs no IO apart from resolving the caption font, and identical inputs give
//! bit-identical output.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod foundation;
mod layout;
mod render;
mod scene;
mod session;

pub use crate::assets::raster::RasterImage;
pub use crate::assets::source::{FileSource, FixtureSource, ImageSource};
pub use crate::assets::text::TextAlign;
pub use crate::foundation::core::{Affine, CUT_COUNT, Rect, Rgba8, SlotIndex, Vec2};
pub use crate::foundation::error::{FourcutError, FourcutResult};
pub use crate::layout::fill::{ContentMode, FillPlacement};
pub use crate::layout::grid::{cell_rects, rect_for};
pub use crate::render::collage::{CollageRenderer, CollageResult, render};
pub use crate::scene::canvas::{CanvasSpec, CaptionSpec};
pub use crate::scene::overlay::OverlaySet;
pub use crate::session::capture::{CaptureEvent, CaptureSession, SessionState};
pub use crate::session::sink::{CollageSink, InMemorySink, PngFileSink, SaveNotice};
