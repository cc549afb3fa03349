use std::path::PathBuf;

use crate::assets::raster::RasterImage;
use crate::assets::text::{CaptionFont, TextBrushRgba8, TextLayoutEngine, TextStyle};
use crate::foundation::core::{CUT_COUNT, Rect, SlotIndex, Vec2};
use crate::foundation::error::{FourcutError, FourcutResult};
use crate::layout::fill::FillPlacement;
use crate::layout::grid::rect_for;
use crate::render::surface::Surface;
use crate::scene::canvas::CanvasSpec;
use crate::scene::overlay::OverlaySet;

/// The finished collage. Immutable; hand it to a [`crate::CollageSink`] to persist it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CollageResult {
    image: RasterImage,
}

impl CollageResult {
    /// Composited raster.
    pub fn image(&self) -> &RasterImage {
        &self.image
    }

    /// Take ownership of the composited raster.
    pub fn into_image(self) -> RasterImage {
        self.image
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

/// Composites four cuts, their overlays, and the caption into one raster.
///
/// Holds the text layout contexts and the resolved caption font so repeated renders do not
/// reload fonts. Rendering is otherwise stateless: identical inputs give identical pixels.
#[derive(Default)]
pub struct CollageRenderer {
    text: TextLayoutEngine,
    font_override: Option<CaptionFont>,
    resolved: Option<(Option<PathBuf>, u16, CaptionFont)>,
}

impl std::fmt::Debug for CollageRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollageRenderer")
            .field("font_override", &self.font_override.is_some())
            .finish_non_exhaustive()
    }
}

struct CaptionLayout {
    layout: parley::Layout<TextBrushRgba8>,
    origin: Vec2,
}

impl CollageRenderer {
    /// Renderer that resolves the caption font from the canvas config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Renderer that always sets the caption in the font given by `font_bytes`.
    pub fn with_caption_font(font_bytes: Vec<u8>) -> Self {
        Self {
            font_override: Some(CaptionFont::from_bytes(font_bytes)),
            ..Self::default()
        }
    }

    /// Composite the collage.
    ///
    /// Per slot, the base image is drawn scale-to-fill into its cell and then the overlay (if
    /// any) on top of it; the caption is drawn after all four slots. Fails with
    /// [`FourcutError::PrematureRender`] unless exactly four base images are supplied.
    #[tracing::instrument(
        skip_all,
        fields(
            bases = base_images.len(),
            overlays = overlays.len(),
            w = canvas.width,
            h = canvas.height
        )
    )]
    pub fn render(
        &mut self,
        base_images: &[RasterImage],
        overlays: &OverlaySet,
        canvas: &CanvasSpec,
    ) -> FourcutResult<CollageResult> {
        if base_images.len() < CUT_COUNT {
            return Err(FourcutError::PrematureRender {
                provided: base_images.len(),
            });
        }
        if base_images.len() > CUT_COUNT {
            return Err(FourcutError::validation(format!(
                "expected {CUT_COUNT} base images, got {}",
                base_images.len()
            )));
        }
        canvas.validate()?;

        let caption = self.layout_caption(canvas)?;
        let mut surface = Surface::create(canvas)?;
        surface.fill_rect(
            Rect::new(0.0, 0.0, f64::from(canvas.width), f64::from(canvas.height)),
            canvas.background,
        );

        for slot in SlotIndex::ALL {
            let rect = rect_for(slot, canvas);
            let base = &base_images[slot.get()];
            surface.draw_image(
                base,
                &FillPlacement::compute(base.width(), base.height(), rect, canvas.content_mode),
            )?;

            let overlay = overlays.get(slot);
            if let Some(overlay) = overlay {
                surface.draw_image(
                    overlay,
                    &FillPlacement::compute(
                        overlay.width(),
                        overlay.height(),
                        rect,
                        canvas.content_mode,
                    ),
                )?;
            }
            tracing::debug!(%slot, overlay = overlay.is_some(), ?rect, "drew cut");
        }

        if let Some(c) = caption {
            surface.draw_text(&c.layout, c.origin);
        }

        let image = surface.finalize()?;
        Ok(CollageResult { image })
    }

    fn layout_caption(&mut self, canvas: &CanvasSpec) -> FourcutResult<Option<CaptionLayout>> {
        let spec = &canvas.caption;
        if spec.text.trim().is_empty() || spec.band_height <= 0.0 {
            return Ok(None);
        }

        let font = self.caption_font(canvas)?;
        let style = TextStyle {
            size_px: spec.size,
            weight: spec.weight,
            brush: TextBrushRgba8 {
                r: spec.color.r,
                g: spec.color.g,
                b: spec.color.b,
                a: spec.color.a,
            },
            align: spec.align,
        };
        let layout = self
            .text
            .layout(&spec.text, &font, style, canvas.width as f32)?;

        let band = canvas.caption_band();
        let origin = Vec2::new(
            band.x0,
            band.y0 + (band.height() - f64::from(layout.height())) / 2.0,
        );
        Ok(Some(CaptionLayout { layout, origin }))
    }

    fn caption_font(&mut self, canvas: &CanvasSpec) -> FourcutResult<CaptionFont> {
        if let Some(font) = &self.font_override {
            return Ok(font.clone());
        }
        let path = canvas.caption.font_path.clone();
        let weight = canvas.caption.weight;
        if let Some((p, w, font)) = &self.resolved
            && *p == path
            && *w == weight
        {
            return Ok(font.clone());
        }

        let font = match &path {
            Some(p) => CaptionFont::from_path(p)?,
            None => CaptionFont::from_system(weight)?,
        };
        self.resolved = Some((path, weight, font.clone()));
        Ok(font)
    }
}

/// One-shot convenience over [`CollageRenderer::render`].
pub fn render(
    base_images: &[RasterImage],
    overlays: &OverlaySet,
    canvas: &CanvasSpec,
) -> FourcutResult<CollageResult> {
    CollageRenderer::new().render(base_images, overlays, canvas)
}

#[cfg(test)]
#[path = "../../tests/unit/render/collage.rs"]
mod tests;
