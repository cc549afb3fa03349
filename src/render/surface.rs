use std::sync::Arc;

use crate::assets::raster::RasterImage;
use crate::assets::text::TextBrushRgba8;
use crate::foundation::core::{Affine, Rect, Rgba8, Vec2};
use crate::foundation::error::{FourcutError, FourcutResult};
use crate::layout::fill::FillPlacement;
use crate::scene::canvas::CanvasSpec;

/// Explicit drawing target for one collage.
///
/// Created with an allocated pixmap, drawn into in canvas units, and consumed by
/// [`Surface::finalize`], which rasterizes and reads the pixels back. Dropping a surface
/// early (on any error path) releases everything; there is no ambient drawing state.
pub(crate) struct Surface {
    ctx: vello_cpu::RenderContext,
    pixmap: vello_cpu::Pixmap,
    to_pixels: Affine,
    width: u32,
    height: u32,
}

impl Surface {
    pub(crate) fn create(canvas: &CanvasSpec) -> FourcutResult<Self> {
        let (width, height) = canvas.pixel_size();
        if width == 0 || height == 0 {
            return Err(FourcutError::surface_allocation("surface has zero area"));
        }
        let w: u16 = width.try_into().map_err(|_| {
            FourcutError::surface_allocation(format!("surface width {width} exceeds u16"))
        })?;
        let h: u16 = height.try_into().map_err(|_| {
            FourcutError::surface_allocation(format!("surface height {height} exceeds u16"))
        })?;

        let len = usize::from(w) * usize::from(h);
        let mut pixels = Vec::<vello_cpu::peniko::color::PremulRgba8>::new();
        pixels.try_reserve_exact(len).map_err(|e| {
            FourcutError::surface_allocation(format!("{width}x{height} px: {e}"))
        })?;
        pixels.resize(
            len,
            vello_cpu::peniko::color::PremulRgba8::from_u8_array([0, 0, 0, 0]),
        );
        let pixmap = vello_cpu::Pixmap::from_parts_with_opacity(pixels, w, h, true);

        Ok(Self {
            ctx: vello_cpu::RenderContext::new(w, h),
            pixmap,
            to_pixels: Affine::scale(f64::from(canvas.pixel_scale)),
            width,
            height,
        })
    }

    pub(crate) fn fill_rect(&mut self, rect: Rect, color: Rgba8) {
        if color.a == 0 {
            return;
        }
        self.ctx.set_blend_mode(vello_cpu::peniko::BlendMode::default());
        self.ctx.set_transform(affine_to_cpu(self.to_pixels));
        self.ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            color.r, color.g, color.b, color.a,
        ));
        self.ctx.fill_rect(&rect_to_cpu(rect));
    }

    /// Draw the visible crop of `image` so it lands exactly on `placement.dst`.
    pub(crate) fn draw_image(
        &mut self,
        image: &RasterImage,
        placement: &FillPlacement,
    ) -> FourcutResult<()> {
        let paint = image_paint(image)?;
        self.ctx.set_blend_mode(vello_cpu::peniko::BlendMode::default());
        self.ctx
            .set_transform(affine_to_cpu(self.to_pixels * placement.transform()));
        self.ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint(paint);
        self.ctx.fill_rect(&rect_to_cpu(placement.src_crop));
        Ok(())
    }

    /// Fill every glyph run of `layout` in the face it was shaped with, with the layout
    /// origin placed at `origin`.
    pub(crate) fn draw_text(
        &mut self,
        layout: &parley::Layout<TextBrushRgba8>,
        origin: Vec2,
    ) {
        self.ctx.set_blend_mode(vello_cpu::peniko::BlendMode::default());
        self.ctx
            .set_transform(affine_to_cpu(self.to_pixels * Affine::translate(origin)));
        self.ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let brush = run.style().brush;
                self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                let shaped = run.run();
                self.ctx
                    .glyph_run(shaped.font())
                    .font_size(shaped.font_size())
                    .fill_glyphs(glyphs);
            }
        }
    }

    /// Rasterize everything drawn so far and hand back the pixels.
    pub(crate) fn finalize(mut self) -> FourcutResult<RasterImage> {
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut self.pixmap);
        let bytes = self.pixmap.data_as_u8_slice().to_vec();
        RasterImage::from_premul_rgba8(self.width, self.height, bytes)
    }
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

fn image_paint(image: &RasterImage) -> FourcutResult<vello_cpu::Image> {
    let pixmap =
        pixmap_from_premul_bytes(image.as_premul_bytes(), image.width(), image.height())?;
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

fn pixmap_from_premul_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> FourcutResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| FourcutError::validation(format!("image width {width} exceeds u16")))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| FourcutError::validation(format!("image height {height} exceeds u16")))?;
    if bytes.len()
        != (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4)
    {
        return Err(FourcutError::validation("pixmap byte len mismatch"));
    }
    let pixels = bytes
        .chunks_exact(4)
        .map(|px| {
            vello_cpu::peniko::color::PremulRgba8::from_u8_array([px[0], px[1], px[2], px[3]])
        })
        .collect();
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels, w, h, true,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
