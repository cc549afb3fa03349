use crate::foundation::core::{Affine, Rect, Vec2};

/// How an image is fitted into its cut rectangle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentMode {
    /// Uniform scale so the image covers the rect; centered, excess cropped.
    #[default]
    AspectFill,
    /// Independent x/y scale so the image exactly matches the rect.
    Stretch,
}

/// Where a source image lands when fitted into a destination rect.
///
/// `transform` maps image pixel space into canvas units. `src_crop` is the part of the image
/// (in image pixels) that maps onto `dst`; everything outside it is discarded.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FillPlacement {
    /// Destination rect in canvas units.
    pub dst: Rect,
    /// Horizontal scale factor.
    pub scale_x: f64,
    /// Vertical scale factor.
    pub scale_y: f64,
    /// Canvas position of the image's top-left pixel.
    pub offset: Vec2,
    /// Visible region of the source image, in image pixels.
    pub src_crop: Rect,
}

impl FillPlacement {
    /// Fit an `img_w x img_h` image into `dst` using `mode`.
    pub fn compute(img_w: u32, img_h: u32, dst: Rect, mode: ContentMode) -> Self {
        let iw = f64::from(img_w.max(1));
        let ih = f64::from(img_h.max(1));
        let (scale_x, scale_y) = match mode {
            ContentMode::AspectFill => {
                let s = (dst.width() / iw).max(dst.height() / ih);
                (s, s)
            }
            ContentMode::Stretch => (dst.width() / iw, dst.height() / ih),
        };

        let offset = Vec2::new(
            dst.x0 + (dst.width() - iw * scale_x) / 2.0,
            dst.y0 + (dst.height() - ih * scale_y) / 2.0,
        );
        let src_crop = Rect::new(
            (dst.x0 - offset.x) / scale_x,
            (dst.y0 - offset.y) / scale_y,
            (dst.x1 - offset.x) / scale_x,
            (dst.y1 - offset.y) / scale_y,
        );

        Self {
            dst,
            scale_x,
            scale_y,
            offset,
            src_crop,
        }
    }

    /// Image-space to canvas-space transform.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.offset) * Affine::scale_non_uniform(self.scale_x, self.scale_y)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/fill.rs"]
mod tests;
