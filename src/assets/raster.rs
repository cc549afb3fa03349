use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context as _;

use crate::foundation::core::Rgba8;
use crate::foundation::error::{FourcutError, FourcutResult};
use crate::foundation::math::{premultiply_rgba8_in_place, unpremultiply_rgba8_in_place};

/// Immutable decoded bitmap in premultiplied RGBA8 form.
///
/// Pixel storage is shared behind an `Arc`, so clones are cheap snapshots. Nothing in the crate
/// mutates a `RasterImage` after construction; drawing always targets a new surface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterImage {
    width: u32,
    height: u32,
    rgba8_premul: Arc<Vec<u8>>,
}

impl RasterImage {
    /// Build from straight-alpha RGBA8 bytes, row-major and tightly packed.
    pub fn from_rgba8(width: u32, height: u32, mut rgba: Vec<u8>) -> FourcutResult<Self> {
        check_dims(width, height, rgba.len())?;
        premultiply_rgba8_in_place(&mut rgba);
        Ok(Self {
            width,
            height,
            rgba8_premul: Arc::new(rgba),
        })
    }

    /// Build from bytes that are already premultiplied.
    pub(crate) fn from_premul_rgba8(
        width: u32,
        height: u32,
        rgba8_premul: Vec<u8>,
    ) -> FourcutResult<Self> {
        check_dims(width, height, rgba8_premul.len())?;
        Ok(Self {
            width,
            height,
            rgba8_premul: Arc::new(rgba8_premul),
        })
    }

    /// A `width x height` image filled with one colour.
    pub fn solid(width: u32, height: u32, color: Rgba8) -> FourcutResult<Self> {
        let px = (width as usize).saturating_mul(height as usize);
        let rgba = color.to_array().repeat(px);
        Self::from_rgba8(width, height, rgba)
    }

    /// Decode any format supported by the `image` crate.
    pub fn decode(bytes: &[u8]) -> FourcutResult<Self> {
        let dyn_img = image::load_from_memory(bytes)
            .map_err(|e| FourcutError::decode(format!("decode image from memory: {e}")))?;
        Ok(Self::from_dynamic(dyn_img))
    }

    /// Read and decode an image file.
    pub fn open(path: impl AsRef<Path>) -> FourcutResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .with_context(|| format!("read image '{}'", path.display()))?;
        Self::decode(&bytes).map_err(|e| match e {
            FourcutError::Decode(msg) => {
                FourcutError::decode(format!("'{}': {msg}", path.display()))
            }
            other => other,
        })
    }

    /// Convert a decoded `image` value, whatever its pixel layout.
    pub fn from_dynamic(img: image::DynamicImage) -> Self {
        let rgba = img.into_rgba8();
        let (width, height) = rgba.dimensions();
        let mut bytes = rgba.into_raw();
        premultiply_rgba8_in_place(&mut bytes);
        Self {
            width,
            height,
            rgba8_premul: Arc::new(bytes),
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Premultiplied RGBA8 bytes, row-major.
    pub fn as_premul_bytes(&self) -> &[u8] {
        &self.rgba8_premul
    }

    /// Premultiplied pixel at `(x, y)`, or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = &self.rgba8_premul[i..i + 4];
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Straight-alpha copy suitable for encoding.
    pub fn to_rgba_image(&self) -> FourcutResult<image::RgbaImage> {
        let mut bytes = self.rgba8_premul.as_ref().clone();
        unpremultiply_rgba8_in_place(&mut bytes);
        image::RgbaImage::from_raw(self.width, self.height, bytes)
            .ok_or_else(|| FourcutError::validation("raster byte len mismatch"))
    }

    /// Encode as PNG.
    pub fn encode_png(&self) -> FourcutResult<Vec<u8>> {
        let rgba = self.to_rgba_image()?;
        let mut buf = Vec::new();
        image::DynamicImage::ImageRgba8(rgba)
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .context("encode png")?;
        Ok(buf)
    }
}

fn check_dims(width: u32, height: u32, len: usize) -> FourcutResult<()> {
    if width == 0 || height == 0 {
        return Err(FourcutError::validation("image dimensions must be non-zero"));
    }
    let expected = (width as usize)
        .saturating_mul(height as usize)
        .saturating_mul(4);
    if len != expected {
        return Err(FourcutError::validation(format!(
            "image byte len {len} does not match {width}x{height} rgba8 ({expected})"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/raster.rs"]
mod tests;
