use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::assets::text::TextAlign;
use crate::foundation::core::{Rect, Rgba8};
use crate::foundation::error::{FourcutError, FourcutResult};
use crate::layout::fill::ContentMode;

/// Fixed collage geometry and styling.
///
/// All geometry is in canvas units; the output raster is `width * pixel_scale` by
/// `height * pixel_scale` pixels. Every field has a default, so a JSON config only needs to name
/// what it overrides.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CanvasSpec {
    /// Canvas width `W`.
    pub width: u32,
    /// Canvas height `H`.
    pub height: u32,
    /// Gap `F` between adjacent cells; half of it borders the canvas edges.
    pub frame_gap: f64,
    /// Base colour left showing wherever no image or text is drawn.
    pub background: Rgba8,
    /// Output pixels per canvas unit.
    pub pixel_scale: u32,
    /// How base and overlay images are fitted into their cells.
    pub content_mode: ContentMode,
    /// Footer caption.
    pub caption: CaptionSpec,
}

impl Default for CanvasSpec {
    fn default() -> Self {
        Self {
            width: 600,
            height: 700,
            frame_gap: 10.0,
            background: Rgba8::TRANSPARENT,
            pixel_scale: 1,
            content_mode: ContentMode::AspectFill,
            caption: CaptionSpec::default(),
        }
    }
}

/// Caption drawn into the footer band.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CaptionSpec {
    /// Caption string. Empty disables the caption.
    pub text: String,
    /// Font size in canvas units.
    pub size: f32,
    /// CSS-style font weight (400 regular, 700 bold).
    pub weight: u16,
    /// Text colour.
    pub color: Rgba8,
    /// Horizontal alignment across the full canvas width.
    pub align: TextAlign,
    /// Height of the footer band measured up from the bottom edge.
    pub band_height: f64,
    /// Font file; when unset a system sans-serif face is used.
    pub font_path: Option<PathBuf>,
}

impl Default for CaptionSpec {
    fn default() -> Self {
        Self {
            text: "Graceful Memories".to_owned(),
            size: 24.0,
            weight: 700,
            color: Rgba8::BLACK,
            align: TextAlign::Center,
            band_height: 50.0,
            font_path: None,
        }
    }
}

impl CanvasSpec {
    /// Load and validate a JSON config file.
    pub fn from_path(path: impl AsRef<Path>) -> FourcutResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            FourcutError::validation(format!("open canvas config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Parse and validate JSON from a reader.
    pub fn from_reader(r: impl Read) -> FourcutResult<Self> {
        let spec: Self = serde_json::from_reader(r)
            .map_err(|e| FourcutError::validation(format!("parse canvas config: {e}")))?;
        spec.validate()?;
        Ok(spec)
    }

    /// Parse and validate a JSON string.
    pub fn from_json_str(s: &str) -> FourcutResult<Self> {
        Self::from_reader(s.as_bytes())
    }

    /// Check the invariants the layout and renderer rely on.
    pub fn validate(&self) -> FourcutResult<()> {
        if self.width < 2 || self.height < 2 {
            return Err(FourcutError::validation("canvas must be at least 2x2"));
        }
        if self.pixel_scale == 0 {
            return Err(FourcutError::validation("pixel_scale must be >= 1"));
        }
        let px_w = u64::from(self.width) * u64::from(self.pixel_scale);
        let px_h = u64::from(self.height) * u64::from(self.pixel_scale);
        if px_w > u64::from(u16::MAX) || px_h > u64::from(u16::MAX) {
            return Err(FourcutError::validation(format!(
                "output {px_w}x{px_h} px exceeds the {} px surface limit",
                u16::MAX
            )));
        }

        let cell_w = f64::from(self.width) / 2.0;
        let cell_h = f64::from(self.height) / 2.0;
        if !self.frame_gap.is_finite() || self.frame_gap < 0.0 {
            return Err(FourcutError::validation("frame_gap must be finite and >= 0"));
        }
        if self.frame_gap >= cell_w.min(cell_h) {
            return Err(FourcutError::validation(format!(
                "frame_gap {} leaves no room in {cell_w}x{cell_h} cells",
                self.frame_gap
            )));
        }

        let c = &self.caption;
        let band_ok = c.band_height.is_finite()
            && c.band_height >= 0.0
            && c.band_height <= f64::from(self.height);
        if !band_ok {
            return Err(FourcutError::validation(
                "caption band_height must be within [0, height]",
            ));
        }
        if !c.size.is_finite() || c.size <= 0.0 {
            return Err(FourcutError::validation("caption size must be finite and > 0"));
        }
        if !(1..=1000).contains(&c.weight) {
            return Err(FourcutError::validation("caption weight must be in 1..=1000"));
        }
        Ok(())
    }

    /// Output raster size in pixels.
    pub fn pixel_size(&self) -> (u32, u32) {
        (
            self.width.saturating_mul(self.pixel_scale),
            self.height.saturating_mul(self.pixel_scale),
        )
    }

    /// Footer band `[0, H - band, W, band]` holding the caption.
    pub fn caption_band(&self) -> Rect {
        let w = f64::from(self.width);
        let h = f64::from(self.height);
        Rect::new(0.0, h - self.caption.band_height, w, h)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/canvas.rs"]
mod tests;
