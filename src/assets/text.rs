use std::path::Path;
use std::sync::Arc;

use anyhow::Context as _;

use crate::foundation::error::{FourcutError, FourcutResult};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout.
pub(crate) struct TextBrushRgba8 {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
    pub(crate) a: u8,
}

/// Raw font bytes plus the face index inside them (non-zero for collections).
#[derive(Clone, Debug)]
pub(crate) struct CaptionFont {
    pub(crate) bytes: Arc<Vec<u8>>,
    pub(crate) index: u32,
}

impl CaptionFont {
    pub(crate) fn from_bytes(bytes: Vec<u8>) -> Self {
        Self {
            bytes: Arc::new(bytes),
            index: 0,
        }
    }

    pub(crate) fn from_path(path: &Path) -> FourcutResult<Self> {
        let bytes =
            std::fs::read(path).with_context(|| format!("read font '{}'", path.display()))?;
        Ok(Self::from_bytes(bytes))
    }

    /// Look up a sans-serif face of the requested weight in the system font database.
    ///
    /// Tries well-known sans families before the generic one, then falls back to the
    /// upright face whose weight is closest to `weight`.
    pub(crate) fn from_system(weight: u16) -> FourcutResult<Self> {
        use usvg::fontdb;

        let mut db = fontdb::Database::new();
        db.load_system_fonts();

        let id = SYSTEM_SANS_FAMILIES
            .iter()
            .map(|&name| fontdb::Family::Name(name))
            .chain(std::iter::once(fontdb::Family::SansSerif))
            .find_map(|family| {
                db.query(&fontdb::Query {
                    families: &[family],
                    weight: fontdb::Weight(weight),
                    ..fontdb::Query::default()
                })
            })
            .or_else(|| nearest_weight_face(&db, weight))
            .ok_or_else(|| FourcutError::font("no system fonts available"))?;
        tracing::debug!(?id, weight, "resolved system caption font");

        db.with_face_data(id, |data, index| Self {
            bytes: Arc::new(data.to_vec()),
            index,
        })
        .ok_or_else(|| FourcutError::font("system font face data unavailable"))
    }
}

const SYSTEM_SANS_FAMILIES: &[&str] = &[
    "DejaVu Sans",
    "Liberation Sans",
    "Noto Sans",
    "Helvetica",
    "Arial",
];

fn nearest_weight_face(db: &usvg::fontdb::Database, weight: u16) -> Option<usvg::fontdb::ID> {
    db.faces()
        .min_by_key(|face| {
            let italic = face.style != usvg::fontdb::Style::Normal;
            (italic, face.weight.0.abs_diff(weight))
        })
        .map(|face| face.id)
}

/// Horizontal placement of caption lines within the canvas width.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlign {
    /// Left edge.
    Start,
    /// Centered.
    #[default]
    Center,
    /// Right edge.
    End,
}

impl TextAlign {
    fn to_parley(self) -> parley::Alignment {
        match self {
            Self::Start => parley::Alignment::Start,
            Self::Center => parley::Alignment::Center,
            Self::End => parley::Alignment::End,
        }
    }
}

/// Styling inputs for one caption layout.
#[derive(Clone, Copy, Debug)]
pub(crate) struct TextStyle {
    pub(crate) size_px: f32,
    pub(crate) weight: u16,
    pub(crate) brush: TextBrushRgba8,
    pub(crate) align: TextAlign,
}

/// Stateful helper for building Parley text layouts from raw font bytes.
pub(crate) struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    registered: Vec<RegisteredFont>,
}

struct RegisteredFont {
    bytes: Arc<Vec<u8>>,
    index: u32,
    family: String,
}

impl Default for TextLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayoutEngine {
    pub(crate) fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            registered: Vec::new(),
        }
    }

    /// Shape `text` and break/align it within `max_width_px`.
    pub(crate) fn layout(
        &mut self,
        text: &str,
        font: &CaptionFont,
        style: TextStyle,
        max_width_px: f32,
    ) -> FourcutResult<parley::Layout<TextBrushRgba8>> {
        if !style.size_px.is_finite() || style.size_px <= 0.0 {
            return Err(FourcutError::validation(
                "text size_px must be finite and > 0",
            ));
        }

        let family_name = self.family_for(font)?;

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family_name)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(style.size_px));
        builder.push_default(parley::style::StyleProperty::FontWeight(
            parley::style::FontWeight::new(f32::from(style.weight)),
        ));
        builder.push_default(parley::style::StyleProperty::Brush(style.brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(Some(max_width_px));
        layout.align(
            Some(max_width_px),
            style.align.to_parley(),
            parley::AlignmentOptions::default(),
        );

        Ok(layout)
    }
}

impl TextLayoutEngine {
    /// Family name under which `font` is known to the font collection.
    ///
    /// Each distinct font buffer is registered once; repeated layouts with the same
    /// [`CaptionFont`] reuse the earlier registration.
    fn family_for(&mut self, font: &CaptionFont) -> FourcutResult<String> {
        if let Some(hit) = self
            .registered
            .iter()
            .find(|r| r.index == font.index && r.bytes == font.bytes)
        {
            return Ok(hit.family.clone());
        }

        let families = self.font_ctx.collection.register_fonts(
            parley::fontique::Blob::from(font.bytes.as_ref().clone()),
            None,
        );
        let family_id = families
            .iter()
            .find(|(_, faces)| faces.iter().any(|f| f.index() == font.index))
            .or_else(|| families.first())
            .map(|(id, _)| *id)
            .ok_or_else(|| FourcutError::font("no font families registered from font bytes"))?;

        let family = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| FourcutError::font("registered font family has no name"))?
            .to_string();

        self.registered.push(RegisteredFont {
            bytes: Arc::clone(&font.bytes),
            index: font.index,
            family: family.clone(),
        });
        Ok(family)
    }

    #[cfg(test)]
    pub(crate) fn registered_len(&self) -> usize {
        self.registered.len()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/text.rs"]
mod tests;
