use crate::foundation::error::{FourcutError, FourcutResult};
use serde::{Deserialize, Serialize};

pub use kurbo::{Affine, Rect, Vec2};

/// Number of cuts in a collage. Fixed; the grid is always 2x2.
pub const CUT_COUNT: usize = 4;

/// One of the four collage cut positions.
///
/// Slots map onto the grid row-major: `row = index / 2`, `col = index % 2`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotIndex(u8);

impl SlotIndex {
    /// All four slots in draw order.
    pub const ALL: [SlotIndex; CUT_COUNT] =
        [SlotIndex(0), SlotIndex(1), SlotIndex(2), SlotIndex(3)];

    /// Create a validated slot index.
    pub fn new(index: usize) -> FourcutResult<Self> {
        if index >= CUT_COUNT {
            return Err(FourcutError::InvalidSlotIndex(index));
        }
        Ok(Self(index as u8))
    }

    /// Zero-based slot number.
    pub fn get(self) -> usize {
        usize::from(self.0)
    }

    /// Grid row (0 = top).
    pub fn row(self) -> usize {
        self.get() / 2
    }

    /// Grid column (0 = left).
    pub fn col(self) -> usize {
        self.get() % 2
    }
}

impl TryFrom<usize> for SlotIndex {
    type Error = FourcutError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl std::fmt::Display for SlotIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Straight-alpha RGBA8 colour.
///
/// Serialized as `#rrggbbaa`; deserializes from `#rrggbb`, `#rrggbbaa`, or a
/// `[r, g, b]` / `[r, g, b, a]` byte array.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Opaque black.
    pub const BLACK: Rgba8 = Rgba8::new(0, 0, 0, 255);
    /// Opaque white.
    pub const WHITE: Rgba8 = Rgba8::new(255, 255, 255, 255);
    /// Fully transparent black.
    pub const TRANSPARENT: Rgba8 = Rgba8::new(0, 0, 0, 0);

    /// Construct from channel values.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Channel values as an array.
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Parse `#rrggbb` or `#rrggbbaa` (the `#` is optional).
    pub fn parse_hex(s: &str) -> FourcutResult<Self> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);

        fn hex_byte(pair: &str) -> FourcutResult<u8> {
            u8::from_str_radix(pair, 16)
                .map_err(|_| FourcutError::validation(format!("invalid hex byte \"{pair}\"")))
        }

        if !s.is_ascii() {
            return Err(FourcutError::validation("hex color must be ASCII"));
        }
        match s.len() {
            6 => Ok(Self::new(
                hex_byte(&s[0..2])?,
                hex_byte(&s[2..4])?,
                hex_byte(&s[4..6])?,
                255,
            )),
            8 => Ok(Self::new(
                hex_byte(&s[0..2])?,
                hex_byte(&s[2..4])?,
                hex_byte(&s[4..6])?,
                hex_byte(&s[6..8])?,
            )),
            _ => Err(FourcutError::validation(
                "hex color must be #RRGGBB or #RRGGBBAA (case-insensitive)",
            )),
        }
    }

    /// Format as lowercase `#rrggbbaa`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }
}

impl Serialize for Rgba8 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgba8 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Hex(String),
            Arr(Vec<u8>),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Hex(s) => Self::parse_hex(&s).map_err(serde::de::Error::custom),
            Repr::Arr(v) => match v.as_slice() {
                [r, g, b] => Ok(Self::new(*r, *g, *b, 255)),
                [r, g, b, a] => Ok(Self::new(*r, *g, *b, *a)),
                _ => Err(serde::de::Error::custom(
                    "rgba array must have len 3 ([r,g,b]) or 4 ([r,g,b,a])",
                )),
            },
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
