use crate::assets::raster::RasterImage;
use crate::foundation::core::{CUT_COUNT, SlotIndex};

/// Optional decorative image per cut. Always exactly four entries.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OverlaySet {
    slots: [Option<RasterImage>; CUT_COUNT],
}

impl OverlaySet {
    /// Empty set: no slot has an overlay.
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign `image` to `slot`, returning whatever it replaced.
    pub fn set(&mut self, slot: SlotIndex, image: RasterImage) -> Option<RasterImage> {
        self.slots[slot.get()].replace(image)
    }

    /// Remove the overlay from `slot`.
    pub fn clear(&mut self, slot: SlotIndex) -> Option<RasterImage> {
        self.slots[slot.get()].take()
    }

    /// Overlay assigned to `slot`, if any.
    pub fn get(&self, slot: SlotIndex) -> Option<&RasterImage> {
        self.slots[slot.get()].as_ref()
    }

    /// Number of slots with an overlay.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// `true` when no slot has an overlay.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate `(slot, overlay)` over all four slots in order.
    pub fn iter(&self) -> impl Iterator<Item = (SlotIndex, Option<&RasterImage>)> {
        SlotIndex::ALL
            .into_iter()
            .map(|slot| (slot, self.slots[slot.get()].as_ref()))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/overlay.rs"]
mod tests;
