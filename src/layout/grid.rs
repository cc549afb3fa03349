use crate::foundation::core::{CUT_COUNT, Rect, SlotIndex};
use crate::scene::canvas::CanvasSpec;

/// Destination rectangle for `slot`, in canvas units.
///
/// Cells are `W/2 x H/2`; each content rect is inset by half the frame gap on every side, so
/// adjacent rects are separated by a full gap and outer edges by half a gap.
pub fn rect_for(slot: SlotIndex, canvas: &CanvasSpec) -> Rect {
    let cell_w = f64::from(canvas.width) / 2.0;
    let cell_h = f64::from(canvas.height) / 2.0;
    let gap = canvas.frame_gap;

    let x = slot.col() as f64 * cell_w + gap / 2.0;
    let y = slot.row() as f64 * cell_h + gap / 2.0;
    Rect::new(x, y, x + (cell_w - gap), y + (cell_h - gap))
}

/// All four rects in slot order.
pub fn cell_rects(canvas: &CanvasSpec) -> [Rect; CUT_COUNT] {
    SlotIndex::ALL.map(|slot| rect_for(slot, canvas))
}

#[cfg(test)]
#[path = "../../tests/unit/layout/grid.rs"]
mod tests;
