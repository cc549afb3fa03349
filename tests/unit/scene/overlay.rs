use super::*;
use crate::foundation::core::Rgba8;

fn img(c: u8) -> RasterImage {
    RasterImage::solid(1, 1, Rgba8::new(c, c, c, 255)).unwrap()
}

#[test]
fn starts_empty_with_four_slots() {
    let set = OverlaySet::new();
    assert!(set.is_empty());
    assert_eq!(set.iter().count(), 4);
    assert!(set.iter().all(|(_, o)| o.is_none()));
}

#[test]
fn set_replaces_prior_value_per_slot() {
    let mut set = OverlaySet::new();
    let s2 = SlotIndex::new(2).unwrap();
    assert!(set.set(s2, img(1)).is_none());
    assert_eq!(set.set(s2, img(2)), Some(img(1)));
    assert_eq!(set.get(s2), Some(&img(2)));
    assert_eq!(set.len(), 1);
    assert!(set.get(SlotIndex::new(0).unwrap()).is_none());
}

#[test]
fn clear_empties_one_slot() {
    let mut set = OverlaySet::new();
    let s0 = SlotIndex::new(0).unwrap();
    let s3 = SlotIndex::new(3).unwrap();
    set.set(s0, img(1));
    set.set(s3, img(3));
    assert_eq!(set.clear(s0), Some(img(1)));
    assert_eq!(set.len(), 1);
    assert_eq!(set.get(s3), Some(&img(3)));
}
