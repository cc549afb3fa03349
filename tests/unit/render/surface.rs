use super::*;

fn canvas(width: u32, height: u32) -> CanvasSpec {
    CanvasSpec {
        width,
        height,
        frame_gap: 0.0,
        ..CanvasSpec::default()
    }
}

fn assert_close(px: Option<[u8; 4]>, want: [u8; 4]) {
    let px = px.expect("pixel in bounds");
    for (a, b) in px.iter().zip(want) {
        assert!(a.abs_diff(b) <= 2, "{px:?} vs {want:?}");
    }
}

#[test]
fn fresh_surface_finalizes_to_transparent_pixels() {
    let s = Surface::create(&canvas(8, 6)).unwrap();
    let img = s.finalize().unwrap();
    assert_eq!((img.width(), img.height()), (8, 6));
    assert!(img.as_premul_bytes().iter().all(|&b| b == 0));
}

#[test]
fn fill_rect_covers_pixel_aligned_area_only() {
    let mut s = Surface::create(&canvas(10, 10)).unwrap();
    s.fill_rect(Rect::new(2.0, 2.0, 5.0, 5.0), Rgba8::new(255, 0, 0, 255));
    let img = s.finalize().unwrap();
    assert_eq!(img.pixel(3, 3), Some([255, 0, 0, 255]));
    assert_eq!(img.pixel(1, 1), Some([0, 0, 0, 0]));
    assert_eq!(img.pixel(5, 5), Some([0, 0, 0, 0]));
}

#[test]
fn draw_image_is_clipped_to_destination() {
    let mut s = Surface::create(&canvas(20, 20)).unwrap();
    let img = RasterImage::solid(40, 10, Rgba8::new(0, 0, 255, 255)).unwrap();
    let dst = Rect::new(5.0, 5.0, 15.0, 15.0);
    let placement = FillPlacement::compute(
        img.width(),
        img.height(),
        dst,
        crate::layout::fill::ContentMode::AspectFill,
    );
    s.draw_image(&img, &placement).unwrap();
    let out = s.finalize().unwrap();

    assert_close(out.pixel(10, 10), [0, 0, 255, 255]);
    // Scaled image is 40 wide; nothing may spill outside the 10x10 destination.
    assert_eq!(out.pixel(2, 10), Some([0, 0, 0, 0]));
    assert_eq!(out.pixel(17, 10), Some([0, 0, 0, 0]));
}

#[test]
fn pixel_scale_multiplies_output_size() {
    let spec = CanvasSpec {
        pixel_scale: 3,
        ..canvas(4, 4)
    };
    let mut s = Surface::create(&spec).unwrap();
    s.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Rgba8::WHITE);
    let img = s.finalize().unwrap();
    assert_eq!((img.width(), img.height()), (12, 12));
    assert_eq!(img.pixel(2, 2), Some([255, 255, 255, 255]));
    assert_eq!(img.pixel(3, 3), Some([0, 0, 0, 0]));
}

#[test]
fn oversized_surface_is_an_allocation_failure() {
    let spec = CanvasSpec {
        width: 70_000,
        ..canvas(4, 4)
    };
    assert!(matches!(
        Surface::create(&spec),
        Err(FourcutError::SurfaceAllocation(_))
    ));
}

#[test]
fn image_paint_rejects_mismatched_bytes() {
    assert!(pixmap_from_premul_bytes(&[0; 7], 1, 2).is_err());
}
