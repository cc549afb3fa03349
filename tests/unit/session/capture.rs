use super::*;
use crate::assets::source::FixtureSource;
use crate::foundation::core::Rgba8;
use crate::layout::grid::rect_for;

fn canvas() -> CanvasSpec {
    let mut c = CanvasSpec::default();
    c.caption.text.clear();
    c
}

fn solid(c: Rgba8) -> RasterImage {
    RasterImage::solid(16, 16, c).unwrap()
}

#[test]
fn state_walks_empty_capturing_ready() {
    let mut s = CaptureSession::new(canvas());
    assert_eq!(s.state(), SessionState::Empty);
    for n in 1..=3 {
        let ev = s.on_base_image_captured(solid(Rgba8::WHITE)).unwrap();
        assert!(matches!(ev, CaptureEvent::Accepted { count } if count == n));
        assert_eq!(s.state(), SessionState::Capturing(n));
    }
    let ev = s.on_base_image_captured(solid(Rgba8::WHITE)).unwrap();
    let CaptureEvent::Completed(result) = ev else {
        panic!("fourth capture should complete the session");
    };
    assert_eq!((result.width(), result.height()), (600, 700));
    assert_eq!(s.state(), SessionState::Ready);
}

#[test]
fn fifth_capture_is_a_no_op() {
    let mut s = CaptureSession::new(canvas());
    for _ in 0..4 {
        s.on_base_image_captured(solid(Rgba8::WHITE)).unwrap();
    }
    let ev = s.on_base_image_captured(solid(Rgba8::BLACK)).unwrap();
    assert!(matches!(ev, CaptureEvent::Ignored));
    assert_eq!(s.base_images().len(), 4);
    assert!(s.base_images().iter().all(|i| i.pixel(0, 0) == Some([255; 4])));
}

#[test]
fn overlay_set_before_its_base_arrives_is_rendered() {
    let c = canvas();
    let mut s = CaptureSession::new(c.clone());
    let s2 = SlotIndex::new(2).unwrap();
    let blue = Rgba8::new(0, 0, 255, 255);

    s.on_base_image_captured(solid(Rgba8::WHITE)).unwrap();
    s.on_base_image_captured(solid(Rgba8::WHITE)).unwrap();
    s.on_overlay_selected(s2, solid(blue));
    s.on_base_image_captured(solid(Rgba8::WHITE)).unwrap();
    let CaptureEvent::Completed(result) = s.on_base_image_captured(solid(Rgba8::WHITE)).unwrap()
    else {
        panic!("expected completion");
    };

    let p = rect_for(s2, &c).center();
    let px = result.image().pixel(p.x as u32, p.y as u32).unwrap();
    assert!(px[2] > 250 && px[0] < 5 && px[1] < 5, "{px:?}");
}

#[test]
fn overlay_after_ready_does_not_rerender() {
    let mut s = CaptureSession::new(canvas());
    for _ in 0..4 {
        s.on_base_image_captured(solid(Rgba8::WHITE)).unwrap();
    }
    let prior = s.on_overlay_selected(SlotIndex::new(0).unwrap(), solid(Rgba8::BLACK));
    assert!(prior.is_none());
    assert_eq!(s.state(), SessionState::Ready);
    assert_eq!(s.overlays().len(), 1);
}

#[test]
fn render_failure_surfaces_and_leaves_no_result() {
    let mut c = canvas();
    c.caption.text = "x".to_owned();
    c.caption.font_path = Some("does/not/exist.ttf".into());
    let mut s = CaptureSession::new(c);
    for _ in 0..3 {
        s.on_base_image_captured(solid(Rgba8::WHITE)).unwrap();
    }
    assert!(s.on_base_image_captured(solid(Rgba8::WHITE)).is_err());
    assert_eq!(s.state(), SessionState::Ready);
}

#[test]
fn feed_from_drains_source_until_complete() {
    let mut s = CaptureSession::new(canvas());
    let mut src = FixtureSource::new((0..5).map(|_| solid(Rgba8::WHITE)));
    let result = s.feed_from(&mut src).unwrap();
    assert!(result.is_some());
    assert_eq!(src.remaining(), 1);

    let mut short = FixtureSource::new([solid(Rgba8::WHITE)]);
    s.reset();
    assert!(s.feed_from(&mut short).unwrap().is_none());
    assert_eq!(s.state(), SessionState::Capturing(1));
}

#[test]
fn reset_clears_images_and_overlays() {
    let mut s = CaptureSession::new(canvas());
    s.on_base_image_captured(solid(Rgba8::WHITE)).unwrap();
    s.on_overlay_selected(SlotIndex::new(1).unwrap(), solid(Rgba8::BLACK));
    s.reset();
    assert_eq!(s.state(), SessionState::Empty);
    assert!(s.overlays().is_empty());
}
