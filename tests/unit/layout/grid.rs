use super::*;

fn xywh(r: Rect) -> (f64, f64, f64, f64) {
    (r.x0, r.y0, r.width(), r.height())
}

#[test]
fn default_canvas_rects_match_reference_geometry() {
    let canvas = CanvasSpec::default();
    let rects = cell_rects(&canvas);
    assert_eq!(xywh(rects[0]), (5.0, 5.0, 290.0, 340.0));
    assert_eq!(xywh(rects[1]), (305.0, 5.0, 290.0, 340.0));
    assert_eq!(xywh(rects[2]), (5.0, 355.0, 290.0, 340.0));
    assert_eq!(xywh(rects[3]), (305.0, 355.0, 290.0, 340.0));

    // Adjacent rects are exactly one frame gap apart.
    assert_eq!(rects[1].x0 - rects[0].x1, canvas.frame_gap);
    assert_eq!(rects[2].y0 - rects[0].y1, canvas.frame_gap);
}

#[test]
fn rects_are_pairwise_disjoint() {
    let rects = cell_rects(&CanvasSpec::default());
    for (i, a) in rects.iter().enumerate() {
        for b in rects.iter().skip(i + 1) {
            let overlap = a.intersect(*b);
            assert!(overlap.area() <= 0.0, "{a:?} overlaps {b:?}");
        }
    }
}

#[test]
fn rects_cover_canvas_minus_gap_borders() {
    let canvas = CanvasSpec::default();
    let rects = cell_rects(&canvas);
    let covered: f64 = rects.iter().map(|r| r.area()).sum();

    let w = f64::from(canvas.width);
    let h = f64::from(canvas.height);
    let f = canvas.frame_gap;
    let expected = (w - 2.0 * f) * (h - 2.0 * f);
    assert_eq!(covered, expected);

    let bounds = rects.iter().fold(rects[0], |acc, r| acc.union(*r));
    assert_eq!(bounds, Rect::new(f / 2.0, f / 2.0, w - f / 2.0, h - f / 2.0));
}

#[test]
fn rect_for_is_pure() {
    let canvas = CanvasSpec::default();
    for slot in SlotIndex::ALL {
        assert_eq!(rect_for(slot, &canvas), rect_for(slot, &canvas));
    }
}

#[test]
fn gap_and_size_follow_configuration() {
    let canvas = CanvasSpec {
        width: 200,
        height: 100,
        frame_gap: 0.0,
        ..CanvasSpec::default()
    };
    let rects = cell_rects(&canvas);
    assert_eq!(xywh(rects[3]), (100.0, 50.0, 100.0, 50.0));
}
