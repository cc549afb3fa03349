use super::*;

fn style(align: TextAlign) -> TextStyle {
    TextStyle {
        size_px: 24.0,
        weight: 700,
        brush: TextBrushRgba8 {
            r: 0,
            g: 0,
            b: 0,
            a: 255,
        },
        align,
    }
}

fn fixture_font() -> CaptionFont {
    CaptionFont::from_path(Path::new(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/fixtures/fonts/DejaVuSans-Bold.ttf"
    )))
    .unwrap()
}

#[test]
fn layout_rejects_non_positive_size() {
    let mut engine = TextLayoutEngine::new();
    let font = CaptionFont::from_bytes(Vec::new());
    let mut s = style(TextAlign::Center);
    s.size_px = 0.0;
    assert!(engine.layout("x", &font, s, 600.0).is_err());
}

#[test]
fn layout_rejects_bytes_that_are_not_a_font() {
    let mut engine = TextLayoutEngine::new();
    let font = CaptionFont::from_bytes(b"definitely not a font".to_vec());
    let err = engine
        .layout("x", &font, style(TextAlign::Center), 600.0)
        .err()
        .expect("expected layout to fail");
    assert!(matches!(err, FourcutError::Font(_)));
}

#[test]
fn missing_font_file_is_reported() {
    assert!(CaptionFont::from_path(Path::new("does/not/exist.ttf")).is_err());
}

#[test]
fn centered_layout_is_balanced() {
    let font = fixture_font();
    let mut engine = TextLayoutEngine::new();
    let layout = engine
        .layout("Graceful Memories", &font, style(TextAlign::Center), 600.0)
        .unwrap();
    assert!(layout.width() > 0.0);
    assert!(layout.height() > 0.0);

    let line = layout.lines().next().unwrap();
    let mut min_x = f32::INFINITY;
    let mut max_x = f32::NEG_INFINITY;
    for item in line.items() {
        let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
            continue;
        };
        for g in run.positioned_glyphs() {
            min_x = min_x.min(g.x);
            max_x = max_x.max(g.x + g.advance);
        }
    }
    let left = min_x;
    let right = 600.0 - max_x;
    assert!((left - right).abs() < 2.0, "left={left} right={right}");
}

#[test]
fn same_font_is_registered_once() {
    let font = fixture_font();
    let mut engine = TextLayoutEngine::new();
    for text in ["Graceful Memories", "again", "and again"] {
        engine
            .layout(text, &font, style(TextAlign::Center), 600.0)
            .unwrap();
    }
    assert_eq!(engine.registered_len(), 1);

    let copy = CaptionFont::from_bytes(font.bytes.as_ref().clone());
    engine
        .layout("copy", &copy, style(TextAlign::Center), 600.0)
        .unwrap();
    assert_eq!(engine.registered_len(), 1);
}

#[test]
fn registered_family_is_the_font_own_family() {
    let mut engine = TextLayoutEngine::new();
    let family = engine.family_for(&fixture_font()).unwrap();
    assert!(family.starts_with("DejaVu Sans"), "{family}");
}

#[test]
fn system_lookup_finds_some_face() {
    let font = CaptionFont::from_system(700).unwrap();
    assert!(!font.bytes.is_empty());
}
