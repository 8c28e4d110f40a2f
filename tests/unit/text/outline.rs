use super::*;

fn square(x0: f64, y0: f64, side: f64) -> BezPath {
    let mut p = BezPath::new();
    p.move_to((x0, y0));
    p.line_to((x0 + side, y0));
    p.line_to((x0 + side, y0 + side));
    p.line_to((x0, y0 + side));
    p.close_path();
    p
}

struct Fixed(BurstResult<OutlinePath>);

impl GlyphOutlineProvider for Fixed {
    fn outline(&self, _text: &str, _font: &FontDescriptor) -> BurstResult<OutlinePath> {
        match &self.0 {
            Ok(o) => Ok(o.clone()),
            Err(BurstError::Outline(m)) => Err(BurstError::outline(m.clone())),
            Err(e) => Err(BurstError::validation(e.to_string())),
        }
    }
}

#[test]
fn contains_uses_fill_region() {
    let o = OutlinePath::new(square(0.0, 0.0, 10.0));
    assert_eq!(o.bounds(), Rect::new(0.0, 0.0, 10.0, 10.0));
    assert!(o.contains(Point::new(5.0, 5.0)));
    assert!(!o.contains(Point::new(15.0, 5.0)));
    assert!(!o.contains(Point::new(-0.1, 5.0)));
}

#[test]
fn counter_holes_are_excluded_by_winding() {
    // Outer square clockwise, inner square counter-clockwise.
    let mut p = square(0.0, 0.0, 10.0);
    p.move_to((3.0, 3.0));
    p.line_to((3.0, 7.0));
    p.line_to((7.0, 7.0));
    p.line_to((7.0, 3.0));
    p.close_path();
    let o = OutlinePath::new(p);
    assert!(o.contains(Point::new(1.0, 1.0)));
    assert!(!o.contains(Point::new(5.0, 5.0)));
}

#[test]
fn fit_into_preserves_aspect_and_centers() {
    let o = OutlinePath::new(square(100.0, 100.0, 20.0));
    let fitted = o.fit_into(Rect::new(0.0, 0.0, 350.0, 120.0)).unwrap();
    let b = fitted.bounds();
    assert!((b.width() - 120.0).abs() < 1e-9);
    assert!((b.height() - 120.0).abs() < 1e-9);
    assert!((b.center().x - 175.0).abs() < 1e-9);
    assert!((b.center().y - 60.0).abs() < 1e-9);
}

#[test]
fn empty_outline_cannot_be_fitted() {
    let o = OutlinePath::new(BezPath::new());
    assert!(o.is_empty());
    let err = o.fit_into(Rect::new(0.0, 0.0, 10.0, 10.0)).unwrap_err();
    assert!(matches!(err, BurstError::Outline(_)));
}

#[test]
fn length_and_trim_follow_arc_length() {
    let o = OutlinePath::new(square(0.0, 0.0, 10.0));
    assert!((o.length() - 40.0).abs() < 1e-6);

    let half = OutlinePath::new(o.trimmed(0.5));
    assert!((half.length() - 20.0).abs() < 1e-3);
    assert!(o.trimmed(0.0).elements().is_empty());
    assert_eq!(o.trimmed(1.0), *o.path());
}

#[test]
fn trim_inside_a_segment_ends_mid_edge() {
    let o = OutlinePath::new(square(0.0, 0.0, 10.0));
    let quarter_and_a_bit = o.trimmed(0.3);
    let end = quarter_and_a_bit.segments().last().unwrap().end();
    assert!((end.x - 10.0).abs() < 1e-6);
    assert!((end.y - 2.0).abs() < 1e-3);
}

#[test]
fn font_descriptor_validation() {
    assert!(FontDescriptor::default().validate().is_ok());
    let mut bad = FontDescriptor::default();
    bad.size_px = 0.0;
    assert!(bad.validate().is_err());
    let mut bad = FontDescriptor::default();
    bad.weight = 0;
    assert!(bad.validate().is_err());
}

#[test]
fn fallback_is_used_on_outline_errors_only() {
    let rect = Rect::new(0.0, 0.0, 100.0, 50.0);
    let good = Fixed(Ok(OutlinePath::new(square(0.0, 0.0, 10.0))));
    let missing = Fixed(Err(BurstError::outline("no fonts")));
    let invalid = Fixed(Err(BurstError::validation("bad")));
    let font = FontDescriptor::default();

    let o = outline_with_fallback(&missing, &good, "1", &font, rect).unwrap();
    assert!((o.bounds().height() - 50.0).abs() < 1e-9);

    let err = outline_with_fallback(&invalid, &good, "1", &font, rect).unwrap_err();
    assert!(matches!(err, BurstError::Validation(_)));
}
