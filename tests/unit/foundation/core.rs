use super::*;

#[test]
fn fps_frames_secs_roundtrip_floor() {
    let fps = Fps::new(30000, 1001).unwrap();
    let secs = fps.frames_to_secs(123);
    assert_eq!(fps.secs_to_frames_floor(secs), 123);
}

#[test]
fn fps_rejects_zero() {
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(30, 0).is_err());
}

#[test]
fn canvas_centered_rect_is_centered() {
    let canvas = Canvas {
        width: 400,
        height: 200,
    };
    let r = canvas.centered(Size::new(350.0, 120.0));
    assert_eq!(r, Rect::new(25.0, 40.0, 375.0, 160.0));
}

#[test]
fn hex_colors_parse_with_and_without_alpha() {
    assert_eq!(
        Rgba8Premul::from_hex("#ff8000").unwrap(),
        Rgba8Premul::opaque(255, 128, 0)
    );
    let half = Rgba8Premul::from_hex("#ffffff80").unwrap();
    assert_eq!(half.a, 128);
    assert_eq!(half.r, 128);
    assert!(Rgba8Premul::from_hex("#fff").is_err());
    assert!(Rgba8Premul::from_hex("#gg0000").is_err());
}
