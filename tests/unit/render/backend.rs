use super::*;

#[test]
fn straight_alpha_conversion_undoes_premultiplication() {
    let frame = FrameRGBA {
        width: 2,
        height: 1,
        data: vec![64, 32, 0, 128, 10, 20, 30, 255],
        premultiplied: true,
    };
    let straight = frame.to_straight_rgba();
    assert_eq!(&straight[4..], &[10, 20, 30, 255]);
    assert_eq!(straight[3], 128);
    assert!((i32::from(straight[0]) - 128).abs() <= 1);
    assert!((i32::from(straight[1]) - 64).abs() <= 1);
    assert_eq!(straight[2], 0);
}

#[test]
fn pixel_lookup_is_bounds_checked() {
    let frame = FrameRGBA {
        width: 1,
        height: 1,
        data: vec![1, 2, 3, 4],
        premultiplied: false,
    };
    assert_eq!(frame.pixel(0, 0), Some([1, 2, 3, 4]));
    assert_eq!(frame.pixel(1, 0), None);
    assert_eq!(frame.to_straight_rgba(), vec![1, 2, 3, 4]);
}

#[test]
fn default_settings_have_a_gradient() {
    let s = RenderSettings::default();
    assert!(s.gradient.len() >= 2);
    assert!(s.outline_width > 0.0);
}
