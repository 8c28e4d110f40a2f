use super::*;

#[test]
fn linear_tween_interpolates_and_clamps() {
    let t = Tween::new(0.0, 10.0, 1.0, 2.0, Ease::Linear);
    assert_eq!(t.sample(0.0), 0.0);
    assert_eq!(t.sample(1.0), 0.0);
    assert!((t.sample(2.0) - 5.0).abs() < 1e-12);
    assert_eq!(t.sample(3.0), 10.0);
    assert_eq!(t.sample(99.0), 10.0);
    assert!(t.is_finished(3.0));
    assert!(!t.is_finished(2.999));
}

#[test]
fn end_value_is_exact_for_points() {
    let t = Tween::new(
        Point::new(195.0, 844.0),
        Point::new(12.345, 67.891),
        0.0,
        2.0,
        Ease::OutCubic,
    );
    assert_eq!(t.sample(2.0), Point::new(12.345, 67.891));
}

#[test]
fn zero_duration_is_finished_at_start() {
    let t = Tween::new(1.0, 2.0, 5.0, 0.0, Ease::Linear);
    assert_eq!(t.sample(4.9), 1.0);
    assert_eq!(t.sample(5.0), 2.0);
}

#[test]
fn ease_out_moves_ahead_of_linear() {
    let lin = Tween::new(0.0, 1.0, 0.0, 2.0, Ease::Linear);
    let out = Tween::new(0.0, 1.0, 0.0, 2.0, Ease::OutCubic);
    assert!(out.sample(0.5) > lin.sample(0.5));
}

#[test]
fn color_lerp_rounds() {
    let c = Rgba8Premul::lerp(
        &Rgba8Premul::opaque(0, 0, 0),
        &Rgba8Premul::opaque(255, 100, 10),
        0.5,
    );
    assert_eq!(c, Rgba8Premul::opaque(128, 50, 5));
}

#[test]
fn looping_angle_wraps_without_reversing() {
    assert_eq!(looping_angle_deg(0.0, 6.0, 0.0), 0.0);
    assert!((looping_angle_deg(0.0, 6.0, 3.0) - 180.0).abs() < 1e-9);
    assert!((looping_angle_deg(0.0, 6.0, 7.5) - 90.0).abs() < 1e-9);
    assert!(looping_angle_deg(0.0, 6.0, 5.99) > looping_angle_deg(0.0, 6.0, 5.0));
}
