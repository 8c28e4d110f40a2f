use rand::SeedableRng;

use super::*;

const CANVAS: Size = Size::new(390.0, 844.0);

fn system(seed: u64) -> ShowerParticleSystem {
    ShowerParticleSystem::new(
        ShowerSettings::default(),
        Palette::confetti(),
        StdRng::seed_from_u64(seed),
    )
    .unwrap()
}

fn run(sys: &mut ShowerParticleSystem, sched: &mut Scheduler<ShowerEvent>, until: f64) {
    while let Some((at, ev)) = sched.pop_due(until) {
        sys.handle(ev, at, sched).unwrap();
    }
    sys.update(until);
}

fn angle_diff(a: f64, b: f64) -> f64 {
    let d = (a - b).rem_euclid(360.0);
    d.min(360.0 - d)
}

#[test]
fn spawn_count_tracks_elapsed_time_up_to_the_cap() {
    for (elapsed, expected) in [
        (0.07, 0),
        (0.16, 1),
        (0.5, 3),
        (1.0, 6),
        (7.4, 49),
        (7.55, 50),
        (60.0, 50),
    ] {
        let mut sys = system(1);
        let mut sched = Scheduler::new();
        assert!(sys.start(2.0, CANVAS, &mut sched).unwrap());
        run(&mut sys, &mut sched, 2.0 + elapsed);
        assert_eq!(sys.spawned(), expected, "elapsed {elapsed}");
    }
}

#[test]
fn timer_is_cancelled_at_the_cap() {
    let mut sys = system(2);
    let mut sched = Scheduler::new();
    sys.start(0.0, CANVAS, &mut sched).unwrap();
    run(&mut sys, &mut sched, 8.0);
    assert_eq!(sys.state(), ShowerState::Finished);
    assert_eq!(sys.spawned(), 50);

    run(&mut sys, &mut sched, 1000.0);
    assert_eq!(sys.spawned(), 50);
    assert!(sched.is_empty());
}

#[test]
fn restart_is_a_noop() {
    let mut sys = system(3);
    let mut sched = Scheduler::new();
    assert!(sys.start(0.0, CANVAS, &mut sched).unwrap());
    assert!(!sys.start(0.1, CANVAS, &mut sched).unwrap());
    run(&mut sys, &mut sched, 20.0);
    assert!(!sys.start(20.0, CANVAS, &mut sched).unwrap());
    assert_eq!(sys.spawned(), 50);
}

#[test]
fn spawned_particles_use_configured_ranges() {
    let mut sys = system(4);
    let mut sched = Scheduler::new();
    sys.start(0.0, CANVAS, &mut sched).unwrap();
    // Each particle is observed right at its spawn instant.
    let mut seen = 0;
    while let Some((at, ev)) = sched.pop_due(8.0) {
        let spawn = matches!(ev, ShowerEvent::Spawn { .. });
        sys.handle(ev, at, &mut sched).unwrap();
        if !spawn {
            continue;
        }
        let p = sys.live().max_by_key(|p| p.id).unwrap().clone();
        seen += 1;
        assert_eq!(p.spawned_at, at);
        assert_eq!(p.position.y, -40.0);
        assert!((0.0..=CANVAS.width).contains(&p.position.x));
        assert!((10.0..=30.0).contains(&p.size.width));
        assert!((10.0..=30.0).contains(&p.size.height));
        assert!((0.0..360.0).contains(&p.initial_rotation_deg));
        assert!((30.0..=200.0).contains(&p.rotation_speed));
        assert!(Palette::confetti().colors().contains(&p.color));
    }
    assert_eq!(seen, 50);
}

#[test]
fn spawns_are_strictly_periodic() {
    let mut sys = system(5);
    let mut sched = Scheduler::new();
    sys.start(1.0, CANVAS, &mut sched).unwrap();
    let mut spawn_times = Vec::new();
    while let Some((at, ev)) = sched.pop_due(100.0) {
        if matches!(ev, ShowerEvent::Spawn { .. }) {
            spawn_times.push(at);
        }
        sys.handle(ev, at, &mut sched).unwrap();
    }
    assert_eq!(spawn_times.len(), 50);
    for (k, t) in spawn_times.iter().enumerate() {
        assert!((t - (1.0 + (k + 1) as f64 * 0.15)).abs() < 1e-9);
    }
}

#[test]
fn every_particle_lands_below_the_canvas_with_full_rotation() {
    let mut sys = system(6);
    let mut sched = Scheduler::new();
    sys.start(0.0, CANVAS, &mut sched).unwrap();
    run(&mut sys, &mut sched, 20.0);

    assert_eq!(sys.live_count(), 0);
    let retired = sys.drain_retired();
    assert_eq!(retired.len(), 50);
    for p in &retired {
        assert!(p.has_landed());
        assert_eq!(p.position.y, CANVAS.height + 80.0);
        assert_eq!(p.fall_end_y(), CANVAS.height + 80.0);
        let expected = p.initial_rotation_deg + p.rotation_speed * 1.5;
        assert!(angle_diff(p.rotation_deg, expected) < 1e-6, "particle {:?}", p.id);
    }
    assert!(sys.drain_retired().is_empty());
}

#[test]
fn fall_is_linear_between_spawn_and_landing() {
    let mut sys = system(7);
    let mut sched = Scheduler::new();
    sys.start(0.0, CANVAS, &mut sched).unwrap();
    run(&mut sys, &mut sched, 0.15 + 0.75);
    let first = sys.get(ParticleId(0)).unwrap();
    let mid = -40.0 + (CANVAS.height + 80.0 + 40.0) / 2.0;
    assert!((first.position.y - mid).abs() < 1e-9);
}

#[test]
fn particles_overlap_and_retire_independently() {
    let mut sys = system(8);
    let mut sched = Scheduler::new();
    sys.start(0.0, CANVAS, &mut sched).unwrap();
    // At t=1.7 the first particle (spawned 0.15) has landed, later ones are still falling.
    run(&mut sys, &mut sched, 1.7);
    assert!(!sys.contains(ParticleId(0)));
    assert!(sys.contains(ParticleId(1)));
    assert_eq!(sys.drain_retired().len(), 1);
    assert_eq!(sys.live_count(), 10);
}

#[test]
fn removed_particles_skip_pending_ticks() {
    let mut sys = system(9);
    let mut sched = Scheduler::new();
    sys.start(0.0, CANVAS, &mut sched).unwrap();
    run(&mut sys, &mut sched, 0.2);
    let removed = sys.remove(ParticleId(0)).unwrap();
    run(&mut sys, &mut sched, 20.0);
    assert!(!sys.contains(ParticleId(0)));
    assert!(sys.drain_retired().iter().all(|p| p.id != removed.id));
}

#[test]
fn stop_cancels_spawning_and_drops_particles() {
    let mut sys = system(10);
    let mut sched = Scheduler::new();
    sys.start(0.0, CANVAS, &mut sched).unwrap();
    run(&mut sys, &mut sched, 1.0);
    sys.stop(&mut sched);
    assert_eq!(sys.state(), ShowerState::Finished);
    assert_eq!(sys.live_count(), 0);
    run(&mut sys, &mut sched, 50.0);
    assert_eq!(sys.spawned(), 6);
    assert!(sys.drain_retired().is_empty());
}

#[test]
fn zero_cap_finishes_without_spawning() {
    let settings = ShowerSettings {
        cap: 0,
        ..ShowerSettings::default()
    };
    let mut sys =
        ShowerParticleSystem::new(settings, Palette::confetti(), StdRng::seed_from_u64(0)).unwrap();
    let mut sched: Scheduler<ShowerEvent> = Scheduler::new();
    assert!(sys.start(0.0, CANVAS, &mut sched).unwrap());
    assert_eq!(sys.state(), ShowerState::Finished);
    assert!(sched.is_empty());
}

#[test]
fn shape_areas_match_their_paths() {
    let size = Size::new(24.0, 12.0);
    for shape in ConfettiShape::ALL {
        let analytic = shape.area(size);
        let traced = shape.path(size).area().abs();
        assert!(
            (analytic - traced).abs() / analytic < 5e-3,
            "{shape:?}: {analytic} vs {traced}"
        );
        let b = shape.path(size).bounding_box();
        assert!(b.width() <= size.width + 1e-9);
        assert!(b.height() <= size.height + 1e-9);
    }
}

#[test]
fn rotation_tick_count_follows_rate_and_duration() {
    assert_eq!(ShowerSettings::default().rotation_ticks(), 90);
}

#[test]
fn inverted_or_non_finite_settings_are_rejected() {
    let bad = [
        ShowerSettings {
            size_range: (30.0, 10.0),
            ..ShowerSettings::default()
        },
        ShowerSettings {
            rotation_speed_range: (200.0, f64::NAN),
            ..ShowerSettings::default()
        },
        ShowerSettings {
            size_range: (0.0, 10.0),
            ..ShowerSettings::default()
        },
        ShowerSettings {
            spawn_interval_secs: f64::INFINITY,
            ..ShowerSettings::default()
        },
        ShowerSettings {
            fall_secs: 0.0,
            ..ShowerSettings::default()
        },
        ShowerSettings {
            rotation_tick_hz: 0,
            ..ShowerSettings::default()
        },
    ];
    for settings in bad {
        let err = ShowerParticleSystem::new(settings, Palette::confetti(), StdRng::seed_from_u64(0))
            .unwrap_err();
        assert!(matches!(err, BurstError::Validation(_)), "{settings:?}");
    }
}

#[test]
fn degenerate_ranges_still_spawn() {
    let settings = ShowerSettings {
        size_range: (12.0, 12.0),
        rotation_speed_range: (90.0, 90.0),
        cap: 2,
        ..ShowerSettings::default()
    };
    let mut sys =
        ShowerParticleSystem::new(settings, Palette::confetti(), StdRng::seed_from_u64(3)).unwrap();
    let mut sched = Scheduler::new();
    sys.start(0.0, CANVAS, &mut sched).unwrap();
    run(&mut sys, &mut sched, 0.31);
    assert_eq!(sys.spawned(), 2);
    assert!(sys.live().all(|p| p.size == Size::new(12.0, 12.0)));
}

#[test]
fn unusable_canvas_is_rejected_on_start() {
    for canvas in [
        Size::new(-1.0, 844.0),
        Size::new(390.0, f64::NAN),
        Size::new(f64::INFINITY, 844.0),
    ] {
        let mut sys = system(1);
        let mut sched: Scheduler<ShowerEvent> = Scheduler::new();
        let err = sys.start(0.0, canvas, &mut sched).unwrap_err();
        assert!(matches!(err, BurstError::Validation(_)), "{canvas:?}");
        assert_eq!(sys.state(), ShowerState::Idle);
        assert!(sched.is_empty());
    }
}

#[test]
fn zero_width_canvas_spawns_on_the_left_edge() {
    let mut sys = system(5);
    let mut sched = Scheduler::new();
    sys.start(0.0, Size::new(0.0, 844.0), &mut sched).unwrap();
    run(&mut sys, &mut sched, 0.2);
    assert_eq!(sys.spawned(), 1);
    assert!(sys.live().all(|p| p.position.x == 0.0));
}
