use criterion::{Criterion, black_box, criterion_group, criterion_main};

use bevy::math::Vec2;
use bevy::prelude::Transform;
use hookwheel::level::{GroundSlab, Level};
use hookwheel::physics::{RigidBody2d, integrate_step, spring_accel};
use hookwheel::player::RiderPhase;
use hookwheel::player::hook::snap_aim_angle;
use hookwheel::player::movement::movement_step;
use hookwheel::player::rig::{PhaseInputs, jump_impulse, phase_step, rig_step, rig_target_for_phase};
use hookwheel::settings::Settings;

/// Small alternating inputs around zero speed
fn bench_movement_easing(c: &mut Criterion) {
    let settings = Settings::defaults();
    c.bench_function("movement_easing", |b| {
        b.iter(|| {
            let mut speed = 0.0f32;
            for i in 0..1_000usize {
                let x = if (i / 50) % 2 == 0 { 1.0 } else { -1.0 };
                speed = movement_step(black_box(speed), black_box(x), true, &settings.movement, 1.0 / 50.0);
            }
            black_box(speed);
        })
    });
}

/// Randomized input stream (deterministic LCG) to approximate real play
fn bench_movement_random(c: &mut Criterion) {
    let settings = Settings::defaults();
    c.bench_function("movement_random", |b| {
        b.iter(|| {
            let mut speed = 0.0f32;
            let mut state: u32 = 0x12345678;
            for _ in 0..1_000usize {
                state = state.wrapping_mul(1664525).wrapping_add(1013904223);
                let x = (((state >> 16) & 0x7fff) as f32 / 32767.0) * 2.0 - 1.0;
                state = state.wrapping_mul(1664525).wrapping_add(1013904223);
                let grounded = (state & 0x8000) != 0;
                speed = movement_step(black_box(speed), black_box(x), grounded, &settings.movement, 1.0 / 50.0);
            }
            black_box(speed);
        })
    });
}

/// Full rig control path: phase latch, target selection, length easing, jump
fn bench_rig_control(c: &mut Criterion) {
    let settings = Settings::defaults();
    c.bench_function("rig_control", |b| {
        b.iter(|| {
            let mut phase = RiderPhase::Grounded;
            let mut len = settings.rig.default_length;
            let mut state: u32 = 0xCAFEBABE;
            for _ in 0..1_000usize {
                state = state.wrapping_mul(1664525).wrapping_add(1013904223);
                let inputs = PhaseInputs {
                    charging: (state & 1) != 0,
                    body_on_ground: (state & 2) != 0,
                    wheel_on_ground: (state & 4) != 0,
                    wheel_was_on_ground: (state & 8) != 0,
                };
                phase = phase_step(phase, len, &settings.rig, &inputs);
                let (target, rate) = rig_target_for_phase(phase, &settings.rig);
                len = rig_step(len, target, rate, &settings.rig, 1.0 / 50.0);
                black_box(jump_impulse(inputs.wheel_on_ground, len, &settings.rig));
            }
            black_box((phase, len));
        })
    });
}

/// Aim snapping over randomized directions (deterministic LCG)
fn bench_aim_snap_random(c: &mut Criterion) {
    c.bench_function("aim_snap_random", |b| {
        b.iter(|| {
            let mut state: u32 = 0x87654321;
            for _ in 0..1_000usize {
                state = state.wrapping_mul(1664525).wrapping_add(1013904223);
                let x = (((state >> 16) & 0x7fff) as f32 / 32767.0) * 2.0 - 1.0;
                state = state.wrapping_mul(1664525).wrapping_add(1013904223);
                let y = (((state >> 16) & 0x7fff) as f32 / 32767.0) * 2.0 - 1.0;
                black_box(snap_aim_angle(black_box(Vec2::new(x, y))));
            }
        })
    });
}

/// Benchmark simulating many rigid-body integration steps over the level.
fn bench_body_integration_sim(c: &mut Criterion) {
    let settings = Settings::defaults();
    let level = Level {
        name: "bench".to_string(),
        slabs: vec![
            GroundSlab { x: 0.0, y: -1.0, half_width: 200.0, half_height: 1.0 },
            GroundSlab { x: 30.0, y: 0.5, half_width: 5.0, half_height: 0.5 },
        ],
    };

    c.bench_function("body_integration_many_steps", |b| {
        b.iter(|| {
            let mut tf = Transform::from_xyz(0.0, 5.0, 0.0);
            let mut rb = RigidBody2d::new(settings.physics.body_weight, settings.physics.body_radius);
            let dt = 1.0f32 / 50.0f32;

            for _ in 0..5_000 {
                rb.apply_force(Vec2::NEG_Y * settings.physics.body_weight);
                integrate_step(&mut tf, &mut rb, &level, dt);
            }

            black_box((tf, rb));
        })
    });
}

/// Spring math microbenchmark
fn bench_spring_math(c: &mut Criterion) {
    let settings = Settings::defaults();
    c.bench_function("spring_math", |b| {
        b.iter(|| {
            for i in 0..1_000usize {
                let t = (i as f32 / 1_000.0) * std::f32::consts::TAU;
                let delta = Vec2::new(t.cos(), -1.0 - t.sin() * 0.3);
                let _ = black_box(spring_accel(
                    black_box(delta),
                    Vec2::new(0.0, -0.5),
                    1.0,
                    settings.physics.rig_stiffness,
                    settings.physics.rig_damping,
                ));
            }
        })
    });
}

#[test]
fn __bench_smoke_test() {
    // make sure test harness runs this file
    assert!(true);
}

fn bench_dummy(c: &mut Criterion) { c.bench_function("dummy", |b| b.iter(|| { black_box(1 + 1); })); }

criterion_group! {
    name = benches;
    config = Criterion::default().sample_size(200);
    targets =
        bench_dummy,
        bench_movement_easing,
        bench_movement_random,
        bench_rig_control,
        bench_aim_snap_random,
        bench_body_integration_sim,
        bench_spring_math
}
criterion_main!(benches);
