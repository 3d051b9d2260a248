//! Minimal 2D rigid-body simulation for the rider.
//!
//! Two bodies exist in this game: the rider body and the wheel, joined by a
//! variable-rest-length spring rig. Forces are buffered on the component in
//! acceleration mode (weight-scaled, mass-free) and consumed by
//! `integrate_bodies` on the fixed timestep; impulses change velocity
//! immediately. Ground response snaps a falling body onto the highest
//! reachable slab top, the same treatment the level queries are built for.

use crate::level::Level;
use crate::settings::Settings;
use bevy::prelude::*;

/// Terminal fall speed, world units per second.
pub const MAX_FALL_SPEED: f32 = 30.0;

/// A point-mass rigid body with a circular collision shape.
#[derive(Component, Debug, Clone)]
pub struct RigidBody2d {
    /// Current velocity in world units per second.
    pub velocity: Vec2,
    /// Per-body gravity scale (acceleration applied downward each frame).
    pub weight: f32,
    /// Collision radius.
    pub radius: f32,
    accel: Vec2, // accumulated acceleration-mode forces, cleared on integrate
}

impl RigidBody2d {
    #[must_use]
    pub fn new(weight: f32, radius: f32) -> Self {
        RigidBody2d {
            velocity: Vec2::ZERO,
            weight,
            radius,
            accel: Vec2::ZERO,
        }
    }

    /// Buffer an acceleration-mode force, applied at the next integration.
    pub fn apply_force(&mut self, force: Vec2) {
        self.accel += force;
    }

    /// Apply an instantaneous velocity change.
    pub fn apply_impulse(&mut self, impulse: Vec2) {
        self.velocity += impulse;
    }

    /// Accumulated acceleration waiting for the next integration step.
    #[must_use]
    pub fn pending_accel(&self) -> Vec2 {
        self.accel
    }
}

/// Spring rig joining the rider body to its wheel. Lives on the body entity;
/// `rest_length` is retargeted every tick by the rig controller.
#[derive(Component, Debug)]
pub struct SpringRig {
    pub wheel: Entity,
    pub rest_length: f32,
}

/// Acceleration exerted on the body end of the rig.
///
/// `delta` is wheel position minus body position, `rel_vel` is wheel
/// velocity minus body velocity. The wheel end receives the negation. A
/// degenerate rig (both ends coincident) exerts nothing rather than a NaN.
///
/// # Arguments
/// * `delta` - vector from body to wheel
/// * `rel_vel` - wheel velocity relative to the body
/// * `rest_length` - current rest length of the rig
/// * `stiffness` - spring constant
/// * `damping` - damping factor along the rig axis
#[must_use]
pub fn spring_accel(
    delta: Vec2,
    rel_vel: Vec2,
    rest_length: f32,
    stiffness: f32,
    damping: f32,
) -> Vec2 {
    let dist = delta.length();
    if dist <= 1.0e-6 {
        return Vec2::ZERO;
    }
    let axis = delta / dist;
    let stretch = dist - rest_length;
    axis * (stretch * stiffness) + axis * (rel_vel.dot(axis) * damping)
}

/// Apply the spring rig forces between each body and its wheel.
#[allow(clippy::needless_pass_by_value)]
pub fn apply_rig_springs(
    settings: Res<Settings>,
    mut bodies: Query<(&Transform, &mut RigidBody2d, &SpringRig)>,
    mut wheels: Query<(&Transform, &mut RigidBody2d), Without<SpringRig>>,
) {
    for (body_tf, mut body_rb, rig) in &mut bodies {
        let Ok((wheel_tf, mut wheel_rb)) = wheels.get_mut(rig.wheel) else { continue };

        let delta = wheel_tf.translation.truncate() - body_tf.translation.truncate();
        let rel_vel = wheel_rb.velocity - body_rb.velocity;
        let accel = spring_accel(
            delta,
            rel_vel,
            rig.rest_length,
            settings.physics.rig_stiffness,
            settings.physics.rig_damping,
        );

        body_rb.apply_force(accel);
        wheel_rb.apply_force(-accel);
    }
}

/// Step the core integration for one body: consume buffered acceleration,
/// clamp fall speed, move, and resolve ground penetration by snapping onto
/// the highest reachable slab top.
///
/// Extracted helper so systems, tests and benchmarks exercise identical
/// logic.
pub fn integrate_step(tf: &mut Transform, rb: &mut RigidBody2d, level: &Level, dt: f32) {
    rb.velocity += rb.accel * dt;
    rb.accel = Vec2::ZERO;

    if rb.velocity.y < -MAX_FALL_SPEED {
        rb.velocity.y = -MAX_FALL_SPEED;
    }

    let mut pos = tf.translation.truncate() + rb.velocity * dt;

    // Ground response only opposes downward motion; upward travel through a
    // slab edge is left to the next tick's contact check.
    if rb.velocity.y <= 0.0
        && level.overlaps_circle(pos, rb.radius)
        && let Some(top) = level.top_below(Vec2::new(pos.x, pos.y + rb.radius), rb.radius)
    {
        pos.y = top + rb.radius;
        rb.velocity.y = 0.0;
    }

    tf.translation.x = pos.x;
    tf.translation.y = pos.y;
}

/// Integrate all rigid bodies against the current level (fixed timestep).
#[allow(clippy::needless_pass_by_value)]
pub fn integrate_bodies(
    time: Res<Time>,
    level: Res<Level>,
    mut q: Query<(&mut Transform, &mut RigidBody2d)>,
) {
    let dt = time.delta_seconds();
    for (mut tf, mut rb) in &mut q {
        integrate_step(&mut tf, &mut rb, &level, dt);
    }
}
