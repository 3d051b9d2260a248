//! Rider physics glue: ground contact checks and gravity.
//!
//! Ground contact is recomputed from the level once per tick, before any
//! consumer runs, by overlapping a slightly grown circle (`radius + margin`)
//! against the ground slabs. Gravity is applied in the late phase as an
//! acceleration-mode force scaled by each body's own weight constant, so the
//! body and wheel can fall at different effective rates.

use crate::level::Level;
use crate::physics::RigidBody2d;
use crate::player::{GroundContacts, Player, Wheel};
use crate::settings::Settings;
use bevy::prelude::*;

/// Whether a body is in ground contact this tick.
///
/// Extracted helper so systems and tests exercise identical logic.
#[must_use]
pub fn contact_check(level: &Level, position: Vec2, radius: f32, margin: f32) -> bool {
    level.overlaps_circle(position, radius + margin)
}

/// Recompute both ground-contact booleans from the current level geometry.
/// Runs first in the visual phase; everything downstream sees this tick's
/// contacts, never last tick's.
#[allow(clippy::needless_pass_by_value)]
pub fn ground_check(
    level: Res<Level>,
    settings: Res<Settings>,
    mut contacts: ResMut<GroundContacts>,
    body_q: Query<(&Transform, &RigidBody2d), With<Player>>,
    wheel_q: Query<(&Transform, &RigidBody2d), With<Wheel>>,
) {
    contacts.wheel_was_on_ground = contacts.wheel_on_ground;

    let margin = settings.physics.ground_margin;
    contacts.body_on_ground = body_q
        .get_single()
        .map(|(tf, rb)| contact_check(&level, tf.translation.truncate(), rb.radius, margin))
        .unwrap_or(false);
    contacts.wheel_on_ground = wheel_q
        .get_single()
        .map(|(tf, rb)| contact_check(&level, tf.translation.truncate(), rb.radius, margin))
        .unwrap_or(false);
}

/// Apply per-body gravity as an acceleration-mode force (late phase, after
/// the fixed physics step has consumed the previous frame's forces).
pub fn apply_gravity(mut q: Query<&mut RigidBody2d>) {
    for mut rb in &mut q {
        let weight = rb.weight;
        rb.apply_force(Vec2::NEG_Y * weight);
    }
}

/// Keep body weights and radii in line with the settings resource so weight
/// tuning hot-reloads like everything else.
#[allow(clippy::needless_pass_by_value)]
pub fn sync_body_tuning(
    settings: Res<Settings>,
    mut body_q: Query<&mut RigidBody2d, With<Player>>,
    mut wheel_q: Query<&mut RigidBody2d, (With<Wheel>, Without<Player>)>,
) {
    if !settings.is_changed() {
        return;
    }
    for mut rb in &mut body_q {
        rb.weight = settings.physics.body_weight;
        rb.radius = settings.physics.body_radius;
    }
    for mut rb in &mut wheel_q {
        rb.weight = settings.physics.wheel_weight;
        rb.radius = settings.physics.wheel_radius;
    }
}
