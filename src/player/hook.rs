//! Hook aim reticle.
//!
//! The move vector doubles as an aim input: whenever it is non-zero the aim
//! angle becomes the input direction snapped to the nearest 45 degree
//! increment, and the reticle child is swung around the rider to match.
//! Zero input keeps the reticle where it last pointed.

use crate::player::{Player, Reticle, RiderInput};
use crate::settings::Settings;
use bevy::prelude::*;

/// Distance of the reticle from the rider body center, world units.
pub const RETICLE_DISTANCE: f32 = 1.4;

/// Aim angle (radians) for a non-zero input vector, snapped to the nearest
/// 45 degree increment. Midpoints round away from zero (`f32::round`).
#[must_use]
pub fn snap_aim_angle(input: Vec2) -> f32 {
    let step = 45.0_f32.to_radians();
    let angle = input.y.atan2(input.x);
    (angle / step).round() * step
}

/// Aim angle after one tick of input: a non-zero vector re-aims (snapped to
/// the grid), zero input holds the previous angle.
#[must_use]
pub fn next_aim(current: f32, input: Vec2) -> f32 {
    if input == Vec2::ZERO {
        current
    } else {
        snap_aim_angle(input)
    }
}

/// Update the aim angle from the buffered input and swing the reticle.
///
/// The reticle is a child of the tilting body root, so its local angle is
/// the aim angle minus the current tilt; in world space it stays on the
/// 45 degree grid no matter how far the chassis leans.
#[allow(clippy::needless_pass_by_value)]
pub fn aim_hook(
    settings: Res<Settings>,
    input: Res<RiderInput>,
    mut player_q: Query<&mut Player>,
    mut reticle_q: Query<&mut Transform, With<Reticle>>,
) {
    let Ok(mut player) = player_q.get_single_mut() else { return };

    player.aim_angle = next_aim(player.aim_angle, input.move_input);

    let tilt = (settings.movement.max_tilt * -player.current_speed).to_radians();
    let local_angle = player.aim_angle - tilt;
    for mut tf in &mut reticle_q {
        let dir = Vec2::from_angle(local_angle);
        tf.translation.x = dir.x * RETICLE_DISTANCE;
        tf.translation.y = dir.y * RETICLE_DISTANCE;
        tf.rotation = Quat::from_rotation_z(local_angle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_4;

    fn assert_close(a: f32, b: f32) {
        assert!((a - b).abs() < 1.0e-5, "{a} != {b}");
    }

    #[test]
    fn cardinal_and_diagonal_inputs_map_exactly() {
        assert_close(snap_aim_angle(Vec2::new(1.0, 0.0)), 0.0);
        assert_close(snap_aim_angle(Vec2::new(1.0, 1.0)), FRAC_PI_4);
        assert_close(snap_aim_angle(Vec2::new(0.0, 1.0)), 2.0 * FRAC_PI_4);
        assert_close(snap_aim_angle(Vec2::new(-1.0, 0.0)), 4.0 * FRAC_PI_4);
        assert_close(snap_aim_angle(Vec2::new(0.0, -1.0)), -2.0 * FRAC_PI_4);
    }

    #[test]
    fn any_nonzero_input_snaps_to_a_45_degree_multiple() {
        // deterministic LCG sweep over arbitrary directions
        let mut state: u32 = 0xDEAD_BEEF;
        for _ in 0..1_000 {
            state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            let x = ((state >> 16) & 0x7FFF) as f32 / 16384.0 - 1.0;
            state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            let y = ((state >> 16) & 0x7FFF) as f32 / 16384.0 - 1.0;
            let v = Vec2::new(x, y);
            if v == Vec2::ZERO {
                continue;
            }
            let snapped = snap_aim_angle(v);
            let steps = snapped / FRAC_PI_4;
            assert!((steps - steps.round()).abs() < 1.0e-4, "angle {snapped} not on grid");
        }
    }

    #[test]
    fn nearly_diagonal_input_rounds_to_diagonal() {
        assert_close(snap_aim_angle(Vec2::new(1.0, 0.9)), FRAC_PI_4);
        assert_close(snap_aim_angle(Vec2::new(1.0, 0.3)), 0.0);
    }

    #[test]
    fn zero_input_holds_the_previous_angle() {
        let aimed = next_aim(0.0, Vec2::new(0.0, 1.0));
        assert_close(aimed, 2.0 * FRAC_PI_4);

        // letting go of the stick keeps the reticle where it pointed
        let held = next_aim(aimed, Vec2::ZERO);
        assert_close(held, aimed);
        // and it stays held across any number of idle ticks
        let held = next_aim(held, Vec2::ZERO);
        assert_close(held, aimed);

        // a new non-zero input re-aims
        assert_close(next_aim(held, Vec2::new(1.0, 0.0)), 0.0);
    }
}
