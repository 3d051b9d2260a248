//! Horizontal movement and chassis tilt.
//!
//! Speed eases toward `max_speed * input.x` while the wheel has traction and
//! the resulting speed is applied to the horizontal position every fixed
//! tick whether or not anything is touching the ground. Tilt leans the rider
//! root against its speed while the chassis mesh child is counter-rotated to
//! stay level.

use crate::physics::SpringRig;
use crate::player::{ChassisMesh, GroundContacts, Player, RiderInput, Wheel};
use crate::settings::Settings;
use bevy::prelude::*;

/// Divisor turning raw speed into a per-tick position delta.
pub const SPEED_TO_POSITION: f32 = 10.0;

/// Move `current` toward `target` by at most `max_delta`, never overshooting.
#[must_use]
pub fn move_toward(current: f32, target: f32, max_delta: f32) -> f32 {
    let diff = target - current;
    if diff.abs() <= max_delta {
        target
    } else {
        current + max_delta.copysign(diff)
    }
}

/// Step the rider's horizontal speed for one tick.
///
/// Speed only changes while the wheel is grounded; airborne ticks keep the
/// speed the rider carried into the air.
///
/// # Arguments
/// * `current_speed` - speed carried from the previous tick
/// * `input_x` - horizontal input in `[-1, 1]`
/// * `wheel_on_ground` - wheel traction this tick
/// * `movement` - tuning (max speed, acceleration)
/// * `dt` - elapsed fixed timestep
#[must_use]
pub fn movement_step(
    current_speed: f32,
    input_x: f32,
    wheel_on_ground: bool,
    movement: &crate::settings::MovementSettings,
    dt: f32,
) -> f32 {
    if !wheel_on_ground {
        return current_speed;
    }
    move_toward(
        current_speed,
        movement.max_speed * input_x,
        movement.acceleration * dt,
    )
}

/// Ease the rider's speed and apply it to the horizontal position of the
/// whole vehicle (body and wheel) each fixed tick.
#[allow(clippy::needless_pass_by_value)]
pub fn drive_wheel(
    time: Res<Time>,
    settings: Res<Settings>,
    input: Res<RiderInput>,
    contacts: Res<GroundContacts>,
    mut body_q: Query<(&mut Transform, &mut Player), With<SpringRig>>,
    mut wheel_q: Query<&mut Transform, (With<Wheel>, Without<Player>)>,
) {
    let Ok((mut body_tf, mut player)) = body_q.get_single_mut() else { return };

    player.current_speed = movement_step(
        player.current_speed,
        input.move_input.x,
        contacts.wheel_on_ground,
        &settings.movement,
        time.delta_seconds(),
    );

    // Position is driven every tick regardless of contact.
    let dx = player.current_speed / SPEED_TO_POSITION;
    body_tf.translation.x += dx;
    for mut wheel_tf in &mut wheel_q {
        wheel_tf.translation.x += dx;
    }
}

/// Lean the rider against its speed; keep the chassis mesh level.
#[allow(clippy::needless_pass_by_value)]
pub fn tilt_chassis(
    settings: Res<Settings>,
    mut body_q: Query<(&mut Transform, &Player), Without<ChassisMesh>>,
    mut mesh_q: Query<&mut Transform, With<ChassisMesh>>,
) {
    let Ok((mut body_tf, player)) = body_q.get_single_mut() else { return };

    let tilt = (settings.movement.max_tilt * -player.current_speed).to_radians();
    body_tf.rotation = Quat::from_rotation_z(tilt);

    // Counter-rotate the mesh child so it stays level in world space.
    for mut mesh_tf in &mut mesh_q {
        mesh_tf.rotation = Quat::from_rotation_z(-tilt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::MovementSettings;

    #[test]
    fn speed_reaches_max_without_overshoot() {
        let movement = MovementSettings { max_speed: 5.0, acceleration: 1.0, max_tilt: 4.0 };
        let mut speed = 0.0;
        // unit dt: one acceleration-step per tick, target reached in ceil(5/1)
        for tick in 1..=5 {
            speed = movement_step(speed, 1.0, true, &movement, 1.0);
            assert!(speed <= 5.0, "overshot at tick {tick}");
        }
        assert_eq!(speed, 5.0);
        // holds once reached
        speed = movement_step(speed, 1.0, true, &movement, 1.0);
        assert_eq!(speed, 5.0);
    }

    #[test]
    fn speed_approach_is_monotonic_for_any_input() {
        let movement = MovementSettings { max_speed: 5.0, acceleration: 0.7, max_tilt: 4.0 };
        for &x in &[-1.0f32, -0.25, 0.0, 0.6, 1.0] {
            let target = movement.max_speed * x;
            let mut speed = 2.5f32;
            let mut last_gap = (target - speed).abs();
            for _ in 0..64 {
                speed = movement_step(speed, x, true, &movement, 1.0);
                let gap = (target - speed).abs();
                assert!(gap <= last_gap, "diverged for input {x}");
                last_gap = gap;
            }
            assert!((speed - target).abs() < 1.0e-4);
        }
    }

    #[test]
    fn airborne_ticks_keep_carried_speed() {
        let movement = MovementSettings::default();
        let speed = movement_step(3.0, -1.0, false, &movement, 1.0);
        assert_eq!(speed, 3.0);
    }

    #[test]
    fn move_toward_is_exact_at_the_boundary() {
        assert_eq!(move_toward(4.0, 5.0, 1.0), 5.0);
        assert_eq!(move_toward(4.0, 5.0, 0.25), 4.25);
        assert_eq!(move_toward(-4.0, -5.0, 0.25), -4.25);
        assert_eq!(move_toward(5.0, 5.0, 0.1), 5.0);
    }
}
