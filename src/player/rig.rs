//! The body-wheel rig: phase latch, target selection, length easing and the
//! jump release.
//!
//! The rig's rest length is the one piece of state every other behavior
//! hangs off: charging stretches it, losing wheel contact snaps it shut,
//! and the jump impulse scales with how far it still is from the charged
//! length at the moment of release.

use crate::physics::{RigidBody2d, SpringRig};
use crate::player::{GroundContacts, Player, RiderInput, RiderPhase};
use crate::settings::{RigSettings, Settings};
use bevy::prelude::*;

/// Inputs to the phase transition, gathered once per tick.
#[derive(Clone, Copy, Debug)]
pub struct PhaseInputs {
    pub charging: bool,
    pub body_on_ground: bool,
    pub wheel_on_ground: bool,
    pub wheel_was_on_ground: bool,
}

/// Advance the control phase by one tick.
///
/// `Recoiling` is entered only on the tick the wheel leaves the ground while
/// the rig is at or past its default length, and left only when the body
/// touches ground. Outside the latch the phase simply mirrors the jump
/// input.
#[must_use]
pub fn phase_step(
    phase: RiderPhase,
    rig_length: f32,
    rig: &RigSettings,
    inputs: &PhaseInputs,
) -> RiderPhase {
    if phase == RiderPhase::Recoiling {
        if !inputs.body_on_ground {
            return RiderPhase::Recoiling;
        }
    } else if inputs.wheel_was_on_ground
        && !inputs.wheel_on_ground
        && rig_length >= rig.default_length
    {
        return RiderPhase::Recoiling;
    }

    if inputs.charging {
        RiderPhase::Charging
    } else {
        RiderPhase::Grounded
    }
}

/// Target length and easing rate for the current phase. The three policies
/// are mutually exclusive by construction.
#[must_use]
pub fn rig_target_for_phase(phase: RiderPhase, rig: &RigSettings) -> (f32, f32) {
    match phase {
        RiderPhase::Recoiling => (0.0, rig.recoil_rate),
        RiderPhase::Charging => (rig.charged_length, rig.charge_rate),
        RiderPhase::Grounded => (rig.default_length, rig.return_rate),
    }
}

/// Ease the rig length toward its target, bounded by `rate * dt` and clamped
/// into `[0, charged_length]`.
#[must_use]
pub fn rig_step(rig_length: f32, target: f32, rate: f32, rig: &RigSettings, dt: f32) -> f32 {
    super::movement::move_toward(rig_length, target, rate * dt).clamp(0.0, rig.charged_length)
}

/// Upward impulse for a jump released this tick. Zero when the wheel is
/// airborne; otherwise strictly increasing in the remaining compression
/// `charged_length - rig_length`.
#[must_use]
pub fn jump_impulse(wheel_on_ground: bool, rig_length: f32, rig: &RigSettings) -> f32 {
    if !wheel_on_ground {
        return 0.0;
    }
    (rig.charged_length - rig_length).max(0.0) * rig.jump_force
}

/// Advance the phase latch from this tick's contacts and input.
#[allow(clippy::needless_pass_by_value)]
pub fn phase_latch(
    settings: Res<Settings>,
    input: Res<RiderInput>,
    contacts: Res<GroundContacts>,
    mut q: Query<&mut Player>,
) {
    let Ok(mut player) = q.get_single_mut() else { return };
    let inputs = PhaseInputs {
        charging: input.charging_jump,
        body_on_ground: contacts.body_on_ground,
        wheel_on_ground: contacts.wheel_on_ground,
        wheel_was_on_ground: contacts.wheel_was_on_ground,
    };
    player.phase = phase_step(player.phase, player.rig_length, &settings.rig, &inputs);
}

/// Pick the rig target and rate for the phase chosen this tick.
#[allow(clippy::needless_pass_by_value)]
pub fn select_rig_target(settings: Res<Settings>, mut q: Query<&mut Player>) {
    let Ok(mut player) = q.get_single_mut() else { return };
    let (target, rate) = rig_target_for_phase(player.phase, &settings.rig);
    player.rig_target = target;
    player.rig_rate = rate;
}

/// Ease the rig length on the fixed timestep and push the result into the
/// spring constraint's rest length.
#[allow(clippy::needless_pass_by_value)]
pub fn ease_rig_length(
    time: Res<Time>,
    settings: Res<Settings>,
    mut q: Query<(&mut Player, &mut SpringRig)>,
) {
    let Ok((mut player, mut spring)) = q.get_single_mut() else { return };
    player.rig_length = rig_step(
        player.rig_length,
        player.rig_target,
        player.rig_rate,
        &settings.rig,
        time.delta_seconds(),
    );
    spring.rest_length = player.rig_length;
}

/// Fire the jump on the release edge of the jump input. The release always
/// consumes the charge; the grounded gate only decides whether an impulse is
/// emitted.
#[allow(clippy::needless_pass_by_value)]
pub fn release_jump(
    settings: Res<Settings>,
    mut input: ResMut<RiderInput>,
    contacts: Res<GroundContacts>,
    mut q: Query<(&Player, &mut RigidBody2d)>,
) {
    if !input.take_jump_release() {
        return;
    }

    let Ok((player, mut rb)) = q.get_single_mut() else { return };
    let impulse = jump_impulse(contacts.wheel_on_ground, player.rig_length, &settings.rig);
    if impulse > 0.0 {
        rb.apply_impulse(Vec2::Y * impulse);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rig() -> RigSettings {
        RigSettings {
            default_length: 1.0,
            charged_length: 1.6,
            charge_rate: 0.8,
            return_rate: 6.0,
            recoil_rate: 10.0,
            jump_force: 9.0,
        }
    }

    fn grounded_inputs() -> PhaseInputs {
        PhaseInputs {
            charging: false,
            body_on_ground: true,
            wheel_on_ground: true,
            wheel_was_on_ground: true,
        }
    }

    #[test]
    fn recoil_needs_wheel_liftoff_with_rig_at_length() {
        let rig = rig();
        let liftoff = PhaseInputs {
            charging: false,
            body_on_ground: false,
            wheel_on_ground: false,
            wheel_was_on_ground: true,
        };

        // rig at default length: liftoff latches recoil
        assert_eq!(phase_step(RiderPhase::Grounded, 1.0, &rig, &liftoff), RiderPhase::Recoiling);
        // rig compressed below default: no recoil
        assert_eq!(phase_step(RiderPhase::Grounded, 0.4, &rig, &liftoff), RiderPhase::Grounded);

        // already airborne (no liftoff edge): growing past default must not latch
        let airborne = PhaseInputs { wheel_was_on_ground: false, ..liftoff };
        assert_eq!(phase_step(RiderPhase::Grounded, 1.2, &rig, &airborne), RiderPhase::Grounded);
    }

    #[test]
    fn recoil_holds_until_body_touches_down() {
        let rig = rig();
        let airborne = PhaseInputs {
            charging: true, // input is ignored while latched
            body_on_ground: false,
            wheel_on_ground: false,
            wheel_was_on_ground: false,
        };
        assert_eq!(phase_step(RiderPhase::Recoiling, 0.2, &rig, &airborne), RiderPhase::Recoiling);

        let touched_down = PhaseInputs { body_on_ground: true, charging: false, ..airborne };
        assert_eq!(phase_step(RiderPhase::Recoiling, 0.2, &rig, &touched_down), RiderPhase::Grounded);
    }

    #[test]
    fn charging_mirrors_held_input_outside_the_latch() {
        let rig = rig();
        let held = PhaseInputs { charging: true, ..grounded_inputs() };
        assert_eq!(phase_step(RiderPhase::Grounded, 1.0, &rig, &held), RiderPhase::Charging);
        assert_eq!(phase_step(RiderPhase::Charging, 1.0, &rig, &grounded_inputs()), RiderPhase::Grounded);
    }

    #[test]
    fn rig_targets_are_mutually_exclusive_per_phase() {
        let rig = rig();
        assert_eq!(rig_target_for_phase(RiderPhase::Recoiling, &rig), (0.0, rig.recoil_rate));
        assert_eq!(rig_target_for_phase(RiderPhase::Charging, &rig), (rig.charged_length, rig.charge_rate));
        assert_eq!(rig_target_for_phase(RiderPhase::Grounded, &rig), (rig.default_length, rig.return_rate));
    }

    #[test]
    fn rig_length_stays_in_bounds_across_arbitrary_ticks() {
        let rig = rig();
        let mut len = rig.default_length;
        // deterministic LCG to mix phases and dts
        let mut state: u32 = 0x1234_5678;
        for _ in 0..10_000 {
            state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            let phase = match state % 3 {
                0 => RiderPhase::Grounded,
                1 => RiderPhase::Charging,
                _ => RiderPhase::Recoiling,
            };
            let dt = ((state >> 8) % 100) as f32 / 1000.0;
            let (target, rate) = rig_target_for_phase(phase, &rig);
            len = rig_step(len, target, rate, &rig, dt);
            assert!((0.0..=rig.charged_length).contains(&len));
        }
    }

    #[test]
    fn rig_easing_never_overshoots_target() {
        let rig = rig();
        let mut len = 0.0;
        for _ in 0..200 {
            len = rig_step(len, rig.charged_length, rig.charge_rate, &rig, 1.0 / 60.0);
            assert!(len <= rig.charged_length);
        }
        assert!((len - rig.charged_length).abs() < 1.0e-4);
    }

    #[test]
    fn jump_impulse_gated_on_wheel_contact() {
        let rig = rig();
        assert_eq!(jump_impulse(false, 0.2, &rig), 0.0);
        assert!(jump_impulse(true, 0.2, &rig) > 0.0);
    }

    #[test]
    fn jump_impulse_grows_with_remaining_compression() {
        let rig = rig();
        let mut last = 0.0;
        // shorter rig = more remaining compression = strictly bigger jump
        for len in [1.6, 1.2, 0.8, 0.4, 0.0] {
            let imp = jump_impulse(true, len, &rig);
            assert!(imp >= last);
            if len < rig.charged_length {
                assert!(imp > last);
            }
            last = imp;
        }
    }
}
