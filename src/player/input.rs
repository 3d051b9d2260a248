//! Input buffering.
//!
//! Bevy delivers key state whenever the host pleases; the controller only
//! ever reads the `RiderInput` resource this system fills in at the top of
//! the visual phase. The jump release edge is recorded as a one-shot flag
//! that `release_jump` consumes, so a jump fires exactly once per release.

use crate::player::RiderInput;
use crate::settings::Settings;
use bevy::prelude::*;

/// Translate keybound keyboard state into the buffered `RiderInput` fields.
#[allow(clippy::needless_pass_by_value)]
pub fn buffer_input(
    kb: Res<ButtonInput<KeyCode>>,
    settings: Res<Settings>,
    mut input: ResMut<RiderInput>,
) {
    let left = settings.keybind("left", KeyCode::KeyA);
    let right = settings.keybind("right", KeyCode::KeyD);
    let aim_up = settings.keybind("aim_up", KeyCode::KeyW);
    let aim_down = settings.keybind("aim_down", KeyCode::KeyS);
    let jump = settings.keybind("jump", KeyCode::Space);

    let mut mv = Vec2::ZERO;
    if kb.pressed(left) {
        mv.x -= 1.0;
    }
    if kb.pressed(right) {
        mv.x += 1.0;
    }
    if kb.pressed(aim_up) {
        mv.y += 1.0;
    }
    if kb.pressed(aim_down) {
        mv.y -= 1.0;
    }
    input.move_input = mv;

    input.record_jump(kb.pressed(jump), kb.just_released(jump));
}
