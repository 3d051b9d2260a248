//! User interface helpers: debug overlay.
//!
//! A toggleable text overlay showing FPS, the rider's speed, rig state,
//! control phase and ground contacts. Refreshes on a short repeating timer
//! rather than every frame.

use crate::player::{GroundContacts, Player, RiderPhase};
use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;

/// State for the debug overlay visibility.
#[derive(Resource, Default)]
pub struct DebugOverlayState {
    /// Whether the overlay is currently visible.
    pub visible: bool,
}

#[derive(Resource, Default)]
pub struct DebugOverlayTimer(pub Timer);

/// Marker for the overlay text entity.
#[derive(Component)]
pub struct DebugOverlayText;

/// Insert debug overlay resources.
pub fn setup_debug_overlay(mut commands: Commands) {
    commands.insert_resource(DebugOverlayTimer(Timer::from_seconds(
        0.25,
        TimerMode::Repeating,
    )));
    commands.insert_resource(DebugOverlayState::default());
}

/// Spawn the overlay text node (hidden until toggled on).
pub fn spawn_debug_overlay(mut commands: Commands) {
    commands.spawn((
        TextBundle::from_section(
            "",
            TextStyle {
                font_size: 16.0,
                color: Color::WHITE,
                ..default()
            },
        )
        .with_style(Style {
            position_type: PositionType::Absolute,
            left: Val::Px(8.0),
            top: Val::Px(8.0),
            ..default()
        }),
        DebugOverlayText,
    ));
}

/// Toggle the debug overlay visibility on the bound key (F1 by default).
#[allow(clippy::needless_pass_by_value)]
pub fn toggle_debug_overlay(
    mut state: ResMut<DebugOverlayState>,
    input: Res<ButtonInput<KeyCode>>,
    settings: Res<crate::settings::Settings>,
) {
    let key = settings.keybind("toggle_overlay", KeyCode::F1);
    if input.just_pressed(key) {
        state.visible = !state.visible;
    }
}

fn phase_label(phase: RiderPhase) -> &'static str {
    match phase {
        RiderPhase::Grounded => "grounded",
        RiderPhase::Charging => "charging",
        RiderPhase::Recoiling => "recoiling",
    }
}

/// Update the overlay text once every interval.
///
/// # Arguments
/// * `diagnostics` - diagnostics store (frame time / FPS)
/// * `state` - overlay visibility state
/// * `contacts` - ground contact booleans for this tick
/// * `time` / `timer` - refresh interval bookkeeping
/// * `text_q` - the overlay text entity
/// * `player_q` - rider state to display
#[allow(clippy::needless_pass_by_value)]
pub fn update_debug_overlay(
    diagnostics: Res<DiagnosticsStore>,
    state: Res<DebugOverlayState>,
    contacts: Res<GroundContacts>,
    time: Res<Time>,
    mut timer: ResMut<DebugOverlayTimer>,
    mut text_q: Query<(&mut Text, &mut Visibility), With<DebugOverlayText>>,
    player_q: Query<(&Transform, &Player)>,
) {
    let Ok((mut text, mut visibility)) = text_q.get_single_mut() else { return };

    if !state.visible {
        *visibility = Visibility::Hidden;
        return;
    }
    *visibility = Visibility::Visible;

    if !timer.0.tick(time.delta()).just_finished() {
        return;
    }

    let fps = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(bevy::diagnostic::Diagnostic::smoothed)
        .unwrap_or(0.0);

    let Ok((tf, player)) = player_q.get_single() else { return };

    text.sections[0].value = format!(
        "fps: {fps:.0}\n\
         pos: ({:.2}, {:.2})\n\
         speed: {:.2}\n\
         rig: {:.2} -> {:.2} @ {:.1}/s\n\
         aim: {:.0} deg\n\
         phase: {}\n\
         contact: body={} wheel={}",
        tf.translation.x,
        tf.translation.y,
        player.current_speed,
        player.rig_length,
        player.rig_target,
        player.rig_rate,
        player.aim_angle.to_degrees(),
        phase_label(player.phase),
        contacts.body_on_ground,
        contacts.wheel_on_ground,
    );
}
