//! Debug utilities: a system (F3 default) to dump the controller state,
//! rigid bodies, level geometry summary and active tuning to a timestamped
//! text file in `./debug-dumps/`.
//!
//! Useful for capturing a snapshot of a misbehaving jump or recoil without
//! attaching a debugger.

use crate::level::Level;
use crate::physics::{RigidBody2d, SpringRig};
use crate::player::{GroundContacts, Player, Wheel};
use crate::settings::Settings;
use bevy::prelude::*;
use chrono::Utc;
use std::fmt::Write as _;
use std::fs;

pub struct DebugDumpPlugin;

impl Plugin for DebugDumpPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, debug_dump_system);
    }
}

/// Render the current simulation state as the dump file body.
fn dump_text(
    player: Option<(&Transform, &Player, &RigidBody2d, &SpringRig)>,
    wheel: Option<(&Transform, &RigidBody2d)>,
    contacts: &GroundContacts,
    level: &Level,
    settings: &Settings,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "hookwheel debug dump @ {}", Utc::now().to_rfc3339());
    let _ = writeln!(out);

    match player {
        Some((tf, p, rb, rig)) => {
            let _ = writeln!(out, "[player]");
            let _ = writeln!(out, "  pos: ({:.3}, {:.3})", tf.translation.x, tf.translation.y);
            let _ = writeln!(out, "  speed: {:.3}", p.current_speed);
            let _ = writeln!(
                out,
                "  rig: len={:.3} target={:.3} rate={:.2} rest={:.3}",
                p.rig_length, p.rig_target, p.rig_rate, rig.rest_length
            );
            let _ = writeln!(out, "  aim: {:.1} deg", p.aim_angle.to_degrees());
            let _ = writeln!(out, "  phase: {:?}", p.phase);
            let _ = writeln!(out, "  body velocity: {:?} weight: {}", rb.velocity, rb.weight);
        }
        None => {
            let _ = writeln!(out, "[player] <not spawned>");
        }
    }

    match wheel {
        Some((tf, rb)) => {
            let _ = writeln!(out, "[wheel]");
            let _ = writeln!(out, "  pos: ({:.3}, {:.3})", tf.translation.x, tf.translation.y);
            let _ = writeln!(out, "  velocity: {:?} weight: {}", rb.velocity, rb.weight);
        }
        None => {
            let _ = writeln!(out, "[wheel] <not spawned>");
        }
    }

    let _ = writeln!(
        out,
        "[contacts] body={} wheel={} wheel_was={}",
        contacts.body_on_ground, contacts.wheel_on_ground, contacts.wheel_was_on_ground
    );
    let _ = writeln!(out, "[level] '{}' slabs={}", level.name, level.slabs.len());
    let _ = writeln!(out, "[settings]");
    let _ = writeln!(out, "  {:?}", settings.physics);
    let _ = writeln!(out, "  {:?}", settings.movement);
    let _ = writeln!(out, "  {:?}", settings.rig);
    out
}

/// Listen for the dump key (F3 default) and write the snapshot file.
#[allow(clippy::needless_pass_by_value)]
pub fn debug_dump_system(
    keys: Res<ButtonInput<KeyCode>>,
    settings: Res<Settings>,
    contacts: Res<GroundContacts>,
    level: Res<Level>,
    player_q: Query<(&Transform, &Player, &RigidBody2d, &SpringRig)>,
    wheel_q: Query<(&Transform, &RigidBody2d), With<Wheel>>,
) {
    let key = settings.keybind("dump_debug", KeyCode::F3);
    if !keys.just_pressed(key) {
        return;
    }

    let text = dump_text(
        player_q.get_single().ok(),
        wheel_q.get_single().ok(),
        &contacts,
        &level,
        &settings,
    );

    let dir = "debug-dumps";
    if let Err(e) = fs::create_dir_all(dir) {
        eprintln!("Failed to create {dir}: {e}");
        return;
    }
    let path = format!("{dir}/dump-{}.txt", Utc::now().format("%Y%m%d-%H%M%S"));
    match fs::write(&path, text) {
        Ok(()) => println!("Wrote debug dump to {path}"),
        Err(e) => eprintln!("Failed to write {path}: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dump_text_handles_missing_entities() {
        let contacts = GroundContacts::default();
        let level = Level::default();
        let settings = Settings::defaults();
        let text = dump_text(None, None, &contacts, &level, &settings);
        assert!(text.contains("[player] <not spawned>"));
        assert!(text.contains("[wheel] <not spawned>"));
        assert!(text.contains("slabs=1"));
    }
}
