use bevy::diagnostic::{FrameTimeDiagnosticsPlugin, LogDiagnosticsPlugin};
use bevy::prelude::*;
use bevy::window::{PresentMode, Window, WindowPlugin};
use hookwheel::debug::DebugDumpPlugin;
use hookwheel::level::loader as level_loader;
use hookwheel::physics::{apply_rig_springs, integrate_bodies};
use hookwheel::player::{
    GroundContacts, RiderInput, aim_hook, apply_gravity, buffer_input, drive_wheel,
    ease_rig_length, ground_check, phase_latch, release_jump, select_rig_target,
    sync_body_tuning, tilt_chassis,
};
use hookwheel::settings::loader as settings_loader;
use hookwheel::ui::{
    setup_debug_overlay, spawn_debug_overlay, toggle_debug_overlay, update_debug_overlay,
};

mod app;
use app::{setup, sync_level_sprites, sync_vsync_settings};

/// Fixed physics tick rate, Hz.
pub const FIXED_TICK_RATE: f64 = 50.0;

fn main() {
    let settings = settings_loader::load_settings_from_dir("data/settings");
    let settings_watcher = settings_loader::setup_settings_watcher("data/settings")
        .unwrap_or_else(|_| settings_loader::SettingsWatcher::stub());
    let level = level_loader::load_level_from_dir("data/levels");
    let level_watcher = level_loader::setup_level_watcher("data/levels")
        .unwrap_or_else(|_| level_loader::LevelWatcher::stub());

    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "hookwheel".to_string(),
                position: WindowPosition::Centered(MonitorSelection::Primary),
                present_mode: if settings.graphics.vsync {
                    PresentMode::Fifo
                } else {
                    PresentMode::AutoNoVsync
                },
                ..default()
            }),
            ..default()
        }))
        .add_plugins(FrameTimeDiagnosticsPlugin)
        .add_plugins(LogDiagnosticsPlugin::default())
        .add_plugins(DebugDumpPlugin);

    app.insert_resource(Time::<Fixed>::from_hz(FIXED_TICK_RATE));
    app.insert_resource(RiderInput::default());
    app.insert_resource(GroundContacts::default());
    app.insert_resource(level);
    app.insert_resource(level_watcher);
    app.insert_resource(settings.clone());
    app.insert_resource(settings_watcher);

    app.add_systems(Startup, setup_debug_overlay);
    app.add_systems(Startup, spawn_debug_overlay);
    app.add_systems(Startup, setup);

    // Visual phase: buffered input first, contacts next, then everything
    // that consumes them, in a fixed order.
    app.add_systems(
        Update,
        (
            buffer_input,
            ground_check,
            phase_latch,
            select_rig_target,
            release_jump,
            aim_hook,
            tilt_chassis,
        )
            .chain(),
    );
    app.add_systems(Update, settings_loader::check_settings_changes);
    app.add_systems(Update, level_loader::check_level_changes);
    app.add_systems(Update, sync_level_sprites);
    app.add_systems(Update, sync_vsync_settings);
    app.add_systems(Update, sync_body_tuning);
    app.add_systems(Update, toggle_debug_overlay);
    app.add_systems(Update, update_debug_overlay);

    // Fixed physics phase: motion, rig easing, spring forces, integration.
    app.add_systems(
        FixedUpdate,
        (drive_wheel, ease_rig_length, apply_rig_springs, integrate_bodies).chain(),
    );

    // Late phase: gravity buffered after this frame's physics step, consumed
    // by the next one.
    app.add_systems(PostUpdate, apply_gravity);

    app.run();
}
