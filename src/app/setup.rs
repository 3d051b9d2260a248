//! Setup systems for the scene: camera, ground slab sprites and the rider
//! rig (body root with chassis mesh and reticle children, plus the wheel).
//!
//! These run at `Startup`; `sync_level_sprites` also re-runs whenever the
//! `Level` resource is replaced by a hot reload so the visible ground always
//! matches the geometry the contact checks use.
use bevy::prelude::*;
use hookwheel::level::Level;
use hookwheel::physics::{RigidBody2d, SpringRig};
use hookwheel::player::{ChassisMesh, Player, Reticle, Wheel, hook::RETICLE_DISTANCE};
use hookwheel::settings::Settings;

/// Where the rider starts, a little above the default floor.
const SPAWN_POINT: Vec2 = Vec2::new(0.0, 3.0);

/// Marker for spawned ground slab sprites.
#[derive(Component)]
pub struct SlabSprite;

/// Spawn the camera and the rider rig.
///
/// The body root carries no sprite of its own: it is the entity the tilt
/// system rotates, with the chassis mesh and the reticle as children. The
/// wheel is an independent body linked back through the `SpringRig`.
#[allow(clippy::needless_pass_by_value)]
pub fn setup(mut commands: Commands, settings: Res<Settings>) {
    let mut camera = Camera2dBundle::default();
    camera.projection.scale = 1.0 / settings.graphics.pixels_per_unit;
    commands.spawn(camera);

    let wheel = commands
        .spawn((
            SpriteBundle {
                sprite: Sprite {
                    color: Color::srgb(0.15, 0.15, 0.2),
                    custom_size: Some(Vec2::splat(settings.physics.wheel_radius * 2.0)),
                    ..default()
                },
                transform: Transform::from_xyz(
                    SPAWN_POINT.x,
                    SPAWN_POINT.y - settings.rig.default_length,
                    0.0,
                ),
                ..default()
            },
            RigidBody2d::new(settings.physics.wheel_weight, settings.physics.wheel_radius),
            Wheel,
        ))
        .id();

    commands
        .spawn((
            SpatialBundle::from_transform(Transform::from_xyz(SPAWN_POINT.x, SPAWN_POINT.y, 0.0)),
            Player::from_settings(&settings),
            RigidBody2d::new(settings.physics.body_weight, settings.physics.body_radius),
            SpringRig { wheel, rest_length: settings.rig.default_length },
        ))
        .with_children(|parent| {
            parent.spawn((
                SpriteBundle {
                    sprite: Sprite {
                        color: Color::srgb(0.8, 0.4, 0.2),
                        custom_size: Some(Vec2::new(
                            settings.physics.body_radius * 2.0,
                            settings.physics.body_radius * 1.6,
                        )),
                        ..default()
                    },
                    ..default()
                },
                ChassisMesh,
            ));
            parent.spawn((
                SpriteBundle {
                    sprite: Sprite {
                        color: Color::srgb(0.9, 0.9, 0.3),
                        custom_size: Some(Vec2::new(0.3, 0.1)),
                        ..default()
                    },
                    transform: Transform::from_xyz(RETICLE_DISTANCE, 0.0, 0.1),
                    ..default()
                },
                Reticle,
            ));
        });
}

/// (Re)spawn one sprite per ground slab. Runs at startup and again whenever
/// the `Level` resource changes.
#[allow(clippy::needless_pass_by_value)]
pub fn sync_level_sprites(
    mut commands: Commands,
    level: Res<Level>,
    existing: Query<Entity, With<SlabSprite>>,
) {
    if !level.is_changed() {
        return;
    }

    for entity in &existing {
        commands.entity(entity).despawn();
    }

    for slab in &level.slabs {
        commands.spawn((
            SpriteBundle {
                sprite: Sprite {
                    color: Color::srgb(0.3, 0.5, 0.3),
                    custom_size: Some(Vec2::new(slab.half_width * 2.0, slab.half_height * 2.0)),
                    ..default()
                },
                transform: Transform::from_xyz(slab.x, slab.y, -0.1),
                ..default()
            },
            SlabSprite,
        ));
    }
}
