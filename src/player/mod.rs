//! Rider components and systems (movement, rig, hook aim, physics glue).
//!
//! The module provides the `Player` component holding the controller state
//! and convenience re-exports for the rider-related systems.
//!
//! # Example:
//!
//! ```ignore
//! // spawn the rider body with its controller state
//! commands.spawn((
//!     SpriteBundle::default(),
//!     Player::from_settings(&settings),
//!     RigidBody2d::new(settings.physics.body_weight, settings.physics.body_radius),
//! ));
//! // register systems
//! app.add_systems(Update, (ground_check, buffer_input, phase_latch, select_rig_target, aim_hook, tilt_chassis).chain());
//! app.add_systems(FixedUpdate, (drive_wheel, ease_rig_length).chain());
//! app.add_systems(PostUpdate, apply_gravity);
//! ```
pub mod hook;
pub mod input;
pub mod movement;
pub mod physics;
pub mod rig;

use bevy::prelude::*;

pub use hook::*;
pub use input::*;
pub use movement::*;
pub use physics::*;
pub use rig::*;

/// The rider's control phase. Exactly one policy drives the rig target at a
/// time; `Recoiling` is a latch that only ground contact of the body clears.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RiderPhase {
    /// Riding normally; the rig eases back to its default length.
    #[default]
    Grounded,
    /// Jump input held; the rig slowly extends toward the charged length.
    Charging,
    /// Wheel left the ground with the rig at length; the rig snaps shut
    /// until the body touches down again.
    Recoiling,
}

/// Component tracking the controller state of the rider body.
#[derive(Component, Debug)]
pub struct Player {
    /// Current horizontal speed.
    pub current_speed: f32,
    /// Current rig extension length.
    pub rig_length: f32,
    /// Length the rig is easing toward this tick.
    pub rig_target: f32,
    /// Easing rate toward `rig_target`, units per second.
    pub rig_rate: f32,
    /// Hook aim angle in radians, always a multiple of 45 degrees.
    pub aim_angle: f32,
    /// Current control phase.
    pub phase: RiderPhase,
}

impl Player {
    /// Rider state at rest, rig parked at the default length.
    #[must_use]
    pub fn from_settings(settings: &crate::settings::Settings) -> Self {
        Player {
            current_speed: 0.0,
            rig_length: settings.rig.default_length,
            rig_target: settings.rig.default_length,
            rig_rate: settings.rig.return_rate,
            aim_angle: 0.0,
            phase: RiderPhase::Grounded,
        }
    }
}

/// Marker for the wheel entity.
#[derive(Component)]
pub struct Wheel;

/// Marker for the chassis mesh child that must stay level under tilt.
#[derive(Component)]
pub struct ChassisMesh;

/// Marker for the hook aim reticle child.
#[derive(Component)]
pub struct Reticle;

/// Buffered input consumed by the controller during its scheduled systems.
/// The host delivers key events whenever it likes; nothing here is read
/// mid-phase.
#[derive(Resource, Debug, Default)]
pub struct RiderInput {
    /// Move vector: x is horizontal direction, y is the aim axis.
    pub move_input: Vec2,
    /// Jump key currently held.
    pub charging_jump: bool,
    /// Set on the frame the jump key is released; cleared by
    /// `take_jump_release`.
    jump_released: bool,
}

impl RiderInput {
    /// Record the jump key state for this frame. The release flag is only
    /// raised on the press-to-release transition, never by a key that is
    /// merely up.
    pub fn record_jump(&mut self, pressed: bool, just_released: bool) {
        self.charging_jump = pressed;
        if just_released {
            self.jump_released = true;
        }
    }

    /// Consume the pending release edge. Returns `true` at most once per
    /// release, no matter how many frames pass or how often it is polled.
    pub fn take_jump_release(&mut self) -> bool {
        std::mem::take(&mut self.jump_released)
    }
}

/// Per-tick ground contact of the two bodies, recomputed before any
/// consumer runs and never carried stale across ticks.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct GroundContacts {
    pub body_on_ground: bool,
    pub wheel_on_ground: bool,
    /// Wheel contact from the previous tick, kept for edge detection by the
    /// phase latch.
    pub wheel_was_on_ground: bool,
}
