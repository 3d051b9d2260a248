//! Settings, types and defaults.
//!
//! Settings are stored as a RON file under `data/settings/` and are
//! hot-reloadable using the shared RON watcher utilities (see
//! `ron::setup_ron_watcher`). They cover the physics weights, the movement
//! and rig tuning for the rider, and the keybinds.
use bevy::prelude::{KeyCode, Resource};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhysicsSettings {
    #[serde(default = "PhysicsSettings::default_body_weight")]
    pub body_weight: f32, // Downward acceleration applied to the rider body each frame.
    #[serde(default = "PhysicsSettings::default_wheel_weight")]
    pub wheel_weight: f32, // Downward acceleration applied to the wheel each frame.
    #[serde(default = "PhysicsSettings::default_body_radius")]
    pub body_radius: f32, // Collision radius of the rider body.
    #[serde(default = "PhysicsSettings::default_wheel_radius")]
    pub wheel_radius: f32, // Collision radius of the wheel.
    #[serde(default = "PhysicsSettings::default_ground_margin")]
    pub ground_margin: f32, // Extra reach added to the radius for ground contact checks.
    #[serde(default = "PhysicsSettings::default_rig_stiffness")]
    pub rig_stiffness: f32, // Spring constant of the body-wheel rig.
    #[serde(default = "PhysicsSettings::default_rig_damping")]
    pub rig_damping: f32, // Damping applied along the rig axis.
}

impl PhysicsSettings {
    fn default_body_weight() -> f32 { 30.0 }
    fn default_wheel_weight() -> f32 { 60.0 }
    fn default_body_radius() -> f32 { 0.5 }
    fn default_wheel_radius() -> f32 { 0.35 }
    fn default_ground_margin() -> f32 { 0.05 }
    fn default_rig_stiffness() -> f32 { 80.0 }
    fn default_rig_damping() -> f32 { 8.0 }
}

impl Default for PhysicsSettings {
    fn default() -> Self {
        Self {
            body_weight: Self::default_body_weight(),
            wheel_weight: Self::default_wheel_weight(),
            body_radius: Self::default_body_radius(),
            wheel_radius: Self::default_wheel_radius(),
            ground_margin: Self::default_ground_margin(),
            rig_stiffness: Self::default_rig_stiffness(),
            rig_damping: Self::default_rig_damping(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovementSettings {
    #[serde(default = "MovementSettings::default_max_speed")]
    pub max_speed: f32, // Top horizontal speed at full input.
    #[serde(default = "MovementSettings::default_acceleration")]
    pub acceleration: f32, // Speed change per second toward the input target.
    #[serde(default = "MovementSettings::default_max_tilt")]
    pub max_tilt: f32, // Degrees of chassis tilt per unit of current speed.
}

impl MovementSettings {
    fn default_max_speed() -> f32 { 5.0 }
    fn default_acceleration() -> f32 { 8.0 }
    fn default_max_tilt() -> f32 { 4.0 }
}

impl Default for MovementSettings {
    fn default() -> Self {
        Self {
            max_speed: Self::default_max_speed(),
            acceleration: Self::default_acceleration(),
            max_tilt: Self::default_max_tilt(),
        }
    }
}

/// Rig tuning: rest lengths and easing rates of the body-wheel spring rig,
/// plus the jump strength. `charged_length` is the rig's upper bound;
/// `default_length` is clamped to it on load (see `Settings::sanitized`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RigSettings {
    #[serde(default = "RigSettings::default_default_length")]
    pub default_length: f32, // Rest length of the rig while riding normally.
    #[serde(default = "RigSettings::default_charged_length")]
    pub charged_length: f32, // Rest length the rig extends toward while a jump is charged.
    #[serde(default = "RigSettings::default_charge_rate")]
    pub charge_rate: f32, // Slow easing rate used while charging.
    #[serde(default = "RigSettings::default_return_rate")]
    pub return_rate: f32, // Fast easing rate back toward the default length.
    #[serde(default = "RigSettings::default_recoil_rate")]
    pub recoil_rate: f32, // Fast easing rate used for the airborne recoil snap.
    #[serde(default = "RigSettings::default_jump_force")]
    pub jump_force: f32, // Impulse per unit of remaining rig compression on release.
}

impl RigSettings {
    fn default_default_length() -> f32 { 1.0 }
    fn default_charged_length() -> f32 { 1.6 }
    fn default_charge_rate() -> f32 { 0.8 }
    fn default_return_rate() -> f32 { 6.0 }
    fn default_recoil_rate() -> f32 { 10.0 }
    fn default_jump_force() -> f32 { 9.0 }
}

impl Default for RigSettings {
    fn default() -> Self {
        Self {
            default_length: Self::default_default_length(),
            charged_length: Self::default_charged_length(),
            charge_rate: Self::default_charge_rate(),
            return_rate: Self::default_return_rate(),
            recoil_rate: Self::default_recoil_rate(),
            jump_force: Self::default_jump_force(),
        }
    }
}

/// Controls / input settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlsSettings {
    #[serde(default)]
    pub keybinds: HashMap<String, String>, // Map of action names to key identifiers (editable by user)
}

impl ControlsSettings {
    fn default_keybinds() -> HashMap<String, String> {
        let mut m = HashMap::new();
        m.insert("left".to_string(), "A".to_string());
        m.insert("right".to_string(), "D".to_string());
        m.insert("aim_up".to_string(), "W".to_string());
        m.insert("aim_down".to_string(), "S".to_string());
        m.insert("jump".to_string(), "Space".to_string());
        m.insert("toggle_overlay".to_string(), "F1".to_string());
        m.insert("dump_debug".to_string(), "F3".to_string());
        m
    }
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self {
            keybinds: Self::default_keybinds(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphicsSettings {
    #[serde(default = "GraphicsSettings::default_vsync")]
    pub vsync: bool, // Enable vertical sync to cap FPS to the display refresh rate.
    #[serde(default = "GraphicsSettings::default_pixels_per_unit")]
    pub pixels_per_unit: f32, // World-to-screen scale used when spawning sprites.
}

impl GraphicsSettings {
    fn default_vsync() -> bool { true }
    fn default_pixels_per_unit() -> f32 { 48.0 }
}

impl Default for GraphicsSettings {
    fn default() -> Self {
        Self {
            vsync: Self::default_vsync(),
            pixels_per_unit: Self::default_pixels_per_unit(),
        }
    }
}

/// Top-level Settings
#[derive(Resource, Clone, Debug, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub physics: PhysicsSettings,
    #[serde(default)]
    pub movement: MovementSettings,
    #[serde(default)]
    pub rig: RigSettings,
    #[serde(default)]
    pub controls: ControlsSettings,
    #[serde(default)]
    pub graphics: GraphicsSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            physics: PhysicsSettings::default(),
            movement: MovementSettings::default(),
            rig: RigSettings::default(),
            controls: ControlsSettings::default(),
            graphics: GraphicsSettings::default(),
        }
    }
}

impl Settings {
    #[must_use]
    pub fn defaults() -> Self { Settings::default() }

    /// Enforce cross-field constraints a RON file could violate: rates and
    /// lengths must be non-negative, and the default rig length may not
    /// exceed the charged length (the rig's hard upper bound).
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        let rig = &mut self.rig;
        rig.charged_length = rig.charged_length.max(0.0);
        rig.default_length = rig.default_length.clamp(0.0, rig.charged_length);
        rig.charge_rate = rig.charge_rate.max(0.0);
        rig.return_rate = rig.return_rate.max(0.0);
        rig.recoil_rate = rig.recoil_rate.max(0.0);
        rig.jump_force = rig.jump_force.max(0.0);
        self.movement.acceleration = self.movement.acceleration.max(0.0);
        self.movement.max_speed = self.movement.max_speed.max(0.0);
        self
    }

    /// Look up the key bound to `action`, falling back to `default` when the
    /// binding is missing or unparseable.
    #[must_use]
    pub fn keybind(&self, action: &str, default: KeyCode) -> KeyCode {
        self.controls
            .keybinds
            .get(action)
            .and_then(|s| Settings::keycode_from_str(s))
            .unwrap_or(default)
    }

    /// Convert a string key identifier (e.g., from `controls.keybinds`) into
    /// a `KeyCode` usable with Bevy's input system. Covers the keys this game
    /// actually binds: letters, digits, arrows, space, shift and F-keys.
    ///
    /// # Arguments
    /// * `name` - The string key identifier to convert (e.g., "W", "Space", "F1").
    ///
    /// # Returns
    /// The matching `KeyCode`, or `None` if the string is not recognised.
    pub fn keycode_from_str(name: &str) -> Option<KeyCode> {
        let s = name.to_ascii_uppercase();
        if s.len() == 1 {
            let c = s.chars().next()?;
            if c.is_ascii_uppercase() {
                return Some(match c {
                    'A' => KeyCode::KeyA,
                    'B' => KeyCode::KeyB,
                    'C' => KeyCode::KeyC,
                    'D' => KeyCode::KeyD,
                    'E' => KeyCode::KeyE,
                    'F' => KeyCode::KeyF,
                    'G' => KeyCode::KeyG,
                    'H' => KeyCode::KeyH,
                    'I' => KeyCode::KeyI,
                    'J' => KeyCode::KeyJ,
                    'K' => KeyCode::KeyK,
                    'L' => KeyCode::KeyL,
                    'M' => KeyCode::KeyM,
                    'N' => KeyCode::KeyN,
                    'O' => KeyCode::KeyO,
                    'P' => KeyCode::KeyP,
                    'Q' => KeyCode::KeyQ,
                    'R' => KeyCode::KeyR,
                    'S' => KeyCode::KeyS,
                    'T' => KeyCode::KeyT,
                    'U' => KeyCode::KeyU,
                    'V' => KeyCode::KeyV,
                    'W' => KeyCode::KeyW,
                    'X' => KeyCode::KeyX,
                    'Y' => KeyCode::KeyY,
                    'Z' => KeyCode::KeyZ,
                    _ => return None,
                });
            }
            if c.is_ascii_digit() {
                return Some(match c {
                    '0' => KeyCode::Digit0,
                    '1' => KeyCode::Digit1,
                    '2' => KeyCode::Digit2,
                    '3' => KeyCode::Digit3,
                    '4' => KeyCode::Digit4,
                    '5' => KeyCode::Digit5,
                    '6' => KeyCode::Digit6,
                    '7' => KeyCode::Digit7,
                    '8' => KeyCode::Digit8,
                    '9' => KeyCode::Digit9,
                    _ => return None,
                });
            }
        }

        Some(match s.as_str() {
            "F1" => KeyCode::F1,
            "F2" => KeyCode::F2,
            "F3" => KeyCode::F3,
            "F4" => KeyCode::F4,
            "F5" => KeyCode::F5,
            "F6" => KeyCode::F6,
            "F7" => KeyCode::F7,
            "F8" => KeyCode::F8,
            "F9" => KeyCode::F9,
            "F10" => KeyCode::F10,
            "F11" => KeyCode::F11,
            "F12" => KeyCode::F12,

            "LEFT" | "ARROWLEFT" => KeyCode::ArrowLeft,
            "RIGHT" | "ARROWRIGHT" => KeyCode::ArrowRight,
            "UP" | "ARROWUP" => KeyCode::ArrowUp,
            "DOWN" | "ARROWDOWN" => KeyCode::ArrowDown,

            "ESC" | "ESCAPE" => KeyCode::Escape,
            "SPACE" => KeyCode::Space,
            "TAB" => KeyCode::Tab,
            "ENTER" | "RETURN" => KeyCode::Enter,

            "LSHIFT" | "SHIFT" => KeyCode::ShiftLeft,
            "RSHIFT" => KeyCode::ShiftRight,
            "LCTRL" | "CTRL" | "CONTROL" => KeyCode::ControlLeft,
            "RCTRL" => KeyCode::ControlRight,

            _ => return None,
        })
    }
}

pub mod loader;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitized_clamps_default_length_to_charged() {
        let mut s = Settings::defaults();
        s.rig.default_length = 3.0;
        s.rig.charged_length = 1.5;
        let s = s.sanitized();
        assert!(s.rig.default_length <= s.rig.charged_length);
        assert_eq!(s.rig.default_length, 1.5);
    }

    #[test]
    fn keybind_falls_back_on_unknown_name() {
        let mut s = Settings::defaults();
        s.controls.keybinds.insert("jump".to_string(), "NOSUCHKEY".to_string());
        assert_eq!(s.keybind("jump", KeyCode::Space), KeyCode::Space);
        assert_eq!(s.keybind("left", KeyCode::ArrowLeft), KeyCode::KeyA);
    }
}
