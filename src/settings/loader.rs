//! Settings loading and hot-reloading.
//!
//! Settings are loaded from RON files in the `data/settings` directory. If
//! multiple RON files are present, the first successfully parsed `Settings`
//! will be used. If no RON files are found or no parse succeeds, default
//! settings are used. Loaded settings pass through `Settings::sanitized` so
//! a hand-edited file can never put the rig tuning out of range.
use crate::ron_loader::{load_ron_files, setup_ron_watcher};
use crate::settings::Settings;
use bevy::prelude::{Res, ResMut, Resource};

#[derive(Resource)]
pub struct SettingsWatcher(pub crate::ron::RonWatcher);

/// Load settings from `path` (directory). If multiple `.ron` files are
/// present the first parsed `Settings` will be used. If none exist the
/// `Default` is used.
///
/// # Arguments
/// * `path` - The directory path where settings RON files are located (e.g., "data/settings").
///
/// # Returns
/// A sanitized `Settings` loaded from the first successfully parsed RON file
/// in the directory, or default settings when no valid file is found.
#[must_use]
pub fn load_settings_from_dir(path: &str) -> Settings {
    let items: Vec<Settings> = load_ron_files(path);
    if let Some(first) = items.into_iter().next() {
        first.sanitized()
    } else {
        Settings::defaults()
    }
}

/// Create a watcher for the settings directory (hot-reload).
///
/// # Errors
/// Returns a `notify::Error` when the underlying file watcher cannot be
/// created; callers fall back to `SettingsWatcher::stub()`.
#[must_use]
pub fn setup_settings_watcher(path: &str) -> Result<SettingsWatcher, notify::Error> {
    setup_ron_watcher(path).map(SettingsWatcher)
}

/// Check for changes and reload the settings resource when files change.
///
/// # Example
/// ```ignore
/// app.add_systems(Update, hookwheel::settings::loader::check_settings_changes);
/// ```
#[allow(clippy::needless_pass_by_value)]
pub fn check_settings_changes(watcher: Res<SettingsWatcher>, mut settings: ResMut<Settings>) {
    if watcher.0.take_changed() {
        println!("Settings changed, reloading...");
        *settings = load_settings_from_dir("data/settings");
    }
}

impl SettingsWatcher {
    #[must_use]
    pub fn stub() -> Self {
        SettingsWatcher(crate::ron::RonWatcher::stub())
    }
}
