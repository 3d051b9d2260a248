//! Level loader and watcher for loading ground geometry from RON files and
//! monitoring changes for hot reloading during runtime.
//!
//! # Example
//! ```ignore
//! use bevy::prelude::*;
//! use hookwheel::level::loader as level_loader;
//!
//! fn main() {
//!     let mut app = App::new();
//!     app.insert_resource(level_loader::load_level_from_dir("data/levels"));
//!     app.insert_resource(
//!         level_loader::setup_level_watcher("data/levels")
//!             .unwrap_or_else(|_| level_loader::LevelWatcher::stub()),
//!     );
//!     app.add_systems(Update, level_loader::check_level_changes);
//!     app.run();
//! }
//! ```

use super::Level;
use crate::ron_loader::{load_ron_files, setup_ron_watcher};
use bevy::prelude::{Res, ResMut, Resource};

#[derive(Resource)]
pub struct LevelWatcher(pub crate::ron::RonWatcher);

/// Load the level from RON files in `path`. The first successfully parsed
/// `Level` wins; with no parseable file the default flat course is used so
/// the game always has ground to stand on.
///
/// # Arguments
/// * `path` - The directory path where level RON files are located (e.g., "data/levels").
#[must_use]
pub fn load_level_from_dir(path: &str) -> Level {
    let items: Vec<Level> = load_ron_files(path);
    if let Some(first) = items.into_iter().next() {
        first
    } else {
        Level::default()
    }
}

/// Set up a file watcher to monitor changes in level RON files, for editing
/// a course without restarting the game.
///
/// # Errors
/// Returns a `notify::Error` if the underlying file watcher could not be
/// created or configured; callers fall back to `LevelWatcher::stub()`.
pub fn setup_level_watcher(path: &str) -> Result<LevelWatcher, notify::Error> {
    setup_ron_watcher(path).map(LevelWatcher)
}

/// Check for changes in level RON files and replace the `Level` resource
/// when changes are detected. Ground contact state is recomputed from the
/// fresh geometry on the same tick, so contacts are never stale across a
/// reload.
#[allow(clippy::needless_pass_by_value)]
pub fn check_level_changes(watcher: Res<LevelWatcher>, mut level: ResMut<Level>) {
    if watcher.0.take_changed() {
        println!("Level changed, reloading...");
        *level = load_level_from_dir("data/levels");
    }
}

impl LevelWatcher {
    /// Create a stub `LevelWatcher` that does not have an active OS watcher.
    #[must_use]
    pub fn stub() -> Self {
        LevelWatcher(crate::ron::RonWatcher::stub())
    }
}
