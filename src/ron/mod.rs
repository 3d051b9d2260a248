//! Utilities for loading RON files and watching directories for changes.
//!
//! Tuning settings and level geometry both live as RON files under `data/`.
//! This module provides the shared reader plus a small filesystem watcher
//! resource that sets a shared boolean when files change, used for
//! hot-reloading that data during development.

use bevy::prelude::Resource;
use notify::{Config, RecommendedWatcher, RecursiveMode, Watcher};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

#[derive(Resource)]
/// File-watcher resource for RON hot-reload.
pub struct RonWatcher {
    pub changed: Arc<Mutex<bool>>, // Shared boolean set to `true` when watched files change.
    _watcher: Option<notify::RecommendedWatcher>, // watcher handle kept to prevent immediate drop.
}

impl RonWatcher {
    /// Create a stub `RonWatcher` that does not have an active OS watcher.
    ///
    /// # Return
    /// Returns a `RonWatcher` with `changed` initialized to `false` and no
    /// underlying OS watcher. Used as a fallback when watcher creation fails.
    #[must_use]
    pub fn stub() -> Self {
        RonWatcher {
            changed: Arc::new(Mutex::new(false)),
            _watcher: None,
        }
    }

    /// Consume the changed flag: returns `true` once per batch of observed
    /// file events and resets it. A poisoned mutex is recovered rather than
    /// propagated; the watcher callback only ever writes a bool, so the
    /// flag's value stays trustworthy.
    pub fn take_changed(&self) -> bool {
        let mut flag = match self.changed.lock() {
            Ok(flag) => flag,
            Err(poisoned) => {
                eprintln!("warning: RON watcher mutex poisoned, recovering");
                poisoned.into_inner()
            }
        };
        std::mem::take(&mut *flag)
    }
}

/// Load all `.ron` files from a directory and deserialize them into `T`.
///
/// # Arguments
/// * `path` - Directory path to scan for `.ron` files.
///
/// # Return
/// A `Vec<T>` with every successfully deserialized item found in the
/// directory. Files that fail to parse are skipped with a warning on stderr
/// so one broken file never takes the rest of the data down with it.
#[must_use]
pub fn load_ron_files<T: DeserializeOwned>(path: &str) -> Vec<T> {
    let mut items = Vec::new();

    let Ok(entries) = std::fs::read_dir(path) else {
        return items;
    };
    for entry in entries.flatten() {
        if !entry.metadata().is_ok_and(|m| m.is_file()) {
            continue;
        }
        let path = entry.path();
        if path.extension().is_none_or(|ext| ext != "ron") {
            continue;
        }
        let Ok(content) = std::fs::read_to_string(&path) else {
            continue;
        };
        match ron::from_str::<T>(&content) {
            Ok(item) => items.push(item),
            Err(e) => eprintln!("Failed to parse {}: {e:?}", path.display()),
        }
    }

    items
}

/// Create a `RonWatcher` that watches a directory for modifications.
///
/// # Arguments
/// * `path` - Directory path to watch for `.ron` file changes.
///
/// # Return
/// Returns a `RonWatcher` on success. The returned watcher's `changed` flag
/// is set to `true` when a file create or modify event under the watched
/// directory is observed.
///
/// # Errors
/// Returns a `notify::Error` if the underlying file-watcher cannot be
/// created or the watcher cannot be registered for the provided path.
///
/// # Panics
/// The event callback uses `Mutex::lock().unwrap()` when setting the shared
/// `changed` flag; that call can panic if the mutex is poisoned.
pub fn setup_ron_watcher(path: &str) -> Result<RonWatcher, notify::Error> {
    let changed = Arc::new(Mutex::new(false));
    let changed_clone = changed.clone();
    // Resolve watched path to a canonical form if possible so we can filter events
    let watched_path: PathBuf = std::fs::canonicalize(path).unwrap_or_else(|_| PathBuf::from(path));

    let mut watcher: RecommendedWatcher = Watcher::new(
        move |res: Result<notify::Event, notify::Error>| match res {
            Ok(event) => {
                if matches!(
                    event.kind,
                    notify::EventKind::Modify(_) | notify::EventKind::Create(_)
                ) {
                    // Only set changed when the event path is under the watched directory
                    let mut relevant = false;
                    for p in &event.paths {
                        let p_canon = std::fs::canonicalize(p).unwrap_or_else(|_| p.clone());
                        if p_canon.starts_with(&watched_path) {
                            relevant = true;
                            break;
                        }
                    }
                    if relevant {
                        *changed_clone.lock().unwrap() = true;
                    }
                }
            }
            Err(e) => eprintln!("Watch error: {e:?}"),
        },
        Config::default(),
    )?;

    watcher.watch(Path::new(path), RecursiveMode::NonRecursive)?;
    Ok(RonWatcher { changed, _watcher: Some(watcher) })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_changed_consumes_the_flag_once() {
        let watcher = RonWatcher::stub();
        assert!(!watcher.take_changed());

        *watcher.changed.lock().unwrap() = true;
        assert!(watcher.take_changed());
        assert!(!watcher.take_changed());
    }
}
