//! Change-notification handling with per-category debouncing.
//!
//! Hosts deliver asset-change notifications in bursts, often repeating the
//! same change several times in a row. Tag/layer and scene rebuilds are
//! debounced through explicit, caller-owned timestamps; resource rebuilds
//! always run. The clock is injected so tests control time.

use chrono::{DateTime, TimeDelta, Utc};

use crate::{GenerateError, Generator, RebuildFlags};

/// Cooldown between rebuilds triggered by duplicate host notifications.
pub const DEBOUNCE_WINDOW_SECS: i64 = 5;

/// Asset path the host reports when tags or layers change.
const TAG_MANAGER_ASSET: &str = "ProjectSettings/TagManager.asset";
/// Asset path the host reports when the build scene list changes.
const BUILD_SETTINGS_ASSET: &str = "ProjectSettings/EditorBuildSettings.asset";

/// Source of the current time.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Last-rebuild timestamps, one per debounced category.
///
/// Owned by the caller and carried across notifications; a slot advances
/// only when its rebuild actually executes, so a burst of notifications
/// inside the window collapses into one rebuild.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DebounceState {
    last_tags_and_layers: Option<DateTime<Utc>>,
    last_scenes: Option<DateTime<Utc>>,
}

impl DebounceState {
    /// Check a slot against the cooldown window, advancing it on pass.
    fn should_rebuild(slot: &mut Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
        match slot {
            Some(last) if *last + TimeDelta::seconds(DEBOUNCE_WINDOW_SECS) >= now => false,
            _ => {
                *slot = Some(now);
                true
            }
        }
    }
}

/// Asset paths delivered by one host refresh.
#[derive(Debug, Clone, Default)]
pub struct ChangeNotification {
    pub imported: Vec<String>,
    pub deleted: Vec<String>,
    pub moved: Vec<String>,
    pub moved_from: Vec<String>,
}

impl ChangeNotification {
    fn touches_resources(&self) -> bool {
        self.imported
            .iter()
            .chain(&self.moved)
            .chain(&self.deleted)
            .any(|path| path_is_under_resources(path))
    }

    fn imported_contains(&self, asset: &str) -> bool {
        self.imported.iter().any(|path| path == asset)
    }
}

fn path_is_under_resources(path: &str) -> bool {
    path.to_ascii_lowercase().contains("/resources/")
}

/// Dispatch one notification, rebuilding the affected categories.
///
/// Resource changes rebuild immediately; tag/layer and scene changes are
/// debounced independently through `state`.
pub fn handle_asset_changes(
    generator: &Generator,
    notification: &ChangeNotification,
    state: &mut DebounceState,
    clock: &impl Clock,
) -> Result<(), GenerateError> {
    if notification.touches_resources() {
        generator.rebuild(RebuildFlags::only_resources())?;
    }

    if notification.imported_contains(TAG_MANAGER_ASSET)
        && DebounceState::should_rebuild(&mut state.last_tags_and_layers, clock.now())
    {
        generator.rebuild(RebuildFlags::only_tags_and_layers())?;
    }

    if notification.imported_contains(BUILD_SETTINGS_ASSET)
        && DebounceState::should_rebuild(&mut state.last_scenes, clock.now())
    {
        generator.rebuild(RebuildFlags::only_scenes())?;
    }

    Ok(())
}
