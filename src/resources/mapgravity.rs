//! Per-map gravity override table.
//!
//! Some maps need a different scale per `trigger_gravity` than the one baked
//! into the map. The table lives at `resources/maps/<map>.json` below the
//! configuration root and maps hammer ids to gravity scales:
//!
//! ```json
//! { "1204518": 0.2, "1204533": 0.05 }
//! ```
//!
//! The table is (re)loaded on map load, on round start when the map changed
//! and on explicit reload. A missing file simply means "no overrides".

use bevy_ecs::prelude::*;
use log::{info, warn};
use rustc_hash::FxHashMap;

use crate::resources::config::{ConfigRoot, read_json};

#[derive(Resource, Debug, Clone, Default)]
pub struct MapGravity {
    /// Map the table was loaded for.
    map: Option<String>,
    /// Overrides keyed by hammer id; `None` when the map has no table.
    table: Option<FxHashMap<String, f32>>,
}

impl MapGravity {
    pub fn map(&self) -> Option<&str> {
        self.map.as_deref()
    }

    /// Number of overrides in the loaded table.
    pub fn len(&self) -> usize {
        self.table.as_ref().map_or(0, |table| table.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Override for the trigger with the given hammer id, if the table has one.
    pub fn lookup(&self, hammer_id: &str) -> Option<f32> {
        if hammer_id.trim().is_empty() {
            return None;
        }
        self.table.as_ref()?.get(hammer_id).copied()
    }

    /// Replace the table with the one for `map`.
    pub fn load(&mut self, root: &ConfigRoot, map: &str) {
        self.map = Some(map.to_string());
        self.table = None;

        let path = root.map_file(map);
        if !path.exists() {
            info!("No gravity table for map {map}");
            return;
        }
        match read_json::<FxHashMap<String, f32>>(&path) {
            Ok(table) => {
                info!("Loaded {} gravity overrides for map {map}", table.len());
                self.table = Some(table);
            }
            Err(e) => warn!("{e}; ignoring gravity table"),
        }
    }

    /// Load the table for `map` unless it is already loaded. A map whose
    /// table was missing is retried, so a file dropped in mid-map is picked
    /// up at the next round.
    ///
    /// Map names compare case-insensitively, as the host reports them.
    pub fn ensure_loaded(&mut self, root: &ConfigRoot, map: &str) {
        if map.is_empty() {
            return;
        }
        if self.table.is_some()
            && self
                .map
                .as_deref()
                .is_some_and(|current| current.eq_ignore_ascii_case(map))
        {
            return;
        }
        self.load(root, map);
    }

    /// Reload the table for the current map, if any.
    pub fn reload(&mut self, root: &ConfigRoot) {
        if let Some(map) = self.map.clone() {
            self.load(root, &map);
        }
    }

    #[cfg(test)]
    pub(crate) fn with_table(map: &str, entries: &[(&str, f32)]) -> Self {
        MapGravity {
            map: Some(map.to_string()),
            table: Some(entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_table(root: &ConfigRoot, map: &str, body: &str) {
        let path = root.map_file(map);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, body).unwrap();
    }

    #[test]
    fn lookup_hits_and_misses() {
        let gravity = MapGravity::with_table("ze_test", &[("42", 0.2)]);
        assert_eq!(gravity.lookup("42"), Some(0.2));
        assert_eq!(gravity.lookup("43"), None);
        assert_eq!(gravity.lookup(""), None);
    }

    #[test]
    fn load_reads_table_from_maps_dir() {
        let dir = tempfile::tempdir().unwrap();
        let root = ConfigRoot(dir.path().to_path_buf());
        write_table(&root, "ze_lotr", r#"{"100":0.3}"#);

        let mut gravity = MapGravity::default();
        gravity.load(&root, "ze_lotr");
        assert_eq!(gravity.map(), Some("ze_lotr"));
        assert_eq!(gravity.lookup("100"), Some(0.3));
    }

    #[test]
    fn missing_or_malformed_table_means_no_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let root = ConfigRoot(dir.path().to_path_buf());
        write_table(&root, "broken", "[1, 2");

        let mut gravity = MapGravity::default();
        gravity.load(&root, "absent");
        assert_eq!(gravity.lookup("100"), None);
        gravity.load(&root, "broken");
        assert_eq!(gravity.map(), Some("broken"));
        assert_eq!(gravity.lookup("100"), None);
    }

    #[test]
    fn ensure_loaded_skips_same_map() {
        let dir = tempfile::tempdir().unwrap();
        let root = ConfigRoot(dir.path().to_path_buf());
        write_table(&root, "ze_a", r#"{"1":0.5}"#);

        let mut gravity = MapGravity::default();
        gravity.ensure_loaded(&root, "ze_a");
        write_table(&root, "ze_a", r#"{"1":0.9}"#);
        gravity.ensure_loaded(&root, "ZE_A");
        assert_eq!(gravity.lookup("1"), Some(0.5));

        gravity.reload(&root);
        assert_eq!(gravity.lookup("1"), Some(0.9));
    }

    #[test]
    fn ensure_loaded_retries_a_missing_table() {
        let dir = tempfile::tempdir().unwrap();
        let root = ConfigRoot(dir.path().to_path_buf());

        let mut gravity = MapGravity::default();
        gravity.ensure_loaded(&root, "ze_b");
        assert_eq!(gravity.lookup("7"), None);

        write_table(&root, "ze_b", r#"{"7":0.1}"#);
        gravity.ensure_loaded(&root, "ze_b");
        assert_eq!(gravity.lookup("7"), Some(0.1));
    }
}
