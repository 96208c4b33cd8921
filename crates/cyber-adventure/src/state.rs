//! Adventure game state with JSON persistence.
//!
//! Every mutation saves through a [`SaveStore`], the key-value storage
//! abstraction standing in for the browser's local storage. The save
//! format is a single JSON blob; a corrupt or missing save falls back
//! to defaults instead of erroring.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::scene::SceneId;

/// Storage key for the save blob.
pub const SAVE_KEY: &str = "cyber_adventure_save";

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("storage failed: {0}")]
    Storage(String),
}

/// Key-value persistence backend.
pub trait SaveStore: Send {
    fn load(&self, key: &str) -> Option<String>;
    fn store(&mut self, key: &str, value: &str) -> Result<(), SaveError>;
    fn remove(&mut self, key: &str);
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl SaveStore for MemoryStore {
    fn load(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn store(&mut self, key: &str, value: &str) -> Result<(), SaveError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

/// On-disk save layout. Field names are part of the save format.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SaveData {
    current_scene: String,
    puzzles_solved: Vec<String>,
    inventory_items: Vec<String>,
    dialog_flags: BTreeMap<String, bool>,
}

/// Mutable session state of the adventure.
pub struct AdventureState {
    pub current_scene: SceneId,
    puzzles_solved: BTreeSet<String>,
    inventory: BTreeSet<String>,
    flags: BTreeMap<String, bool>,
    store: Box<dyn SaveStore>,
}

impl std::fmt::Debug for AdventureState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdventureState")
            .field("current_scene", &self.current_scene)
            .field("puzzles_solved", &self.puzzles_solved)
            .field("inventory", &self.inventory)
            .field("flags", &self.flags)
            .finish_non_exhaustive()
    }
}

impl AdventureState {
    /// Creates a fresh state backed by `store`, loading any existing
    /// save. Corrupt saves are discarded.
    pub fn new(store: Box<dyn SaveStore>) -> Self {
        let mut state = Self {
            current_scene: SceneId::Intro,
            puzzles_solved: BTreeSet::new(),
            inventory: BTreeSet::new(),
            flags: BTreeMap::new(),
            store,
        };
        state.load();
        state
    }

    pub fn has_save(&self) -> bool {
        self.store.load(SAVE_KEY).is_some()
    }

    /// Writes the current state. Persistence failures are logged and
    /// otherwise ignored; losing a save must not break the game.
    pub fn save(&mut self) {
        let data = SaveData {
            current_scene: self.current_scene.id().to_string(),
            puzzles_solved: self.puzzles_solved.iter().cloned().collect(),
            inventory_items: self.inventory.iter().cloned().collect(),
            dialog_flags: self.flags.clone(),
        };
        match serde_json::to_string(&data) {
            Ok(blob) => {
                if let Err(error) = self.store.store(SAVE_KEY, &blob) {
                    tracing::warn!(%error, "failed to persist save");
                }
            }
            Err(error) => tracing::warn!(%error, "failed to serialize save"),
        }
    }

    fn load(&mut self) {
        let Some(blob) = self.store.load(SAVE_KEY) else {
            return;
        };
        let Ok(data) = serde_json::from_str::<SaveData>(&blob) else {
            tracing::warn!("discarding corrupt save");
            return;
        };
        self.current_scene = SceneId::parse(&data.current_scene).unwrap_or(SceneId::Intro);
        self.puzzles_solved = data.puzzles_solved.into_iter().collect();
        self.inventory = data.inventory_items.into_iter().collect();
        self.flags = data.dialog_flags;
    }

    /// Wipes the save and resets to the opening scene.
    pub fn reset(&mut self) {
        self.current_scene = SceneId::Intro;
        self.puzzles_solved.clear();
        self.inventory.clear();
        self.flags.clear();
        self.store.remove(SAVE_KEY);
    }

    pub fn solved_puzzle(&mut self, id: &str) {
        self.puzzles_solved.insert(id.to_string());
        self.save();
    }

    pub fn is_puzzle_solved(&self, id: &str) -> bool {
        self.puzzles_solved.contains(id)
    }

    pub fn add_item(&mut self, id: &str) {
        self.inventory.insert(id.to_string());
        self.save();
    }

    pub fn has_item(&self, id: &str) -> bool {
        self.inventory.contains(id)
    }

    pub fn items(&self) -> impl Iterator<Item = &str> {
        self.inventory.iter().map(String::as_str)
    }

    pub fn set_flag(&mut self, key: &str, value: bool) {
        self.flags.insert(key.to_string(), value);
        self.save();
    }

    pub fn get_flag(&self, key: &str) -> bool {
        self.flags.get(key).copied().unwrap_or(false)
    }
}
