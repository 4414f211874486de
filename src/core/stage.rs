//! core::stage
//!
//! The staging area: a pending diff against the head commit.
//!
//! # Invariants
//!
//! - An add-map entry exists only when the staged content differs from
//!   the head commit's entry for that filename (or the filename is new).
//! - A filename is never both staged for addition and for removal.
//! - The stage is cleared by every successful commit, branch checkout,
//!   and reset.
//!
//! The add-map is persisted under `stage_addition` and the remove-set
//! under `stage_removal`.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::core::objects::FileState;
use crate::core::paths::{STAGE_ADDITION, STAGE_REMOVAL};
use crate::core::storage::{read_json, write_json, Storage, StorageError};
use crate::core::types::ObjectId;

/// Pending additions and removals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stage {
    additions: BTreeMap<String, ObjectId>,
    removals: BTreeSet<String>,
}

impl Stage {
    /// Create an empty stage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the stage from storage. Missing records are treated as empty.
    pub fn load(storage: &dyn Storage) -> Result<Self, StorageError> {
        Ok(Self {
            additions: read_json(storage, STAGE_ADDITION)?.unwrap_or_default(),
            removals: read_json(storage, STAGE_REMOVAL)?.unwrap_or_default(),
        })
    }

    /// Persist both halves of the stage.
    pub fn save(&self, storage: &dyn Storage) -> Result<(), StorageError> {
        write_json(storage, STAGE_ADDITION, &self.additions)?;
        write_json(storage, STAGE_REMOVAL, &self.removals)
    }

    /// Filenames staged for addition, with their blob ids, sorted.
    pub fn additions(&self) -> &BTreeMap<String, ObjectId> {
        &self.additions
    }

    /// Filenames staged for removal, sorted.
    pub fn removals(&self) -> &BTreeSet<String> {
        &self.removals
    }

    /// Stage `filename` for addition, clearing any pending removal.
    pub fn stage_addition(&mut self, filename: &str, blob: ObjectId) {
        self.removals.remove(filename);
        self.additions.insert(filename.to_string(), blob);
    }

    /// Stage `filename` for removal, dropping any pending addition.
    pub fn stage_removal(&mut self, filename: &str) {
        self.additions.remove(filename);
        self.removals.insert(filename.to_string());
    }

    /// Drop a pending addition. Returns whether one existed.
    pub fn unstage_addition(&mut self, filename: &str) -> bool {
        self.additions.remove(filename).is_some()
    }

    /// Drop a pending removal. Returns whether one existed.
    pub fn unstage_removal(&mut self, filename: &str) -> bool {
        self.removals.remove(filename)
    }

    pub fn is_staged_for_addition(&self, filename: &str) -> bool {
        self.additions.contains_key(filename)
    }

    pub fn is_staged_for_removal(&self, filename: &str) -> bool {
        self.removals.contains(filename)
    }

    pub fn is_empty(&self) -> bool {
        self.additions.is_empty() && self.removals.is_empty()
    }

    pub fn clear(&mut self) {
        self.additions.clear();
        self.removals.clear();
    }

    /// The snapshot that committing this stage on top of `base` produces.
    ///
    /// Every addition is overlaid on `base`, then every removal deleted.
    pub fn apply(&self, base: &FileState) -> FileState {
        let mut state = base.clone();
        for (filename, blob) in &self.additions {
            state.insert(filename.clone(), blob.clone());
        }
        for filename in &self.removals {
            state.remove(filename);
        }
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::storage::MemoryStorage;

    fn id(s: &str) -> ObjectId {
        ObjectId::digest(&[s.as_bytes()])
    }

    #[test]
    fn addition_and_removal_are_exclusive() {
        let mut stage = Stage::new();
        stage.stage_removal("a.txt");
        stage.stage_addition("a.txt", id("a"));
        assert!(stage.is_staged_for_addition("a.txt"));
        assert!(!stage.is_staged_for_removal("a.txt"));

        stage.stage_removal("a.txt");
        assert!(!stage.is_staged_for_addition("a.txt"));
        assert!(stage.is_staged_for_removal("a.txt"));
    }

    #[test]
    fn apply_overlays_then_removes() {
        let mut base = FileState::new();
        base.insert("keep.txt".into(), id("keep"));
        base.insert("change.txt".into(), id("old"));
        base.insert("gone.txt".into(), id("gone"));

        let mut stage = Stage::new();
        stage.stage_addition("change.txt", id("new"));
        stage.stage_addition("added.txt", id("added"));
        stage.stage_removal("gone.txt");

        let state = stage.apply(&base);
        assert_eq!(state.len(), 3);
        assert_eq!(state["keep.txt"], id("keep"));
        assert_eq!(state["change.txt"], id("new"));
        assert_eq!(state["added.txt"], id("added"));
        assert!(!state.contains_key("gone.txt"));
    }

    #[test]
    fn listings_are_sorted() {
        let mut stage = Stage::new();
        for name in ["zeta", "alpha", "mid"] {
            stage.stage_addition(name, id(name));
        }
        for name in ["z-rm", "a-rm"] {
            stage.stage_removal(name);
        }
        let added: Vec<&String> = stage.additions().keys().collect();
        assert_eq!(added, vec!["alpha", "mid", "zeta"]);
        let removed: Vec<&String> = stage.removals().iter().collect();
        assert_eq!(removed, vec!["a-rm", "z-rm"]);
    }

    #[test]
    fn save_and_load() {
        let storage = MemoryStorage::new();
        assert_eq!(Stage::load(&storage).unwrap(), Stage::new());

        let mut stage = Stage::new();
        stage.stage_addition("a.txt", id("a"));
        stage.stage_removal("b.txt");
        stage.save(&storage).unwrap();

        assert!(storage.exists(STAGE_ADDITION).unwrap());
        assert!(storage.exists(STAGE_REMOVAL).unwrap());
        assert_eq!(Stage::load(&storage).unwrap(), stage);
    }

    #[test]
    fn clear_empties_both_halves() {
        let mut stage = Stage::new();
        stage.stage_addition("a", id("a"));
        stage.stage_removal("b");
        assert!(!stage.is_empty());
        stage.clear();
        assert!(stage.is_empty());
    }
}
