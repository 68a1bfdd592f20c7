//! Per-match state storage with per-identifier locking
//!
//! This module owns every live match on the server:
//! - Lazy creation of a default match the first time an identifier is seen
//! - Serialized read-modify-write of one match while other matches proceed
//! - Whole-state replacement for match resets
//! - Consistent snapshots for display polling
//!
//! The identifier map sits behind a read-write lock that is only held long
//! enough to find or insert an entry. Each entry carries its own mutex, and
//! every compound update holds that mutex from the first read to the last write.

use crate::game::{Applied, UpdateProcessor};
use log::info;
use shared::{Action, GameState};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

/// Shared handle to the single stored instance of one match
pub type MatchHandle = Arc<Mutex<GameState>>;

/// Maps match identifiers to their live state
///
/// Any text is a valid identifier. Unknown identifiers are created with
/// default state on first reference and live for the lifetime of the store.
#[derive(Debug, Default)]
pub struct MatchStore {
    /// Live matches indexed by identifier
    matches: RwLock<HashMap<String, MatchHandle>>,
}

impl MatchStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with default matches for the given identifiers
    pub fn with_matches<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let matches = ids
            .into_iter()
            .map(|id| (id.into(), Arc::new(Mutex::new(GameState::new()))))
            .collect();

        Self {
            matches: RwLock::new(matches),
        }
    }

    /// Returns the match for `id`, creating a default one if absent
    ///
    /// Concurrent callers racing on a new identifier all receive the same
    /// instance: creation happens under the write lock via the map entry.
    pub async fn get_or_create(&self, id: &str) -> MatchHandle {
        if let Some(handle) = self.matches.read().await.get(id) {
            return Arc::clone(handle);
        }

        let mut matches = self.matches.write().await;
        let handle = matches.entry(id.to_string()).or_insert_with(|| {
            info!("Created match {:?}", id);
            Arc::new(Mutex::new(GameState::new()))
        });
        Arc::clone(handle)
    }

    /// Returns a copy of the current state of `id`
    pub async fn snapshot(&self, id: &str) -> GameState {
        let handle = self.get_or_create(id).await;
        let state = handle.lock().await;
        state.clone()
    }

    /// Substitutes the stored state of `id` in one step
    pub async fn replace(&self, id: &str, new_state: GameState) {
        let handle = self.get_or_create(id).await;
        let mut state = handle.lock().await;
        *state = new_state;
        info!("Replaced match {:?}", id);
    }

    /// Applies an action to `id` as a single atomic unit
    ///
    /// The match mutex is held from reading the current values through set
    /// evaluation to the final write, including the wholesale replacement
    /// produced by a match reset.
    pub async fn apply(&self, id: &str, processor: &UpdateProcessor, action: &Action) -> Applied {
        let handle = self.get_or_create(id).await;
        let mut state = handle.lock().await;

        let applied = processor.apply(&mut state, action);
        if let Applied::Replace(fresh) = &applied {
            *state = fresh.clone();
            info!("Replaced match {:?}", id);
        }
        applied
    }

    /// Returns all known identifiers, sorted
    pub async fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.matches.read().await.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Returns the number of known matches
    pub async fn len(&self) -> usize {
        self.matches.read().await.len()
    }

    /// Returns true if no match has been created yet
    pub async fn is_empty(&self) -> bool {
        self.matches.read().await.is_empty()
    }
}
