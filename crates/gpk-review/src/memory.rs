//! # In-Memory Adapters
//!
//! Process-local implementations of the ports, used by the CLI and the
//! tests. All operations are synchronous; the locks are `parking_lot`, so a
//! panicking writer does not poison the store.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

use gpk_core::{MapCode, UserId};
use gpk_progression::TierChangeRecord;
use gpk_state::{Playtest, PlaytestEvent};
use parking_lot::{Mutex, RwLock};

use crate::ports::{Notifier, PlaytestStore, StoreError, XpStore};

// ─── Generic Store ───────────────────────────────────────────────────

/// Thread-safe, cloneable key-value map. Clones share the same data.
#[derive(Debug)]
pub struct MemoryStore<K, V> {
    data: Arc<RwLock<HashMap<K, V>>>,
}

impl<K, V> Clone for MemoryStore<K, V> {
    fn clone(&self) -> Self {
        Self {
            data: Arc::clone(&self.data),
        }
    }
}

impl<K, V> Default for MemoryStore<K, V> {
    fn default() -> Self {
        Self {
            data: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl<K: Eq + Hash + Clone, V: Clone> MemoryStore<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert, returning the previous value.
    pub fn insert(&self, key: K, value: V) -> Option<V> {
        self.data.write().insert(key, value)
    }

    /// Insert only if `key` is vacant. Returns whether it was inserted.
    pub fn insert_new(&self, key: K, value: V) -> bool {
        let mut guard = self.data.write();
        if guard.contains_key(&key) {
            return false;
        }
        guard.insert(key, value);
        true
    }

    pub fn get(&self, key: &K) -> Option<V> {
        self.data.read().get(key).cloned()
    }

    pub fn list(&self) -> Vec<V> {
        self.data.read().values().cloned().collect()
    }

    pub fn keys(&self) -> Vec<K> {
        self.data.read().keys().cloned().collect()
    }

    /// Atomically read-validate-update one entry.
    ///
    /// `f` runs on a copy under the write lock; the copy replaces the entry
    /// only when `f` returns `Ok`. Returns `None` if the key is absent.
    pub fn try_update<R, E>(
        &self,
        key: &K,
        f: impl FnOnce(&mut V) -> Result<R, E>,
    ) -> Option<Result<R, E>> {
        let mut guard = self.data.write();
        let entry = guard.get_mut(key)?;
        let mut draft = entry.clone();
        Some(f(&mut draft).map(|result| {
            *entry = draft;
            result
        }))
    }

    /// Like [`try_update`](Self::try_update), starting from `default` when
    /// the key is absent.
    pub fn try_upsert<R, E>(
        &self,
        key: K,
        default: V,
        f: impl FnOnce(&mut V) -> Result<R, E>,
    ) -> Result<R, E> {
        let mut guard = self.data.write();
        let mut draft = guard.get(&key).cloned().unwrap_or(default);
        let result = f(&mut draft)?;
        guard.insert(key, draft);
        Ok(result)
    }

    pub fn remove(&self, key: &K) -> Option<V> {
        self.data.write().remove(key)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.data.read().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ─── Port Implementations ────────────────────────────────────────────

/// Playtests keyed by map code.
pub type MemoryPlaytestStore = MemoryStore<MapCode, Playtest>;

/// XP totals keyed by user.
pub type MemoryXpStore = MemoryStore<UserId, u64>;

impl PlaytestStore for MemoryStore<MapCode, Playtest> {
    fn insert(&self, playtest: Playtest) -> Result<(), StoreError> {
        let code = playtest.code().clone();
        if self.insert_new(code.clone(), playtest) {
            Ok(())
        } else {
            Err(StoreError::PlaytestExists { code })
        }
    }

    fn load_playtest(&self, code: &MapCode) -> Result<Playtest, StoreError> {
        self.get(code)
            .ok_or_else(|| StoreError::PlaytestNotFound { code: code.clone() })
    }

    fn save_playtest(&self, playtest: &Playtest) -> Result<(), StoreError> {
        let code = playtest.code();
        self.try_update(code, |stored| {
            *stored = playtest.clone();
            Ok(())
        })
        .unwrap_or_else(|| Err(StoreError::PlaytestNotFound { code: code.clone() }))
    }

    fn update_playtest<R, E>(
        &self,
        code: &MapCode,
        f: impl FnOnce(&mut Playtest) -> Result<R, E>,
    ) -> Result<R, E>
    where
        E: From<StoreError>,
    {
        self.try_update(code, f)
            .unwrap_or_else(|| Err(StoreError::PlaytestNotFound { code: code.clone() }.into()))
    }
}

impl XpStore for MemoryStore<UserId, u64> {
    fn load_xp(&self, user_id: UserId) -> Result<u64, StoreError> {
        Ok(self.get(&user_id).unwrap_or(0))
    }

    fn save_xp(&self, user_id: UserId, amount: u64) -> Result<(), StoreError> {
        MemoryStore::insert(self, user_id, amount);
        Ok(())
    }

    fn update_xp<R, E>(
        &self,
        user_id: UserId,
        f: impl FnOnce(u64) -> Result<(u64, R), E>,
    ) -> Result<R, E>
    where
        E: From<StoreError>,
    {
        self.try_upsert(user_id, 0, |total| {
            let (new_amount, result) = f(*total)?;
            *total = new_amount;
            Ok(result)
        })
    }
}

// ─── Notifiers ───────────────────────────────────────────────────────

/// Notifier that only logs.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn tier_changed(&self, user_id: UserId, change: &TierChangeRecord) {
        tracing::info!(
            user = %user_id,
            kind = %change.rank_change_type,
            from = %format!("{} {}", change.old_main_tier_name, change.old_sub_tier_name),
            to = %format!("{} {}", change.new_main_tier_name, change.new_sub_tier_name),
            prestige_change = change.prestige_change,
            "tier changed"
        );
    }

    fn playtest_decided(&self, event: &PlaytestEvent) {
        tracing::info!(code = %event.code(), ?event, "playtest decided");
    }
}

/// Notifier that keeps everything it receives, for assertions.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    tier_changes: Arc<Mutex<Vec<(UserId, TierChangeRecord)>>>,
    decisions: Arc<Mutex<Vec<PlaytestEvent>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tier_changes(&self) -> Vec<(UserId, TierChangeRecord)> {
        self.tier_changes.lock().clone()
    }

    pub fn decisions(&self) -> Vec<PlaytestEvent> {
        self.decisions.lock().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn tier_changed(&self, user_id: UserId, change: &TierChangeRecord) {
        self.tier_changes.lock().push((user_id, change.clone()));
    }

    fn playtest_decided(&self, event: &PlaytestEvent) {
        self.decisions.lock().push(event.clone());
    }
}
