//! # Collaborator Ports
//!
//! The engine owns no storage and sends no messages. Persistence and
//! notification are reached through these traits; the bot, the API and the
//! tests plug in their own adapters.
//!
//! ## Atomic Updates
//!
//! [`PlaytestStore::update_playtest`] and [`XpStore::update_xp`] are the
//! read-modify-write entry points the service uses. The default
//! implementations load, run the closure, and save only if the closure
//! succeeded. Adapters with real concurrency (a database, the in-memory
//! store) override them to hold a lock or transaction across the whole
//! sequence.

use gpk_core::{MapCode, UserId};
use gpk_progression::TierChangeRecord;
use gpk_state::{Playtest, PlaytestEvent};
use thiserror::Error;

/// Failures reported by a persistence adapter.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No playtest exists for the map.
    #[error("no playtest for map {code}")]
    PlaytestNotFound { code: MapCode },

    /// A playtest for the map already exists.
    #[error("a playtest for map {code} already exists")]
    PlaytestExists { code: MapCode },

    /// Backend failure, described by the adapter.
    #[error("store backend error: {0}")]
    Backend(String),
}

/// Playtest persistence.
pub trait PlaytestStore: Send + Sync {
    /// Store a new playtest. Fails if the map already has one.
    fn insert(&self, playtest: Playtest) -> Result<(), StoreError>;

    /// Load the playtest for `code`.
    fn load_playtest(&self, code: &MapCode) -> Result<Playtest, StoreError>;

    /// Overwrite the stored playtest with the same code.
    fn save_playtest(&self, playtest: &Playtest) -> Result<(), StoreError>;

    /// Read-modify-write one playtest. Nothing is saved if `f` fails.
    fn update_playtest<R, E>(
        &self,
        code: &MapCode,
        f: impl FnOnce(&mut Playtest) -> Result<R, E>,
    ) -> Result<R, E>
    where
        E: From<StoreError>,
    {
        let mut playtest = self.load_playtest(code)?;
        let result = f(&mut playtest)?;
        self.save_playtest(&playtest)?;
        Ok(result)
    }
}

/// XP total persistence. Users with no stored total have 0 XP.
pub trait XpStore: Send + Sync {
    fn load_xp(&self, user_id: UserId) -> Result<u64, StoreError>;

    fn save_xp(&self, user_id: UserId, amount: u64) -> Result<(), StoreError>;

    /// Read-modify-write one total. `f` maps the previous total to the new
    /// total plus a result; nothing is saved if it fails.
    fn update_xp<R, E>(
        &self,
        user_id: UserId,
        f: impl FnOnce(u64) -> Result<(u64, R), E>,
    ) -> Result<R, E>
    where
        E: From<StoreError>,
    {
        let previous = self.load_xp(user_id)?;
        let (new_amount, result) = f(previous)?;
        self.save_xp(user_id, new_amount)?;
        Ok(result)
    }
}

/// Outbound notifications. Delivery is fire-and-forget: failures are the
/// adapter's to log and never roll back the engine's state.
pub trait Notifier: Send + Sync {
    /// A user moved to a different sub-tier, main tier, or prestige level.
    fn tier_changed(&self, user_id: UserId, change: &TierChangeRecord);

    /// A verifier decided on a playtest (approve, force accept, force deny,
    /// or reset).
    fn playtest_decided(&self, event: &PlaytestEvent);
}
