//! # Review Counters
//!
//! In-process atomic counters. Clones share the same counters.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Shared counters updated by the review service.
#[derive(Debug, Clone, Default)]
pub struct ReviewMetrics {
    pub votes_cast: Arc<AtomicU64>,
    pub votes_removed: Arc<AtomicU64>,
    pub decisions: Arc<AtomicU64>,
    pub rejected_commands: Arc<AtomicU64>,
    pub xp_grants: Arc<AtomicU64>,
    pub xp_awarded: Arc<AtomicU64>,
}

/// Point-in-time copy of [`ReviewMetrics`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub votes_cast: u64,
    pub votes_removed: u64,
    pub decisions: u64,
    pub rejected_commands: u64,
    pub xp_grants: u64,
    pub xp_awarded: u64,
}

impl ReviewMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn incr(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_grant(&self, amount: u64) {
        self.xp_grants.fetch_add(1, Ordering::Relaxed);
        self.xp_awarded.fetch_add(amount, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            votes_cast: self.votes_cast.load(Ordering::Relaxed),
            votes_removed: self.votes_removed.load(Ordering::Relaxed),
            decisions: self.decisions.load(Ordering::Relaxed),
            rejected_commands: self.rejected_commands.load(Ordering::Relaxed),
            xp_grants: self.xp_grants.load(Ordering::Relaxed),
            xp_awarded: self.xp_awarded.load(Ordering::Relaxed),
        }
    }
}
