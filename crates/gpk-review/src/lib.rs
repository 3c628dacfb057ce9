//! # gpk-review: Review Orchestration
//!
//! Wires the pure engine crates to the outside world.
//!
//! - **Config** (`config.rs`): YAML loading of every table, `GENJI_CONFIG`.
//! - **Ports** (`ports.rs`): persistence and notification traits.
//! - **Memory** (`memory.rs`): `parking_lot`-backed adapters for the ports.
//! - **Service** (`service.rs`): routes playtest commands, grants XP on
//!   approval, and emits notifications.
//! - **Metrics** (`metrics.rs`): in-process counters.
//!
//! ## Crate Policy
//!
//! - Library code logs through `tracing` and never installs a subscriber.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod config;
pub mod memory;
pub mod metrics;
pub mod ports;
pub mod service;

pub use config::{ConfigError, EngineConfig, CONFIG_ENV_VAR};
pub use memory::{LogNotifier, MemoryPlaytestStore, MemoryStore, MemoryXpStore, RecordingNotifier};
pub use metrics::{MetricsSnapshot, ReviewMetrics};
pub use ports::{Notifier, PlaytestStore, StoreError, XpStore};
pub use service::{ReviewError, ReviewOutcome, ReviewService};
