//! # gpk-core: Foundational Types for the Genji Parkour Engine
//!
//! Leaf crate of the workspace. Every other `gpk-*` crate depends on it; it
//! depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for identifiers.** `MapCode`, `UserId`, `ThreadId`.
//!    A voter id cannot be passed where a thread id is expected.
//!
//! 2. **Validated construction.** `MapCode::new()` rejects anything that is
//!    not 4–6 uppercase ASCII letters or digits, so every downstream crate
//!    can treat a `MapCode` as already checked.
//!
//! ## Crate Policy
//!
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod identity;
pub mod text;

pub use error::CoreError;
pub use identity::{MapCode, ThreadId, UserId};
pub use text::sanitize_string;
