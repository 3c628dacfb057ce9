//! # gpk-cli: The `genji` Command-Line Tool
//!
//! Thin front end over the engine crates, for moderators and for checking
//! configuration changes before they ship.
//!
//! ## Subcommands
//!
//! - `genji difficulty <raw>`: tier, label and vote requirement of a value.
//! - `genji midpoint <label>` / `genji midpoint --tier <tier>`.
//! - `genji xp classify <xp>` / `genji xp diff <old> <new>`.
//! - `genji medal --time <t> ...`: medal and rank of a completion time.
//! - `genji config check`: load and validate the engine config.
//! - `genji playtest replay <file.json>`: run a command log through the
//!   review service.
//!
//! Every subcommand prints pretty JSON on stdout; logs go to stderr.

pub mod classify;
pub mod config;
pub mod medal;
pub mod playtest;

use anyhow::Result;
use serde::Serialize;

/// Print `value` as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
