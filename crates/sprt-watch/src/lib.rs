//! SPRT Watch - live match statistics for engine-vs-engine test runs.
//!
//! A match runner appends finished games to a PGN results file. This crate
//! follows that file and reports win/draw counts, the Elo difference between
//! the two engines, its uncertainty and the likelihood of superiority.
//!
//! # Modules
//!
//! - [`config`] - `sprt-watch.toml` loading and validation
//! - [`pgn`] - results file parsing into game records
//! - [`watcher`] - incremental tracking of a growing results file
//! - [`report`] - text and JSON rendering of a match snapshot

pub mod config;
pub mod pgn;
pub mod report;
pub mod watcher;
