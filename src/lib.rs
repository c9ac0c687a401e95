//! Bitconf: Deterministic Bitcoin Daemon Configuration
//!
//! Manages persistent settings for a bitcoind instance: merges partial
//! updates over immutable defaults, renders the result into the daemon's
//! config syntax, and reconciles the rendered text against the files on
//! disk without clobbering user-owned content.

pub mod api;
pub mod constants;
pub mod error;
pub mod logging;
pub mod reconcile;
pub mod render;
pub mod settings;
pub mod store;
