// Path: crates/reconcile/src/lib.rs
#![forbid(unsafe_code)]
#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::unimplemented,
        clippy::todo,
        clippy::indexing_slicing
    )
)]

//! # Vuls UUID Reconciliation
//!
//! Guarantees every scan target (host, container, image) carries a valid UUID,
//! strips per-server settings that merely repeat `[default]`, and rewrites
//! `config.toml` while keeping the previous version as `config.toml.bak`.
//!
//! A run is a single sequential pass:
//!
//! 1. [`sort`] orders the batch (server name, then container ID).
//! 2. [`identity`] assigns or repairs each target's UUID in both the result
//!    and the server's `uuids` table.
//! 3. [`normalize`] elides fields equal to the default, once per server.
//! 4. [`persist`] renders the document and commits it to disk.
//!
//! [`reconcile::Reconciler`] drives steps 1–3 and [`reconcile::ensure_uuids`]
//! adds step 4.

/// Identifier validation, generation and per-target resolution.
pub mod identity;
/// Loading `config.toml` into an expanded [`vuls_types::config::ConfigDocument`].
pub mod loader;
/// Default elision and its inverse, inheritance.
pub mod normalize;
/// Rendering and safely replacing the configuration file.
pub mod persist;
/// The reconciliation driver.
pub mod reconcile;
/// Reading and writing scan result JSON files.
pub mod results;
/// Deterministic processing order for a batch of results.
pub mod sort;

pub use identity::{IdGenerator, IdentityResolver, UuidV4Generator};
pub use reconcile::{ensure_uuids, ReconcileReport, Reconciler};
