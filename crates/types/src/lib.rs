// Path: crates/types/src/lib.rs
#![forbid(unsafe_code)]
#![deny(missing_docs)]
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

//! # Vuls Reconciliation Types
//!
//! This crate is the foundational library for UUID reconciliation, containing
//! the scan result model, the persisted configuration document and all error
//! types.
//!
//! ## Architectural Role
//!
//! `vuls-types` has minimal dependencies and is a dependency of every other
//! crate in the workspace. Keeping the data model here lets the reconciliation
//! logic and the CLI agree on one canonical shape for `ScanResult`,
//! `ServerInfo` and `ConfigDocument` without circular dependencies.

/// A top-level, crate-wide `Result` type alias with a default error type.
pub type Result<T, E = crate::error::ConfigError> = std::result::Result<T, E>;

/// The persisted configuration document (`config.toml`) and its sub-blocks.
pub mod config;
/// A unified set of all error types used across the workspace.
pub mod error;
/// Scan result models consumed by the reconciliation run.
pub mod scan;
