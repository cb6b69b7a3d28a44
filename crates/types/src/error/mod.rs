// Path: crates/types/src/error/mod.rs
//! Core error types for UUID reconciliation.

use std::path::PathBuf;
use thiserror::Error;

/// A trait for assigning a stable, machine-readable string code to an error.
pub trait ErrorCode {
    /// Returns the unique, stable string identifier for this error variant.
    fn code(&self) -> &'static str;
}

/// Errors raised while validating a stored identifier.
///
/// These never abort a run: the resolver logs them and generates a
/// replacement.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentityError {
    /// The stored value is not a canonical 8-4-4-4-12 hex UUID.
    #[error("UUID is invalid for {key}: {value:?}")]
    InvalidFormat {
        /// The identity key the value was stored under.
        key: String,
        /// The rejected value.
        value: String,
    },
}

impl ErrorCode for IdentityError {
    fn code(&self) -> &'static str {
        match self {
            Self::InvalidFormat { .. } => "IDENTITY_INVALID_FORMAT",
        }
    }
}

/// Errors related to loading or persisting the configuration document.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// `lstat` on the configuration path failed.
    #[error("Failed to lstat {path}: {source}")]
    Lstat {
        /// The path given by the caller.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The configuration path is a symlink that could not be read.
    #[error("Failed to read link {path}: {source}")]
    ReadLink {
        /// The symlink path.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Moving the live configuration to its backup failed.
    #[error("Failed to rename {from} to {to}: {source}")]
    Rename {
        /// The live configuration file.
        from: PathBuf,
        /// The backup destination.
        to: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Writing the rewritten configuration failed.
    #[error("Failed to write {path}: {source}")]
    Write {
        /// The file being written.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Reading the configuration file failed.
    #[error("Failed to read {path}: {source}")]
    Read {
        /// The file being read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The configuration file is not valid TOML for the document shape.
    #[error("Failed to decode {path}: {source}")]
    Decode {
        /// The file being decoded.
        path: PathBuf,
        /// The underlying decoder error.
        #[source]
        source: toml::de::Error,
    },
    /// The document could not be encoded to TOML.
    #[error("Failed to encode to toml: {0}")]
    Encode(#[from] toml::ser::Error),
}

impl ErrorCode for ConfigError {
    fn code(&self) -> &'static str {
        match self {
            Self::Lstat { .. } => "CONFIG_LSTAT_FAILED",
            Self::ReadLink { .. } => "CONFIG_READLINK_FAILED",
            Self::Rename { .. } => "CONFIG_RENAME_FAILED",
            Self::Write { .. } => "CONFIG_WRITE_FAILED",
            Self::Read { .. } => "CONFIG_READ_FAILED",
            Self::Decode { .. } => "CONFIG_DECODE_FAILED",
            Self::Encode(_) => "CONFIG_ENCODE_FAILED",
        }
    }
}

/// Errors related to reading and writing scan result files.
#[derive(Error, Debug)]
pub enum ResultError {
    /// The results directory could not be listed.
    #[error("Failed to read results directory {path}: {source}")]
    ReadDir {
        /// The results directory.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// A result file could not be read.
    #[error("Failed to read {path}: {source}")]
    Read {
        /// The result file.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// A result file is not a valid scan result.
    #[error("Failed to parse {path}: {source}")]
    Decode {
        /// The result file.
        path: PathBuf,
        /// The underlying decoder error.
        #[source]
        source: serde_json::Error,
    },
    /// A scan result could not be encoded.
    #[error("Failed to encode scan result for {path}: {source}")]
    Encode {
        /// The destination file.
        path: PathBuf,
        /// The underlying encoder error.
        #[source]
        source: serde_json::Error,
    },
    /// A result file could not be written.
    #[error("Failed to write {path}: {source}")]
    Write {
        /// The result file.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl ErrorCode for ResultError {
    fn code(&self) -> &'static str {
        match self {
            Self::ReadDir { .. } => "RESULT_READ_DIR_FAILED",
            Self::Read { .. } => "RESULT_READ_FAILED",
            Self::Decode { .. } => "RESULT_DECODE_FAILED",
            Self::Encode { .. } => "RESULT_ENCODE_FAILED",
            Self::Write { .. } => "RESULT_WRITE_FAILED",
        }
    }
}
