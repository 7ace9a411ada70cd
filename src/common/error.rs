//! Harness Errors.
//!
//! A functional mismatch between the DUT and the reference model is a
//! finding, not an error, and never appears here. These variants cover the
//! conditions that stop the harness itself from doing its job: unreadable
//! configuration, illegal wiring, and failed report output.

use std::path::PathBuf;

use thiserror::Error;

use crate::soc::Signal;

/// Errors raised by the verification harness.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// The configuration file could not be read.
    #[error("failed to read config '{path}': {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for [`crate::config::Config`].
    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// A configuration value violates a harness invariant.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// An operation selector outside `0..=3`.
    #[error("illegal operation selector {0}")]
    IllegalOp(u8),

    /// The driver attempted to write one of the DUT outputs.
    #[error("signal '{0}' is read-only")]
    ReadOnlySignal(Signal),

    /// A fault description could not be parsed.
    #[error("invalid fault '{0}': expected a,b,op,out[,c]")]
    InvalidFault(String),

    /// A producer tried to hand off on a mailbox whose consumer is gone.
    #[error("mailbox '{0}' is closed")]
    MailboxClosed(&'static str),

    /// The coverage report could not be written.
    #[error("failed to export coverage to '{path}': {source}")]
    CoverageExport {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The coverage report could not be serialized.
    #[error("failed to serialize coverage: {0}")]
    CoverageSerialize(#[from] serde_json::Error),

    /// The simulation runtime could not be started.
    #[error("failed to start simulation runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

/// Result alias used across the harness.
pub type HarnessResult<T> = Result<T, HarnessError>;
