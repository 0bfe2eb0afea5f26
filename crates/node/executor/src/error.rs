//! Engine error types.

use revm::database_interface::DBErrorMarker;
use seth_primitives::Bytes;
use seth_traits::StateError;
use thiserror::Error;

/// Errors that can occur while executing contract code.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The call requested more gas than the engine allows.
    #[error("gas limit {requested} exceeds maximum {max}")]
    GasLimitExceeded {
        /// Requested gas limit.
        requested: u64,
        /// Configured maximum.
        max: u64,
    },

    /// The call was rejected before any code ran.
    #[error("invalid call: {0}")]
    Invalid(String),

    /// Contract code reverted.
    #[error("execution reverted after {gas_used} gas: {output}")]
    Reverted {
        /// Gas consumed before the revert.
        gas_used: u64,
        /// Revert data.
        output: Bytes,
    },

    /// Execution halted abnormally, for example by running out of gas.
    #[error("execution halted after {gas_used} gas: {reason}")]
    Halted {
        /// Gas consumed.
        gas_used: u64,
        /// Halt reason.
        reason: String,
    },

    /// The engine could not serve a lookup.
    #[error("database error: {0}")]
    Database(String),

    /// Reading ledger state failed.
    #[error("state read failed: {0}")]
    State(#[from] StateError),
}

impl DBErrorMarker for EngineError {}
