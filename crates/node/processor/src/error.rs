//! Transition error types.

use std::fmt;

use seth_domain::{AddressError, PermFlags, SequenceExhausted};
use seth_executor::EngineError;
use seth_primitives::Address;
use seth_traits::StateError;
use thiserror::Error;

/// Reasons a transaction is rejected.
///
/// None of these are fatal to the processor; the transaction is reported as
/// invalid and state is left untouched.
#[derive(Debug, Error)]
pub enum TransitionError {
    /// The sending account does not exist.
    #[error("sender account does not exist: {0}")]
    SenderNotFound(Address),

    /// The target account does not exist.
    #[error("receiver account does not exist: {0}")]
    ReceiverNotFound(Address),

    /// An account already occupies the address to create.
    #[error("account already exists at address {0}")]
    AccountExists(Address),

    /// The account lacks a required permission.
    #[error("account {account} does not have {} permission", .flag.name())]
    PermissionDenied {
        /// Account that was checked.
        account: Address,
        /// Missing permission.
        flag: PermFlags,
    },

    /// The transaction nonce is not the sender's sequence.
    #[error("nonces do not match: transaction ({transaction}), state ({state})")]
    NonceMismatch {
        /// Nonce declared by the transaction.
        transaction: u64,
        /// Current sequence of the sender.
        state: u64,
    },

    /// The sender's sequence cannot advance any further.
    #[error(transparent)]
    SequenceExhausted(#[from] SequenceExhausted),

    /// A permission update carried no permission record.
    #[error("permissions field cannot be blank")]
    MissingPermissions,

    /// A raw address field has the wrong length.
    #[error("malformed address: {0}")]
    AddressMalformed(#[from] AddressError),

    /// The execution engine rejected the call.
    #[error("execution failed: {0}")]
    ExecutionFailed(#[from] EngineError),

    /// Reading or writing an account failed.
    #[error("state access failed: {0}")]
    StateAccess(#[from] StateError),
}

impl TransitionError {
    /// Returns the classification of this error.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::SenderNotFound(_) => ErrorKind::SenderNotFound,
            Self::ReceiverNotFound(_) => ErrorKind::ReceiverNotFound,
            Self::AccountExists(_) => ErrorKind::AccountExists,
            Self::PermissionDenied { .. } => ErrorKind::PermissionDenied,
            Self::NonceMismatch { .. } => ErrorKind::NonceMismatch,
            Self::SequenceExhausted(_) => ErrorKind::SequenceExhausted,
            Self::MissingPermissions => ErrorKind::MissingPermissions,
            Self::AddressMalformed(_) => ErrorKind::AddressMalformed,
            Self::ExecutionFailed(_) => ErrorKind::ExecutionFailed,
            Self::StateAccess(_) => ErrorKind::StateAccessError,
        }
    }
}

/// Field-less classification of a [`TransitionError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`TransitionError::SenderNotFound`].
    SenderNotFound,
    /// See [`TransitionError::ReceiverNotFound`].
    ReceiverNotFound,
    /// See [`TransitionError::AccountExists`].
    AccountExists,
    /// See [`TransitionError::PermissionDenied`].
    PermissionDenied,
    /// See [`TransitionError::NonceMismatch`].
    NonceMismatch,
    /// See [`TransitionError::SequenceExhausted`].
    SequenceExhausted,
    /// See [`TransitionError::MissingPermissions`].
    MissingPermissions,
    /// See [`TransitionError::AddressMalformed`].
    AddressMalformed,
    /// See [`TransitionError::ExecutionFailed`].
    ExecutionFailed,
    /// See [`TransitionError::StateAccess`].
    StateAccessError,
}

impl ErrorKind {
    /// Returns the name of this classification.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SenderNotFound => "sender_not_found",
            Self::ReceiverNotFound => "receiver_not_found",
            Self::AccountExists => "account_exists",
            Self::PermissionDenied => "permission_denied",
            Self::NonceMismatch => "nonce_mismatch",
            Self::SequenceExhausted => "sequence_exhausted",
            Self::MissingPermissions => "missing_permissions",
            Self::AddressMalformed => "address_malformed",
            Self::ExecutionFailed => "execution_failed",
            Self::StateAccessError => "state_access_error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use seth_domain::parse_address;
    use seth_primitives::Bytes;

    use super::*;

    #[test]
    fn nonce_mismatch_display() {
        let err = TransitionError::NonceMismatch { transaction: 3, state: 1 };
        assert_eq!(err.to_string(), "nonces do not match: transaction (3), state (1)");
    }

    #[test]
    fn permission_denied_names_flag() {
        let err = TransitionError::PermissionDenied {
            account: Address::ZERO,
            flag: PermFlags::CREATE_CONTRACT,
        };
        assert_eq!(
            err.to_string(),
            format!("account {} does not have create_contract permission", Address::ZERO)
        );
    }

    #[test]
    fn address_error_from() {
        let err: TransitionError = parse_address(&[0u8; 3]).unwrap_err().into();
        assert_eq!(err.kind(), ErrorKind::AddressMalformed);
        assert_eq!(err.to_string(), "malformed address: expected 20 address bytes, got 3");
    }

    #[test]
    fn engine_error_keeps_message() {
        let err: TransitionError =
            EngineError::Reverted { gas_used: 5, output: Bytes::new() }.into();
        assert_eq!(err.kind(), ErrorKind::ExecutionFailed);
        assert!(err.to_string().starts_with("execution failed: execution reverted"));
    }

    #[test]
    fn state_error_from() {
        let err: TransitionError = StateError::LockPoisoned.into();
        assert_eq!(err.kind(), ErrorKind::StateAccessError);
        assert_eq!(err.to_string(), "state access failed: lock poisoned");
    }

    #[test]
    fn sequence_exhausted_from() {
        let err: TransitionError = SequenceExhausted(Address::ZERO).into();
        assert_eq!(err.kind(), ErrorKind::SequenceExhausted);
        assert_eq!(err.to_string(), format!("sequence of account {} is exhausted", Address::ZERO));
    }

    #[rstest]
    #[case(TransitionError::SenderNotFound(Address::ZERO), "sender_not_found")]
    #[case(TransitionError::ReceiverNotFound(Address::ZERO), "receiver_not_found")]
    #[case(TransitionError::AccountExists(Address::ZERO), "account_exists")]
    #[case(TransitionError::SequenceExhausted(SequenceExhausted(Address::ZERO)), "sequence_exhausted")]
    #[case(TransitionError::MissingPermissions, "missing_permissions")]
    fn kind_names(#[case] err: TransitionError, #[case] name: &str) {
        assert_eq!(err.kind().to_string(), name);
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TransitionError>();
    }
}
