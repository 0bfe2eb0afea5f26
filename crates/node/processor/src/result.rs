//! Transition results.

use seth_domain::Account;
use seth_primitives::Bytes;

use crate::TransitionError;

/// Outcome of a single transition.
pub type HandlerResult = Result<TransitionOutput, TransitionError>;

/// Payload of a successful transition.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransitionOutput {
    /// Account created by the transition, if any.
    pub new_account: Option<Account>,
    /// Bytes returned by the execution engine.
    pub return_value: Bytes,
    /// Gas consumed by the execution engine.
    pub gas_used: u64,
}

impl TransitionOutput {
    /// A payload reporting nothing.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// A payload reporting a newly created account.
    #[must_use]
    pub fn created(account: Account) -> Self {
        Self { new_account: Some(account), ..Default::default() }
    }

    /// A payload reporting engine output.
    #[must_use]
    pub fn executed(return_value: Bytes, gas_used: u64) -> Self {
        Self { new_account: None, return_value, gas_used }
    }

    /// Attach the created account.
    #[must_use]
    pub fn with_new_account(mut self, account: Account) -> Self {
        self.new_account = Some(account);
        self
    }
}
