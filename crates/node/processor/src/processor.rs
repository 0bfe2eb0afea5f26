//! Transaction dispatch.

use seth_domain::{SethTransaction, TransactionKind};
use seth_executor::ExecutionEngine;
use seth_primitives::Address;
use seth_traits::StateAccessor;

use crate::{HandlerResult, handlers};

/// Transaction family handled by this processor.
pub const FAMILY_NAME: &str = "seth";

/// Version of the transaction family.
pub const FAMILY_VERSION: &str = "1.0";

/// Everything a handler needs to apply one transaction.
#[derive(Debug)]
pub struct TransitionContext<'a, S: ?Sized, E: ?Sized> {
    /// Ledger state.
    pub state: &'a S,
    /// Engine running contract code.
    pub engine: &'a E,
    /// Address that signed the transaction.
    pub sender: Address,
}

impl<'a, S: ?Sized, E: ?Sized> TransitionContext<'a, S, E> {
    /// Bundle the inputs of a transition.
    pub const fn new(state: &'a S, engine: &'a E, sender: Address) -> Self {
        Self { state, engine, sender }
    }
}

/// Applies seth transactions to ledger state.
#[derive(Clone, Debug, Default)]
pub struct TransactionProcessor<E> {
    engine: E,
}

impl<E: ExecutionEngine> TransactionProcessor<E> {
    /// Create a processor running contract code on `engine`.
    pub const fn new(engine: E) -> Self {
        Self { engine }
    }

    /// Returns the execution engine.
    pub const fn engine(&self) -> &E {
        &self.engine
    }

    /// Transaction family name.
    pub const fn family_name(&self) -> &'static str {
        FAMILY_NAME
    }

    /// Transaction family version.
    pub const fn family_version(&self) -> &'static str {
        FAMILY_VERSION
    }

    /// Transaction kinds this processor handles.
    pub const fn kinds(&self) -> &'static [TransactionKind] {
        &TransactionKind::ALL
    }

    /// Apply `tx` signed by `sender` to `state`.
    ///
    /// On error nothing has been written to `state`.
    pub fn apply<S: StateAccessor + ?Sized>(
        &self,
        tx: &SethTransaction,
        sender: &Address,
        state: &S,
    ) -> HandlerResult {
        let ctx = TransitionContext::new(state, &self.engine, *sender);
        let result = match tx {
            SethTransaction::CreateExternalAccount(tx) => {
                handlers::create_external_account(&ctx, tx)
            }
            SethTransaction::CreateContractAccount(tx) => {
                handlers::create_contract_account(&ctx, tx)
            }
            SethTransaction::MessageCall(tx) => handlers::message_call(&ctx, tx),
            SethTransaction::SetPermissions(tx) => handlers::set_permissions(&ctx, tx),
            SethTransaction::ReadOnlyMessageCall(tx) => handlers::read_only_message_call(&ctx, tx),
        };

        match &result {
            Ok(output) => {
                tracing::debug!(kind = %tx.kind(), %sender, gas_used = output.gas_used, "transaction applied");
            }
            Err(err) => {
                tracing::debug!(kind = %tx.kind(), %sender, class = %err.kind(), error = %err, "transaction rejected");
            }
        }
        result
    }
}
