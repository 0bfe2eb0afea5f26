//! Core execution traits.

use seth_traits::StateAccessor;

use crate::{EngineCall, EngineError, EngineOutcome};

/// Runs contract code on behalf of the state transition logic.
///
/// Implementations must be deterministic: the same call against the same state
/// always yields the same outcome. `state` is only read; the caller decides
/// whether to persist the accounts in the outcome.
pub trait ExecutionEngine: Send + Sync {
    /// Execute `call` against `state` and return the output together with every changed account.
    fn execute<S: StateAccessor + ?Sized>(
        &self,
        state: &S,
        call: EngineCall,
    ) -> Result<EngineOutcome, EngineError>;
}

impl<E: ExecutionEngine + ?Sized> ExecutionEngine for &E {
    fn execute<S: StateAccessor + ?Sized>(
        &self,
        state: &S,
        call: EngineCall,
    ) -> Result<EngineOutcome, EngineError> {
        (**self).execute(state, call)
    }
}

impl<E: ExecutionEngine + ?Sized> ExecutionEngine for std::sync::Arc<E> {
    fn execute<S: StateAccessor + ?Sized>(
        &self,
        state: &S,
        call: EngineCall,
    ) -> Result<EngineOutcome, EngineError> {
        (**self).execute(state, call)
    }
}
