use seth_domain::{CreateContractAccount, PermFlags};
use seth_executor::{EngineCall, EngineOutcome, ExecutionEngine};
use seth_primitives::hex;
use seth_traits::StateAccessor;
use tracing::debug;

use super::{check_nonce, creation_permissions, engine_effects, load_sender, require};
use crate::{HandlerResult, TransitionContext, TransitionError, TransitionOutput};

/// Deploy a contract account.
///
/// The address is derived from the sender and its current sequence. The init
/// code runs as a construction by the sender against the latest state, and its
/// output becomes the runtime code. The new account ends at sequence 2.
pub fn create_contract_account<S, E>(
    ctx: &TransitionContext<'_, S, E>,
    tx: &CreateContractAccount,
) -> HandlerResult
where
    S: StateAccessor + ?Sized,
    E: ExecutionEngine + ?Sized,
{
    let mut sender = load_sender(ctx)?;
    require(ctx, &sender, PermFlags::CREATE_CONTRACT)?;
    check_nonce(tx.nonce, &sender)?;
    let permissions = creation_permissions(ctx, &sender, tx.permissions)?;

    let creator = sender.clone();
    let mut contract = ctx.state.create_account(&mut sender)?;
    if ctx.state.get_account(&contract.address)?.is_some() {
        return Err(TransitionError::AccountExists(contract.address));
    }

    let call = EngineCall::create(creator, tx.init.clone(), tx.gas_limit);
    let EngineOutcome { output, gas_used, mut accounts } = ctx.engine.execute(ctx.state, call)?;

    if let Some(updated) = accounts.remove(&sender.address) {
        sender.merge_engine_state(updated);
    }
    if let Some(updated) = accounts.remove(&contract.address) {
        contract.merge_engine_state(updated);
    }
    contract.increment_sequence()?;
    contract.code = output.clone();
    contract.permissions = permissions;
    let effects = engine_effects(ctx, accounts)?;

    debug!(
        address = %contract.address,
        gas_used,
        code = %hex::encode(&contract.code),
        "created contract account"
    );

    ctx.state.update_account(&sender)?;
    ctx.state.update_account(&contract)?;
    for account in &effects {
        ctx.state.update_account(account)?;
    }
    Ok(TransitionOutput::executed(output, gas_used).with_new_account(contract))
}
