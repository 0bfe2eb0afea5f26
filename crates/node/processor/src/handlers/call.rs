use seth_domain::{MessageCall, PermFlags, ReadOnlyMessageCall};
use seth_executor::{EngineCall, EngineOutcome, ExecutionEngine};
use seth_primitives::hex;
use seth_traits::StateAccessor;
use tracing::debug;

use super::{check_nonce, engine_effects, load_receiver, load_sender, require};
use crate::{HandlerResult, TransitionContext, TransitionOutput};

/// Call an existing account and persist the effects.
///
/// The sender's sequence advances by one. Engine-owned fields of every
/// account the call changed are taken from the engine outcome, including
/// contracts reached through nested calls.
pub fn message_call<S, E>(ctx: &TransitionContext<'_, S, E>, tx: &MessageCall) -> HandlerResult
where
    S: StateAccessor + ?Sized,
    E: ExecutionEngine + ?Sized,
{
    let mut sender = load_sender(ctx)?;
    require(ctx, &sender, PermFlags::CALL)?;
    check_nonce(tx.nonce, &sender)?;
    let mut receiver = load_receiver(ctx, &tx.to)?;

    let call = EngineCall::call(sender.clone(), receiver.clone(), tx.data.clone(), tx.gas_limit);
    sender.increment_sequence()?;

    let EngineOutcome { output, gas_used, mut accounts } = ctx.engine.execute(ctx.state, call)?;
    debug!(
        receiver = %receiver.address,
        gas_used,
        changed = accounts.len(),
        output = %hex::encode(&output),
        "message call executed"
    );

    if let Some(updated) = accounts.remove(&sender.address) {
        sender.merge_engine_state(updated);
    }
    let receiver_update = accounts.remove(&receiver.address);
    let effects = engine_effects(ctx, accounts)?;

    ctx.state.update_account(&sender)?;
    if receiver.address != sender.address {
        if let Some(updated) = receiver_update {
            receiver.merge_engine_state(updated);
        }
        ctx.state.update_account(&receiver)?;
    }
    for account in &effects {
        ctx.state.update_account(account)?;
    }

    Ok(TransitionOutput::executed(output, gas_used))
}

/// Call an existing account without persisting anything.
///
/// Runs against the block named by the transaction. No nonce is checked.
pub fn read_only_message_call<S, E>(
    ctx: &TransitionContext<'_, S, E>,
    tx: &ReadOnlyMessageCall,
) -> HandlerResult
where
    S: StateAccessor + ?Sized,
    E: ExecutionEngine + ?Sized,
{
    let sender = load_sender(ctx)?;
    require(ctx, &sender, PermFlags::CALL)?;
    let receiver = load_receiver(ctx, &tx.to)?;

    let call =
        EngineCall::call(sender, receiver, tx.data.clone(), tx.gas_limit).with_block(tx.block);
    let outcome = ctx.engine.execute(ctx.state, call)?;
    debug!(
        block = %tx.block,
        gas_used = outcome.gas_used,
        output = %hex::encode(&outcome.output),
        "read-only call executed"
    );

    Ok(TransitionOutput::executed(outcome.output, outcome.gas_used))
}
