use seth_domain::{
    Account, AccountPermissions, GLOBAL_PERMISSIONS_ADDRESS, PermFlags, SetPermissions,
    parse_address,
};
use seth_traits::StateAccessor;
use tracing::debug;

use super::{check_nonce, load_sender, require};
use crate::{HandlerResult, TransitionContext, TransitionError, TransitionOutput};

/// Overwrite the permission record of an account.
///
/// The target must exist, except for the global permission account which is
/// created on first use.
pub fn set_permissions<S, E>(
    ctx: &TransitionContext<'_, S, E>,
    tx: &SetPermissions,
) -> HandlerResult
where
    S: StateAccessor + ?Sized,
    E: ?Sized,
{
    let record = tx.permissions.ok_or(TransitionError::MissingPermissions)?;
    let permissions = AccountPermissions::from(record);

    let mut sender = load_sender(ctx)?;
    require(ctx, &sender, PermFlags::ROOT)?;
    check_nonce(tx.nonce, &sender)?;

    let address = parse_address(&tx.to)?;
    debug!(
        %address,
        perms = permissions.perms.bits(),
        set_bit = permissions.set_bit.bits(),
        "setting permissions"
    );

    if address == sender.address {
        sender.increment_sequence()?;
        sender.permissions = permissions;
        ctx.state.update_account(&sender)?;
        return Ok(TransitionOutput::empty());
    }

    let mut receiver = match ctx.state.get_account(&address)? {
        Some(account) => account,
        None if address == GLOBAL_PERMISSIONS_ADDRESS => Account::new(address, 1),
        None => return Err(TransitionError::ReceiverNotFound(address)),
    };

    sender.increment_sequence()?;
    receiver.permissions = permissions;

    ctx.state.update_account(&sender)?;
    ctx.state.update_account(&receiver)?;
    Ok(TransitionOutput::empty())
}
