use seth_domain::{Account, AccountPermissions, CreateExternalAccount, PermFlags, parse_address};
use seth_traits::StateAccessor;
use tracing::{debug, warn};

use super::{check_nonce, creation_permissions, load_sender, require};
use crate::{
    GlobalPermissions, HandlerResult, TransitionContext, TransitionError, TransitionOutput,
    has_permission,
};

/// Register an external account.
///
/// With a target address the sender sponsors a new account there. Without
/// one the sender registers its own address, drawing permissions from the
/// global record.
pub fn create_external_account<S, E>(
    ctx: &TransitionContext<'_, S, E>,
    tx: &CreateExternalAccount,
) -> HandlerResult
where
    S: StateAccessor + ?Sized,
    E: ?Sized,
{
    match tx.target() {
        Some(target) => create_sponsored(ctx, tx, target),
        None => create_self(ctx),
    }
}

fn create_sponsored<S, E>(
    ctx: &TransitionContext<'_, S, E>,
    tx: &CreateExternalAccount,
    target: &[u8],
) -> HandlerResult
where
    S: StateAccessor + ?Sized,
    E: ?Sized,
{
    let mut sender = load_sender(ctx)?;
    require(ctx, &sender, PermFlags::CREATE_ACCOUNT)?;
    check_nonce(tx.nonce, &sender)?;

    let address = parse_address(target)?;
    debug!(%address, sponsor = %sender.address, "creating external account");
    if ctx.state.get_account(&address)?.is_some() {
        return Err(TransitionError::AccountExists(address));
    }

    let permissions = creation_permissions(ctx, &sender, tx.permissions)?;
    let account = Account::new(address, 1).with_permissions(permissions);
    sender.increment_sequence()?;

    ctx.state.update_account(&sender)?;
    ctx.state.update_account(&account)?;
    Ok(TransitionOutput::created(account))
}

fn create_self<S, E>(ctx: &TransitionContext<'_, S, E>) -> HandlerResult
where
    S: StateAccessor + ?Sized,
    E: ?Sized,
{
    let address = ctx.sender;
    debug!(%address, "creating external account at sender address");
    if ctx.state.get_account(&address)?.is_some() {
        return Err(TransitionError::AccountExists(address));
    }

    let permissions = match GlobalPermissions::load(ctx.state)? {
        GlobalPermissions::Bootstrap => {
            warn!("global permissions not set, all actions allowed");
            AccountPermissions::all_granted()
        }
        GlobalPermissions::Configured(global) => {
            if !has_permission(ctx.state, &global, PermFlags::CREATE_ACCOUNT)? {
                return Err(TransitionError::PermissionDenied {
                    account: address,
                    flag: PermFlags::CREATE_ACCOUNT,
                });
            }
            global.permissions.without_root()
        }
    };

    let account = Account::new(address, 1).with_permissions(permissions);
    ctx.state.update_account(&account)?;
    Ok(TransitionOutput::created(account))
}
