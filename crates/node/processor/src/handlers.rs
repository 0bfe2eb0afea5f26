//! Transition handlers, one per transaction kind.
//!
//! Each handler resolves every check against the state it reads before it
//! issues the first write. The writes at the end of a handler cannot be
//! rejected by this layer.

mod call;
pub use call::{message_call, read_only_message_call};

mod contract;
pub use contract::create_contract_account;

mod external;
pub use external::create_external_account;

mod permissions;
pub use permissions::set_permissions;

use std::collections::BTreeMap;

use seth_domain::{Account, AccountPermissions, EvmPermissions, PermFlags, parse_address};
use seth_primitives::Address;
use seth_traits::StateAccessor;

use crate::{TransitionContext, TransitionError, has_permission};

/// Fetch the sender account.
fn load_sender<S, E>(ctx: &TransitionContext<'_, S, E>) -> Result<Account, TransitionError>
where
    S: StateAccessor + ?Sized,
    E: ?Sized,
{
    ctx.state.get_account(&ctx.sender)?.ok_or(TransitionError::SenderNotFound(ctx.sender))
}

/// Fetch the account named by a raw address field.
fn load_receiver<S, E>(
    ctx: &TransitionContext<'_, S, E>,
    raw: &[u8],
) -> Result<Account, TransitionError>
where
    S: StateAccessor + ?Sized,
    E: ?Sized,
{
    let address = parse_address(raw)?;
    ctx.state.get_account(&address)?.ok_or(TransitionError::ReceiverNotFound(address))
}

/// Fail unless `account` holds `flag`.
fn require<S, E>(
    ctx: &TransitionContext<'_, S, E>,
    account: &Account,
    flag: PermFlags,
) -> Result<(), TransitionError>
where
    S: StateAccessor + ?Sized,
    E: ?Sized,
{
    if has_permission(ctx.state, account, flag)? {
        Ok(())
    } else {
        Err(TransitionError::PermissionDenied { account: account.address, flag })
    }
}

/// Fail unless the declared nonce is the account's sequence.
const fn check_nonce(nonce: u64, account: &Account) -> Result<(), TransitionError> {
    if nonce == account.sequence {
        Ok(())
    } else {
        Err(TransitionError::NonceMismatch { transaction: nonce, state: account.sequence })
    }
}

/// Permission record for an account created by `creator`.
///
/// Without a requested record the creator's own record is inherited with
/// `ROOT` forced off. Installing a requested record requires `ROOT`.
fn creation_permissions<S, E>(
    ctx: &TransitionContext<'_, S, E>,
    creator: &Account,
    requested: Option<EvmPermissions>,
) -> Result<AccountPermissions, TransitionError>
where
    S: StateAccessor + ?Sized,
    E: ?Sized,
{
    match requested {
        None => Ok(creator.permissions.without_root()),
        Some(record) => {
            require(ctx, creator, PermFlags::ROOT)?;
            Ok(record.into())
        }
    }
}

/// Ledger records for accounts an engine call changed besides its parties.
///
/// Accounts already in the ledger keep their sequence, code and permissions.
/// Everything is read here so the caller can issue all writes afterwards.
fn engine_effects<S, E>(
    ctx: &TransitionContext<'_, S, E>,
    changed: BTreeMap<Address, Account>,
) -> Result<Vec<Account>, TransitionError>
where
    S: StateAccessor + ?Sized,
    E: ?Sized,
{
    changed
        .into_values()
        .map(|updated| {
            Ok(match ctx.state.get_account(&updated.address)? {
                Some(mut known) => {
                    known.merge_engine_state(updated);
                    known
                }
                None => updated,
            })
        })
        .collect()
}
