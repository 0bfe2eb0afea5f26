//! The state accessor trait.

use std::sync::Arc;

use seth_domain::{Account, SequenceExhausted, contract_address};
use seth_primitives::Address;

use crate::StateError;

/// Read and write access to ledger accounts.
///
/// Implementations use interior mutability so a single handle can be shared
/// between the processor and the execution engine.
pub trait StateAccessor {
    /// Fetch the account at `address`, or `None` if it does not exist.
    fn get_account(&self, address: &Address) -> Result<Option<Account>, StateError>;

    /// Persist `account`, creating or replacing the entry at its address.
    fn update_account(&self, account: &Account) -> Result<(), StateError>;

    /// Derive a fresh account created by `creator` and advance the creator's sequence.
    ///
    /// The returned account starts at sequence 1 with no code and an empty permission
    /// record. The address is derived from the creator's sequence before the increment.
    /// Nothing is persisted; the caller writes both accounts once every check has passed.
    /// A creator whose sequence cannot advance is left untouched.
    fn create_account(&self, creator: &mut Account) -> Result<Account, SequenceExhausted> {
        let address = contract_address(&creator.address, creator.sequence);
        creator.increment_sequence()?;
        Ok(Account::new(address, 1))
    }
}

impl<T: StateAccessor + ?Sized> StateAccessor for &T {
    fn get_account(&self, address: &Address) -> Result<Option<Account>, StateError> {
        (**self).get_account(address)
    }

    fn update_account(&self, account: &Account) -> Result<(), StateError> {
        (**self).update_account(account)
    }

    fn create_account(&self, creator: &mut Account) -> Result<Account, SequenceExhausted> {
        (**self).create_account(creator)
    }
}

impl<T: StateAccessor + ?Sized> StateAccessor for Arc<T> {
    fn get_account(&self, address: &Address) -> Result<Option<Account>, StateError> {
        (**self).get_account(address)
    }

    fn update_account(&self, account: &Account) -> Result<(), StateError> {
        (**self).update_account(account)
    }

    fn create_account(&self, creator: &mut Account) -> Result<Account, SequenceExhausted> {
        (**self).create_account(creator)
    }
}
