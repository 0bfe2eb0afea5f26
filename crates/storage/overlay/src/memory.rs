//! Shared in-memory ledger.

use std::{
    collections::BTreeMap,
    sync::{Arc, RwLock},
};

use seth_domain::Account;
use seth_primitives::Address;
use seth_traits::{StateAccessor, StateError};

use crate::ChangeSet;

/// In-memory account store. Clones share the same underlying map.
#[derive(Clone, Debug, Default)]
pub struct MemoryState {
    accounts: Arc<RwLock<BTreeMap<Address, Account>>>,
}

impl MemoryState {
    /// Create an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a ledger seeded with `accounts`.
    pub fn with_accounts(accounts: impl IntoIterator<Item = Account>) -> Self {
        let map = accounts.into_iter().map(|a| (a.address, a)).collect();
        Self { accounts: Arc::new(RwLock::new(map)) }
    }

    /// Apply every write in `changes`.
    pub fn commit(&self, changes: ChangeSet) -> Result<(), StateError> {
        let mut accounts = self.accounts.write().map_err(|_| StateError::LockPoisoned)?;
        let count = changes.len();
        accounts.extend(changes.accounts);
        tracing::trace!(count, "committed account changes");
        Ok(())
    }

    /// Snapshot of every account in address order.
    pub fn accounts(&self) -> Result<Vec<Account>, StateError> {
        let accounts = self.accounts.read().map_err(|_| StateError::LockPoisoned)?;
        Ok(accounts.values().cloned().collect())
    }

    /// Number of stored accounts.
    pub fn len(&self) -> Result<usize, StateError> {
        Ok(self.accounts.read().map_err(|_| StateError::LockPoisoned)?.len())
    }

    /// Check if the ledger holds no accounts.
    pub fn is_empty(&self) -> Result<bool, StateError> {
        Ok(self.len()? == 0)
    }
}

impl StateAccessor for MemoryState {
    fn get_account(&self, address: &Address) -> Result<Option<Account>, StateError> {
        let accounts = self.accounts.read().map_err(|_| StateError::LockPoisoned)?;
        Ok(accounts.get(address).cloned())
    }

    fn update_account(&self, account: &Account) -> Result<(), StateError> {
        let mut accounts = self.accounts.write().map_err(|_| StateError::LockPoisoned)?;
        accounts.insert(account.address, account.clone());
        Ok(())
    }
}
