//! Account write tracking with merge capability.

use std::collections::{BTreeMap, btree_map};

use seth_domain::Account;
use seth_primitives::Address;

/// Account writes keyed by address. Later writes replace earlier ones.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChangeSet {
    /// Written accounts keyed by address.
    pub accounts: BTreeMap<Address, Account>,
}

impl ChangeSet {
    /// Create an empty change set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if there are no changes.
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Number of accounts with changes.
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Returns the pending write for `address`.
    pub fn get(&self, address: &Address) -> Option<&Account> {
        self.accounts.get(address)
    }

    /// Record a write of `account`.
    pub fn insert(&mut self, account: Account) {
        self.accounts.insert(account.address, account);
    }

    /// Merge a newer change set into this one.
    pub fn merge(&mut self, newer: Self) {
        self.accounts.extend(newer.accounts);
    }
}

impl IntoIterator for ChangeSet {
    type Item = Account;
    type IntoIter = btree_map::IntoValues<Address, Account>;

    fn into_iter(self) -> Self::IntoIter {
        self.accounts.into_values()
    }
}
