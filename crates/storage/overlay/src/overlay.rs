use std::sync::RwLock;

use seth_domain::Account;
use seth_primitives::Address;
use seth_traits::{StateAccessor, StateError};

use crate::ChangeSet;

/// State overlay that buffers writes on top of a base state.
///
/// Reads see buffered writes first. Nothing reaches the base until the
/// caller takes the [`ChangeSet`] and commits it.
#[derive(Debug)]
pub struct OverlayState<S> {
    base: S,
    changes: RwLock<ChangeSet>,
}

impl<S> OverlayState<S> {
    /// Create an empty overlay over `base`.
    #[must_use]
    pub fn new(base: S) -> Self {
        Self::with_changes(base, ChangeSet::new())
    }

    /// Create an overlay over `base` with writes already pending.
    #[must_use]
    pub const fn with_changes(base: S, changes: ChangeSet) -> Self {
        Self { base, changes: RwLock::new(changes) }
    }

    /// Returns the base state.
    pub const fn base(&self) -> &S {
        &self.base
    }

    /// Returns a copy of the pending writes.
    pub fn changes(&self) -> Result<ChangeSet, StateError> {
        Ok(self.changes.read().map_err(|_| StateError::LockPoisoned)?.clone())
    }

    /// Consume the overlay and return the pending writes.
    pub fn into_changes(self) -> Result<ChangeSet, StateError> {
        self.changes.into_inner().map_err(|_| StateError::LockPoisoned)
    }
}

impl<S: StateAccessor> StateAccessor for OverlayState<S> {
    fn get_account(&self, address: &Address) -> Result<Option<Account>, StateError> {
        {
            let changes = self.changes.read().map_err(|_| StateError::LockPoisoned)?;
            if let Some(account) = changes.get(address) {
                return Ok(Some(account.clone()));
            }
        }
        self.base.get_account(address)
    }

    fn update_account(&self, account: &Account) -> Result<(), StateError> {
        let mut changes = self.changes.write().map_err(|_| StateError::LockPoisoned)?;
        changes.insert(account.clone());
        Ok(())
    }
}
