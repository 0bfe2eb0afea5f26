//! Ledger accounts.

use std::collections::BTreeMap;

use alloy_primitives::{Address, Bytes, U256};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::AccountPermissions;

/// Reserved address holding the default permission record.
///
/// Consulted for every flag an account leaves unset, and as the permission
/// source when an address registers itself.
pub const GLOBAL_PERMISSIONS_ADDRESS: Address = Address::ZERO;

/// An account whose sequence cannot advance any further.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("sequence of account {0} is exhausted")]
pub struct SequenceExhausted(pub Address);

/// Ledger-visible state of a single address.
///
/// `sequence`, `code` and `permissions` belong to the state transition logic.
/// `balance` and `storage` are owned by the execution engine and are carried
/// through untouched by everything else.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Account address.
    pub address: Address,
    /// Replay-protection counter; the next accepted transaction nonce.
    pub sequence: u64,
    /// Contract runtime code, empty for external accounts.
    pub code: Bytes,
    /// Permission record.
    pub permissions: AccountPermissions,
    /// Engine-owned balance.
    pub balance: U256,
    /// Engine-owned storage slots.
    pub storage: BTreeMap<U256, U256>,
}

impl Account {
    /// Create an account with the given address and sequence and nothing else.
    pub fn new(address: Address, sequence: u64) -> Self {
        Self { address, sequence, ..Default::default() }
    }

    /// Set the permission record.
    #[must_use]
    pub const fn with_permissions(mut self, permissions: AccountPermissions) -> Self {
        self.permissions = permissions;
        self
    }

    /// Set the code.
    #[must_use]
    pub fn with_code(mut self, code: Bytes) -> Self {
        self.code = code;
        self
    }

    /// Returns true if this account holds contract code.
    pub fn is_contract(&self) -> bool {
        !self.code.is_empty()
    }

    /// Returns true if this is the global permission account.
    pub fn is_global(&self) -> bool {
        self.address == GLOBAL_PERMISSIONS_ADDRESS
    }

    /// Advance the sequence by one.
    ///
    /// Fails without touching the account when the sequence is already at `u64::MAX`.
    pub const fn increment_sequence(&mut self) -> Result<(), SequenceExhausted> {
        match self.sequence.checked_add(1) {
            Some(next) => {
                self.sequence = next;
                Ok(())
            }
            None => Err(SequenceExhausted(self.address)),
        }
    }

    /// Take the engine-owned fields from `updated`, keeping everything else.
    pub fn merge_engine_state(&mut self, updated: Self) {
        self.balance = updated.balance;
        self.storage = updated.storage;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PermFlags;

    #[test]
    fn new_account_is_external() {
        let account = Account::new(Address::repeat_byte(0x11), 1);
        assert_eq!(account.sequence, 1);
        assert!(!account.is_contract());
        assert_eq!(account.permissions, AccountPermissions::empty());
        assert_eq!(account.balance, U256::ZERO);
    }

    #[test]
    fn with_code_marks_contract() {
        let account = Account::new(Address::repeat_byte(0x22), 2)
            .with_code(Bytes::from_static(&[0x60, 0x00]));
        assert!(account.is_contract());
    }

    #[test]
    fn increment_sequence_advances_by_one() {
        let mut account = Account::new(Address::repeat_byte(0x33), 7);
        account.increment_sequence().unwrap();
        assert_eq!(account.sequence, 8);
    }

    #[test]
    fn increment_sequence_stops_at_max() {
        let mut account = Account::new(Address::repeat_byte(0x33), u64::MAX);
        let err = account.increment_sequence().unwrap_err();
        assert_eq!(err, SequenceExhausted(Address::repeat_byte(0x33)));
        assert_eq!(account.sequence, u64::MAX);
        assert!(err.to_string().contains("exhausted"));
    }

    #[test]
    fn merge_engine_state_keeps_ledger_fields() {
        let mut account = Account::new(Address::repeat_byte(0x44), 2)
            .with_permissions(AccountPermissions::all_granted());

        let mut updated = Account::new(Address::repeat_byte(0x44), 99)
            .with_code(Bytes::from_static(&[0x00]));
        updated.balance = U256::from(10);
        updated.storage.insert(U256::from(1), U256::from(2));

        account.merge_engine_state(updated);
        assert_eq!(account.sequence, 2);
        assert!(account.code.is_empty());
        assert_eq!(account.permissions, AccountPermissions::all_granted());
        assert_eq!(account.balance, U256::from(10));
        assert_eq!(account.storage.get(&U256::from(1)), Some(&U256::from(2)));
    }

    #[test]
    fn global_account_detection() {
        let global = Account::new(GLOBAL_PERMISSIONS_ADDRESS, 1)
            .with_permissions(AccountPermissions::explicit(PermFlags::CALL));
        assert!(global.is_global());
        assert!(!Account::new(Address::repeat_byte(1), 0).is_global());
    }
}
