//! Ledger adapter for REVM.

use std::{collections::BTreeMap, fmt};

use revm::{bytecode::Bytecode, database_interface::DatabaseRef, state::AccountInfo};
use seth_domain::Account;
use seth_primitives::{Address, B256, Bytes, KECCAK256_EMPTY, U256, keccak256};
use seth_traits::StateAccessor;

use crate::EngineError;

/// Serves ledger accounts through REVM's [`DatabaseRef`] interface.
///
/// The snapshots carried by a call are layered over the ledger and win over
/// it. Addresses known to neither read as empty. The account sequence is
/// exposed to REVM as the nonce.
pub struct SnapshotDb<'a, S: ?Sized> {
    state: &'a S,
    snapshots: BTreeMap<Address, Account>,
}

impl<S: ?Sized> fmt::Debug for SnapshotDb<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnapshotDb").field("snapshots", &self.snapshots).finish_non_exhaustive()
    }
}

impl<'a, S: StateAccessor + ?Sized> SnapshotDb<'a, S> {
    /// Create an adapter over `state` with `snapshots` layered on top.
    pub fn new(state: &'a S, snapshots: impl IntoIterator<Item = Account>) -> Self {
        Self { state, snapshots: snapshots.into_iter().map(|a| (a.address, a)).collect() }
    }

    /// Returns the account at `address`, preferring the layered snapshots.
    pub fn account(&self, address: &Address) -> Result<Option<Account>, EngineError> {
        match self.snapshots.get(address) {
            Some(account) => Ok(Some(account.clone())),
            None => Ok(self.state.get_account(address)?),
        }
    }
}

fn code_hash(code: &Bytes) -> B256 {
    if code.is_empty() { KECCAK256_EMPTY } else { keccak256(code) }
}

fn bytecode(code: &Bytes) -> Bytecode {
    if code.is_empty() { Bytecode::default() } else { Bytecode::new_legacy(code.clone()) }
}

impl<S: StateAccessor + ?Sized> DatabaseRef for SnapshotDb<'_, S> {
    type Error = EngineError;

    fn basic_ref(&self, address: Address) -> Result<Option<AccountInfo>, Self::Error> {
        Ok(self.account(&address)?.map(|account| {
            AccountInfo::new(
                account.balance,
                account.sequence,
                code_hash(&account.code),
                bytecode(&account.code),
            )
        }))
    }

    fn code_by_hash_ref(&self, hash: B256) -> Result<Bytecode, Self::Error> {
        // Code is handed out with every account, so only snapshots are searched here.
        if hash == KECCAK256_EMPTY || hash == B256::ZERO {
            return Ok(Bytecode::default());
        }
        self.snapshots
            .values()
            .find(|account| code_hash(&account.code) == hash)
            .map(|account| bytecode(&account.code))
            .ok_or_else(|| EngineError::Database(format!("code not found: {hash}")))
    }

    fn storage_ref(&self, address: Address, index: U256) -> Result<U256, Self::Error> {
        Ok(self
            .account(&address)?
            .and_then(|account| account.storage.get(&index).copied())
            .unwrap_or_default())
    }

    fn block_hash_ref(&self, _number: u64) -> Result<B256, Self::Error> {
        // Block hash lookups not supported
        Ok(B256::ZERO)
    }
}
