//! Engine call and outcome types.

use std::collections::BTreeMap;

use seth_domain::{Account, BlockRef};
use seth_primitives::{Address, Bytes};

/// A single request to the execution engine.
///
/// A call without a callee is a construction: `caller` is the creating account
/// at its current sequence, `input` is the init code, and the new contract is
/// placed at the address derived from the two.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineCall {
    /// Account on whose behalf the code runs.
    pub caller: Account,
    /// Account whose code runs, absent for construction.
    pub callee: Option<Account>,
    /// Call data, or init code for construction.
    pub input: Bytes,
    /// Gas available to the program.
    pub gas_limit: u64,
    /// State the call observes.
    pub block: BlockRef,
}

impl EngineCall {
    /// Construction by `creator` from `init` code.
    pub fn create(creator: Account, init: Bytes, gas_limit: u64) -> Self {
        Self { caller: creator, callee: None, input: init, gas_limit, block: BlockRef::Latest }
    }

    /// Message call from `caller` into the stored code of `callee`.
    pub fn call(caller: Account, callee: Account, data: Bytes, gas_limit: u64) -> Self {
        Self { caller, callee: Some(callee), input: data, gas_limit, block: BlockRef::Latest }
    }

    /// Run against the given block instead of the latest state.
    #[must_use]
    pub const fn with_block(mut self, block: BlockRef) -> Self {
        self.block = block;
        self
    }

    /// Returns true for construction calls.
    pub const fn is_create(&self) -> bool {
        self.callee.is_none()
    }
}

/// Successful engine result.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EngineOutcome {
    /// Return data, or runtime code for construction.
    pub output: Bytes,
    /// Gas consumed.
    pub gas_used: u64,
    /// Every account whose balance or storage the call changed, including
    /// accounts it created. Unchanged accounts are left out.
    pub accounts: BTreeMap<Address, Account>,
}

impl EngineOutcome {
    /// Returns the updated snapshot of `address`, if the call changed it.
    pub fn account(&self, address: &Address) -> Option<&Account> {
        self.accounts.get(address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_has_no_callee() {
        let creator = Account::new(Address::repeat_byte(0x01), 0);
        let call = EngineCall::create(creator, Bytes::from_static(&[0x00]), 100_000);
        assert!(call.is_create());
        assert_eq!(call.input, Bytes::from_static(&[0x00]));
        assert_eq!(call.block, BlockRef::Latest);
    }

    #[test]
    fn call_targets_callee() {
        let caller = Account::new(Address::repeat_byte(0x01), 3);
        let callee = Account::new(Address::repeat_byte(0x02), 2)
            .with_code(Bytes::from_static(&[0x60, 0x00]));
        let call = EngineCall::call(caller, callee, Bytes::from_static(&[0xab]), 50_000)
            .with_block(BlockRef::Number(7));

        assert!(!call.is_create());
        assert_eq!(call.callee.map(|c| c.address), Some(Address::repeat_byte(0x02)));
        assert_eq!(call.input, Bytes::from_static(&[0xab]));
        assert_eq!(call.block, BlockRef::Number(7));
    }

    #[test]
    fn outcome_lookup() {
        let account = Account::new(Address::repeat_byte(0x05), 1);
        let outcome = EngineOutcome {
            accounts: BTreeMap::from([(account.address, account.clone())]),
            ..Default::default()
        };
        assert_eq!(outcome.account(&account.address), Some(&account));
        assert!(outcome.account(&Address::repeat_byte(0x06)).is_none());
    }
}
