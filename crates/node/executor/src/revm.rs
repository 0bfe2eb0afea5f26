//! REVM-based execution engine.

use std::collections::BTreeMap;

use revm::{
    Context, ExecuteEvm, Journal, MainBuilder,
    context::{
        TxEnv,
        block::BlockEnv,
        result::ExecutionResult,
    },
    context_interface::ContextSetters,
    database::State,
    primitives::{TxKind, hardfork::SpecId},
    state::{Account as EvmAccount, EvmState},
};
use seth_domain::Account;
use seth_primitives::{Address, U256};
use seth_traits::StateAccessor;

use crate::{EngineCall, EngineError, EngineOutcome, ExecutionConfig, ExecutionEngine, SnapshotDb};

/// REVM-based execution engine.
///
/// Every call runs in a fresh EVM that reads the ledger through a
/// [`SnapshotDb`], with the snapshots carried by the [`EngineCall`] layered on
/// top. Balance and storage changes are reported back for every account the
/// call changed; nonce changes made by the EVM are discarded since sequences
/// belong to the state transition logic.
#[derive(Clone, Debug, Default)]
pub struct RevmEngine {
    config: ExecutionConfig,
}

impl RevmEngine {
    /// Create a new engine with the given chain ID.
    #[must_use]
    pub const fn new(chain_id: u64) -> Self {
        Self { config: ExecutionConfig::new(chain_id) }
    }

    /// Create a new engine with full configuration.
    #[must_use]
    pub const fn with_config(config: ExecutionConfig) -> Self {
        Self { config }
    }

    /// Get the chain ID.
    pub const fn chain_id(&self) -> u64 {
        self.config.chain_id
    }

    /// Get the execution configuration.
    pub const fn config(&self) -> &ExecutionConfig {
        &self.config
    }

    /// Get the spec ID.
    pub const fn spec_id(&self) -> SpecId {
        self.config.spec_id
    }
}

impl ExecutionEngine for RevmEngine {
    fn execute<S: StateAccessor + ?Sized>(
        &self,
        state: &S,
        call: EngineCall,
    ) -> Result<EngineOutcome, EngineError> {
        if let Some(max) = self.config.max_gas_limit
            && call.gas_limit > max
        {
            return Err(EngineError::GasLimitExceeded { requested: call.gas_limit, max });
        }

        let EngineCall { caller, callee, input, gas_limit, block } = call;
        let origin = caller.address;
        let nonce = caller.sequence;
        // Construction derives the new address from the caller and its nonce,
        // exactly like `contract_address`.
        let kind = callee.as_ref().map_or(TxKind::Create, |callee| TxKind::Call(callee.address));

        let view = SnapshotDb::new(state, std::iter::once(caller).chain(callee));
        let db = State::builder().with_database_ref(&view).build();

        let ctx: Context<BlockEnv, _, _, _, Journal<_>, ()> =
            Context::new(db, self.config.spec_id);
        let ctx = ctx
            .modify_cfg_chained(|cfg| {
                cfg.chain_id = self.config.chain_id;
            })
            .modify_block_chained(|blk: &mut BlockEnv| {
                blk.gas_limit = gas_limit;
                if let Some(number) = block.number() {
                    blk.number = U256::from(number);
                }
            });

        let mut evm = ctx.build_mainnet();

        let tx_env = TxEnv::builder()
            .caller(origin)
            .kind(kind)
            .data(input)
            .gas_limit(gas_limit)
            .gas_price(0)
            .nonce(nonce)
            .chain_id(Some(self.config.chain_id))
            .build()
            .map_err(|e| EngineError::Invalid(format!("failed to build tx env: {:?}", e)))?;
        evm.set_tx(tx_env);

        let result_and_state =
            evm.replay().map_err(|e| EngineError::Invalid(format!("{:?}", e)))?;

        let (output, gas_used) = match result_and_state.result {
            ExecutionResult::Success { output, gas_used, .. } => (output.into_data(), gas_used),
            ExecutionResult::Revert { gas_used, output } => {
                return Err(EngineError::Reverted { gas_used, output });
            }
            ExecutionResult::Halt { reason, gas_used } => {
                return Err(EngineError::Halted { gas_used, reason: format!("{:?}", reason) });
            }
        };

        let accounts = changed_accounts(&view, &result_and_state.state)?;
        tracing::trace!(%block, gas_used, changed = accounts.len(), "engine call succeeded");

        Ok(EngineOutcome { output, gas_used, accounts })
    }
}

/// Collect every account whose balance or storage the EVM changed.
///
/// Known accounts keep their ledger fields. Accounts new to the ledger take
/// their nonce and code from the EVM and are only reported when they were
/// created or hold a balance or storage, so merely touched empty addresses
/// (the block beneficiary, precompiles) never reach the ledger.
fn changed_accounts<S: StateAccessor + ?Sized>(
    view: &SnapshotDb<'_, S>,
    state: &EvmState,
) -> Result<BTreeMap<Address, Account>, EngineError> {
    let mut accounts = BTreeMap::new();
    for (address, evm_account) in state {
        if !evm_account.is_touched() {
            continue;
        }
        let known = view.account(address)?;
        let changed = match known {
            Some(known) => {
                let updated = apply_changes(known.clone(), evm_account);
                (updated.balance != known.balance || updated.storage != known.storage)
                    .then_some(updated)
            }
            None => {
                let updated = apply_changes(new_account(*address, evm_account), evm_account);
                let occupied = !updated.balance.is_zero() || !updated.storage.is_empty();
                (evm_account.is_created() || occupied).then_some(updated)
            }
        };
        if let Some(account) = changed {
            accounts.insert(*address, account);
        }
    }
    Ok(accounts)
}

/// Ledger account for an address first seen by the EVM.
fn new_account(address: Address, evm_account: &EvmAccount) -> Account {
    let code = evm_account.info.code.as_ref().map(|code| code.original_bytes()).unwrap_or_default();
    Account::new(address, evm_account.info.nonce).with_code(code)
}

/// Copy balance and storage written by REVM into `snapshot`.
fn apply_changes(mut snapshot: Account, account: &EvmAccount) -> Account {
    if !account.is_touched() {
        return snapshot;
    }

    if account.is_selfdestructed() {
        snapshot.balance = U256::ZERO;
        snapshot.storage.clear();
        return snapshot;
    }

    snapshot.balance = account.info.balance;
    for (slot, value) in &account.storage {
        let value = value.present_value();
        if value.is_zero() {
            snapshot.storage.remove(slot);
        } else {
            snapshot.storage.insert(*slot, value);
        }
    }
    snapshot
}
