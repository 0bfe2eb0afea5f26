use std::path::PathBuf;

use clap::{Parser, Subcommand};
use revm::primitives::hardfork::SpecId;
use seth_config::{Hardfork, ProcessorConfig};
use seth_domain::{Genesis, PermFlags};
use seth_executor::{ExecutionConfig, RevmEngine};
use seth_overlay::MemoryState;
use seth_primitives::{Address, hex};
use seth_processor::{TransactionProcessor, has_permission};
use seth_traits::StateAccessor;

use crate::batch::{Batch, Report};

#[derive(Parser, Debug)]
#[command(name = "seth")]
#[command(about = "EVM account and contract transactions over a permissioned ledger")]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true)]
    pub chain_id: Option<u64>,

    #[arg(long, value_name = "FILE", global = true)]
    pub genesis: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Apply a batch of transactions in order and report each outcome.
    Apply(ApplyArgs),
    /// Print the effective permissions of an account.
    Permissions(PermissionsArgs),
}

#[derive(clap::Args, Debug)]
pub(crate) struct ApplyArgs {
    /// Path to a JSON array of `{ "sender", "transaction" }` entries.
    #[arg(long)]
    pub batch: PathBuf,

    /// Print every account after the batch has been applied.
    #[arg(long, default_value = "false")]
    pub dump: bool,
}

#[derive(clap::Args, Debug)]
pub(crate) struct PermissionsArgs {
    /// Account to inspect.
    #[arg(long)]
    pub address: Address,
}

impl Cli {
    pub(crate) fn load_config(&self) -> eyre::Result<ProcessorConfig> {
        let mut config = ProcessorConfig::load(self.config.as_deref())?;

        if let Some(chain_id) = self.chain_id {
            config.chain_id = chain_id;
        }
        if let Some(ref genesis) = self.genesis {
            config.genesis = Some(genesis.clone());
        }
        config.validate()?;

        Ok(config)
    }

    pub(crate) fn run(self, config: ProcessorConfig) -> eyre::Result<()> {
        match &self.command {
            Commands::Apply(args) => run_apply(&config, args),
            Commands::Permissions(args) => run_permissions(&config, args),
        }
    }
}

fn run_apply(config: &ProcessorConfig, args: &ApplyArgs) -> eyre::Result<()> {
    let state = seed_state(config)?;
    let processor = TransactionProcessor::new(engine(config));
    let batch = Batch::load(&args.batch)?;
    tracing::info!(
        family = processor.family_name(),
        version = processor.family_version(),
        transactions = batch.len(),
        "Applying batch"
    );

    let reports = batch.apply(&processor, &state)?;
    for (index, report) in reports.iter().enumerate() {
        match report {
            Report::Applied(output) => {
                let created =
                    output.new_account.as_ref().map(|a| format!(" new={}", a.address)).unwrap_or_default();
                println!(
                    "{index}: ok gas={} out=0x{}{created}",
                    output.gas_used,
                    hex::encode(&output.return_value)
                );
            }
            Report::Rejected { kind, message } => println!("{index}: rejected {kind}: {message}"),
        }
    }

    if args.dump {
        for account in state.accounts()? {
            println!("{}", serde_json::to_string(&account)?);
        }
    }
    Ok(())
}

fn run_permissions(config: &ProcessorConfig, args: &PermissionsArgs) -> eyre::Result<()> {
    let state = seed_state(config)?;
    let account = state
        .get_account(&args.address)?
        .ok_or_else(|| eyre::eyre!("account {} does not exist", args.address))?;

    for flag in PermFlags::ALL.iter() {
        let granted = has_permission(&state, &account, flag)?;
        println!("{}: {}", flag.name(), granted);
    }
    Ok(())
}

fn seed_state(config: &ProcessorConfig) -> eyre::Result<MemoryState> {
    let Some(ref path) = config.genesis else {
        tracing::warn!("No genesis configured, starting from an empty ledger");
        return Ok(MemoryState::new());
    };
    let genesis =
        Genesis::load(path).map_err(|e| eyre::eyre!("Failed to load genesis: {}", e))?;
    tracing::info!(
        accounts = genesis.accounts.len(),
        bootstrap = genesis.global_permissions.is_none(),
        "Loaded genesis"
    );
    Ok(MemoryState::with_accounts(genesis.into_accounts()))
}

fn engine(config: &ProcessorConfig) -> RevmEngine {
    let mut execution =
        ExecutionConfig::new(config.chain_id).with_spec_id(spec_id(config.execution.hardfork));
    if let Some(max) = config.execution.max_gas_limit {
        execution = execution.with_max_gas_limit(max);
    }
    RevmEngine::with_config(execution)
}

const fn spec_id(hardfork: Hardfork) -> SpecId {
    match hardfork {
        Hardfork::Berlin => SpecId::BERLIN,
        Hardfork::London => SpecId::LONDON,
        Hardfork::Shanghai => SpecId::SHANGHAI,
        Hardfork::Cancun => SpecId::CANCUN,
        Hardfork::Prague => SpecId::PRAGUE,
    }
}
