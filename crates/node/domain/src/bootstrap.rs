//! Genesis configuration.

use std::{collections::BTreeSet, path::Path, str::FromStr};

use alloy_primitives::{Address, Bytes, U256};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Account, AccountPermissions, EvmPermissions, GLOBAL_PERMISSIONS_ADDRESS};

/// Initial ledger contents.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Genesis {
    /// Default permission record installed at the global permission account.
    ///
    /// Leaving it out starts the ledger in bootstrap mode where every action is permitted.
    pub global_permissions: Option<AccountPermissions>,
    /// Accounts present from the start.
    pub accounts: Vec<Account>,
}

#[derive(Serialize, Deserialize)]
struct GenesisJson {
    #[serde(default)]
    global_permissions: Option<EvmPermissions>,
    #[serde(default)]
    accounts: Vec<AccountJson>,
}

#[derive(Serialize, Deserialize)]
struct AccountJson {
    address: String,
    #[serde(default)]
    sequence: u64,
    #[serde(default)]
    balance: Option<String>,
    #[serde(default)]
    code: Option<Bytes>,
    #[serde(default)]
    permissions: Option<EvmPermissions>,
}

impl Genesis {
    /// Create a genesis from its parts.
    #[must_use]
    pub const fn new(global_permissions: Option<AccountPermissions>, accounts: Vec<Account>) -> Self {
        Self { global_permissions, accounts }
    }

    /// Load a genesis from a JSON file.
    pub fn load(path: &Path) -> Result<Self, GenesisError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse a genesis from a JSON document.
    pub fn from_json(content: &str) -> Result<Self, GenesisError> {
        let genesis: GenesisJson = serde_json::from_str(content)?;

        let mut accounts = Vec::with_capacity(genesis.accounts.len());
        let mut seen = BTreeSet::new();
        for entry in genesis.accounts {
            let address = Address::from_str(&entry.address)
                .map_err(|e| GenesisError::Parse(format!("invalid address: {}", e)))?;
            if address == GLOBAL_PERMISSIONS_ADDRESS {
                return Err(GenesisError::Parse(
                    "global permissions belong in `global_permissions`".to_string(),
                ));
            }
            if !seen.insert(address) {
                return Err(GenesisError::Parse(format!("duplicate account: {address}")));
            }
            let balance = entry
                .balance
                .as_deref()
                .map(U256::from_str)
                .transpose()
                .map_err(|e| GenesisError::Parse(format!("invalid balance: {}", e)))?
                .unwrap_or_default();

            let mut account = Account::new(address, entry.sequence)
                .with_code(entry.code.unwrap_or_default())
                .with_permissions(entry.permissions.map(Into::into).unwrap_or_default());
            account.balance = balance;
            accounts.push(account);
        }

        Ok(Self { global_permissions: genesis.global_permissions.map(Into::into), accounts })
    }

    /// Returns every account to seed, including the global permission account when configured.
    pub fn into_accounts(self) -> Vec<Account> {
        let mut accounts = self.accounts;
        if let Some(permissions) = self.global_permissions {
            accounts.push(Account::new(GLOBAL_PERMISSIONS_ADDRESS, 1).with_permissions(permissions));
        }
        accounts
    }
}

/// Errors that can occur while loading a genesis.
#[derive(Debug, Error)]
pub enum GenesisError {
    /// IO error reading the genesis file.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// JSON parsing error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    /// Error parsing address or balance values.
    #[error("parse error: {0}")]
    Parse(String),
}
