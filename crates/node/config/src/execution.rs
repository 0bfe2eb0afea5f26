//! Execution configuration.

use std::fmt;

use serde::{Deserialize, Serialize};

/// EVM hardfork contract code runs under.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Hardfork {
    /// Berlin.
    Berlin,
    /// London.
    London,
    /// Shanghai.
    Shanghai,
    /// Cancun.
    #[default]
    Cancun,
    /// Prague.
    Prague,
}

impl fmt::Display for Hardfork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Berlin => "berlin",
            Self::London => "london",
            Self::Shanghai => "shanghai",
            Self::Cancun => "cancun",
            Self::Prague => "prague",
        })
    }
}

/// Execution engine settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExecutionSettings {
    /// Hardfork rules.
    #[serde(default)]
    pub hardfork: Hardfork,

    /// Upper bound on the gas limit of a single transaction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_gas_limit: Option<u64>,
}
