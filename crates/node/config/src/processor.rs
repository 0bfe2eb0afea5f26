//! Top level processor configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{ConfigError, ExecutionSettings};

/// Default chain ID.
pub const DEFAULT_CHAIN_ID: u64 = 1;

/// Default log filter.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Processor configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProcessorConfig {
    /// Chain ID exposed to contract code.
    #[serde(default = "default_chain_id")]
    pub chain_id: u64,

    /// Genesis file seeding the ledger.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genesis: Option<PathBuf>,

    /// Log filter directive.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Execution engine settings.
    #[serde(default)]
    pub execution: ExecutionSettings,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            chain_id: DEFAULT_CHAIN_ID,
            execution: ExecutionSettings::default(),
            genesis: None,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl ProcessorConfig {
    /// Load configuration from `path`, or defaults when no path is given.
    ///
    /// Files ending in `.json` are parsed as JSON, everything else as TOML.
    /// The parsed configuration is validated before it is returned.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Unreadable { path: path.to_path_buf(), source })?;

        let config: Self = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content)
                .map_err(|source| ConfigError::InvalidJson { path: path.to_path_buf(), source })?
        } else {
            toml::from_str(&content)
                .map_err(|source| ConfigError::InvalidToml { path: path.to_path_buf(), source })?
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject values the processor cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chain_id == 0 {
            return Err(ConfigError::ZeroChainId);
        }
        if matches!(self.execution.max_gas_limit, Some(0)) {
            return Err(ConfigError::ZeroGasCap);
        }
        Ok(())
    }
}

const fn default_chain_id() -> u64 {
    DEFAULT_CHAIN_ID
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use super::*;
    use crate::Hardfork;

    #[test]
    fn test_default_processor_config() {
        let config = ProcessorConfig::default();
        assert_eq!(config.chain_id, DEFAULT_CHAIN_ID);
        assert_eq!(config.log_level, DEFAULT_LOG_LEVEL);
        assert!(config.genesis.is_none());
    }

    #[test]
    fn test_processor_config_serde_defaults() {
        let config: ProcessorConfig = serde_json::from_str("{}").expect("deserialize");
        assert_eq!(config, ProcessorConfig::default());
    }

    #[test]
    fn test_processor_config_toml_roundtrip() {
        let config = ProcessorConfig {
            chain_id: 2017,
            execution: ExecutionSettings { hardfork: Hardfork::London, max_gas_limit: Some(1) },
            genesis: Some(PathBuf::from("/etc/seth/genesis.json")),
            log_level: "debug".to_string(),
        };
        let serialized = toml::to_string(&config).expect("serialize toml");
        let deserialized: ProcessorConfig = toml::from_str(&serialized).expect("deserialize toml");
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_load_without_path() {
        assert_eq!(ProcessorConfig::load(None).unwrap(), ProcessorConfig::default());
    }

    #[test]
    fn test_load_toml_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().expect("tempfile");
        writeln!(file, "chain_id = 7\n[execution]\nhardfork = \"prague\"").expect("write");

        let config = ProcessorConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.chain_id, 7);
        assert_eq!(config.execution.hardfork, Hardfork::Prague);
        assert_eq!(config.log_level, DEFAULT_LOG_LEVEL);
    }

    #[test]
    fn test_load_json_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().expect("tempfile");
        write!(file, r#"{{"execution": {{"max_gas_limit": 500000}}}}"#).expect("write");

        let config = ProcessorConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.execution.max_gas_limit, Some(500_000));
        assert_eq!(config.chain_id, DEFAULT_CHAIN_ID);
    }

    #[test]
    fn test_load_missing_file() {
        let err = ProcessorConfig::load(Some(Path::new("/nonexistent/seth.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Unreadable { path, .. } if path == Path::new("/nonexistent/seth.toml")));
    }

    #[test]
    fn test_load_invalid_toml() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().expect("tempfile");
        write!(file, "chain_id = \"seven\"").expect("write");

        let err = ProcessorConfig::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidToml { path, .. } if path == file.path()));
    }

    #[test]
    fn test_load_invalid_json() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().expect("tempfile");
        write!(file, r#"{{"chain_id": -1}}"#).expect("write");

        let err = ProcessorConfig::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidJson { .. }));
    }

    #[test]
    fn test_load_rejects_zero_chain_id() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().expect("tempfile");
        write!(file, "chain_id = 0").expect("write");

        let err = ProcessorConfig::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::ZeroChainId));
    }

    #[test]
    fn test_validate_rejects_zero_gas_cap() {
        let mut config = ProcessorConfig::default();
        assert!(config.validate().is_ok());

        config.execution.max_gas_limit = Some(0);
        assert!(matches!(config.validate(), Err(ConfigError::ZeroGasCap)));
    }
}
