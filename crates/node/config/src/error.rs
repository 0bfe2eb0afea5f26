//! Configuration error types.

use std::path::PathBuf;

/// Reasons a processor configuration file is rejected.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("cannot read processor config {}: {source}", .path.display())]
    Unreadable {
        /// File that was requested.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// A `.toml` (or extension-less) file did not describe a processor config.
    #[error("processor config {} is not valid TOML: {source}", .path.display())]
    InvalidToml {
        /// Offending file.
        path: PathBuf,
        /// Parser error.
        source: toml::de::Error,
    },

    /// A `.json` file did not describe a processor config.
    #[error("processor config {} is not valid JSON: {source}", .path.display())]
    InvalidJson {
        /// Offending file.
        path: PathBuf,
        /// Parser error.
        source: serde_json::Error,
    },

    /// Chain id 0 is reserved and cannot identify the processor's chain.
    #[error("chain_id must be nonzero")]
    ZeroChainId,

    /// A gas cap of zero would reject every engine call.
    #[error("execution.max_gas_limit must be nonzero when set")]
    ZeroGasCap,
}

#[cfg(test)]
mod tests {
    use std::io::{Error as IoError, ErrorKind};

    use super::*;

    #[test]
    fn unreadable_names_path() {
        let err = ConfigError::Unreadable {
            path: PathBuf::from("/etc/seth/config.toml"),
            source: IoError::new(ErrorKind::NotFound, "file not found"),
        };
        assert_eq!(
            err.to_string(),
            "cannot read processor config /etc/seth/config.toml: file not found"
        );
    }

    #[test]
    fn invalid_toml_names_path() {
        let source = toml::from_str::<toml::Value>("chain_id = [").unwrap_err();
        let err = ConfigError::InvalidToml { path: PathBuf::from("seth.toml"), source };
        assert!(err.to_string().starts_with("processor config seth.toml is not valid TOML: "));
    }

    #[test]
    fn invalid_json_names_path() {
        let source = serde_json::from_str::<serde_json::Value>("{chain_id}").unwrap_err();
        let err = ConfigError::InvalidJson { path: PathBuf::from("seth.json"), source };
        assert!(err.to_string().starts_with("processor config seth.json is not valid JSON: "));
    }

    #[test]
    fn field_errors_name_the_field() {
        assert_eq!(ConfigError::ZeroChainId.to_string(), "chain_id must be nonzero");
        assert!(ConfigError::ZeroGasCap.to_string().starts_with("execution.max_gas_limit"));
    }

    #[test]
    fn config_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ConfigError>();
    }
}
