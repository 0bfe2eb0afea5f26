//! Execution configuration.

use revm::primitives::hardfork::SpecId;

/// Execution configuration.
#[derive(Clone, Debug)]
pub struct ExecutionConfig {
    /// Chain ID exposed to contract code.
    pub chain_id: u64,
    /// Hardfork rules.
    pub spec_id: SpecId,
    /// Upper bound on the gas limit of a single call, if any.
    pub max_gas_limit: Option<u64>,
}

impl ExecutionConfig {
    /// Create a new execution config with the given chain ID.
    pub const fn new(chain_id: u64) -> Self {
        Self { chain_id, spec_id: SpecId::CANCUN, max_gas_limit: None }
    }

    /// Set the hardfork rules.
    #[must_use]
    pub const fn with_spec_id(mut self, spec_id: SpecId) -> Self {
        self.spec_id = spec_id;
        self
    }

    /// Cap the gas limit a single call may request.
    #[must_use]
    pub const fn with_max_gas_limit(mut self, max_gas_limit: u64) -> Self {
        self.max_gas_limit = Some(max_gas_limit);
        self
    }
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_default() {
        let config = ExecutionConfig::default();
        assert_eq!(config.chain_id, 1);
        assert_eq!(config.spec_id, SpecId::CANCUN);
        assert_eq!(config.max_gas_limit, None);
    }

    #[test]
    fn config_builder() {
        let config =
            ExecutionConfig::new(42).with_spec_id(SpecId::PRAGUE).with_max_gas_limit(3_000_000);

        assert_eq!(config.chain_id, 42);
        assert_eq!(config.spec_id, SpecId::PRAGUE);
        assert_eq!(config.max_gas_limit, Some(3_000_000));
    }
}
