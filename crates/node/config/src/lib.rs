//! Configuration types for seth.
#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/seth-rs/seth/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod error;
pub use error::ConfigError;

mod execution;
pub use execution::{ExecutionSettings, Hardfork};

mod processor;
pub use processor::{DEFAULT_CHAIN_ID, DEFAULT_LOG_LEVEL, ProcessorConfig};
