//! Execution engine abstraction and REVM-based implementation for seth.

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/seth-rs/seth/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod adapter;
pub use adapter::SnapshotDb;

mod call;
pub use call::{EngineCall, EngineOutcome};

mod config;
pub use config::ExecutionConfig;

mod error;
pub use error::EngineError;

mod revm;
pub use revm::RevmEngine;

mod traits;
pub use traits::ExecutionEngine;
