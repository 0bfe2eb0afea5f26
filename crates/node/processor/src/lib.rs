#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/seth-rs/seth/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod error;
pub use error::{ErrorKind, TransitionError};

pub mod handlers;

mod permission;
pub use permission::{GlobalPermissions, has_permission};

mod processor;
pub use processor::{FAMILY_NAME, FAMILY_VERSION, TransactionProcessor, TransitionContext};

mod result;
pub use result::{HandlerResult, TransitionOutput};
