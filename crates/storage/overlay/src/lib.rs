#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/seth-rs/seth/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod changes;
pub use changes::ChangeSet;

mod memory;
pub use memory::MemoryState;

mod overlay;
pub use overlay::OverlayState;
