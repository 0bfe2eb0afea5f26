#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/seth-rs/seth/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod account;
pub use account::{Account, GLOBAL_PERMISSIONS_ADDRESS, SequenceExhausted};

mod block;
pub use block::BlockRef;

mod bootstrap;
pub use bootstrap::{Genesis, GenesisError};

mod idents;
pub use idents::{ADDRESS_LENGTH, AddressError, contract_address, parse_address};

mod permissions;
pub use permissions::{AccountPermissions, EvmPermissions, PermFlags, PermissionValue};

mod tx;
pub use tx::{
    CreateContractAccount, CreateExternalAccount, MessageCall, ReadOnlyMessageCall,
    SetPermissions, SethTransaction, TransactionKind,
};
