//! Transactions

use std::fmt;

use alloy_primitives::Bytes;
use serde::{Deserialize, Serialize};

use crate::{BlockRef, EvmPermissions};

/// Tag selecting the state transition a transaction performs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    /// Register an external account.
    CreateExternalAccount,
    /// Deploy a contract account.
    CreateContractAccount,
    /// Call an existing account and persist the effects.
    MessageCall,
    /// Overwrite an account's permission record.
    SetPermissions,
    /// Call an existing account without persisting anything.
    ReadOnlyMessageCall,
}

impl TransactionKind {
    /// Every kind, in dispatch table order.
    pub const ALL: [Self; 5] = [
        Self::CreateExternalAccount,
        Self::CreateContractAccount,
        Self::MessageCall,
        Self::SetPermissions,
        Self::ReadOnlyMessageCall,
    ];

    /// Position of this kind in [`Self::ALL`].
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the snake case name of this kind.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreateExternalAccount => "create_external_account",
            Self::CreateContractAccount => "create_contract_account",
            Self::MessageCall => "message_call",
            Self::SetPermissions => "set_permissions",
            Self::ReadOnlyMessageCall => "read_only_message_call",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Register an external account.
///
/// Without a target the sender registers itself; with one, the sender
/// sponsors a new account at the target address.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateExternalAccount {
    /// Sender nonce. Ignored for self registration.
    #[serde(default)]
    pub nonce: u64,
    /// Raw address of the account to create.
    #[serde(default)]
    pub to: Option<Bytes>,
    /// Explicit permission record for the new account.
    #[serde(default)]
    pub permissions: Option<EvmPermissions>,
}

impl CreateExternalAccount {
    /// Returns the raw target address, treating an empty field as absent.
    pub fn target(&self) -> Option<&Bytes> {
        self.to.as_ref().filter(|to| !to.is_empty())
    }
}

/// Deploy a contract account from constructor code.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateContractAccount {
    /// Sender nonce.
    pub nonce: u64,
    /// Gas available to the constructor.
    pub gas_limit: u64,
    /// Constructor bytecode.
    pub init: Bytes,
    /// Explicit permission record for the new account.
    #[serde(default)]
    pub permissions: Option<EvmPermissions>,
}

/// Call an existing account.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageCall {
    /// Sender nonce.
    pub nonce: u64,
    /// Gas available to the call.
    pub gas_limit: u64,
    /// Raw address of the account to call.
    pub to: Bytes,
    /// Call data.
    #[serde(default)]
    pub data: Bytes,
}

/// Query an existing account without changing state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadOnlyMessageCall {
    /// Gas available to the call.
    pub gas_limit: u64,
    /// Raw address of the account to call.
    pub to: Bytes,
    /// Call data.
    #[serde(default)]
    pub data: Bytes,
    /// Block whose state the call observes.
    #[serde(default)]
    pub block: BlockRef,
}

/// Overwrite the permission record of an account.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetPermissions {
    /// Sender nonce.
    pub nonce: u64,
    /// Raw address of the account whose permissions change.
    pub to: Bytes,
    /// The record to install. Required.
    #[serde(default)]
    pub permissions: Option<EvmPermissions>,
}

/// A transaction of the seth family.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SethTransaction {
    /// See [`CreateExternalAccount`].
    CreateExternalAccount(CreateExternalAccount),
    /// See [`CreateContractAccount`].
    CreateContractAccount(CreateContractAccount),
    /// See [`MessageCall`].
    MessageCall(MessageCall),
    /// See [`SetPermissions`].
    SetPermissions(SetPermissions),
    /// See [`ReadOnlyMessageCall`].
    ReadOnlyMessageCall(ReadOnlyMessageCall),
}

impl SethTransaction {
    /// Returns the dispatch tag of this transaction.
    pub const fn kind(&self) -> TransactionKind {
        match self {
            Self::CreateExternalAccount(_) => TransactionKind::CreateExternalAccount,
            Self::CreateContractAccount(_) => TransactionKind::CreateContractAccount,
            Self::MessageCall(_) => TransactionKind::MessageCall,
            Self::SetPermissions(_) => TransactionKind::SetPermissions,
            Self::ReadOnlyMessageCall(_) => TransactionKind::ReadOnlyMessageCall,
        }
    }

    /// Returns the declared nonce, if this kind carries one.
    pub const fn nonce(&self) -> Option<u64> {
        match self {
            Self::CreateExternalAccount(tx) => Some(tx.nonce),
            Self::CreateContractAccount(tx) => Some(tx.nonce),
            Self::MessageCall(tx) => Some(tx.nonce),
            Self::SetPermissions(tx) => Some(tx.nonce),
            Self::ReadOnlyMessageCall(_) => None,
        }
    }
}

impl From<CreateExternalAccount> for SethTransaction {
    fn from(tx: CreateExternalAccount) -> Self {
        Self::CreateExternalAccount(tx)
    }
}

impl From<CreateContractAccount> for SethTransaction {
    fn from(tx: CreateContractAccount) -> Self {
        Self::CreateContractAccount(tx)
    }
}

impl From<MessageCall> for SethTransaction {
    fn from(tx: MessageCall) -> Self {
        Self::MessageCall(tx)
    }
}

impl From<SetPermissions> for SethTransaction {
    fn from(tx: SetPermissions) -> Self {
        Self::SetPermissions(tx)
    }
}

impl From<ReadOnlyMessageCall> for SethTransaction {
    fn from(tx: ReadOnlyMessageCall) -> Self {
        Self::ReadOnlyMessageCall(tx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_indices_follow_table_order() {
        for (i, kind) in TransactionKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }

    #[test]
    fn empty_target_is_absent() {
        let tx = CreateExternalAccount { to: Some(Bytes::new()), ..Default::default() };
        assert!(tx.target().is_none());

        let tx = CreateExternalAccount { to: Some(Bytes::from(vec![1u8; 20])), ..Default::default() };
        assert_eq!(tx.target().map(|b| b.len()), Some(20));
    }

    #[test]
    fn read_only_call_has_no_nonce() {
        let tx = SethTransaction::from(ReadOnlyMessageCall::default());
        assert_eq!(tx.kind(), TransactionKind::ReadOnlyMessageCall);
        assert_eq!(tx.nonce(), None);

        let tx = SethTransaction::from(MessageCall { nonce: 4, ..Default::default() });
        assert_eq!(tx.nonce(), Some(4));
    }

    #[test]
    fn json_tagged_representation() {
        let json = r#"{
            "type": "set_permissions",
            "nonce": 3,
            "to": "0x0000000000000000000000000000000000000000",
            "permissions": { "perms": 15, "set_bit": 15 }
        }"#;
        let tx: SethTransaction = serde_json::from_str(json).expect("deserialize");
        let SethTransaction::SetPermissions(inner) = &tx else {
            panic!("unexpected variant: {tx:?}");
        };
        assert_eq!(inner.nonce, 3);
        assert_eq!(inner.to.len(), 20);
        assert_eq!(inner.permissions, Some(EvmPermissions { perms: 15, set_bit: 15 }));
    }

    #[test]
    fn read_only_block_defaults_to_latest() {
        let json = r#"{ "type": "read_only_message_call", "gas_limit": 90000, "to": "0x01" }"#;
        let tx: SethTransaction = serde_json::from_str(json).expect("deserialize");
        let SethTransaction::ReadOnlyMessageCall(inner) = tx else {
            panic!("unexpected variant");
        };
        assert_eq!(inner.block, BlockRef::Latest);
        assert!(inner.data.is_empty());
    }
}
