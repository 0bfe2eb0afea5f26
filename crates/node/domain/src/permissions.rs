//! Account permission records.
//!
//! A permission record is a pair of flag sets: `perms` holds the value of each
//! capability and `set_bit` records which of those values are explicit. A flag
//! whose set bit is clear has no value of its own and resolves through the
//! global permission account instead.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Privileged capabilities an account may hold.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct PermFlags: u64 {
        /// Administer permissions of other accounts.
        const ROOT = 1 << 0;
        /// Send message calls to existing accounts.
        const CALL = 1 << 1;
        /// Deploy contract accounts.
        const CREATE_CONTRACT = 1 << 2;
        /// Create external accounts, for oneself or on behalf of another address.
        const CREATE_ACCOUNT = 1 << 3;
    }
}

impl PermFlags {
    /// Every capability flag.
    pub const ALL: Self = Self::all();

    /// Returns a human readable name for a single flag.
    pub fn name(self) -> &'static str {
        if self == Self::ROOT {
            "root"
        } else if self == Self::CALL {
            "call"
        } else if self == Self::CREATE_CONTRACT {
            "create_contract"
        } else if self == Self::CREATE_ACCOUNT {
            "create_account"
        } else {
            "composite"
        }
    }
}

/// Resolution of a single flag within one permission record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PermissionValue {
    /// The record carries its own value for the flag.
    Explicit(bool),
    /// The record has no value; fall back to the global permission account.
    Inherit,
}

/// Permission record stored on every account.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountPermissions {
    /// Flag values. Only meaningful where the matching bit of `set_bit` is present.
    pub perms: PermFlags,
    /// Flags that carry an explicit value.
    pub set_bit: PermFlags,
}

impl AccountPermissions {
    /// A record with no explicit values; every flag inherits.
    pub const fn empty() -> Self {
        Self { perms: PermFlags::empty(), set_bit: PermFlags::empty() }
    }

    /// A record granting every flag explicitly.
    pub const fn all_granted() -> Self {
        Self { perms: PermFlags::ALL, set_bit: PermFlags::ALL }
    }

    /// A record with explicit values for every flag: `granted` flags are true, the rest false.
    pub const fn explicit(granted: PermFlags) -> Self {
        Self { perms: granted, set_bit: PermFlags::ALL }
    }

    /// Returns the local resolution of `flag`.
    ///
    /// `flag` is expected to be a single flag; for a composite the value is
    /// explicit only when every member is set, and true only when every member is granted.
    pub fn get(&self, flag: PermFlags) -> PermissionValue {
        if self.set_bit.contains(flag) {
            PermissionValue::Explicit(self.perms.contains(flag))
        } else {
            PermissionValue::Inherit
        }
    }

    /// Sets an explicit value for `flag`.
    pub fn set(&mut self, flag: PermFlags, value: bool) {
        self.set_bit.insert(flag);
        self.perms.set(flag, value);
    }

    /// Removes any explicit value for `flag` so that it inherits again.
    pub fn unset(&mut self, flag: PermFlags) {
        self.set_bit.remove(flag);
        self.perms.remove(flag);
    }

    /// Returns a copy of this record with `ROOT` forced to explicit false.
    ///
    /// Accounts created without an explicit record inherit their creator's
    /// record through this.
    #[must_use]
    pub fn without_root(mut self) -> Self {
        self.set(PermFlags::ROOT, false);
        self
    }
}

/// Permission record as carried by transactions.
///
/// Bits outside [`PermFlags::ALL`] are dropped on conversion.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvmPermissions {
    /// Raw flag values.
    pub perms: u64,
    /// Raw explicit-value mask.
    pub set_bit: u64,
}

impl From<EvmPermissions> for AccountPermissions {
    fn from(record: EvmPermissions) -> Self {
        let set_bit = PermFlags::from_bits_truncate(record.set_bit);
        let perms = PermFlags::from_bits_truncate(record.perms) & set_bit;
        Self { perms, set_bit }
    }
}

impl From<AccountPermissions> for EvmPermissions {
    fn from(record: AccountPermissions) -> Self {
        Self { perms: record.perms.bits(), set_bit: record.set_bit.bits() }
    }
}
