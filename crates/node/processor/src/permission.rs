//! Permission evaluation.
//!
//! A flag resolves in at most two steps: the account's own record, then the
//! record at [`GLOBAL_PERMISSIONS_ADDRESS`]. There is no deeper ancestry.

use seth_domain::{Account, GLOBAL_PERMISSIONS_ADDRESS, PermFlags, PermissionValue};
use seth_traits::{StateAccessor, StateError};

/// State of the global permission account.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GlobalPermissions {
    /// No global account exists yet; every flag is permitted.
    Bootstrap,
    /// The global account and its default record.
    Configured(Account),
}

impl GlobalPermissions {
    /// Look up the global permission account.
    pub fn load<S: StateAccessor + ?Sized>(state: &S) -> Result<Self, StateError> {
        Ok(match state.get_account(&GLOBAL_PERMISSIONS_ADDRESS)? {
            Some(global) => Self::Configured(global),
            None => Self::Bootstrap,
        })
    }

    /// Returns true when no global record exists.
    pub const fn is_bootstrap(&self) -> bool {
        matches!(self, Self::Bootstrap)
    }

    /// Resolve `flag` against the global record.
    ///
    /// A flag the global record leaves unset is denied.
    pub fn allows(&self, flag: PermFlags) -> bool {
        match self {
            Self::Bootstrap => true,
            Self::Configured(global) => {
                matches!(global.permissions.get(flag), PermissionValue::Explicit(true))
            }
        }
    }
}

/// Returns whether `account` holds `flag`.
///
/// An explicit value on the account wins. Otherwise the global record decides.
pub fn has_permission<S: StateAccessor + ?Sized>(
    state: &S,
    account: &Account,
    flag: PermFlags,
) -> Result<bool, StateError> {
    match account.permissions.get(flag) {
        PermissionValue::Explicit(granted) => Ok(granted),
        PermissionValue::Inherit => Ok(GlobalPermissions::load(state)?.allows(flag)),
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use seth_domain::AccountPermissions;
    use seth_overlay::MemoryState;
    use seth_primitives::Address;

    use super::*;

    fn account(permissions: AccountPermissions) -> Account {
        Account::new(Address::repeat_byte(0x01), 1).with_permissions(permissions)
    }

    fn with_global(permissions: AccountPermissions) -> MemoryState {
        MemoryState::with_accounts([
            Account::new(GLOBAL_PERMISSIONS_ADDRESS, 1).with_permissions(permissions)
        ])
    }

    #[test]
    fn bootstrap_allows_everything() {
        let state = MemoryState::new();
        let account = account(AccountPermissions::empty());
        for flag in PermFlags::ALL.iter() {
            assert!(has_permission(&state, &account, flag).unwrap());
        }
        assert!(GlobalPermissions::load(&state).unwrap().is_bootstrap());
    }

    #[test]
    fn explicit_deny_beats_bootstrap() {
        let state = MemoryState::new();
        let account = account(AccountPermissions::explicit(PermFlags::CALL));
        assert!(!has_permission(&state, &account, PermFlags::ROOT).unwrap());
        assert!(has_permission(&state, &account, PermFlags::CALL).unwrap());
    }

    #[rstest]
    #[case::global_grants(PermFlags::CALL, true)]
    #[case::global_denies(PermFlags::CREATE_CONTRACT, false)]
    fn inherit_uses_global(#[case] flag: PermFlags, #[case] expected: bool) {
        let state = with_global(AccountPermissions::explicit(PermFlags::CALL));
        let account = account(AccountPermissions::empty());
        assert_eq!(has_permission(&state, &account, flag).unwrap(), expected);
    }

    #[test]
    fn explicit_grant_beats_global_deny() {
        let state = with_global(AccountPermissions::explicit(PermFlags::empty()));
        let mut record = AccountPermissions::empty();
        record.set(PermFlags::CREATE_ACCOUNT, true);
        let account = account(record);

        assert!(has_permission(&state, &account, PermFlags::CREATE_ACCOUNT).unwrap());
        assert!(!has_permission(&state, &account, PermFlags::CALL).unwrap());
    }

    #[test]
    fn unset_in_global_is_denied() {
        let state = with_global(AccountPermissions::empty());
        let account = account(AccountPermissions::empty());
        for flag in PermFlags::ALL.iter() {
            assert!(!has_permission(&state, &account, flag).unwrap());
        }
    }

    #[test]
    fn global_account_resolves_against_itself() {
        let mut record = AccountPermissions::empty();
        record.set(PermFlags::CREATE_ACCOUNT, true);
        let state = with_global(record);
        let GlobalPermissions::Configured(global) = GlobalPermissions::load(&state).unwrap()
        else {
            panic!("global account missing");
        };

        assert!(has_permission(&state, &global, PermFlags::CREATE_ACCOUNT).unwrap());
        assert!(!has_permission(&state, &global, PermFlags::ROOT).unwrap());
    }
}
