//! Account permissions and the conversion from the flat name → flag mapping
//! found in account-type definitions.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::PermissionError;

/// Bitmask of chain-level capabilities.
pub type PermFlag = u64;

pub const ROOT: PermFlag = 1 << 0;
pub const SEND: PermFlag = 1 << 1;
pub const CALL: PermFlag = 1 << 2;
pub const CREATE_CONTRACT: PermFlag = 1 << 3;
pub const CREATE_ACCOUNT: PermFlag = 1 << 4;
pub const BOND: PermFlag = 1 << 5;
pub const NAME: PermFlag = 1 << 6;
pub const HAS_BASE: PermFlag = 1 << 7;
pub const SET_BASE: PermFlag = 1 << 8;
pub const UNSET_BASE: PermFlag = 1 << 9;
pub const SET_GLOBAL: PermFlag = 1 << 10;
pub const HAS_ROLE: PermFlag = 1 << 11;
pub const ADD_ROLE: PermFlag = 1 << 12;
pub const RM_ROLE: PermFlag = 1 << 13;

/// Permission names as they appear in account-type definitions.
const PERMISSION_NAMES: [(&str, PermFlag); 14] = [
    ("root", ROOT),
    ("send", SEND),
    ("call", CALL),
    ("create_contract", CREATE_CONTRACT),
    ("create_account", CREATE_ACCOUNT),
    ("bond", BOND),
    ("name", NAME),
    ("has_base", HAS_BASE),
    ("set_base", SET_BASE),
    ("unset_base", UNSET_BASE),
    ("set_global", SET_GLOBAL),
    ("has_role", HAS_ROLE),
    ("add_role", ADD_ROLE),
    ("rm_role", RM_ROLE),
];

/// Look up the flag for a permission name.
pub fn perm_string_to_flag(name: &str) -> Result<PermFlag, PermissionError> {
    PERMISSION_NAMES
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, flag)| *flag)
        .ok_or_else(|| PermissionError::UnknownPermission(name.to_string()))
}

/// Base permissions: `perms` holds the granted bits, `set_bit` marks which
/// bits were explicitly set (granted or denied) rather than inherited.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasePermissions {
    pub perms: PermFlag,
    pub set_bit: PermFlag,
}

impl BasePermissions {
    pub fn set(&mut self, flag: PermFlag, value: bool) {
        if value {
            self.perms |= flag;
        } else {
            self.perms &= !flag;
        }
        self.set_bit |= flag;
    }

    /// `Some(granted)` when the flag was explicitly set, `None` otherwise.
    pub fn get(&self, flag: PermFlag) -> Option<bool> {
        if self.set_bit & flag == 0 {
            None
        } else {
            Some(self.perms & flag != 0)
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountPermissions {
    pub base: BasePermissions,
    pub roles: Vec<String>,
}

/// Convert a name → flag mapping plus a role list into `AccountPermissions`.
///
/// A value greater than zero grants the permission, anything else denies it.
pub fn convert_permissions_map_and_roles(
    perms: &BTreeMap<String, i64>,
    roles: &[String],
) -> Result<AccountPermissions, PermissionError> {
    let mut account_permissions = AccountPermissions::default();
    for (name, value) in perms {
        let flag = perm_string_to_flag(name)?;
        account_permissions.base.set(flag, *value > 0);
    }
    account_permissions.roles = roles.to_vec();
    Ok(account_permissions)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn perms(entries: &[(&str, i64)]) -> BTreeMap<String, i64> {
        entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn grants_and_denials_are_both_marked_set() {
        let p = convert_permissions_map_and_roles(&perms(&[("send", 1), ("bond", 0)]), &[])
            .unwrap();
        assert_eq!(p.base.perms, SEND);
        assert_eq!(p.base.set_bit, SEND | BOND);
        assert_eq!(p.base.get(SEND), Some(true));
        assert_eq!(p.base.get(BOND), Some(false));
        assert_eq!(p.base.get(ROOT), None);
        assert!(p.roles.is_empty());
    }

    #[test]
    fn unknown_permission_fails() {
        let err = convert_permissions_map_and_roles(&perms(&[("teleport", 1)]), &[]).unwrap_err();
        assert_eq!(err, PermissionError::UnknownPermission("teleport".into()));
    }

    #[test]
    fn roles_are_copied() {
        let roles = vec!["admin".to_string()];
        let p = convert_permissions_map_and_roles(&BTreeMap::new(), &roles).unwrap();
        assert_eq!(p.roles, roles);
        assert_eq!(p.base, BasePermissions::default());
    }

    #[test]
    fn every_name_maps_to_a_distinct_bit() {
        let all: PermFlag = PERMISSION_NAMES.iter().fold(0, |acc, (_, f)| {
            assert_eq!(acc & f, 0);
            acc | f
        });
        assert_eq!(all, (1 << 14) - 1);
    }
}
