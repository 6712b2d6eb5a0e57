use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::MakerError;
use crate::types::Amount;

/// Template for a class of genesis accounts, e.g. "validator" or
/// "participant". The roster builder expands `number` accounts from it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountType {
    pub name: String,
    #[serde(default)]
    pub definition: Option<String>,
    #[serde(default)]
    pub typical_user: Option<String>,
    /// How many accounts of this type to create.
    #[serde(default)]
    pub number: usize,
    /// Initial balance of each account.
    #[serde(default)]
    pub tokens: Amount,
    /// Stake each account bonds at genesis. Zero for non-validators.
    #[serde(default)]
    pub to_bond: Amount,
    /// Permission name → flag (> 0 grants).
    #[serde(default)]
    pub perms: BTreeMap<String, i64>,
}

impl AccountType {
    /// An account bonds at genesis only if it has a stake and can cover it.
    pub fn is_validator(&self) -> bool {
        self.to_bond > 0 && self.tokens >= self.to_bond
    }
}

/// Parse a JSON array of account types.
pub fn load_account_types(json: &str) -> Result<Vec<AccountType>, MakerError> {
    serde_json::from_str(json).map_err(|e| MakerError::InvalidAccountTypes(e.to_string()))
}
