//! Views of a built roster for the files a new chain is seeded from.

use std::collections::BTreeMap;

use chainmaker_core::error::MakerError;
use chainmaker_core::genesis::{GenesisAccount, GenesisPrivateValidator, GenesisValidator};
use chainmaker_core::types::Address;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::accounts::SynthesizedAccount;

/// Genesis document of a new chain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisDoc {
    pub genesis_time: DateTime<Utc>,
    pub chain_id: String,
    pub accounts: Vec<GenesisAccount>,
    pub validators: Vec<GenesisValidator>,
}

impl GenesisDoc {
    /// Collect ledger and validator entries in roster order.
    pub fn from_accounts(
        chain_id: &str,
        genesis_time: DateTime<Utc>,
        accounts: &[SynthesizedAccount],
    ) -> Self {
        Self {
            genesis_time,
            chain_id: chain_id.to_string(),
            accounts: accounts
                .iter()
                .map(|a| a.genesis_account().clone())
                .collect(),
            validators: accounts
                .iter()
                .filter_map(|a| a.genesis_validator().cloned())
                .collect(),
        }
    }

    pub fn to_json_pretty(&self) -> Result<String, MakerError> {
        serde_json::to_string_pretty(self).map_err(|e| MakerError::Serialization(e.to_string()))
    }
}

/// `accounts.csv`: `pubkey,tokens,name,perms,set_bit`, one row per account.
pub fn accounts_csv(accounts: &[SynthesizedAccount]) -> String {
    accounts
        .iter()
        .map(|account| {
            let ga = account.genesis_account();
            format!(
                "{},{},{},{},{}\n",
                hex::encode_upper(account.untyped_public_key_bytes()),
                ga.amount,
                ga.name,
                ga.permissions.base.perms,
                ga.permissions.base.set_bit,
            )
        })
        .collect()
}

/// Per-account key entry in `accounts.json`. Keys are `[type_byte, "HEX"]`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountKeys {
    pub address: Address,
    pub pub_key: (u8, String),
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priv_key: Option<(u8, String)>,
}

/// `accounts.json`: account name → address and keys. The private key is only
/// present for accounts built with unsafe extraction.
pub fn accounts_json(accounts: &[SynthesizedAccount]) -> BTreeMap<String, AccountKeys> {
    accounts
        .iter()
        .map(|account| {
            let type_byte = account.type_byte_public_key();
            let private = account.untyped_private_key_bytes();
            let keys = AccountKeys {
                address: account.genesis_account().address,
                pub_key: (
                    type_byte,
                    hex::encode_upper(account.untyped_public_key_bytes()),
                ),
                priv_key: (!private.is_empty())
                    .then(|| (type_byte, hex::encode_upper(private))),
            };
            (account.name().to_string(), keys)
        })
        .collect()
}

/// Private validator bundles by account name, in roster order.
pub fn private_validators(
    accounts: &[SynthesizedAccount],
) -> Vec<(&str, &GenesisPrivateValidator)> {
    accounts
        .iter()
        .filter_map(|a| a.genesis_private_validator().map(|pv| (a.name(), pv)))
        .collect()
}
