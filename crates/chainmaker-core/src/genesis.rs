//! Genesis record shapes and their factories.

use serde::{Deserialize, Serialize};

use crate::error::GenesisRecordError;
use crate::permission::AccountPermissions;
use crate::types::{Address, Amount, PrivateKey, PublicKey};

/// Seed-state entry crediting an address with a balance and permissions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisAccount {
    pub address: Address,
    pub amount: Amount,
    pub name: String,
    pub permissions: AccountPermissions,
}

impl GenesisAccount {
    pub fn new(
        address: &[u8],
        amount: Amount,
        name: &str,
        permissions: AccountPermissions,
    ) -> Result<Self, GenesisRecordError> {
        Ok(Self {
            address: Address::from_slice(address)?,
            amount,
            name: name.to_string(),
            permissions,
        })
    }
}

/// Address and amount a validator's bond is returned to on unbonding.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicAccount {
    pub address: Address,
    pub amount: Amount,
}

/// Genesis-time bonded validator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisValidator {
    pub pub_key: PublicKey,
    pub amount: Amount,
    pub name: String,
    pub unbond_to: Vec<BasicAccount>,
}

impl GenesisValidator {
    pub fn new(
        amount: Amount,
        name: &str,
        unbond_to_address: &[u8],
        bond_amount: Amount,
        key_type: &str,
        public_key_bytes: &[u8],
    ) -> Result<Self, GenesisRecordError> {
        let pub_key = PublicKey::from_key_type(key_type, public_key_bytes)?;
        let unbond_to = BasicAccount {
            address: Address::from_slice(unbond_to_address)?,
            amount: bond_amount,
        };
        Ok(Self {
            pub_key,
            amount,
            name: name.to_string(),
            unbond_to: vec![unbond_to],
        })
    }

    /// Total stake bonded by this validator.
    pub fn bond_amount(&self) -> Amount {
        self.unbond_to.iter().map(|a| a.amount).sum()
    }
}

/// Signing material for a validator process, as exported by the key daemon.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisPrivateValidator {
    pub address: Address,
    pub pub_key: PublicKey,
    pub priv_key: PrivateKey,
    #[serde(default)]
    pub last_height: u64,
    #[serde(default)]
    pub last_round: u64,
    #[serde(default)]
    pub last_step: u8,
}
