use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use zeroize::Zeroize;

use crate::constants::{
    ADDRESS_LEN, CHAIN_KIND_MINT, ED25519_PRIVATE_KEY_LEN, ED25519_PUBLIC_KEY_LEN,
    KEY_SCHEME_ED25519_RIPEMD160, KEY_TYPE_ED25519, TYPE_BYTE_ED25519,
};
use crate::error::{GenesisRecordError, MakerError};

/// Token amount credited or bonded at genesis.
pub type Amount = u64;

// ── Address ──────────────────────────────────────────────────────────────────

/// 20-byte account address: ripemd160 over the encoded public key.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address(pub [u8; ADDRESS_LEN]);

impl Address {
    pub fn from_bytes(b: [u8; ADDRESS_LEN]) -> Self {
        Self(b)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, GenesisRecordError> {
        let arr: [u8; ADDRESS_LEN] =
            bytes
                .try_into()
                .map_err(|_| GenesisRecordError::InvalidAddressLength {
                    expected: ADDRESS_LEN,
                    got: bytes.len(),
                })?;
        Ok(Self(arr))
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }

    /// Upper-case hex, the form the key daemon and genesis files use.
    pub fn to_hex(&self) -> String {
        hex::encode_upper(self.0)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.to_hex())
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        let bytes = hex::decode(&s).map_err(serde::de::Error::custom)?;
        Address::from_slice(&bytes).map_err(serde::de::Error::custom)
    }
}

// ── PublicKey ────────────────────────────────────────────────────────────────

/// Type-tagged public key. Serialized in the go-wire JSON form
/// `[type_byte, "HEX"]`.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum PublicKey {
    Ed25519([u8; ED25519_PUBLIC_KEY_LEN]),
}

impl PublicKey {
    /// Build a key from its genesis label (`"ed25519"`) and raw bytes.
    pub fn from_key_type(key_type: &str, bytes: &[u8]) -> Result<Self, GenesisRecordError> {
        match key_type {
            KEY_TYPE_ED25519 => Self::from_type_byte(TYPE_BYTE_ED25519, bytes),
            other => Err(GenesisRecordError::UnknownKeyType(other.to_string())),
        }
    }

    pub fn from_type_byte(type_byte: u8, bytes: &[u8]) -> Result<Self, GenesisRecordError> {
        match type_byte {
            TYPE_BYTE_ED25519 => {
                let arr: [u8; ED25519_PUBLIC_KEY_LEN] = bytes.try_into().map_err(|_| {
                    GenesisRecordError::InvalidPublicKeyLength {
                        expected: ED25519_PUBLIC_KEY_LEN,
                        got: bytes.len(),
                    }
                })?;
                Ok(PublicKey::Ed25519(arr))
            }
            other => Err(GenesisRecordError::UnknownTypeByte(other)),
        }
    }

    pub fn type_byte(&self) -> u8 {
        match self {
            PublicKey::Ed25519(_) => TYPE_BYTE_ED25519,
        }
    }

    pub fn key_type(&self) -> &'static str {
        match self {
            PublicKey::Ed25519(_) => KEY_TYPE_ED25519,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            PublicKey::Ed25519(b) => b,
        }
    }

    pub fn to_hex(&self) -> String {
        hex::encode_upper(self.as_bytes())
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({}:{})", self.key_type(), self.to_hex())
    }
}

impl Serialize for PublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (self.type_byte(), self.to_hex()).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (type_byte, s) = <(u8, String)>::deserialize(deserializer)?;
        let bytes = hex::decode(&s).map_err(serde::de::Error::custom)?;
        PublicKey::from_type_byte(type_byte, &bytes).map_err(serde::de::Error::custom)
    }
}

// ── PrivateKey ───────────────────────────────────────────────────────────────

/// Type-tagged private signing key, wiped from memory on drop.
///
/// The ed25519 variant holds 64 bytes: the 32-byte seed followed by the
/// public key, as the key daemon exports it.
#[derive(Clone, PartialEq, Eq)]
pub enum PrivateKey {
    Ed25519([u8; ED25519_PRIVATE_KEY_LEN]),
}

impl PrivateKey {
    pub fn from_type_byte(type_byte: u8, bytes: &[u8]) -> Result<Self, GenesisRecordError> {
        match type_byte {
            TYPE_BYTE_ED25519 => {
                let arr: [u8; ED25519_PRIVATE_KEY_LEN] = bytes.try_into().map_err(|_| {
                    GenesisRecordError::InvalidPrivateKeyLength {
                        expected: ED25519_PRIVATE_KEY_LEN,
                        got: bytes.len(),
                    }
                })?;
                Ok(PrivateKey::Ed25519(arr))
            }
            other => Err(GenesisRecordError::UnknownTypeByte(other)),
        }
    }

    pub fn type_byte(&self) -> u8 {
        match self {
            PrivateKey::Ed25519(_) => TYPE_BYTE_ED25519,
        }
    }

    /// Raw key bytes without the type byte.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            PrivateKey::Ed25519(b) => b,
        }
    }
}

impl Drop for PrivateKey {
    fn drop(&mut self) {
        match self {
            PrivateKey::Ed25519(bytes) => bytes.zeroize(),
        }
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PrivateKey({}b)", self.as_bytes().len())
    }
}

impl Serialize for PrivateKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (self.type_byte(), hex::encode_upper(self.as_bytes())).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PrivateKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (type_byte, s) = <(u8, String)>::deserialize(deserializer)?;
        let mut bytes = hex::decode(&s).map_err(serde::de::Error::custom)?;
        let key = PrivateKey::from_type_byte(type_byte, &bytes);
        bytes.zeroize();
        key.map_err(serde::de::Error::custom)
    }
}

// ── KeyScheme ────────────────────────────────────────────────────────────────

/// Signing and address-digest scheme requested from the key daemon.
///
/// Closed set: adding a scheme means adding a variant here and teaching the
/// key sources to produce it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyScheme {
    /// ed25519 signatures, ripemd160 address digest.
    Ed25519Ripemd160,
}

impl KeyScheme {
    /// Identifier sent to the key daemon.
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyScheme::Ed25519Ripemd160 => KEY_SCHEME_ED25519_RIPEMD160,
        }
    }

    /// Public key label for genesis validator entries.
    pub fn key_type(&self) -> &'static str {
        match self {
            KeyScheme::Ed25519Ripemd160 => KEY_TYPE_ED25519,
        }
    }

    pub fn type_byte(&self) -> u8 {
        match self {
            KeyScheme::Ed25519Ripemd160 => TYPE_BYTE_ED25519,
        }
    }
}

impl FromStr for KeyScheme {
    type Err = MakerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            KEY_SCHEME_ED25519_RIPEMD160 => Ok(KeyScheme::Ed25519Ripemd160),
            other => Err(MakerError::UnsupportedKeyScheme(other.to_string())),
        }
    }
}

impl fmt::Display for KeyScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── ChainKind ────────────────────────────────────────────────────────────────

/// Consensus engine backing the new chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChainKind {
    /// Tendermint-backed chain, historically called "mint".
    Mint,
}

impl FromStr for ChainKind {
    type Err = MakerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            CHAIN_KIND_MINT => Ok(ChainKind::Mint),
            other => Err(MakerError::UnsupportedChainKind(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_rejects_wrong_length() {
        let err = Address::from_slice(&[0u8; 19]).unwrap_err();
        assert_eq!(
            err,
            GenesisRecordError::InvalidAddressLength {
                expected: 20,
                got: 19
            }
        );
    }

    #[test]
    fn public_key_uses_go_wire_json() {
        let pk = PublicKey::Ed25519([0xAB; 32]);
        let json = serde_json::to_string(&pk).unwrap();
        assert_eq!(json, format!("[1,\"{}\"]", "AB".repeat(32)));
        let back: PublicKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, pk);
    }

    #[test]
    fn unknown_type_byte_is_rejected() {
        let err = PublicKey::from_type_byte(0x02, &[0u8; 32]).unwrap_err();
        assert_eq!(err, GenesisRecordError::UnknownTypeByte(0x02));
    }

    #[test]
    fn private_key_debug_hides_bytes() {
        let sk = PrivateKey::Ed25519([7u8; 64]);
        assert_eq!(format!("{sk:?}"), "PrivateKey(64b)");
    }

    #[test]
    fn key_scheme_table_is_closed() {
        assert_eq!(
            "ed25519,ripemd160".parse::<KeyScheme>().unwrap(),
            KeyScheme::Ed25519Ripemd160
        );
        let err = "secp256k1,sha3".parse::<KeyScheme>().unwrap_err();
        assert!(matches!(err, MakerError::UnsupportedKeyScheme(s) if s == "secp256k1,sha3"));
    }

    #[test]
    fn only_mint_chain_kind_parses() {
        assert_eq!("mint".parse::<ChainKind>().unwrap(), ChainKind::Mint);
        assert!(matches!(
            "unknown".parse::<ChainKind>(),
            Err(MakerError::UnsupportedChainKind(_))
        ));
    }
}
