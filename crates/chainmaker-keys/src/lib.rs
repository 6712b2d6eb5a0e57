//! chainmaker-keys
//!
//! Boundary to the key daemon that generates account keys. The daemon is a
//! stateless remote capability: it creates a key for a scheme, reports the
//! public key for an address and converts an address's key into a private
//! validator bundle. Keys are never passphrase-locked in this tooling, so the
//! credential passed on every call is empty.

pub mod client;
pub mod config;
pub mod local;

pub use client::KeysClient;
pub use config::KeysConfig;
pub use local::LocalKeys;

use chainmaker_core::error::KeyMaterialError;
use chainmaker_core::genesis::GenesisPrivateValidator;
use chainmaker_core::types::KeyScheme;
use tracing::{debug, error};

/// The three operations the key daemon offers.
pub trait KeySource {
    /// Generate a fresh key for `scheme` and return its address as hex.
    fn generate_key(&self, scheme: KeyScheme, credential: &str) -> Result<String, KeyMaterialError>;

    /// Public key of `address` as hex.
    fn public_key(&self, address: &str, credential: &str) -> Result<String, KeyMaterialError>;

    /// Private validator bundle for `address` as JSON.
    fn convert(&self, address: &str, credential: &str) -> Result<Vec<u8>, KeyMaterialError>;
}

/// Payloads exactly as the daemon returned them.
#[derive(Clone, Default)]
pub struct RawKeyMaterial {
    pub address: String,
    pub public_key: String,
    /// Empty when private validator extraction was blocked.
    pub private_validator_json: Vec<u8>,
}

impl std::fmt::Debug for RawKeyMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RawKeyMaterial")
            .field("address", &self.address)
            .field("public_key", &self.public_key)
            .field("private_validator_json", &self.private_validator_json.len())
            .finish()
    }
}

/// Decoded key material for one account.
#[derive(Clone, Debug)]
pub struct KeyMaterial {
    pub address: Vec<u8>,
    pub public_key: Vec<u8>,
    pub private_validator: Option<GenesisPrivateValidator>,
}

/// Generate a key and collect its payloads from the daemon. The private
/// validator is only requested when `block_private_validator` is false.
pub fn make_key<S: KeySource + ?Sized>(
    source: &S,
    scheme: KeyScheme,
    block_private_validator: bool,
) -> Result<RawKeyMaterial, KeyMaterialError> {
    debug!(scheme = %scheme, "sending call to key daemon");

    let address = source.generate_key(scheme, "")?;
    let public_key = source.public_key(&address, "")?;
    let private_validator_json = if block_private_validator {
        Vec::new()
    } else {
        source.convert(&address, "")?
    };

    Ok(RawKeyMaterial {
        address,
        public_key,
        private_validator_json,
    })
}

/// Generate a key and decode the address, public key and (unless blocked)
/// the private validator bundle.
///
/// An empty bundle when one was requested is an error, never a zero-valued
/// private validator.
pub fn generate_address_and_key<S: KeySource + ?Sized>(
    source: &S,
    scheme: KeyScheme,
    block_private_validator: bool,
) -> Result<KeyMaterial, KeyMaterialError> {
    let raw = make_key(source, scheme, block_private_validator)?;

    let address = hex::decode(raw.address.trim()).map_err(KeyMaterialError::AddressDecode)?;
    let public_key =
        hex::decode(raw.public_key.trim()).map_err(KeyMaterialError::PublicKeyDecode)?;

    let private_validator = if block_private_validator {
        None
    } else {
        Some(decode_private_validator(&raw.private_validator_json)?)
    };

    Ok(KeyMaterial {
        address,
        public_key,
        private_validator,
    })
}

fn decode_private_validator(json: &[u8]) -> Result<GenesisPrivateValidator, KeyMaterialError> {
    if json.iter().all(u8::is_ascii_whitespace) {
        error!("key daemon returned an empty private validator");
        return Err(KeyMaterialError::EmptyPrivateValidator);
    }
    serde_json::from_slice(json).map_err(|e| {
        // The payload holds private key material; only its size is logged.
        error!(bytes = json.len(), error = %e, "failed to decode private validator");
        KeyMaterialError::PrivateValidatorDecode(e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    /// Returns canned payloads and counts `convert` calls.
    struct Canned {
        address: &'static str,
        public_key: &'static str,
        private_validator: String,
        converts: Cell<usize>,
    }

    impl Canned {
        fn new(address: &'static str, public_key: &'static str, pv: &str) -> Self {
            Self {
                address,
                public_key,
                private_validator: pv.to_string(),
                converts: Cell::new(0),
            }
        }
    }

    impl KeySource for Canned {
        fn generate_key(&self, _: KeyScheme, _: &str) -> Result<String, KeyMaterialError> {
            Ok(self.address.to_string())
        }

        fn public_key(&self, _: &str, _: &str) -> Result<String, KeyMaterialError> {
            Ok(self.public_key.to_string())
        }

        fn convert(&self, _: &str, _: &str) -> Result<Vec<u8>, KeyMaterialError> {
            self.converts.set(self.converts.get() + 1);
            Ok(self.private_validator.clone().into_bytes())
        }
    }

    const SCHEME: KeyScheme = KeyScheme::Ed25519Ripemd160;

    #[test]
    fn blocked_skips_convert() {
        let src = Canned::new("0A0B", "0C0D", "");
        let km = generate_address_and_key(&src, SCHEME, true).unwrap();
        assert_eq!(km.address, vec![0x0A, 0x0B]);
        assert_eq!(km.public_key, vec![0x0C, 0x0D]);
        assert!(km.private_validator.is_none());
        assert_eq!(src.converts.get(), 0);
    }

    #[test]
    fn empty_bundle_is_an_error_when_requested() {
        let src = Canned::new("0A0B", "0C0D", "");
        let err = generate_address_and_key(&src, SCHEME, false).unwrap_err();
        assert!(matches!(err, KeyMaterialError::EmptyPrivateValidator));
        assert_eq!(src.converts.get(), 1);
    }

    #[test]
    fn decode_failures_are_distinct() {
        let err = generate_address_and_key(&Canned::new("zz", "0C", ""), SCHEME, true).unwrap_err();
        assert!(matches!(err, KeyMaterialError::AddressDecode(_)));

        let err = generate_address_and_key(&Canned::new("0A", "zz", ""), SCHEME, true).unwrap_err();
        assert!(matches!(err, KeyMaterialError::PublicKeyDecode(_)));

        let err = generate_address_and_key(&Canned::new("0A", "0C", "{not json"), SCHEME, false)
            .unwrap_err();
        assert!(matches!(err, KeyMaterialError::PrivateValidatorDecode(_)));
    }

    #[test]
    fn local_keys_round_trip_through_decode() {
        let keys = LocalKeys::new();
        let km = generate_address_and_key(&keys, SCHEME, false).unwrap();
        let pv = km.private_validator.unwrap();
        assert_eq!(km.address, pv.address.as_bytes().to_vec());
        assert_eq!(km.public_key, pv.pub_key.as_bytes().to_vec());
    }
}
