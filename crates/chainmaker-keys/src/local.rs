use std::collections::HashMap;
use std::sync::Mutex;

use chainmaker_core::error::KeyMaterialError;
use chainmaker_core::types::KeyScheme;
use chainmaker_crypto::KeyPair;
use tracing::debug;

use crate::KeySource;

/// In-process key source for development chains and tests.
///
/// Keys live only as long as this value. Passphrase-locked keys are not
/// supported, so any non-empty credential is refused.
#[derive(Default)]
pub struct LocalKeys {
    keys: Mutex<HashMap<String, KeyPair>>,
}

impl LocalKeys {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys generated so far.
    pub fn len(&self) -> usize {
        self.keys.lock().map(|k| k.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn with_key<T>(
        &self,
        address: &str,
        credential: &str,
        f: impl FnOnce(&KeyPair) -> T,
    ) -> Result<T, KeyMaterialError> {
        check_credential(credential)?;
        let keys = self.keys.lock().map_err(|_| poisoned())?;
        keys.get(&address.to_ascii_uppercase())
            .map(f)
            .ok_or_else(|| KeyMaterialError::UnknownAddress(address.to_string()))
    }
}

impl KeySource for LocalKeys {
    fn generate_key(&self, scheme: KeyScheme, credential: &str) -> Result<String, KeyMaterialError> {
        check_credential(credential)?;
        let kp = match scheme {
            KeyScheme::Ed25519Ripemd160 => KeyPair::generate(),
        };
        let address = kp.address.to_hex();
        debug!(address = %address, "generated local key");
        self.keys
            .lock()
            .map_err(|_| poisoned())?
            .insert(address.clone(), kp);
        Ok(address)
    }

    fn public_key(&self, address: &str, credential: &str) -> Result<String, KeyMaterialError> {
        self.with_key(address, credential, |kp| kp.public_key.to_hex())
    }

    fn convert(&self, address: &str, credential: &str) -> Result<Vec<u8>, KeyMaterialError> {
        self.with_key(address, credential, |kp| {
            serde_json::to_vec(&kp.to_private_validator())
        })?
        .map_err(|e| KeyMaterialError::Request(e.to_string()))
    }
}

fn check_credential(credential: &str) -> Result<(), KeyMaterialError> {
    if credential.is_empty() {
        Ok(())
    } else {
        Err(KeyMaterialError::Request(
            "passphrase-locked keys are not supported".into(),
        ))
    }
}

fn poisoned() -> KeyMaterialError {
    KeyMaterialError::Request("local key store lock poisoned".into())
}
