use chainmaker_core::genesis::GenesisPrivateValidator;
use chainmaker_core::types::{Address, PrivateKey, PublicKey};
use ed25519_dalek::SigningKey;
use rand::rngs::OsRng;

use crate::hash::address_from_pubkey;

/// An ed25519 keypair with its derived address.
///
/// `SigningKey` zeroizes its secret on drop.
pub struct KeyPair {
    pub address: Address,
    pub public_key: PublicKey,
    signing_key: SigningKey,
}

impl KeyPair {
    /// Generate a fresh ed25519 keypair.
    pub fn generate() -> Self {
        Self::from_signing_key(SigningKey::generate(&mut OsRng))
    }

    /// Restore a keypair from its 32-byte seed.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        Self::from_signing_key(SigningKey::from_bytes(seed))
    }

    fn from_signing_key(signing_key: SigningKey) -> Self {
        let public_key = PublicKey::Ed25519(signing_key.verifying_key().to_bytes());
        let address = address_from_pubkey(&public_key);
        Self {
            address,
            public_key,
            signing_key,
        }
    }

    /// Private key in the seed ‖ public layout.
    pub fn private_key(&self) -> PrivateKey {
        PrivateKey::Ed25519(self.signing_key.to_keypair_bytes())
    }

    /// Private validator bundle for a fresh validator (height, round and
    /// step all zero).
    pub fn to_private_validator(&self) -> GenesisPrivateValidator {
        GenesisPrivateValidator {
            address: self.address,
            pub_key: self.public_key.clone(),
            priv_key: self.private_key(),
            last_height: 0,
            last_round: 0,
            last_step: 0,
        }
    }
}

impl std::fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "KeyPair {{ address: {:?} }}", self.address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn private_key_ends_with_public_key() {
        let kp = KeyPair::generate();
        let sk = kp.private_key();
        assert_eq!(&sk.as_bytes()[32..], kp.public_key.as_bytes());
    }

    #[test]
    fn seed_restores_same_address() {
        let a = KeyPair::from_seed(&[9u8; 32]);
        let b = KeyPair::from_seed(&[9u8; 32]);
        assert_eq!(a.address, b.address);
        assert_eq!(a.public_key, b.public_key);
    }

    #[test]
    fn fresh_keypairs_differ() {
        assert_ne!(KeyPair::generate().address, KeyPair::generate().address);
    }

    #[test]
    fn private_validator_matches_keypair() {
        let kp = KeyPair::from_seed(&[4u8; 32]);
        let pv = kp.to_private_validator();
        assert_eq!(pv.address, kp.address);
        assert_eq!(pv.pub_key, kp.public_key);
        assert_eq!(pv.last_height, 0);
    }
}
