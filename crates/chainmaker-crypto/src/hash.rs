use chainmaker_core::types::{Address, PublicKey};
use ripemd::{Digest, Ripemd160};

/// Compute RIPEMD-160 of arbitrary bytes → 20-byte array.
pub fn ripemd160(data: &[u8]) -> [u8; 20] {
    Ripemd160::digest(data).into()
}

/// Derive an address from a public key: RIPEMD-160 over the go-wire
/// encoding, i.e. the type byte followed by the varint length-prefixed key.
pub fn address_from_pubkey(public_key: &PublicKey) -> Address {
    let key = public_key.as_bytes();
    let mut encoded = Vec::with_capacity(key.len() + 3);
    encoded.push(public_key.type_byte());
    // go-wire uvarint: one byte giving the width, then the big-endian length.
    encoded.push(1);
    encoded.push(key.len() as u8);
    encoded.extend_from_slice(key);
    Address::from_bytes(ripemd160(&encoded))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ripemd160_known_vector() {
        assert_eq!(
            ripemd160(b"abc"),
            [
                0x8e, 0xb2, 0x08, 0xf7, 0xe0, 0x5d, 0x98, 0x7a, 0x9b, 0x04, 0x4a, 0x8e, 0x98,
                0xc6, 0xb0, 0x87, 0xf1, 0x5a, 0x0b, 0xfc
            ]
        );
    }

    #[test]
    fn address_depends_on_key() {
        let a = address_from_pubkey(&PublicKey::Ed25519([1u8; 32]));
        let b = address_from_pubkey(&PublicKey::Ed25519([2u8; 32]));
        assert_ne!(a, b);
        assert_eq!(a, address_from_pubkey(&PublicKey::Ed25519([1u8; 32])));
    }
}
