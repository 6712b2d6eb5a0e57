pub mod hash;
pub mod keypair;

pub use hash::{address_from_pubkey, ripemd160};
pub use keypair::KeyPair;
