/// ─── Chainmaker Constants ───────────────────────────────────────────────────
///
/// Identifiers exchanged with the key daemon and the genesis tooling.

// ── Chain kinds ──────────────────────────────────────────────────────────────

/// Legacy name for chains run on the Tendermint consensus engine. Currently
/// the only chain kind the roster builder accepts.
pub const CHAIN_KIND_MINT: &str = "mint";

// ── Key schemes ──────────────────────────────────────────────────────────────

/// ed25519 for signing, ripemd160 for the address digest.
pub const KEY_SCHEME_ED25519_RIPEMD160: &str = "ed25519,ripemd160";

/// Public key label written into genesis validator entries.
pub const KEY_TYPE_ED25519: &str = "ed25519";

/// go-crypto type byte for ed25519 keys.
pub const TYPE_BYTE_ED25519: u8 = 0x01;

// ── Sizes ────────────────────────────────────────────────────────────────────

/// Length of a ripemd160 address.
pub const ADDRESS_LEN: usize = 20;

/// Length of an ed25519 public key.
pub const ED25519_PUBLIC_KEY_LEN: usize = 32;

/// Length of an ed25519 private key in the seed ‖ public layout.
pub const ED25519_PRIVATE_KEY_LEN: usize = 64;

// ── Naming ───────────────────────────────────────────────────────────────────

/// Zero-padded width of the ordinal suffix in `<chain>_<type>_nnn`.
pub const ACCOUNT_ORDINAL_WIDTH: usize = 3;
