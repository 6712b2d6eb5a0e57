use thiserror::Error;

#[derive(Debug, Error)]
pub enum MakerError {
    // ── Dispatch ─────────────────────────────────────────────────────────────
    #[error("unknown chain type specifier (chain type: {0})")]
    UnsupportedChainKind(String),

    #[error("currently only ed25519/ripemd160 is supported: unknown key type ({0})")]
    UnsupportedKeyScheme(String),

    // ── Collaborators ────────────────────────────────────────────────────────
    #[error(transparent)]
    PermissionTranslationFailed(#[from] PermissionError),

    #[error("key material request failed: {0}")]
    KeyMaterialRequestFailed(#[from] KeyMaterialError),

    #[error("failed to construct genesis account: {0}")]
    AccountConstructionFailed(#[source] GenesisRecordError),

    #[error("failed to construct genesis validator: {0}")]
    ValidatorConstructionFailed(#[source] GenesisRecordError),

    // ── Roster ───────────────────────────────────────────────────────────────
    #[error("failed to construct account {account} for {chain}: {source}")]
    SynthesisAborted {
        account: String,
        chain: String,
        #[source]
        source: Box<MakerError>,
    },

    #[error("invalid account type definitions: {0}")]
    InvalidAccountTypes(String),

    // ── Export ───────────────────────────────────────────────────────────────
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl MakerError {
    /// Innermost error, skipping the roster-level `SynthesisAborted` wrapper.
    pub fn root(&self) -> &MakerError {
        match self {
            MakerError::SynthesisAborted { source, .. } => source.root(),
            other => other,
        }
    }
}

/// Failures at the key daemon boundary. Each decode step has its own variant
/// so a failing field can be located from the error alone.
#[derive(Debug, Error)]
pub enum KeyMaterialError {
    #[error("key daemon request failed: {0}")]
    Request(String),

    #[error("failed to decode address hex: {0}")]
    AddressDecode(#[source] hex::FromHexError),

    #[error("failed to decode public key hex: {0}")]
    PublicKeyDecode(#[source] hex::FromHexError),

    #[error("failed to decode private validator: {0}")]
    PrivateValidatorDecode(#[source] serde_json::Error),

    #[error("key daemon returned an empty private validator")]
    EmptyPrivateValidator,

    #[error("unknown address: {0}")]
    UnknownAddress(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PermissionError {
    #[error("unknown permission: {0}")]
    UnknownPermission(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GenesisRecordError {
    #[error("invalid address length: expected {expected}, got {got}")]
    InvalidAddressLength { expected: usize, got: usize },

    #[error("invalid public key length: expected {expected}, got {got}")]
    InvalidPublicKeyLength { expected: usize, got: usize },

    #[error("invalid private key length: expected {expected}, got {got}")]
    InvalidPrivateKeyLength { expected: usize, got: usize },

    #[error("unknown key type: {0}")]
    UnknownKeyType(String),

    #[error("unknown key type byte: {0:#04x}")]
    UnknownTypeByte(u8),
}
