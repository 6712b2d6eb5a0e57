use chainmaker_core::account_type::AccountType;
use chainmaker_core::constants::{ACCOUNT_ORDINAL_WIDTH, KEY_SCHEME_ED25519_RIPEMD160};
use chainmaker_core::error::MakerError;
use chainmaker_core::genesis::{GenesisAccount, GenesisPrivateValidator, GenesisValidator};
use chainmaker_core::permission::convert_permissions_map_and_roles;
use chainmaker_core::types::{ChainKind, KeyScheme};
use chainmaker_keys::{generate_address_and_key, KeySource};
use tracing::info;
use zeroize::Zeroizing;

/// Accounts of one chain in template order, then ordinal order.
pub type ChainRoster = Vec<SynthesizedAccount>;

/// Everything needed to write one account into the genesis, config and
/// private validator files.
///
/// Built once by [`new_account_constructor`] and read-only afterwards.
pub struct SynthesizedAccount {
    name: String,
    genesis_account: GenesisAccount,
    genesis_validator: Option<GenesisValidator>,
    genesis_private_validator: Option<GenesisPrivateValidator>,

    // Kept alongside the typed keys for the accounts.csv export, which
    // writes the untyped public key of every account.
    untyped_public_key_bytes: Vec<u8>,
    type_byte_public_key: u8,

    // Only filled when the caller asked for unsafe extraction.
    untyped_private_key_bytes: Zeroizing<Vec<u8>>,
}

impl SynthesizedAccount {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn genesis_account(&self) -> &GenesisAccount {
        &self.genesis_account
    }

    pub fn genesis_validator(&self) -> Option<&GenesisValidator> {
        self.genesis_validator.as_ref()
    }

    pub fn genesis_private_validator(&self) -> Option<&GenesisPrivateValidator> {
        self.genesis_private_validator.as_ref()
    }

    pub fn is_validator(&self) -> bool {
        self.genesis_validator.is_some()
    }

    pub fn untyped_public_key_bytes(&self) -> &[u8] {
        &self.untyped_public_key_bytes
    }

    pub fn type_byte_public_key(&self) -> u8 {
        self.type_byte_public_key
    }

    /// Empty unless the account was built with unsafe extraction.
    pub fn untyped_private_key_bytes(&self) -> &[u8] {
        &self.untyped_private_key_bytes
    }
}

impl std::fmt::Debug for SynthesizedAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SynthesizedAccount")
            .field("name", &self.name)
            .field("address", &self.genesis_account.address)
            .field("validator", &self.genesis_validator.is_some())
            .field(
                "private_validator",
                &self.genesis_private_validator.is_some(),
            )
            .finish()
    }
}

/// Canonical account name: `<chain>_<type>_<nnn>`, lower-cased.
pub fn account_name(chain_name: &str, account_type_name: &str, index: usize) -> String {
    format!(
        "{}_{}_{:0width$}",
        chain_name,
        account_type_name,
        index,
        width = ACCOUNT_ORDINAL_WIDTH
    )
    .to_lowercase()
}

/// Build the accounts for `chain_name` with the default ed25519/ripemd160
/// key scheme.
///
/// When `unsafe_extraction` is set the private keys of all accounts are pulled
/// from the key daemon and kept in the returned records. Only ever do this for
/// development chains.
pub fn make_accounts<S: KeySource + ?Sized>(
    source: &S,
    chain_name: &str,
    chain_kind: &str,
    account_types: &[AccountType],
    unsafe_extraction: bool,
) -> Result<ChainRoster, MakerError> {
    make_accounts_with_scheme(
        source,
        chain_name,
        chain_kind,
        KEY_SCHEME_ED25519_RIPEMD160,
        account_types,
        unsafe_extraction,
    )
}

/// As [`make_accounts`], with an explicit key scheme identifier.
///
/// Accounts are built one at a time. The first failure aborts the build and
/// no accounts are returned.
pub fn make_accounts_with_scheme<S: KeySource + ?Sized>(
    source: &S,
    chain_name: &str,
    chain_kind: &str,
    key_scheme: &str,
    account_types: &[AccountType],
    unsafe_extraction: bool,
) -> Result<ChainRoster, MakerError> {
    match chain_kind.parse::<ChainKind>()? {
        ChainKind::Mint => {}
    }

    // Counts come straight from the template file; the roster grows as
    // accounts are built rather than being sized up front.
    let mut accounts = Vec::new();

    for account_type in account_types {
        info!(
            account_type = %account_type.name,
            number = account_type.number,
            "making account type"
        );
        for i in 0..account_type.number {
            let name = account_name(chain_name, &account_type.name, i);
            info!(name = %name, "making account");

            let account = new_account_constructor(
                source,
                &name,
                key_scheme,
                account_type,
                false,
                unsafe_extraction,
            )
            .map_err(|e| MakerError::SynthesisAborted {
                account: name.clone(),
                chain: chain_name.to_string(),
                source: Box::new(e),
            })?;
            accounts.push(account);
        }
    }

    info!(chain = %chain_name, accounts = accounts.len(), "accounts made");
    Ok(accounts)
}

/// Build one account: ledger entry always, validator entry when the account
/// type bonds stake it can cover.
///
/// The private validator bundle is requested from the key daemon only when
/// `unsafe_extraction` is set and `block_private_validator` is not, and is
/// attached to validator accounts only.
pub fn new_account_constructor<S: KeySource + ?Sized>(
    source: &S,
    account_name: &str,
    key_scheme: &str,
    account_type: &AccountType,
    block_private_validator: bool,
    unsafe_extraction: bool,
) -> Result<SynthesizedAccount, MakerError> {
    let is_validator = account_type.is_validator();

    // TODO: expose roles in account type definitions.
    let permissions = convert_permissions_map_and_roles(&account_type.perms, &[])?;

    let scheme: KeyScheme = key_scheme.parse()?;
    let suppress_private = block_private_validator || !unsafe_extraction;
    let key = match scheme {
        KeyScheme::Ed25519Ripemd160 => generate_address_and_key(source, scheme, suppress_private)?,
    };

    let untyped_private_key_bytes = match (&key.private_validator, unsafe_extraction) {
        (Some(pv), true) => Zeroizing::new(pv.priv_key.as_bytes().to_vec()),
        _ => Zeroizing::new(Vec::new()),
    };

    let genesis_account = GenesisAccount::new(
        &key.address,
        account_type.tokens,
        account_name,
        permissions,
    )
    .map_err(MakerError::AccountConstructionFailed)?;

    let (genesis_validator, genesis_private_validator) = if is_validator {
        let validator = GenesisValidator::new(
            account_type.tokens,
            account_name,
            &key.address,
            account_type.to_bond,
            scheme.key_type(),
            &key.public_key,
        )
        .map_err(MakerError::ValidatorConstructionFailed)?;
        (Some(validator), key.private_validator)
    } else {
        (None, None)
    };

    Ok(SynthesizedAccount {
        name: account_name.to_string(),
        genesis_account,
        genesis_validator,
        genesis_private_validator,
        untyped_public_key_bytes: key.public_key,
        type_byte_public_key: scheme.type_byte(),
        untyped_private_key_bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chainmaker_core::error::KeyMaterialError;
    use chainmaker_keys::LocalKeys;
    use std::collections::BTreeMap;

    fn account_type(name: &str, number: usize, tokens: u64, to_bond: u64) -> AccountType {
        AccountType {
            name: name.into(),
            number,
            tokens,
            to_bond,
            perms: BTreeMap::from([("send".to_string(), 1), ("call".to_string(), 1)]),
            ..Default::default()
        }
    }

    #[test]
    fn names_are_zero_padded_and_lowercase() {
        assert_eq!(account_name("TestNet", "Val", 7), "testnet_val_007");
        assert_eq!(account_name("c", "t", 1234), "c_t_1234");
    }

    #[test]
    fn participant_has_no_validator_entry() {
        let keys = LocalKeys::new();
        let acc = new_account_constructor(
            &keys,
            "c_p_000",
            KEY_SCHEME_ED25519_RIPEMD160,
            &account_type("p", 1, 1000, 0),
            false,
            true,
        )
        .unwrap();
        assert!(acc.genesis_validator().is_none());
        assert!(acc.genesis_private_validator().is_none());
        assert_eq!(acc.genesis_account().amount, 1000);
        assert_eq!(acc.type_byte_public_key(), 0x01);
        assert_eq!(acc.untyped_public_key_bytes().len(), 32);
        // Unsafe extraction still exposes the private key of non-validators.
        assert_eq!(acc.untyped_private_key_bytes().len(), 64);
    }

    #[test]
    fn validator_without_unsafe_has_no_private_material() {
        let keys = LocalKeys::new();
        let acc = new_account_constructor(
            &keys,
            "c_v_000",
            KEY_SCHEME_ED25519_RIPEMD160,
            &account_type("v", 1, 1000, 500),
            false,
            false,
        )
        .unwrap();
        let validator = acc.genesis_validator().unwrap();
        assert_eq!(validator.bond_amount(), 500);
        assert_eq!(validator.unbond_to[0].address, acc.genesis_account().address);
        assert_eq!(validator.pub_key.as_bytes(), acc.untyped_public_key_bytes());
        assert!(acc.genesis_private_validator().is_none());
        assert!(acc.untyped_private_key_bytes().is_empty());
    }

    #[test]
    fn blocked_private_validator_wins_over_unsafe() {
        let keys = LocalKeys::new();
        let acc = new_account_constructor(
            &keys,
            "c_v_000",
            KEY_SCHEME_ED25519_RIPEMD160,
            &account_type("v", 1, 1000, 500),
            true,
            true,
        )
        .unwrap();
        assert!(acc.is_validator());
        assert!(acc.genesis_private_validator().is_none());
        assert!(acc.untyped_private_key_bytes().is_empty());
    }

    #[test]
    fn unknown_permission_is_passed_through() {
        let keys = LocalKeys::new();
        let mut at = account_type("p", 1, 10, 0);
        at.perms.insert("fly".into(), 1);
        let err = new_account_constructor(&keys, "x", KEY_SCHEME_ED25519_RIPEMD160, &at, false, false)
            .unwrap_err();
        assert_eq!(err.to_string(), "unknown permission: fly");
        assert!(keys.is_empty());
    }

    #[test]
    fn unsupported_scheme_is_rejected_before_key_generation() {
        let keys = LocalKeys::new();
        let err = new_account_constructor(
            &keys,
            "x",
            "secp256k1,sha3",
            &account_type("p", 1, 10, 0),
            false,
            false,
        )
        .unwrap_err();
        assert!(matches!(err, MakerError::UnsupportedKeyScheme(_)));
        assert!(keys.is_empty());
    }

    #[test]
    fn unknown_chain_kind_is_rejected() {
        let keys = LocalKeys::new();
        let err = make_accounts(&keys, "c", "unknown", &[account_type("v", 2, 10, 5)], false)
            .unwrap_err();
        assert!(matches!(err, MakerError::UnsupportedChainKind(k) if k == "unknown"));
        assert!(keys.is_empty());
    }

    struct Unreachable;

    impl KeySource for Unreachable {
        fn generate_key(&self, _: KeyScheme, _: &str) -> Result<String, KeyMaterialError> {
            Err(KeyMaterialError::Request("connection refused".into()))
        }

        fn public_key(&self, _: &str, _: &str) -> Result<String, KeyMaterialError> {
            unreachable!()
        }

        fn convert(&self, _: &str, _: &str) -> Result<Vec<u8>, KeyMaterialError> {
            unreachable!()
        }
    }

    #[test]
    fn key_daemon_failure_names_account_and_chain() {
        let err = make_accounts(&Unreachable, "Demo", "mint", &[account_type("Full", 1, 10, 5)], false)
            .unwrap_err();
        match &err {
            MakerError::SynthesisAborted { account, chain, .. } => {
                assert_eq!(account, "demo_full_000");
                assert_eq!(chain, "Demo");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(matches!(
            err.root(),
            MakerError::KeyMaterialRequestFailed(KeyMaterialError::Request(_))
        ));
    }
}
