//! chainmaker-genesis
//!
//! Synthesizes the initial account set of a new chain. Each account-type
//! template is expanded into individually named accounts; every account gets
//! a fresh key from the key daemon, a genesis ledger entry, a validator entry
//! when it bonds stake, and (development chains only, behind an explicit
//! unsafe flag) the validator's private signing key.
//!
//! Building is all-or-nothing: the first failing account aborts the whole
//! roster so a chain is never seeded from a partial account set.

pub mod accounts;
pub mod export;

pub use accounts::{
    account_name, make_accounts, make_accounts_with_scheme, new_account_constructor,
    ChainRoster, SynthesizedAccount,
};
pub use export::{accounts_csv, accounts_json, private_validators, AccountKeys, GenesisDoc};
