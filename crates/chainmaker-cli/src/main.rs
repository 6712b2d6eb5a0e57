//! chainmaker — seed the account set of a new chain.
//!
//! Reads account-type templates, generates one key per account through the
//! key daemon (or in-process with `--local-keys`) and prints the requested
//! view to stdout:
//!   chainmaker <chain-name> --account-types <file.json> [--format genesis|csv|json|priv-validators]
//!
//! Private keys only leave the key daemon with `--unsafe`.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing::{info, warn};

use chainmaker_core::constants::{CHAIN_KIND_MINT, KEY_SCHEME_ED25519_RIPEMD160};
use chainmaker_core::load_account_types;
use chainmaker_genesis::{
    accounts_csv, accounts_json, make_accounts_with_scheme, private_validators, ChainRoster,
    GenesisDoc,
};
use chainmaker_keys::{KeySource, KeysClient, KeysConfig, LocalKeys};

#[derive(Parser, Debug)]
#[command(
    name = "chainmaker",
    version,
    about = "Generate the genesis accounts and validators of a new chain"
)]
struct Args {
    /// Name of the new chain; also the prefix of every account name.
    chain_name: String,

    /// JSON file with the account-type templates.
    #[arg(long)]
    account_types: PathBuf,

    /// Consensus engine backing the chain.
    #[arg(long, default_value = CHAIN_KIND_MINT)]
    chain_kind: String,

    /// Key scheme requested from the key daemon.
    #[arg(long, default_value = KEY_SCHEME_ED25519_RIPEMD160)]
    key_scheme: String,

    /// Key daemon URL.
    #[arg(long)]
    keys_url: Option<String>,

    /// Generate keys in-process instead of calling the key daemon.
    #[arg(long, conflicts_with = "keys_url")]
    local_keys: bool,

    /// Extract private keys into the output. Development chains only.
    #[arg(long = "unsafe", default_value_t = false)]
    unsafe_extraction: bool,

    /// What to print.
    #[arg(long, value_enum, default_value_t = Format::Genesis)]
    format: Format,
}

impl Args {
    /// Reject flag combinations before any key is generated.
    fn validate(&self) -> anyhow::Result<()> {
        if self.format == Format::PrivValidators && !self.unsafe_extraction {
            anyhow::bail!("private validators are only available with --unsafe");
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    /// genesis.json
    Genesis,
    /// accounts.csv
    Csv,
    /// accounts.json
    Json,
    /// Private validator bundles by account name (requires --unsafe).
    PrivValidators,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    args.validate()?;

    let templates = std::fs::read_to_string(&args.account_types)
        .with_context(|| format!("reading {}", args.account_types.display()))?;
    let account_types = load_account_types(&templates)?;

    if args.unsafe_extraction {
        warn!("--unsafe: private keys will be written to the output");
    }

    let roster = if args.local_keys {
        build(&LocalKeys::new(), &args, &account_types)?
    } else {
        let mut config = KeysConfig::default();
        if let Some(url) = &args.keys_url {
            config.url = url.clone();
        }
        info!(url = %config.url, "using key daemon");
        build(&KeysClient::new(&config)?, &args, &account_types)?
    };

    let output = match args.format {
        Format::Genesis => {
            GenesisDoc::from_accounts(&args.chain_name, chrono::Utc::now(), &roster)
                .to_json_pretty()?
        }
        Format::Csv => accounts_csv(&roster),
        Format::Json => serde_json::to_string_pretty(&accounts_json(&roster))
            .context("serializing accounts")?,
        Format::PrivValidators => {
            let bundles: Vec<_> = private_validators(&roster)
                .into_iter()
                .map(|(name, pv)| serde_json::json!({ "name": name, "priv_validator": pv }))
                .collect();
            serde_json::to_string_pretty(&bundles).context("serializing private validators")?
        }
    };
    println!("{}", output.trim_end());
    Ok(())
}

fn build<S: KeySource>(
    source: &S,
    args: &Args,
    account_types: &[chainmaker_core::AccountType],
) -> anyhow::Result<ChainRoster> {
    let roster = make_accounts_with_scheme(
        source,
        &args.chain_name,
        &args.chain_kind,
        &args.key_scheme,
        account_types,
        args.unsafe_extraction,
    )
    .with_context(|| format!("making accounts for {}", args.chain_name))?;
    info!(accounts = roster.len(), "roster complete");
    Ok(roster)
}
