//! MHC light wallet: entry point for the `mhc-wallet` command.
//!
//! Every command prints exactly one JSON document on stdout. Logs go to
//! stderr.

use anyhow::Context;
use clap::Parser;
use mhc_types::NetworkId;
use mhc_utils::LogFormat;
use mhc_wallet_core::{SendRequest, Wallet, WalletConfig, WalletError};
use serde_json::{json, Value};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "mhc-wallet", about = "MHC light wallet client")]
struct Cli {
    /// Network to use: "main", "dev", or "test". Required by commands that
    /// contact a node.
    #[arg(long, global = true, env = "MHC_NET")]
    net: Option<String>,

    /// Directory holding `<address>.mh` wallet records.
    #[arg(long, global = true, env = "MHC_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long, global = true, env = "MHC_CONFIG")]
    config: Option<PathBuf>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, global = true, env = "MHC_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, global = true, env = "MHC_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    /// Draw a fresh signing nonce from the OS instead of RFC 6979.
    #[arg(long, global = true, env = "MHC_RANDOM_NONCE")]
    random_nonce: bool,

    /// Skip announcing generated wallets to the test network.
    #[arg(long, global = true, env = "MHC_NO_REGISTER")]
    no_register: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand, Debug)]
enum Command {
    /// Create a key pair and store its wallet record.
    Generate,

    /// Balance of an address.
    FetchBalance {
        #[arg(long)]
        address: String,
    },

    /// Transaction history of an address.
    FetchHistory {
        #[arg(long)]
        address: String,
    },

    /// A transaction by hash.
    GetTx {
        #[arg(long)]
        hash: String,
    },

    /// Addresses with a stored record.
    ListAddresses,

    /// Sign and submit a transfer from a stored wallet.
    SendTx {
        /// Sender address (must have a record in the data directory).
        #[arg(long)]
        address: String,

        #[arg(long)]
        to: String,

        #[arg(long)]
        value: u64,

        /// Free-form data attached to the transfer.
        #[arg(long)]
        data: Option<String>,

        /// Fee; defaults to the data length in bytes.
        #[arg(long)]
        fee: Option<u64>,

        /// Nonce; defaults to the sender's spent count plus one.
        #[arg(long)]
        nonce: Option<u64>,
    },
}

/// Layer CLI flags and env vars over the config file (or defaults).
fn build_config(cli: &Cli) -> anyhow::Result<WalletConfig> {
    let mut config = match &cli.config {
        Some(path) => WalletConfig::from_toml_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => WalletConfig::default(),
    };

    if let Some(net) = &cli.net {
        config.network = Some(net.parse::<NetworkId>().map_err(WalletError::from)?);
    }
    if let Some(dir) = &cli.data_dir {
        config.data_dir = dir.clone();
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    if let Some(format) = cli.log_format {
        config.log_format = format;
    }
    if cli.random_nonce {
        config.deterministic_signing = false;
    }
    if cli.no_register {
        config.register_on_generate = false;
    }
    Ok(config)
}

async fn run(cli: Cli) -> anyhow::Result<Value> {
    let config = build_config(&cli)?;
    if let Err(e) = mhc_utils::init_logging(config.log_format, &config.log_level) {
        eprintln!("logging disabled: {e}");
    }
    tracing::debug!(network = ?config.network, data_dir = %config.data_dir.display(), "configured");

    let wallet = Wallet::new(config)?;
    let output = match cli.command {
        Command::Generate => serde_json::to_value(wallet.generate().await?)?,
        Command::FetchBalance { address } => wallet.fetch_balance(&address).await?,
        Command::FetchHistory { address } => wallet.fetch_history(&address).await?,
        Command::GetTx { hash } => wallet.get_tx(&hash).await?,
        Command::ListAddresses => serde_json::to_value(wallet.list_addresses()?)?,
        Command::SendTx {
            address,
            to,
            value,
            data,
            fee,
            nonce,
        } => {
            let request = SendRequest {
                from: address,
                to,
                value,
                data,
                fee,
                nonce,
            };
            wallet.send_tx(&request).await?
        }
    };
    Ok(output)
}

fn error_document(e: &anyhow::Error) -> Value {
    json!({ "error": true, "message": format!("{e:#}") })
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(output) => println!("{output}"),
        Err(e) => {
            tracing::error!(error = %format!("{e:#}"), "command failed");
            println!("{}", error_document(&e));
            std::process::exit(1);
        }
    }
}
