use clap::{Parser, Subcommand};
use solana_sdk::pubkey::Pubkey;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use swap_provision::config::{read_configs, DEFAULT_CONFIG_PATH};
use swap_provision::deploy;
use swap_provision::error::{ProvisionError, ProvisionResult};
use swap_provision::fork;
use swap_provision::logger::{self, LogTag};
use swap_provision::provider::Provider;

#[derive(Debug, Parser)]
#[command(
    name = "swap-provision",
    about = "Provision the swap program and its forked test dependencies"
)]
struct Cli {
    /// Path to the runtime configuration file
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Show debug-level log output
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Initialize a fresh swap state account with admin and referral authorities
    Deploy {
        /// Admin authority (defaults to the wallet address)
        #[arg(long)]
        admin: Option<String>,

        /// Referral authority (defaults to the wallet address)
        #[arg(long)]
        referral: Option<String>,
    },
    /// Attach the router fork and mint the substitute stable-asset token
    Fork {
        /// Network section of the dependency mapping to rewrite
        #[arg(long)]
        network: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logger::init(cli.verbose);

    if let Err(e) = run(cli).await {
        logger::error(LogTag::System, &format!("Provisioning failed: {}", e));
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> ProvisionResult<()> {
    let configs = read_configs(&cli.config)?;
    logger::debug(
        LogTag::Config,
        &format!("Using RPC endpoint {}", configs.rpc_url),
    );

    let provider = Provider::from_configs(&configs)?;

    match cli.command {
        Command::Deploy { admin, referral } => {
            let wallet_address = provider.wallet_address()?;
            let admin = parse_authority(admin.as_deref(), wallet_address)?;
            let referral = parse_authority(referral.as_deref(), wallet_address)?;

            let receipt = deploy::deploy(&provider, admin, referral).await?;
            logger::info(
                LogTag::System,
                &format!(
                    "Deployment complete: swap account {}, tx {}, {} bytes of program data",
                    receipt.swap_account, receipt.signature, receipt.program_data_len
                ),
            );
        }
        Command::Fork { network } => {
            let network = network.unwrap_or_else(|| configs.network.clone());
            let mapping_path = Path::new(&configs.deployments_path);

            let receipt = fork::provision(&provider, &network, mapping_path).await?;
            logger::info(
                LogTag::System,
                &format!(
                    "Fork complete: router {}, substitute mint {}, token account {}",
                    receipt.router, receipt.usd_mint, receipt.usd_token_account
                ),
            );
        }
    }

    Ok(())
}

fn parse_authority(raw: Option<&str>, fallback: Pubkey) -> ProvisionResult<Pubkey> {
    match raw {
        Some(s) => Pubkey::from_str(s)
            .map_err(|e| ProvisionError::Parse(format!("invalid authority address {}: {}", s, e))),
        None => Ok(fallback),
    }
}
