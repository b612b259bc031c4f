//! blockpoll CLI
//!
//! Waits for chain state to converge, for use from shell-driven test scripts.

use anyhow::Context;
use blockpoll_chain::{
    poll_for_balance, poll_for_proposal_status, wait_for_blocks, ChainQuerier, RestChainClient,
};
use blockpoll_cli::CliConfig;
use blockpoll_types::WalletAmount;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "blockpoll")]
#[command(about = "Wait for chain state to converge")]
#[command(version)]
struct Cli {
    /// REST endpoint of the chain (overrides the config file)
    #[arg(short, long, global = true)]
    endpoint: Option<String>,

    /// TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Interval between height reads (e.g., "250ms")
    #[arg(long, global = true)]
    interval: Option<humantime::Duration>,

    /// Give up after this long (e.g., "30s", "5m")
    #[arg(long, global = true)]
    timeout: Option<humantime::Duration>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the current height
    Height,

    /// Wait for the chain to produce more blocks
    WaitBlocks {
        /// Number of blocks to wait for
        #[arg(short, long, default_value = "1")]
        blocks: u64,
    },

    /// Wait for an account balance to reach an exact amount
    Balance {
        /// Account address
        #[arg(long)]
        address: String,

        /// Denomination
        #[arg(long)]
        denom: String,

        /// Expected amount
        #[arg(long)]
        amount: u128,

        /// Number of blocks to keep checking for
        #[arg(short, long, default_value = "10")]
        blocks: u64,
    },

    /// Wait for a governance proposal to reach a status
    Proposal {
        /// Proposal id
        #[arg(long)]
        id: String,

        /// Expected status (e.g., PROPOSAL_STATUS_PASSED)
        #[arg(long)]
        status: String,

        /// Number of blocks to keep checking for
        #[arg(short, long, default_value = "10")]
        blocks: u64,
    },
}

fn to_std(duration: Option<humantime::Duration>) -> Option<Duration> {
    duration.map(|d| *d)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => CliConfig::load(path)?,
        None => CliConfig::default(),
    }
    .with_overrides(cli.endpoint, to_std(cli.interval), to_std(cli.timeout));

    let chain = RestChainClient::new(config.client_config()?)?;
    let poll_config = config.poll.to_poll_config();

    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupted, cancelling");
                cancel.cancel();
            }
        });
    }

    match cli.command {
        Commands::Height => {
            let height = chain.height().await?;
            println!("{}", height.0);
        }

        Commands::WaitBlocks { blocks } => {
            let chains: [&dyn ChainQuerier; 1] = [&chain];
            wait_for_blocks(&cancel, blocks, &chains, &poll_config).await?;
            println!("{}", chain.height().await?.0);
        }

        Commands::Balance {
            address,
            denom,
            amount,
            blocks,
        } => {
            let expected = WalletAmount::new(address, denom, amount);
            poll_for_balance(&cancel, &chain, blocks, &expected, &poll_config)
                .await
                .with_context(|| format!("waiting for {}", expected))?;
            info!(%expected, "Balance matched");
        }

        Commands::Proposal { id, status, blocks } => {
            let start = chain.height().await?;
            let proposal = poll_for_proposal_status(
                &cancel,
                &chain,
                start,
                start.saturating_add(blocks),
                &id,
                &status,
                &poll_config,
            )
            .await
            .with_context(|| format!("waiting for proposal {} to reach {}", id, status))?;
            println!("{}", proposal.status);
        }
    }

    Ok(())
}
