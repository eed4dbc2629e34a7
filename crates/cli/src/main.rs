//! Command line interface for the liquidity provisioning orchestrator.
mod output;
mod settings;

use alloy_primitives::{Address, U256};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use lpdapp_data::DiscoveryLog;
use lpdapp_domain::entities::PoolQuery;
use lpdapp_domain::enums::FeeTier;
use lpdapp_domain::value_objects::Amount;
use lpdapp_execution::prelude::*;
use lpdapp_protocols::clients::{ContractClients, WalletSigner};
use lpdapp_protocols::rpc::RpcProvider;
use settings::Settings;
use std::sync::Arc;
use tracing::warn;

#[derive(Parser)]
#[command(name = "lpdapp")]
#[command(about = "Concentrated liquidity provisioning for Uniswap V3 pools", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show token metadata, supply and holders
    Token {
        /// Token address (defaults to TOKEN_ADDRESS)
        #[arg(long)]
        address: Option<Address>,
    },
    /// Show the wallet's native and token balances
    Balance {
        /// Token address (defaults to TOKEN_ADDRESS)
        #[arg(long)]
        token: Option<Address>,
    },
    /// Look up the pool for a token pair and record it
    Pool {
        #[arg(long)]
        token_a: Address,
        #[arg(long)]
        token_b: Address,
        /// Fee tier in hundredths of a basis point (100, 500, 3000, 10000)
        #[arg(long, default_value = "3000", value_parser = parse_fee)]
        fee: FeeTier,
    },
    /// Add liquidity around the current price of a pool
    Provision {
        #[arg(long)]
        token_a: Address,
        #[arg(long)]
        token_b: Address,
        /// Fee tier in hundredths of a basis point (100, 500, 3000, 10000)
        #[arg(long, default_value = "3000", value_parser = parse_fee)]
        fee: FeeTier,
        /// Desired liquidity as a decimal amount, e.g. 1.5
        #[arg(short, long)]
        liquidity: String,
        /// Slippage tolerance in basis points (overrides SLIPPAGE_BPS)
        #[arg(long)]
        slippage_bps: Option<u16>,
    },
    /// List positions recorded in the liquidity ledger
    History {
        /// Account to list (defaults to the wallet)
        #[arg(long)]
        owner: Option<Address>,
    },
    /// List pools found by earlier lookups
    Discoveries,
    /// Show the token sale price and progress
    Sale,
    /// Buy whole tokens from the sale
    Buy {
        #[arg(short, long)]
        amount: u64,
    },
}

fn parse_fee(value: &str) -> Result<FeeTier, String> {
    let units: u32 = value.parse().map_err(|e| format!("{e}"))?;
    FeeTier::try_from(units).map_err(|e| e.to_string())
}

/// Live connection and clients.
struct Session {
    provider: RpcProvider,
    clients: ContractClients,
}

impl Session {
    fn connect(settings: &Settings) -> Result<Self> {
        let config = settings.client_config()?;
        let provider = RpcProvider::connect(&config)?;
        let clients = provider.contract_clients(&config.addresses);
        Ok(Self { provider, clients })
    }

    fn tokens(&self, settings: &Settings) -> TokenDirectory {
        TokenDirectory::new(
            self.clients.erc20.clone(),
            self.clients.holders.clone(),
            settings.provision.stage_timeout(),
        )
    }
}

/// Cancellation token fired by Ctrl-C.
fn cancel_on_ctrl_c() -> CancelToken {
    let (handle, token) = CancelToken::pair();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Ctrl-C received, cancelling");
            handle.cancel();
        }
    });
    token
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let settings = Settings::from_env()?;

    match cli.command {
        Commands::Token { address } => {
            let session = Session::connect(&settings)?;
            let tokens = session.tokens(&settings);
            let address = address.unwrap_or(settings.addresses.token);

            let token = tokens.describe(&session.provider, address).await?;
            let supply = tokens.total_supply(address).await?;
            let holders = tokens.holders(address).await?;

            println!("🪙 {} ({})", token.name, token.symbol);
            println!("Address:      {}", token.address);
            println!("Chain:        {}", token.chain_id);
            println!("Decimals:     {}", token.decimals);
            println!("Total supply: {}", Amount::new(supply, token.decimals));
            println!("Holders:      {}", holders.len());
            for holder in holders {
                println!("  {holder}");
            }
        }
        Commands::Balance { token } => {
            let session = Session::connect(&settings)?;
            let tokens = session.tokens(&settings);
            let address = token.unwrap_or(settings.addresses.token);
            let owner = session.provider.address();

            let native = tokens.native_balance(&session.provider).await?;
            let token = tokens.describe(&session.provider, address).await?;
            let balance = tokens.balance(address, owner).await?;

            println!("👛 {owner}");
            println!("Native: {}", output::ether(native));
            println!(
                "{}: {}",
                token.symbol,
                Amount::new(balance, token.decimals)
            );
        }
        Commands::Pool {
            token_a,
            token_b,
            fee,
        } => {
            let session = Session::connect(&settings)?;
            let tokens = session.tokens(&settings);
            let token_a = tokens.describe(&session.provider, token_a).await?;
            let token_b = tokens.describe(&session.provider, token_b).await?;
            let chain_id = session.provider.chain_id().await?;

            let provisioner = LiquidityProvisioner::new(
                &session.clients,
                Arc::new(settings.discovery_log()),
                settings.provision.clone(),
            );
            let guard = StageGuard::new(settings.provision.stage_timeout(), CancelToken::never());
            let query = PoolQuery::new(token_a, token_b, fee);

            match provisioner.resolver().resolve(&query, chain_id, &guard).await {
                Ok(Resolution::Found(pool)) => {
                    println!("✅ {} pool at {fee}: {}", query.pair_label(), pool.pool_address);
                }
                Ok(Resolution::NotFound) => {
                    println!("❌ No {} pool exists at the {fee} fee tier.", query.pair_label());
                }
                Err(e) => {
                    println!("❌ {}", e.notification());
                    return Err(e.into());
                }
            }
        }
        Commands::Provision {
            token_a,
            token_b,
            fee,
            liquidity,
            slippage_bps,
        } => {
            let session = Session::connect(&settings)?;
            let tokens = session.tokens(&settings);
            let token_a = tokens.describe(&session.provider, token_a).await?;
            let token_b = tokens.describe(&session.provider, token_b).await?;

            let mut config = settings.provision.clone();
            if let Some(bps) = slippage_bps {
                config.slippage_bps = bps;
            }
            let slippage = config.slippage()?;
            let provisioner = LiquidityProvisioner::new(
                &session.clients,
                Arc::new(settings.discovery_log()),
                config,
            );
            let request = ProvisionRequest {
                token_a,
                token_b,
                fee,
                liquidity,
            };

            println!(
                "🚀 Provisioning {} at {fee} with {}% slippage...",
                request.query().pair_label(),
                slippage.as_percent()
            );
            let cancel = cancel_on_ctrl_c();
            match provisioner
                .provision(&session.provider, &request, &cancel)
                .await
            {
                Ok(receipt) => print_receipt(&receipt),
                Err(e) => {
                    println!("❌ {}", e.notification());
                    if let Some(minted) = e.mint_confirmed() {
                        println!("⚠️  Mint transaction: {}", minted.mint.tx);
                        println!("⚠️  Ledger error: {e}");
                        return Ok(());
                    }
                    return Err(e.into());
                }
            }
        }
        Commands::History { owner } => {
            let session = Session::connect(&settings)?;
            let owner = owner.unwrap_or_else(|| session.provider.address());
            let reader = LiquidityHistoryReader::new(session.clients.ledger.clone());
            let guard = StageGuard::new(settings.provision.stage_timeout(), CancelToken::never());

            let records = reader.read(owner, &guard).await?;
            if records.is_empty() {
                println!("No liquidity recorded for {owner}.");
            } else {
                println!("📜 {} position(s) recorded for {owner}", records.len());
                output::history_table(&records).printstd();
            }
        }
        Commands::Discoveries => {
            let log = settings.discovery_log();
            let records = log
                .entries()
                .await
                .with_context(|| format!("Failed to read {}", log.path().display()))?;
            if records.is_empty() {
                println!("No pools discovered yet.");
            } else {
                output::discoveries_table(&records).printstd();
            }
        }
        Commands::Sale => {
            let session = Session::connect(&settings)?;
            let purchase =
                TokenPurchase::new(session.clients.sale.clone(), settings.provision.stage_timeout());
            let status = purchase.status().await?;

            println!("🏷️  Token price: {}", output::ether(status.token_price));
            println!("Tokens sold:    {}", status.tokens_sold);
        }
        Commands::Buy { amount } => {
            let session = Session::connect(&settings)?;
            let purchase =
                TokenPurchase::new(session.clients.sale.clone(), settings.provision.stage_timeout());
            let cancel = cancel_on_ctrl_c();

            let receipt = purchase
                .buy(&session.provider, U256::from(amount), &cancel)
                .await?;
            println!(
                "✅ Bought {} tokens for {} in {}",
                receipt.amount,
                output::ether(receipt.cost),
                receipt.tx
            );
        }
    }

    Ok(())
}

fn print_receipt(receipt: &ProvisionReceipt) {
    let (token0, token1) = receipt.pool.sorted_tokens();
    println!("✅ Liquidity added");
    println!("════════════════════════════════════");
    println!("Attempt:   {}", receipt.attempt_id);
    println!("Pool:      {}", receipt.pool.pool_address);
    println!("Tick:      {} (spacing {})", receipt.state.tick, receipt.state.tick_spacing);
    println!("Range:     {}", receipt.range);
    println!(
        "{:<10} {} (min {})",
        format!("{}:", token0.symbol),
        Amount::new(receipt.params.amount0_desired, token0.decimals),
        Amount::new(receipt.params.amount0_min, token0.decimals)
    );
    println!(
        "{:<10} {} (min {})",
        format!("{}:", token1.symbol),
        Amount::new(receipt.params.amount1_desired, token1.decimals),
        Amount::new(receipt.params.amount1_min, token1.decimals)
    );
    for approval in &receipt.approvals {
        match approval.action {
            ApprovalAction::AlreadySufficient { .. } => {
                println!("Approval:  {} already sufficient", approval.token);
            }
            ApprovalAction::Approved(tx) => println!("Approval:  {} in {tx}", approval.token),
        }
    }
    if let Some(position) = receipt.mint.position {
        println!("Position:  #{} (liquidity {})", position.token_id, position.liquidity);
    }
    println!("Mint tx:   {}", receipt.mint.tx);
    println!("Ledger tx: {}", receipt.ledger_tx);
    println!("════════════════════════════════════");
}
