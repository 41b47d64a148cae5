// ============================================================================
// hive-gate — CLI inspection tool for the Hive access gate
// ============================================================================
// Usage:
//   hive-gate status <WALLET> [--rpc-url URL]   Run the holder check over RPC
//   hive-gate admin <ADDRESS>                   Test allow-list membership
//   hive-gate resolve <PATH> [--view V]         Resolve a route
//   hive-gate routes                            Print the route table
// ============================================================================

use anyhow::Result;
use chrono::{TimeZone, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use hive_core::access::{verify_with_retry, GateView, HolderChecker, RetryConfig};
use hive_core::{is_admin_address, router, Route, TokenConfig};
use solana_sdk::pubkey::Pubkey;
use std::str::FromStr;

/// Hive access gate inspection tool
#[derive(Parser)]
#[command(name = "hive-gate", version, about = "Inspect the Hive token gate from the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum ViewArg {
    Landing,
    Verifying,
    Holder,
    NonHolder,
}

impl From<ViewArg> for GateView {
    fn from(v: ViewArg) -> Self {
        match v {
            ViewArg::Landing => GateView::Landing,
            ViewArg::Verifying => GateView::Verifying,
            ViewArg::Holder => GateView::Holder,
            ViewArg::NonHolder => GateView::NonHolder,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full holder verification for a wallet
    Status {
        /// Wallet address (base58)
        wallet: String,

        /// RPC endpoint (default: HIVE_RPC_URL or mainnet-beta)
        #[arg(long)]
        rpc_url: Option<String>,
    },

    /// Check a wallet against the admin allow-list
    Admin {
        /// Wallet address (base58)
        address: String,
    },

    /// Resolve a path for a simulated gate state
    Resolve {
        /// URL path, e.g. /games/spinner
        path: String,

        /// Simulated gate view
        #[arg(long, value_enum, default_value = "landing")]
        view: ViewArg,

        /// Connected wallet (used for the admin guard)
        #[arg(long)]
        wallet: Option<String>,
    },

    /// Print the static route table
    Routes,
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Status { wallet, rpc_url } => cmd_status(&wallet, rpc_url).await,
        Commands::Admin { address } => cmd_admin(&address),
        Commands::Resolve { path, view, wallet } => cmd_resolve(&path, view.into(), wallet),
        Commands::Routes => cmd_routes(),
    }
}

async fn cmd_status(wallet: &str, rpc_url: Option<String>) -> Result<()> {
    let pubkey = Pubkey::from_str(wallet)
        .map_err(|_| anyhow::anyhow!("'{}' is not a valid wallet address", wallet))?;

    let rpc_url = rpc_url
        .or_else(|| std::env::var("HIVE_RPC_URL").ok())
        .unwrap_or_else(|| "https://api.mainnet-beta.solana.com".to_string());

    let config = TokenConfig::from_env();
    let checker = HolderChecker::new(&rpc_url, config.clone())?;

    println!("=== Hive Holder Check ===");
    println!("Wallet:    {}", wallet);
    println!("Token:     {} ({})", config.symbol, config.mint);
    println!("Gate:      {} {} minimum", config.gate_amount, config.symbol);
    if config.min_hold_days > 0 {
        println!("Hold:      {} days minimum", config.min_hold_days);
    }
    println!("RPC:       {}", rpc_url);
    println!();

    let snapshot = verify_with_retry(&checker, &pubkey, &RetryConfig::default()).await?;

    println!("Balance:   {} {}", config.to_display(snapshot.balance), config.symbol);
    match snapshot.held_days {
        Some(days) => println!("Held for:  {} days", days),
        None => println!("Held for:  (not checked)"),
    }
    println!(
        "Checked:   {}",
        Utc.timestamp_opt(snapshot.checked_at, 0)
            .single()
            .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
            .unwrap_or_else(|| format!("(invalid: {})", snapshot.checked_at))
    );
    println!();
    println!(
        "Verdict:   {}",
        if snapshot.is_holder { "HOLDER" } else { "NOT A HOLDER" }
    );

    Ok(())
}

fn cmd_admin(address: &str) -> Result<()> {
    let admin = is_admin_address(Some(address));
    println!(
        "{}  {}",
        address,
        if admin { "ADMIN" } else { "not an admin" }
    );
    Ok(())
}

fn cmd_resolve(path: &str, view: GateView, wallet: Option<String>) -> Result<()> {
    let is_admin = is_admin_address(wallet.as_deref());
    let resolution = router::resolve(path, view, is_admin);

    println!("Path:      {}", path);
    println!("Gate view: {}", serde_json::to_string(&view)?);
    println!("Admin:     {}", is_admin);
    match resolution {
        router::Resolution::Render { page } => {
            println!("Result:    render '{}'", page.title());
        }
        router::Resolution::Redirect { to } => {
            println!("Result:    redirect to {}", to.path());
        }
    }
    Ok(())
}

fn cmd_routes() -> Result<()> {
    println!("{:<20}  {}", "PATH", "ROUTE");
    println!("{}", "-".repeat(40));
    for route in Route::ALL {
        println!("{:<20}  {:?}", route.path(), route);
    }
    Ok(())
}
