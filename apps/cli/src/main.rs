//! Yieldfolio command-line report.

mod commands;
mod config;
mod main_lib;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use yieldfolio_core::constants::DISPLAY_DECIMAL_PRECISION;
use yieldfolio_core::optimization::{OptimizationOutcome, OptimizationStrategy};
use yieldfolio_core::{CsvHoldingsStore, HoldingsRepositoryTrait};

use crate::commands::{edit, render};
use crate::config::Config;
use crate::main_lib::{build_service, init_tracing};

#[derive(Parser)]
#[command(name = "yieldfolio")]
#[command(about = "Dividend income portfolio report and rebalancing", long_about = None)]
struct Cli {
    /// Holdings CSV path (overrides YF_HOLDINGS_PATH)
    #[arg(long, global = true)]
    holdings: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Value the portfolio and print the full report
    Report,

    /// Add a new holding
    Add {
        ticker: String,
        quantity: Decimal,
        /// Target weight in percent
        #[arg(short, long, default_value = "0")]
        target: Decimal,
    },

    /// Change quantity or target of an existing holding
    Set {
        ticker: String,
        #[arg(short, long)]
        quantity: Option<Decimal>,
        #[arg(short, long)]
        target: Option<Decimal>,
    },

    /// Remove a holding
    Remove { ticker: String },

    /// Remove all holdings
    Reset,

    /// Rewrite target weights (equal-weight | yield-maximize)
    Optimize { strategy: OptimizationStrategy },

    /// Print exchange rate analysis
    Fx,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = Config::from_env();
    if let Some(path) = cli.holdings {
        config.holdings_path = path;
    }
    init_tracing();

    let store = CsvHoldingsStore::new(config.holdings_path.clone());
    let now = chrono::Local::now().naive_local();

    match cli.command.unwrap_or(Commands::Report) {
        Commands::Report => {
            let holdings = store.load()?;
            let service = build_service(&config)?;
            let report = service.compute(&holdings, now).await?;
            print!("{}", render::render_report(&report, store.last_updated()));
        }
        Commands::Add {
            ticker,
            quantity,
            target,
        } => {
            let updated = edit::update_holdings(&store, |h| {
                edit::add_holding(h, &ticker, quantity, target)
            })?;
            println!("Added {} ({} holdings)", ticker.trim().to_uppercase(), updated.len());
        }
        Commands::Set {
            ticker,
            quantity,
            target,
        } => {
            edit::update_holdings(&store, |h| edit::set_holding(h, &ticker, quantity, target))?;
            println!("Updated {}", ticker.trim().to_uppercase());
        }
        Commands::Remove { ticker } => {
            edit::update_holdings(&store, |h| edit::remove_holding(h, &ticker))?;
            println!("Removed {}", ticker.trim().to_uppercase());
        }
        Commands::Reset => {
            let cleared = store.load().map(|h| h.len()).unwrap_or(0);
            store.save(&[])?;
            println!("Cleared {} holdings", cleared);
        }
        Commands::Optimize { strategy } => {
            let holdings = store.load_for_update()?;
            let service = build_service(&config)?;
            let (outcome, updated) = service.optimize(&holdings, strategy, now).await?;
            match outcome {
                OptimizationOutcome::Applied { targets } => {
                    store.save(&updated)?;
                    println!("Applied {}:", strategy);
                    for t in targets {
                        println!("  {:<10} {}%", t.ticker, t.target_ratio.round_dp(DISPLAY_DECIMAL_PRECISION));
                    }
                }
                OptimizationOutcome::Unchanged { reason } => {
                    println!("Targets unchanged: {}", reason);
                }
            }
        }
        Commands::Fx => {
            let service = build_service(&config)?;
            let analysis = service.fx_analysis(now).await?;
            print!("{}", render::render_fx(&config.fx_pair, analysis.as_ref()));
        }
    }

    Ok(())
}
