//! ERP Dashboard CLI - Address dataset and order pricing tools.
//!
//! # Usage
//!
//! ```bash
//! # Check a dataset for duplicate codes, orphans, and level mistakes
//! erp-cli address validate data/regions.json
//!
//! # Browse the bundled dataset (or --dataset <file>)
//! erp-cli address provinces
//! erp-cli address cities 440000
//! erp-cli address districts 440100 --dataset data/regions.json
//!
//! # Price an order from a JSON array of {quantity, unitPrice} items
//! erp-cli order total items.json --currency USD
//! ```
//!
//! Listings and totals are written to stdout as JSON; logs go to stderr.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use erp_dashboard_core::CurrencyCode;

mod commands;

#[derive(Parser)]
#[command(name = "erp-cli")]
#[command(author, version, about = "ERP dashboard CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect and validate address datasets
    Address {
        #[command(subcommand)]
        action: AddressAction,
    },
    /// Price orders
    Order {
        #[command(subcommand)]
        action: OrderAction,
    },
}

#[derive(Subcommand)]
enum AddressAction {
    /// Report hierarchy problems in a dataset file
    Validate {
        /// Dataset file (nested province/city/district JSON)
        file: PathBuf,
    },
    /// List provinces
    Provinces {
        /// Dataset file (default: bundled dataset)
        #[arg(short, long)]
        dataset: Option<PathBuf>,
    },
    /// List the cities of a province
    Cities {
        /// Province code
        province_code: String,

        /// Dataset file (default: bundled dataset)
        #[arg(short, long)]
        dataset: Option<PathBuf>,
    },
    /// List the districts of a city
    Districts {
        /// City code
        city_code: String,

        /// Dataset file (default: bundled dataset)
        #[arg(short, long)]
        dataset: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum OrderAction {
    /// Compute line subtotals and the order total
    Total {
        /// JSON file containing an array of order items
        file: PathBuf,

        /// Currency used for the formatted total (CNY, USD, EUR, HKD)
        #[arg(short, long, default_value = "CNY")]
        currency: CurrencyCode,
    },
}

#[tokio::main]
async fn main() {
    // Logs go to stderr so stdout stays machine-readable
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Address { action } => match action {
            AddressAction::Validate { file } => commands::address::validate(&file).await?,
            AddressAction::Provinces { dataset } => {
                commands::address::provinces(dataset.as_deref()).await?;
            }
            AddressAction::Cities {
                province_code,
                dataset,
            } => commands::address::cities(&province_code, dataset.as_deref()).await?,
            AddressAction::Districts { city_code, dataset } => {
                commands::address::districts(&city_code, dataset.as_deref()).await?;
            }
        },
        Commands::Order { action } => match action {
            OrderAction::Total { file, currency } => {
                commands::order::total(&file, currency).await?;
            }
        },
    }
    Ok(())
}
