use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub mod catalog;
pub mod chat;
pub mod checkout;
pub mod shop;

use crate::core::AppConfig;

#[derive(Subcommand)]
enum Command {
    /// List products
    Catalog {
        /// Only show one category, e.g. "Veg Pickles"
        #[arg(long)]
        category: Option<String>,

        /// Only show products whose name contains this text
        #[arg(long)]
        search: Option<String>,
    },
    /// Open the interactive shop
    Shop {},
    /// Chat with the shopping assistant
    Chat {},
    /// Print the order message and link for a list of items
    Checkout {
        /// Item as <id>:<weight>, repeat to add more
        #[arg(long = "item", required = true)]
        items: Vec<String>,
    },
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

/// Filter used when `RUST_LOG` is unset. Quiet so logs don't
/// interleave with the interactive prompt.
fn default_filter() -> String {
    format!("{}=warn", env!("CARGO_CRATE_NAME"))
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

pub async fn run() -> Result<()> {
    let args = Cli::parse();
    init_tracing();

    let config = AppConfig::default();

    // Handle each sub command
    match args.command {
        Some(Command::Catalog { category, search }) => {
            catalog::run(&config, category, search)?;
        }
        Some(Command::Shop {}) => {
            shop::run(config).await?;
        }
        Some(Command::Chat {}) => {
            chat::run(config).await?;
        }
        Some(Command::Checkout { items }) => {
            checkout::run(&config, items)?;
        }
        None => {
            shop::run(config).await?;
        }
    }

    Ok(())
}
