use anyhow::Result;
use storefront::cli;

#[tokio::main]
async fn main() -> Result<()> {
    cli::run().await
}
