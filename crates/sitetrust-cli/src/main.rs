//! sitetrust -- probe a host from the command line.

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    sitetrust_cli::run().await
}
