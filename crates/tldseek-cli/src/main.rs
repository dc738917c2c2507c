//! tldseek CLI entry point.

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    tldseek_cli::run().await
}
