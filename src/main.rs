//! `swx`: serve the API, manage the database, generate resources.

use clap::Parser;
use swx_api::cli::{self, Cli};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse_from(cli::expand_colon_syntax(std::env::args()));
    cli::run(cli).await
}
