//! Yahoo Finance tool CLI
//!
//! Runs one tool invocation against live Yahoo Finance data and prints the
//! host envelope, or dumps the descriptor the host would advertise.
//!
//! # Usage
//!
//! ```bash
//! # Current quote
//! cargo run --bin yfin-tool -- '{"action":"quote","ticker":"AAPL"}'
//!
//! # Descriptor
//! cargo run --bin yfin-tool -- --descriptor
//!
//! # With a config file
//! cargo run --bin yfin-tool -- --config tool-config.json '{"action":"stock_news","count":3}'
//! ```

use anyhow::Context;
use clap::Parser;
use fintool_api::Tool;
use fintool_yahoo::{ToolConfig, YahooFinanceTool};
use std::io::Read;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "yfin-tool", version, about = "Query Yahoo Finance through the agent tool")]
struct Cli {
    /// Path to a JSON tool configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the tool descriptor and exit
    #[arg(long)]
    descriptor: bool,

    /// JSON request, e.g. '{"action":"quote","ticker":"AAPL"}'; reads stdin when omitted
    request: Option<String>,
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<ToolConfig> {
    match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            let value = serde_json::from_str(&raw)
                .with_context(|| format!("config {} is not valid JSON", path.display()))?;
            Ok(ToolConfig::from_value(value)?)
        }
        None => Ok(ToolConfig::default()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref())?;

    // RUST_LOG wins over the configured level, matching the library default
    let level = config.level()?.to_string().to_lowercase();
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("warn,fintool_yahoo={level}")),
        )
        .init();

    let tool = YahooFinanceTool::new(&config)?;

    if cli.descriptor {
        println!("{}", serde_json::to_string_pretty(&tool.descriptor())?);
        return Ok(());
    }

    let request = match cli.request {
        Some(request) => request,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("reading request from stdin")?;
            buffer
        }
    };
    let args: serde_json::Value =
        serde_json::from_str(&request).context("request must be valid JSON")?;

    let response = tool.execute(args).await?;
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
