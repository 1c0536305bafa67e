//! Salon estimator CLI
//!
//! Usage:
//!   salon-estimator serve --port 8080            Start the HTTP API
//!   salon-estimator estimate --selection FILE    Price a selection JSON file
//!   salon-estimator check                        Validate the catalog

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use salon_estimator::api::{AppState, create_router};
use salon_estimator::calculation::{calculate_estimate, estimate_summary, price_label};
use salon_estimator::config::Catalog;
use salon_estimator::insight::HttpInsightClient;
use salon_estimator::models::Selection;

#[derive(Parser)]
#[command(name = "salon-estimator", version, about = "Price estimates for salon appointments")]
struct Cli {
    /// Path to the catalog (YAML or JSON)
    #[arg(
        long,
        global = true,
        env = "SALON_CATALOG",
        default_value = "config/salon/catalog.yaml"
    )]
    catalog: PathBuf,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API
    Serve {
        /// Address to bind
        #[arg(long, env = "SALON_HOST", default_value = "127.0.0.1")]
        host: String,

        /// Port to listen on
        #[arg(long, env = "SALON_PORT", default_value_t = 8080)]
        port: u16,

        /// Base URL of the insight service
        #[arg(long, env = "SALON_INSIGHT_URL")]
        insight_url: Option<String>,

        /// Insight request timeout in milliseconds
        #[arg(long, env = "SALON_INSIGHT_TIMEOUT_MS", default_value_t = 5000)]
        insight_timeout_ms: u64,
    },

    /// Price a selection and print a summary
    Estimate {
        /// Selection JSON file
        #[arg(long)]
        selection: PathBuf,
    },

    /// Load the catalog and list its categories
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let catalog = Catalog::load(&cli.catalog)
        .with_context(|| format!("Failed to load catalog {}", cli.catalog.display()))?;

    match cli.command {
        Commands::Serve {
            host,
            port,
            insight_url,
            insight_timeout_ms,
        } => cmd_serve(catalog, &host, port, insight_url.as_deref(), insight_timeout_ms).await,
        Commands::Estimate { selection } => cmd_estimate(&catalog, &selection),
        Commands::Check => cmd_check(&catalog),
    }
}

async fn cmd_serve(
    catalog: Catalog,
    host: &str,
    port: u16,
    insight_url: Option<&str>,
    insight_timeout_ms: u64,
) -> Result<()> {
    let mut state = AppState::new(catalog);
    if let Some(url) = insight_url {
        let client = HttpInsightClient::new(url, Duration::from_millis(insight_timeout_ms))
            .context("Failed to build insight client")?;
        info!(endpoint = client.endpoint(), "Insight service configured");
        state = state.with_insight_provider(Arc::new(client));
    }

    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .with_context(|| format!("Invalid listen address {}:{}", host, port))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!(%addr, "Salon estimator listening");
    axum::serve(listener, create_router(state)).await?;
    Ok(())
}

fn cmd_estimate(catalog: &Catalog, path: &Path) -> Result<()> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read selection {}", path.display()))?;
    let selection: Selection = serde_json::from_str(&content)
        .with_context(|| format!("Invalid selection in {}", path.display()))?;

    let result = calculate_estimate(catalog, &selection)?;
    for line in estimate_summary(&result) {
        println!("{}", line);
    }
    Ok(())
}

fn cmd_check(catalog: &Catalog) -> Result<()> {
    println!(
        "Catalog {} offers levels: {}",
        catalog.version().unwrap_or("(unversioned)"),
        catalog
            .seniority_levels()
            .iter()
            .map(|l| l.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );
    for category in catalog.categories() {
        let kind = if category.is_add_on() { "add-on" } else { "main" };
        println!(
            "\n{} [{}] ({} items, {})",
            category.name,
            category.field,
            category.items.len(),
            kind
        );
        for item in &category.items {
            println!(
                "  {:<28} {}",
                item.id,
                price_label(&item.price, catalog.seniority_levels().last().copied(), None)
            );
        }
    }
    Ok(())
}
