use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    load_config, submit_and_wait, ClientConfig, Phase, RequestController, ShortenerApi,
    ShortenerClient,
};
use shared::{
    domain::ShortenResult,
    protocol::{HealthStatus, LinkStats},
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "shortly", about = "Shorten long URLs through a Short.ly service")]
struct Cli {
    /// TOML config file; defaults to ./shortly.toml when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Overrides api_base_url from the config file and environment.
    #[arg(long, global = true)]
    api_base_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Shorten a URL, optionally asking for a specific short code.
    Shorten {
        url: String,
        #[arg(long)]
        custom_code: Option<String>,
        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Report the service health endpoint.
    Health,
    /// Look up the original URL behind a short code.
    Stats { short_code: String },
}

fn resolve_config(cli: &Cli) -> Result<ClientConfig> {
    let config = load_config(cli.config.as_deref()).context("failed to load client config")?;
    match &cli.api_base_url {
        Some(api_base_url) => Ok(config.with_api_base_url(api_base_url).validated()?),
        None => Ok(config),
    }
}

fn render_result(result: &ShortenResult, json: bool) -> Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(result)?);
    }
    Ok(format!(
        "Shortened URL: {}\nOriginal URL:  {}",
        result.shortened_url, result.original_url
    ))
}

fn render_health(health: &HealthStatus) -> String {
    let mut out = format!("status:   {}", health.status);
    if let Some(redis) = &health.redis {
        out.push_str(&format!("\nredis:    {redis}"));
    }
    if let Some(database) = &health.database {
        out.push_str(&format!("\ndatabase: {database}"));
    }
    out
}

fn render_stats(stats: &LinkStats) -> String {
    format!(
        "{} -> {}\n{}",
        stats.short_code, stats.original_url, stats.shortened_url
    )
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let config = resolve_config(&cli)?;
    tracing::debug!(api_base_url = %config.api_base_url, "resolved client config");
    let client = ShortenerClient::new(&config)?;

    match cli.command {
        Command::Shorten {
            url,
            custom_code,
            json,
        } => {
            let mut controller = RequestController::new();
            controller.url = url;
            controller.custom_code = custom_code.unwrap_or_default();

            if !submit_and_wait(&mut controller, &client).await {
                bail!("a URL is required");
            }
            match controller.phase() {
                Phase::Success { result, .. } => println!("{}", render_result(result, json)?),
                Phase::Error { message } => bail!("{message}"),
                phase => bail!("shorten request did not settle: {phase:?}"),
            }
        }
        Command::Health => {
            let health = client.health().await?;
            println!("{}", render_health(&health));
        }
        Command::Stats { short_code } => {
            let stats = client.stats(&short_code).await?;
            println!("{}", render_stats(&stats));
        }
    }

    Ok(())
}
