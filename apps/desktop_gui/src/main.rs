use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{load_config, ClientConfig, ShortenerClient};
use crossbeam_channel::bounded;
use eframe::egui;

mod backend_bridge;
mod controller;
mod ui;

use backend_bridge::commands::BackendCommand;
use controller::events::UiEvent;
use ui::{ShortlyApp, StartupConfig};

#[derive(Parser, Debug)]
#[command(name = "shortly_gui", about = "Desktop URL shortener")]
struct Args {
    /// TOML config file; defaults to ./shortly.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Overrides api_base_url from the config file and environment.
    #[arg(long)]
    api_base_url: Option<String>,
}

fn resolve_config(args: &Args) -> Result<ClientConfig> {
    let config = load_config(args.config.as_deref()).context("failed to load client config")?;
    match &args.api_base_url {
        Some(api_base_url) => Ok(config.with_api_base_url(api_base_url).validated()?),
        None => Ok(config),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();
    let args = Args::parse();
    let config = resolve_config(&args)?;
    tracing::info!(api_base_url = %config.api_base_url, "starting desktop shortener");

    let client = ShortenerClient::new(&config).context("failed to build HTTP client")?;
    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);
    backend_bridge::runtime::launch(Arc::new(client), cmd_rx, ui_tx);

    let startup = StartupConfig {
        api_base_url: config.api_base_url.clone(),
    };
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Short.ly - URL Shortener")
            .with_inner_size([720.0, 760.0])
            .with_min_inner_size([480.0, 520.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Short.ly - URL Shortener",
        options,
        Box::new(move |_cc| Ok(Box::new(ShortlyApp::bootstrap(cmd_tx, ui_rx, startup)))),
    )
    .map_err(|err| anyhow::anyhow!("desktop UI exited with an error: {err}"))
}

#[cfg(test)]
mod tests {
    use super::Args;
    use clap::Parser;

    #[test]
    fn parses_base_url_override() {
        let args = Args::try_parse_from(["shortly_gui", "--api-base-url", "https://sho.rt"])
            .expect("parse");
        assert_eq!(args.api_base_url.as_deref(), Some("https://sho.rt"));
        assert!(args.config.is_none());
    }
}
