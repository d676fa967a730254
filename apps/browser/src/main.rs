use std::{path::PathBuf, sync::Arc};

use anyhow::{bail, Context, Result};
use browser_core::{
    Completion, FileStorage, HttpRegionApi, RegionBrowser, SettingsStore,
};
use clap::{Parser, Subcommand};
use shared::domain::ConnectionId;
use tracing_subscriber::EnvFilter;

mod config;
mod render;

#[derive(Parser, Debug)]
#[command(name = "region-browser", about = "Search region hierarchies on a region API server")]
struct Args {
    /// Base url of the region API server.
    #[arg(long, global = true)]
    server_url: Option<String>,
    /// Request timeout in seconds.
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,
    /// File the user settings are kept in.
    #[arg(long, global = true)]
    settings_path: Option<PathBuf>,
    /// Configuration file, `region_browser.toml` by default.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch and list the available connections.
    Connections,
    /// Search a region, e.g. "Europe > Germany > Berlin".
    Search {
        query: String,
        #[arg(long)]
        connection: Option<usize>,
        #[arg(long)]
        language: Option<String>,
        #[arg(long)]
        show_bigger: Option<bool>,
    },
    /// Print the persisted settings.
    Settings,
    /// Update the persisted settings.
    Set {
        #[arg(long)]
        connection: Option<usize>,
        #[arg(long)]
        language: Option<String>,
        #[arg(long)]
        show_bigger: Option<bool>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut config = config::load_config(args.config.as_deref());
    if let Some(server_url) = args.server_url {
        config.server_url = server_url;
    }
    if let Some(timeout_secs) = args.timeout_secs {
        config.request_timeout_secs = timeout_secs;
    }
    if let Some(settings_path) = args.settings_path {
        config.settings_path = settings_path;
    }
    tracing::debug!(?config, "configuration loaded");

    let api = HttpRegionApi::with_timeout(&config.server_url, config.request_timeout())
        .with_context(|| format!("failed to set up client for {}", config.server_url))?;
    let store = SettingsStore::new(FileStorage::new(&config.settings_path));
    let browser = RegionBrowser::new(Arc::new(api), store);

    match args.command {
        Command::Connections => {
            refresh_connections(&browser).await?;
            println!("{}", render::render_connections(&browser.snapshot()));
        }
        Command::Search {
            query,
            connection,
            language,
            show_bigger,
        } => {
            refresh_connections(&browser).await?;
            if let Some(index) = connection {
                browser.select_connection(Some(ConnectionId(index)))?;
            }
            if language.is_some() {
                browser.set_preferred_language(language);
            }
            if let Some(show) = show_bigger {
                browser.set_show_bigger_regions(show);
            }
            browser.set_query(query);

            let completion = browser
                .search_form()
                .await
                .context("search was not started; pass --connection or set one first")?;
            let state = browser.snapshot();
            if completion == Completion::Failed {
                bail!(state.error_message.unwrap_or_default());
            }
            println!("{}", render::render_results(&state));
        }
        Command::Settings => {
            println!("{}", render::render_settings(&browser.persisted_settings()));
        }
        Command::Set {
            connection,
            language,
            show_bigger,
        } => {
            if let Some(index) = connection {
                refresh_connections(&browser).await?;
                browser.select_connection(Some(ConnectionId(index)))?;
            }
            if language.is_some() {
                browser.set_preferred_language(language);
            }
            if let Some(show) = show_bigger {
                browser.set_show_bigger_regions(show);
            }
            println!("{}", render::render_settings(&browser.persisted_settings()));
        }
    }

    Ok(())
}

async fn refresh_connections(browser: &RegionBrowser) -> Result<()> {
    if browser.refresh_connections().await == Completion::Failed {
        let message = browser.snapshot().error_message.unwrap_or_default();
        bail!("failed to load connections: {message}");
    }
    Ok(())
}
