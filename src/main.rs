use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use questmap::api::ApiClient;
use questmap::config::Config;
use questmap::logging::init_tracing;
use questmap::persist::{FileStorage, Persistor};
use questmap::store::Store;

#[derive(Parser, Debug)]
#[command(name = "questmap", version, about = "Terminal client for the quest map service")]
struct Cli {
    /// Config file (default: <config dir>/questmap/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the REST API base URL
    #[arg(long)]
    api_url: Option<String>,

    /// Directory for the persisted store snapshot
    #[arg(long)]
    state_dir: Option<PathBuf>,

    /// Start the map at the configured default view
    #[arg(long)]
    reset_map: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let mut config = Config::load_from(&config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;
    if let Some(url) = cli.api_url {
        config.api.base_url = url;
    }
    if let Some(dir) = cli.state_dir {
        config.persistence.dir = Some(dir);
    }

    let state_dir = config.state_dir();
    let persistor = Persistor::new(
        config.persist_config()?,
        Arc::new(FileStorage::new(&state_dir)),
    );
    let mut store = Store::with_persistor(config.default_viewport(), persistor);
    if cli.reset_map {
        store.reset_position();
    }
    tracing::info!(
        state_dir = %state_dir.display(),
        api = %config.api.base_url,
        authenticated = store.is_authenticated(),
        "Starting questmap"
    );

    let client = ApiClient::new(&config.api).context("building HTTP client")?;
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("starting tokio runtime")?;

    questmap::ui::runtime::run(&config, store, client, runtime.handle().clone())?;
    Ok(())
}
