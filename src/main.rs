use acmedns::{Config, FileZoneStore, Listener, SharedConfig};
use anyhow::Result;
use is_terminal::IsTerminal;
use std::sync::Arc;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_init();

    let config = config_init(std::env::args().nth(1))?;
    let zone_store = Arc::new(FileZoneStore::new(&config.zone_path));

    let listener = Listener::bind(&config, zone_store).await?;
    tracing::info!("DNS listening on UDP {}", listener.local_addr()?);
    tracing::info!("serving zone file {:?}", &config.zone_path);

    tokio::select! {
        _ = signal::ctrl_c() => {
            tracing::info!("quitting from signal");
        },
        () = listener.run() => {}
    }
    tracing::info!("goodbye");
    Ok(())
}

fn tracing_init() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_ansi(std::io::stdout().is_terminal()))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "acmedns=info".into()),
        )
        .init();
}

fn config_init(config_file: Option<String>) -> Result<SharedConfig> {
    let config = match config_file {
        None => {
            tracing::debug!("no config file given, using defaults");
            Config::default()
        }
        Some(config_file) => {
            let config = Config::try_from_file(&config_file)?;
            tracing::debug!("loaded config from {config_file}");
            config
        }
    };
    Ok(Arc::new(config))
}
