//! dollm - Browse and cache the DigitalOcean inference model catalog

use clap::Parser;

use dollm::cache::CacheStore;
use dollm::catalog::CatalogService;
use dollm::cli::{Cli, Command};
use dollm::commands::{self, CommandError};

/// Resolves the cache store from the CLI override or the default location
fn resolve_store(cli: &Cli) -> Option<CacheStore> {
    match &cli.cache_file {
        Some(path) => Some(CacheStore::at(path.clone())),
        None => CacheStore::default_location(),
    }
}

async fn run(cli: Cli) -> Result<(), CommandError> {
    let Some(store) = resolve_store(&cli) else {
        eprintln!("Error: could not determine a cache directory; pass --cache-file");
        std::process::exit(1);
    };
    let service = CatalogService::new(store);

    match cli.command {
        Command::Refresh => commands::run_refresh(&service).await,
        Command::Models { json } => commands::run_models(&service, json).await,
        Command::CacheInfo => commands::run_cache_info(service.store()),
    }
}

#[tokio::main]
async fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}
