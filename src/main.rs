mod api;
mod cache;
mod config;
mod db;
mod error;
mod merge;
mod service;
mod synonyms;
mod types;

use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::api::routes::{router, ApiState};
use crate::config::Config;
use crate::db::adapter::SourceAdapter;
use crate::db::price_changes::PriceChangeReader;
use crate::error::Result;
use crate::service::QueryService;
use crate::synonyms::SynonymMap;
use crate::types::SourceKind;

#[tokio::main]
async fn main() {
    let cfg = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {e}");
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&cfg.log_level))
        .init();

    if let Err(e) = run(cfg).await {
        error!("Fatal error: {e}");
        std::process::exit(1);
    }
}

async fn run(cfg: Config) -> Result<()> {
    // Pools are lazy: an unreachable store surfaces per-query as a warning
    // instead of failing startup — the other store keeps serving.
    let catalog_pool = db::lazy_pool(&cfg.catalog_db_url)?;
    let card_pool = db::lazy_pool(&cfg.card_db_url)?;
    info!("Connection pools ready (catalog, card)");

    let synonyms = Arc::new(SynonymMap::builtin());
    info!("Synonym table loaded: {} aliases", synonyms.len());

    // The price-change table lives on the catalog store.
    let service = QueryService::new(
        SourceAdapter::new(SourceKind::Catalog, catalog_pool.clone()),
        SourceAdapter::new(SourceKind::Card, card_pool),
        PriceChangeReader::new(catalog_pool),
        synonyms,
    );

    let app = router(ApiState {
        service: Arc::new(service),
    });
    let bind_addr = format!("0.0.0.0:{}", cfg.api_port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("HTTP API listening on {bind_addr}");

    axum::serve(listener, app).await?;

    Ok(())
}
