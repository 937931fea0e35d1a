use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use bill_vote_lookup::config::load_config;
use bill_vote_lookup::core::error::AppError;
use bill_vote_lookup::features::bills::BillSearchService;
use bill_vote_lookup::features::congress::{CongressClient, CongressDataSource};
use bill_vote_lookup::features::votes::{VoteCacheStore, VoteService};
use bill_vote_lookup::server::{AppState, build_router};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    init_tracing();

    let config = Arc::new(load_config()?);

    let congress_client: Arc<dyn CongressDataSource> =
        Arc::new(CongressClient::new(config.clone())?);

    let sled_db = sled::open(&config.db_path).map_err(|err| {
        AppError::cache(format!(
            "failed to open sled database at {}: {err}",
            config.db_path
        ))
    })?;
    let vote_store = VoteCacheStore::open(&sled_db)?;
    tracing::info!(
        db_path = %config.db_path,
        cached_bills = vote_store.len(),
        cache_enabled = config.cache_enabled,
        ttl_secs = ?config.votes_cache_ttl,
        "vote cache ready"
    );

    let bill_service = Arc::new(BillSearchService::new(congress_client.clone()));
    let vote_service = Arc::new(VoteService::new(&config, congress_client, vote_store));
    let app_state = AppState::new(bill_service, vote_service, config.api_key.clone());

    let app = build_router(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!(%addr, upstream = %config.congress_api_base_url, "starting server");
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|err| AppError::internal(format!("failed to bind: {err}")))?;
    axum::serve(listener, app)
        .await
        .map_err(|err| AppError::internal(format!("server error: {err}")))?;

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();
}
