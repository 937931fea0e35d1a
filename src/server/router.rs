use axum::routing::{delete, get};
use axum::{Json, Router, middleware};
use serde_json::{Value, json};

use crate::features::bills::handle_search_bills;
use crate::features::votes::{
    handle_clear_cache, handle_evict_bill, handle_get_party_tally, handle_get_votes,
};
use crate::server::{AppState, require_api_key};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/bills/search", get(handle_search_bills))
        .route("/api/bills/:session/:number/votes", get(handle_get_votes))
        .route(
            "/api/bills/:session/:number/votes/tally",
            get(handle_get_party_tally),
        )
        .route("/api/cache", delete(handle_clear_cache))
        .route("/api/cache/:session/:number", delete(handle_evict_bill))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_api_key,
        ))
        .route("/api/health", get(handle_healthcheck))
        .with_state(state)
}

pub async fn handle_healthcheck() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
