use axum::Json;
use axum::extract::{Path, Query, State};

use crate::core::error::AppError;
use crate::features::votes::dto::{
    CacheClearResponseDto, PartyTallyResponseDto, VoteTypeFilter, VotesQuery, VotesResponseDto,
};
use crate::features::votes::helpers::{bill_key, filter_by_vote_type, tally_by_party};
use crate::server::AppState;

const NO_VOTES_ADVISORY: &str = "No vote data available.";

pub async fn handle_get_votes(
    State(state): State<AppState>,
    Path((session, bill_number)): Path<(String, String)>,
    Query(query): Query<VotesQuery>,
) -> Result<Json<VotesResponseDto>, AppError> {
    let filter = match query.vote_type.as_deref() {
        Some(value) => value.parse::<VoteTypeFilter>()?,
        None => VoteTypeFilter::All,
    };

    let lookup = state.votes.lookup(&session, &bill_number).await?;
    let advisory = lookup
        .records
        .is_empty()
        .then(|| NO_VOTES_ADVISORY.to_string());
    let votes = filter_by_vote_type(lookup.records, filter);

    Ok(Json(VotesResponseDto {
        bill_key: bill_key(session.trim(), bill_number.trim()),
        count: votes.len(),
        votes,
        cached: lookup.cached,
        advisory,
    }))
}

pub async fn handle_get_party_tally(
    State(state): State<AppState>,
    Path((session, bill_number)): Path<(String, String)>,
) -> Result<Json<PartyTallyResponseDto>, AppError> {
    let lookup = state.votes.lookup(&session, &bill_number).await?;

    Ok(Json(PartyTallyResponseDto {
        bill_key: bill_key(session.trim(), bill_number.trim()),
        parties: tally_by_party(&lookup.records),
        cached: lookup.cached,
    }))
}

pub async fn handle_clear_cache(
    State(state): State<AppState>,
) -> Result<Json<CacheClearResponseDto>, AppError> {
    let removed = state.votes.clear_cache().await?;
    Ok(Json(CacheClearResponseDto { removed }))
}

pub async fn handle_evict_bill(
    State(state): State<AppState>,
    Path((session, bill_number)): Path<(String, String)>,
) -> Result<Json<CacheClearResponseDto>, AppError> {
    let removed = state.votes.evict(&session, &bill_number).await?;
    Ok(Json(CacheClearResponseDto {
        removed: usize::from(removed),
    }))
}
