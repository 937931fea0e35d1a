use axum::Json;
use axum::extract::{Query, State};

use crate::core::error::AppError;
use crate::features::bills::dto::{BillSearchResponseDto, SearchBillsQuery};
use crate::server::AppState;

const NO_BILLS_ADVISORY: &str = "No bills found.";

pub async fn handle_search_bills(
    State(state): State<AppState>,
    Query(query): Query<SearchBillsQuery>,
) -> Result<Json<BillSearchResponseDto>, AppError> {
    let bills = state
        .bills
        .search(
            &query.keyword,
            query.chamber.as_deref(),
            query.session.as_deref(),
        )
        .await?;

    let advisory = bills.is_empty().then(|| NO_BILLS_ADVISORY.to_string());

    Ok(Json(BillSearchResponseDto {
        count: bills.len(),
        bills,
        advisory,
    }))
}
