use std::sync::Arc;

use tracing::info;

use crate::core::error::AppError;
use crate::features::bills::dto::{Bill, ChamberFilter};
use crate::features::bills::helpers::{bill_from_raw, filter_bills, sanitise_optional_text};
use crate::features::congress::CongressDataSource;

pub struct BillSearchService {
    data_source: Arc<dyn CongressDataSource>,
}

impl BillSearchService {
    pub fn new(data_source: Arc<dyn CongressDataSource>) -> Self {
        Self { data_source }
    }

    pub async fn search(
        &self,
        keyword: &str,
        chamber: Option<&str>,
        session: Option<&str>,
    ) -> Result<Vec<Bill>, AppError> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Err(AppError::bad_request(
                "search keyword must not be empty".to_string(),
            ));
        }

        let chamber_filter = ChamberFilter::parse_optional(chamber)?;
        let session_filter = sanitise_optional_text(session);

        let payload = self.data_source.search_bills(keyword).await?;
        let received = payload.bills.len();

        let bills = filter_bills(
            payload.bills.into_iter().map(bill_from_raw).collect(),
            chamber_filter,
            session_filter.as_deref(),
        );

        info!(
            keyword,
            chamber = ?chamber_filter,
            session = session_filter.as_deref().unwrap_or(""),
            received,
            matched = bills.len(),
            "bill search complete"
        );

        Ok(bills)
    }
}
