use async_trait::async_trait;

use crate::core::error::AppError;
use crate::features::congress::client::CongressClient;
use crate::features::congress::dto::{BillSearchPayload, BillVotesPayload};

#[async_trait]
pub trait CongressDataSource: Send + Sync {
    async fn search_bills(&self, keyword: &str) -> Result<BillSearchPayload, AppError>;
    async fn fetch_bill_votes(
        &self,
        session: &str,
        bill_number: &str,
    ) -> Result<BillVotesPayload, AppError>;
}

#[async_trait]
impl CongressDataSource for CongressClient {
    async fn search_bills(&self, keyword: &str) -> Result<BillSearchPayload, AppError> {
        CongressClient::search_bills(self, keyword).await
    }

    async fn fetch_bill_votes(
        &self,
        session: &str,
        bill_number: &str,
    ) -> Result<BillVotesPayload, AppError> {
        CongressClient::fetch_bill_votes(self, session, bill_number).await
    }
}
