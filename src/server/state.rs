use std::sync::Arc;

use crate::features::bills::BillSearchService;
use crate::features::votes::VoteService;

#[derive(Clone)]
pub struct AppState {
    pub bills: Arc<BillSearchService>,
    pub votes: Arc<VoteService>,
    pub api_key: Arc<String>,
}

impl AppState {
    pub fn new(bills: Arc<BillSearchService>, votes: Arc<VoteService>, api_key: String) -> Self {
        Self {
            bills,
            votes,
            api_key: Arc::new(api_key),
        }
    }
}
