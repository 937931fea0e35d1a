pub mod dto;
pub mod handler;
mod helpers;
pub mod service;

pub use dto::{Bill, BillSearchResponseDto, Chamber, ChamberFilter, SearchBillsQuery};
pub use handler::handle_search_bills;
pub use service::BillSearchService;
