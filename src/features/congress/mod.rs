pub mod client;
pub mod dto;
pub mod source;

pub use client::CongressClient;
pub use dto::{
    BillSearchPayload, BillVotesPayload, RawBallot, RawBill, RawLatestAction, RawVoteEvent,
    StringOrNumber,
};
pub use source::CongressDataSource;
