pub mod dto;
pub mod handler;
pub mod helpers;
pub mod service;
pub mod store;

pub use dto::{
    CacheClearResponseDto, PartyTally, PartyTallyResponseDto, VoteKind, VoteLookup, VoteRecord,
    VoteTypeFilter, VotesQuery, VotesResponseDto,
};
pub use handler::{handle_clear_cache, handle_evict_bill, handle_get_party_tally, handle_get_votes};
pub use helpers::{bill_key, filter_by_vote_type, flatten_votes, tally_by_party};
pub use service::VoteService;
pub use store::{CachedVotes, VoteCacheStore};
