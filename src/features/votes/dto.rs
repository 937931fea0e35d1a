use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::error::AppError;

/// A member's ballot. Anything other than Yea/Nay ("Present", "Not Voting",
/// ...) is preserved verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum VoteKind {
    Yea,
    Nay,
    Other(String),
}

impl VoteKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Yea => "Yea",
            Self::Nay => "Nay",
            Self::Other(value) => value.as_str(),
        }
    }
}

impl From<String> for VoteKind {
    fn from(value: String) -> Self {
        let trimmed = value.trim();
        if trimmed.eq_ignore_ascii_case("yea") {
            Self::Yea
        } else if trimmed.eq_ignore_ascii_case("nay") {
            Self::Nay
        } else {
            Self::Other(value)
        }
    }
}

impl From<VoteKind> for String {
    fn from(value: VoteKind) -> Self {
        match value {
            VoteKind::Other(text) => text,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for VoteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteRecord {
    pub member_name: String,
    pub party: String,
    pub vote: VoteKind,
    pub chamber: String,
    pub date: String,
    pub bill_key: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VoteTypeFilter {
    #[default]
    All,
    Yea,
    Nay,
}

impl VoteTypeFilter {
    pub fn matches(&self, vote: &VoteKind) -> bool {
        match self {
            Self::All => true,
            Self::Yea => *vote == VoteKind::Yea,
            Self::Nay => *vote == VoteKind::Nay,
        }
    }
}

impl FromStr for VoteTypeFilter {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            Ok(Self::All)
        } else if trimmed.eq_ignore_ascii_case("yea") {
            Ok(Self::Yea)
        } else if trimmed.eq_ignore_ascii_case("nay") {
            Ok(Self::Nay)
        } else {
            Err(AppError::bad_request(format!(
                "invalid vote type: {value} (expected All, Yea or Nay)"
            )))
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyTally {
    pub party: String,
    pub yea: usize,
    pub nay: usize,
    pub other: usize,
}

impl PartyTally {
    pub fn total(&self) -> usize {
        self.yea + self.nay + self.other
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteLookup {
    pub records: Vec<VoteRecord>,
    pub cached: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VotesQuery {
    #[serde(rename = "voteType")]
    pub vote_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VotesResponseDto {
    pub bill_key: String,
    pub votes: Vec<VoteRecord>,
    pub count: usize,
    pub cached: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advisory: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartyTallyResponseDto {
    pub bill_key: String,
    pub parties: Vec<PartyTally>,
    pub cached: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheClearResponseDto {
    pub removed: usize,
}
