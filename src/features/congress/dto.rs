use std::fmt;

use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BillSearchPayload {
    #[serde(default)]
    pub bills: Vec<RawBill>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBill {
    pub title: String,
    #[serde(default)]
    pub congress: Option<StringOrNumber>,
    pub number: StringOrNumber,
    #[serde(default)]
    pub origin_chamber: Option<String>,
    #[serde(default)]
    pub latest_action: Option<RawLatestAction>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLatestAction {
    #[serde(default)]
    pub action_date: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BillVotesPayload {
    #[serde(default)]
    pub votes: Vec<RawVoteEvent>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawVoteEvent {
    #[serde(default)]
    pub chamber: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub members: Vec<RawBallot>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawBallot {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub party: Option<String>,
    #[serde(default)]
    pub vote: Option<String>,
}

/// Congress numbers and bill numbers arrive as either JSON strings or integers.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum StringOrNumber {
    Text(String),
    Number(i64),
}

impl fmt::Display for StringOrNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text.trim()),
            Self::Number(number) => write!(f, "{number}"),
        }
    }
}
