use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Chamber {
    House,
    Senate,
    Unspecified,
}

impl Chamber {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::House => "House",
            Self::Senate => "Senate",
            Self::Unspecified => "",
        }
    }

    pub fn from_upstream(value: &str) -> Self {
        let value = value.trim();
        if value.eq_ignore_ascii_case("house") {
            Self::House
        } else if value.eq_ignore_ascii_case("senate") {
            Self::Senate
        } else {
            Self::Unspecified
        }
    }
}

impl fmt::Display for Chamber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Chamber {
    fn from(value: String) -> Self {
        Self::from_upstream(&value)
    }
}

impl From<Chamber> for String {
    fn from(value: Chamber) -> Self {
        value.as_str().to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChamberFilter {
    House,
    Senate,
}

impl ChamberFilter {
    pub fn parse_optional(value: Option<&str>) -> Result<Option<Self>, AppError> {
        match value.map(str::trim).filter(|text| !text.is_empty()) {
            Some(text) => text.parse().map(Some),
            None => Ok(None),
        }
    }

    pub fn matches(&self, chamber: Chamber) -> bool {
        matches!(
            (self, chamber),
            (Self::House, Chamber::House) | (Self::Senate, Chamber::Senate)
        )
    }
}

impl FromStr for ChamberFilter {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match Chamber::from_upstream(value) {
            Chamber::House => Ok(Self::House),
            Chamber::Senate => Ok(Self::Senate),
            Chamber::Unspecified => Err(AppError::bad_request(format!(
                "invalid chamber filter: {value} (expected House or Senate)"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    pub title: String,
    pub session: String,
    pub number: String,
    pub chamber: Chamber,
    pub latest_action_date: Option<String>,
    pub latest_action_text: Option<String>,
}

impl Bill {
    pub fn key(&self) -> String {
        format!("{}-{}", self.session, self.number)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchBillsQuery {
    #[serde(default)]
    pub keyword: String,
    pub chamber: Option<String>,
    pub session: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillSearchResponseDto {
    pub bills: Vec<Bill>,
    pub count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advisory: Option<String>,
}
