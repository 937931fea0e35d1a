use std::sync::Arc;

use reqwest::Url;
use serde::de::DeserializeOwned;

use crate::config::AppConfig;
use crate::core::error::AppError;
use crate::core::http_client::build_http_client;
use crate::features::congress::dto::{BillSearchPayload, BillVotesPayload};

const API_KEY_PARAM: &str = "api_key";
const BODY_SNIPPET_CHARS: usize = 512;

pub struct CongressClient {
    config: Arc<AppConfig>,
    http_client: reqwest::Client,
}

impl CongressClient {
    pub fn new(config: Arc<AppConfig>) -> Result<Self, AppError> {
        let http_client = build_http_client(config.disable_proxy, config.http_timeout())
            .map_err(|err| AppError::internal(format!("failed to build HTTP client: {err}")))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    pub async fn search_bills(&self, keyword: &str) -> Result<BillSearchPayload, AppError> {
        let mut url = self.endpoint(&["bill"], AppError::search_failed)?;
        url.query_pairs_mut()
            .append_pair("query", keyword)
            .append_pair(API_KEY_PARAM, &self.config.congress_api_key);

        tracing::debug!(url = %redact(&url), "searching bills");
        self.get_json(url, AppError::search_failed).await
    }

    pub async fn fetch_bill_votes(
        &self,
        session: &str,
        bill_number: &str,
    ) -> Result<BillVotesPayload, AppError> {
        let mut url = self.endpoint(&["bill", session, bill_number, "votes"], AppError::votes_failed)?;
        url.query_pairs_mut()
            .append_pair(API_KEY_PARAM, &self.config.congress_api_key);

        tracing::debug!(url = %redact(&url), "fetching bill votes");
        self.get_json(url, AppError::votes_failed).await
    }

    fn endpoint(&self, segments: &[&str], on_error: fn(String) -> AppError) -> Result<Url, AppError> {
        let path = segments
            .iter()
            .map(|segment| urlencoding::encode(segment.trim()).into_owned())
            .collect::<Vec<_>>()
            .join("/");

        Url::parse(&format!("{}/{path}", self.config.congress_api_base_url))
            .map_err(|err| on_error(format!("invalid congress api url: {err}")))
    }

    async fn get_json<T>(&self, url: Url, on_error: fn(String) -> AppError) -> Result<T, AppError>
    where
        T: DeserializeOwned,
    {
        let display_url = redact(&url);

        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|err| {
                on_error(format!(
                    "network error contacting {display_url}: {}",
                    err.without_url()
                ))
            })?;

        let status = response.status();
        if !status.is_success() {
            let text = response
                .text()
                .await
                .unwrap_or_else(|_| "<failed to read body>".to_string());
            let snippet = mask_secret(&text, &self.config.congress_api_key)
                .chars()
                .take(BODY_SNIPPET_CHARS)
                .collect::<String>();
            let hint = if status.as_u16() == 429 {
                " (rate limited by upstream service)"
            } else {
                ""
            };
            return Err(on_error(format!(
                "request to {display_url} failed with {status}{hint}: {snippet}"
            )));
        }

        let body = response.bytes().await.map_err(|err| {
            on_error(format!(
                "failed to read response from {display_url}: {}",
                err.without_url()
            ))
        })?;

        serde_json::from_slice::<T>(&body).map_err(|err| {
            on_error(format!("failed to decode response from {display_url}: {err}"))
        })
    }
}

fn mask_secret(text: &str, secret: &str) -> String {
    if secret.is_empty() {
        return text.to_string();
    }

    let encoded = urlencoding::encode(secret);
    text.replace(secret, "***").replace(encoded.as_ref(), "***")
}

pub(crate) fn redact(url: &Url) -> String {
    let mut masked = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(key, value)| {
            let value = if key == API_KEY_PARAM {
                "***".to_string()
            } else {
                value.into_owned()
            };
            (key.into_owned(), value)
        })
        .collect();

    if pairs.is_empty() {
        return masked.to_string();
    }

    masked.query_pairs_mut().clear().extend_pairs(pairs);
    masked.to_string()
}
