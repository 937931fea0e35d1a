use std::env;

use crate::config::dto::AppConfig;
use crate::core::error::AppError;

pub const DEFAULT_CONGRESS_API_BASE_URL: &str = "https://api.congress.gov/v3";
const DEFAULT_PORT: &str = "4100";
const DEFAULT_DB_PATH: &str = "bills_cache.db";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

pub fn load_config() -> Result<AppConfig, AppError> {
    dotenvy::dotenv().ok();

    load_config_from(|key| env::var(key).ok())
}

pub fn load_config_from<F>(lookup: F) -> Result<AppConfig, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    let port = lookup("LOOKUP_PORT")
        .or_else(|| lookup("PORT"))
        .unwrap_or_else(|| DEFAULT_PORT.to_string())
        .parse::<u16>()
        .map_err(|err| AppError::configuration(format!("invalid port: {err}")))?;

    let congress_api_key = non_blank(lookup("CONGRESS_API_KEY"))
        .or_else(|| non_blank(lookup("API_KEY")))
        .ok_or_else(|| AppError::configuration("CONGRESS_API_KEY is required".to_string()))?;

    let api_key = non_blank(lookup("LOOKUP_API_KEY"))
        .ok_or_else(|| AppError::configuration("LOOKUP_API_KEY is required".to_string()))?;

    let congress_api_base_url = non_blank(lookup("CONGRESS_API_BASE_URL"))
        .unwrap_or_else(|| DEFAULT_CONGRESS_API_BASE_URL.to_string())
        .trim_end_matches('/')
        .to_string();
    reqwest::Url::parse(&congress_api_base_url).map_err(|err| {
        AppError::configuration(format!("invalid CONGRESS_API_BASE_URL: {err}"))
    })?;

    let disable_proxy = parse_bool(lookup("DISABLE_PROXY"), false);
    let cache_enabled = parse_bool(lookup("CACHE_ENABLED"), true);

    let votes_cache_ttl = match non_blank(lookup("VOTES_CACHE_TTL")) {
        Some(value) => {
            let seconds = value.parse::<u64>().map_err(|err| {
                AppError::configuration(format!("invalid VOTES_CACHE_TTL: {err}"))
            })?;
            (seconds > 0).then_some(seconds)
        }
        None => None,
    };

    let http_timeout_secs = match non_blank(lookup("HTTP_TIMEOUT_SECS")) {
        Some(value) => value
            .parse::<u64>()
            .ok()
            .filter(|seconds| *seconds > 0)
            .ok_or_else(|| {
                AppError::configuration(format!("invalid HTTP_TIMEOUT_SECS: {value}"))
            })?,
        None => DEFAULT_HTTP_TIMEOUT_SECS,
    };

    let db_path = non_blank(lookup("LOOKUP_DB_PATH")).unwrap_or_else(|| DEFAULT_DB_PATH.to_string());

    Ok(AppConfig {
        port,
        api_key,
        congress_api_key,
        congress_api_base_url,
        disable_proxy,
        cache_enabled,
        votes_cache_ttl,
        http_timeout_secs,
        db_path,
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

fn parse_bool(value: Option<String>, default: bool) -> bool {
    value
        .map(|value| matches!(value.as_str(), "true" | "1" | "TRUE" | "True"))
        .unwrap_or(default)
}
