use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;

use bill_vote_lookup::config::AppConfig;
use bill_vote_lookup::core::error::AppError;
use bill_vote_lookup::features::bills::BillSearchService;
use bill_vote_lookup::features::congress::{BillSearchPayload, BillVotesPayload, CongressDataSource};
use bill_vote_lookup::features::votes::{VoteCacheStore, VoteService};
use bill_vote_lookup::server::{API_KEY_HEADER, AppState, build_router};

const API_KEY: &str = "front-end-key";

#[derive(Default)]
struct MockCongressDataSource {
    search_calls: AtomicUsize,
    vote_calls: AtomicUsize,
}

#[async_trait]
impl CongressDataSource for MockCongressDataSource {
    async fn search_bills(&self, keyword: &str) -> Result<BillSearchPayload, AppError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        if keyword == "explode" {
            return Err(AppError::search_failed("upstream returned garbage".to_string()));
        }
        if keyword == "nothing" {
            return Ok(BillSearchPayload::default());
        }

        Ok(serde_json::from_value(json!({
            "bills": [
                {"title": "Climate Resilience Act", "congress": 118, "number": "2100", "originChamber": "House"},
                {"title": "Climate Research Funding Act", "congress": 117, "number": "870", "originChamber": "Senate"}
            ]
        }))
        .expect("mock payload decodes"))
    }

    async fn fetch_bill_votes(
        &self,
        _session: &str,
        bill_number: &str,
    ) -> Result<BillVotesPayload, AppError> {
        self.vote_calls.fetch_add(1, Ordering::SeqCst);
        if bill_number == "0" {
            return Ok(BillVotesPayload::default());
        }

        Ok(serde_json::from_value(json!({
            "votes": [
                {
                    "chamber": "House",
                    "date": "2024-02-14",
                    "members": [
                        {"name": "Rep. Alvarez", "party": "D", "vote": "Yea"},
                        {"name": "Rep. Brooks", "party": "R", "vote": "Nay"},
                        {"name": "Rep. Chen", "party": "D", "vote": "Yea"}
                    ]
                }
            ]
        }))
        .expect("mock payload decodes"))
    }
}

struct Harness {
    _dir: tempfile::TempDir,
    _db: sled::Db,
    mock: Arc<MockCongressDataSource>,
    router: Router,
}

fn harness() -> Harness {
    let dir = tempfile::tempdir().expect("temp dir");
    let db = sled::open(dir.path()).expect("sled open");
    let store = VoteCacheStore::open(&db).expect("vote store");

    let config = AppConfig {
        port: 0,
        api_key: API_KEY.to_string(),
        congress_api_key: "congress".to_string(),
        congress_api_base_url: "http://127.0.0.1:9".to_string(),
        disable_proxy: true,
        cache_enabled: true,
        votes_cache_ttl: None,
        http_timeout_secs: 5,
        db_path: dir.path().to_string_lossy().to_string(),
    };

    let mock = Arc::new(MockCongressDataSource::default());
    let data_source: Arc<dyn CongressDataSource> = mock.clone();
    let state = AppState::new(
        Arc::new(BillSearchService::new(data_source.clone())),
        Arc::new(VoteService::new(&config, data_source, store)),
        config.api_key.clone(),
    );

    Harness {
        _dir: dir,
        _db: db,
        mock,
        router: build_router(state),
    }
}

async fn send(router: &Router, method: Method, uri: &str, api_key: Option<&str>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(key) = api_key {
        builder = builder.header(API_KEY_HEADER, key);
    }
    let request = builder.body(Body::empty()).expect("request");

    let response = router.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };

    (status, body)
}

#[tokio::test]
async fn health_does_not_require_api_key() {
    let h = harness();

    let (status, body) = send(&h.router, Method::GET, "/api/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));
}

#[tokio::test]
async fn data_endpoints_require_api_key() {
    let h = harness();

    let (missing, _) = send(&h.router, Method::GET, "/api/bills/search?keyword=climate", None).await;
    let (wrong, _) = send(
        &h.router,
        Method::GET,
        "/api/bills/search?keyword=climate",
        Some("nope"),
    )
    .await;

    assert_eq!(missing, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong, StatusCode::UNAUTHORIZED);
    assert_eq!(h.mock.search_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn search_applies_chamber_filter() {
    let h = harness();

    let (status, body) = send(
        &h.router,
        Method::GET,
        "/api/bills/search?keyword=climate&chamber=senate",
        Some(API_KEY),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);
    assert_eq!(body["bills"][0]["session"], "117");
    assert_eq!(body["bills"][0]["chamber"], "Senate");
    assert!(body.get("advisory").is_none());
}

#[tokio::test]
async fn blank_keyword_is_bad_request() {
    let h = harness();

    let (status, body) = send(
        &h.router,
        Method::GET,
        "/api/bills/search?keyword=%20%20",
        Some(API_KEY),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("keyword"));
    assert_eq!(h.mock.search_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn empty_search_carries_advisory() {
    let h = harness();

    let (status, body) = send(
        &h.router,
        Method::GET,
        "/api/bills/search?keyword=nothing",
        Some(API_KEY),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 0);
    assert_eq!(body["advisory"], "No bills found.");
}

#[tokio::test]
async fn search_failure_is_bad_gateway() {
    let h = harness();

    let (status, body) = send(
        &h.router,
        Method::GET,
        "/api/bills/search?keyword=explode",
        Some(API_KEY),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body["error"].as_str().unwrap().starts_with("bill search failed"));
}

#[tokio::test]
async fn votes_are_filtered_and_cached() {
    let h = harness();

    let (status, first) = send(
        &h.router,
        Method::GET,
        "/api/bills/118/2100/votes?voteType=Yea",
        Some(API_KEY),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["billKey"], "118-2100");
    assert_eq!(first["count"], 2);
    assert_eq!(first["cached"], false);
    assert!(
        first["votes"]
            .as_array()
            .unwrap()
            .iter()
            .all(|vote| vote["vote"] == "Yea")
    );

    let (_, second) = send(&h.router, Method::GET, "/api/bills/118/2100/votes", Some(API_KEY)).await;
    assert_eq!(second["count"], 3);
    assert_eq!(second["cached"], true);
    assert_eq!(h.mock.vote_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn empty_votes_carry_advisory() {
    let h = harness();

    let (status, body) = send(&h.router, Method::GET, "/api/bills/118/0/votes", Some(API_KEY)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["votes"], json!([]));
    assert_eq!(body["advisory"], "No vote data available.");
}

#[tokio::test]
async fn invalid_vote_type_is_bad_request() {
    let h = harness();

    let (status, _) = send(
        &h.router,
        Method::GET,
        "/api/bills/118/2100/votes?voteType=Maybe",
        Some(API_KEY),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(h.mock.vote_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn tally_groups_votes_by_party() {
    let h = harness();

    let (status, body) = send(
        &h.router,
        Method::GET,
        "/api/bills/118/2100/votes/tally",
        Some(API_KEY),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["parties"],
        json!([
            {"party": "D", "yea": 2, "nay": 0, "other": 0},
            {"party": "R", "yea": 0, "nay": 1, "other": 0}
        ])
    );
}

#[tokio::test]
async fn cache_endpoints_clear_entries() {
    let h = harness();

    send(&h.router, Method::GET, "/api/bills/118/2100/votes", Some(API_KEY)).await;
    send(&h.router, Method::GET, "/api/bills/117/870/votes", Some(API_KEY)).await;

    let (status, evicted) = send(&h.router, Method::DELETE, "/api/cache/118/2100", Some(API_KEY)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(evicted["removed"], 1);

    let (_, cleared) = send(&h.router, Method::DELETE, "/api/cache", Some(API_KEY)).await;
    assert_eq!(cleared["removed"], 1);

    let (_, refetched) = send(&h.router, Method::GET, "/api/bills/117/870/votes", Some(API_KEY)).await;
    assert_eq!(refetched["cached"], false);
    assert_eq!(h.mock.vote_calls.load(Ordering::SeqCst), 3);
}
