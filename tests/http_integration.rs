//! Testes de integração da API HTTP.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use tokio::net::TcpListener;
use wordscope::aggregation::Orchestrator;
use wordscope::cache::WordCache;
use wordscope::server::router;
use wordscope::sources::LexicalSource;
use wordscope::types::{Category, CategoryResult, Definition, NormalizedWord};
use wordscope::{QueryService, WordscopeResult};

struct DefinitionSource {
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl LexicalSource for DefinitionSource {
    fn name(&self) -> &str {
        "definitions"
    }

    fn category(&self) -> Category {
        Category::Definitions
    }

    async fn try_fetch(&self, word: &NormalizedWord) -> WordscopeResult<CategoryResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(CategoryResult::Definitions(vec![Definition::new(format!(
            "the meaning of {}",
            word
        ))]))
    }
}

struct PanickingSource;

#[async_trait]
impl LexicalSource for PanickingSource {
    fn name(&self) -> &str {
        "panicking"
    }

    fn category(&self) -> Category {
        Category::Rhymes
    }

    async fn try_fetch(&self, _word: &NormalizedWord) -> WordscopeResult<CategoryResult> {
        panic!("provider client in a bad state");
    }
}

async fn spawn_api(sources: Vec<Arc<dyn LexicalSource>>) -> String {
    let service = QueryService::new(
        Orchestrator::new(sources),
        WordCache::new(100, Duration::from_secs(3600)),
    );
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router(Arc::new(service))).await.unwrap();
    });
    format!("http://{}", addr)
}

async fn spawn_counting_api() -> (String, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let source = DefinitionSource {
        calls: Arc::clone(&calls),
    };
    let base = spawn_api(vec![Arc::new(source) as Arc<dyn LexicalSource>]).await;
    (base, calls)
}

#[tokio::test]
async fn test_health() {
    let (base, _calls) = spawn_counting_api().await;

    let response = reqwest::get(format!("{}/api/health", base)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, serde_json::json!({"ok": true}));
}

#[tokio::test]
async fn test_healthz_alias() {
    let (base, _calls) = spawn_counting_api().await;

    let response = reqwest::get(format!("{}/api/healthz", base)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, serde_json::json!({"ok": true}));
}

#[tokio::test]
async fn test_word_returns_full_record() {
    let (base, _calls) = spawn_counting_api().await;

    let response = reqwest::get(format!("{}/api/word/Light", base)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["word"], "light");
    assert_eq!(body["definition"][0]["text"], "the meaning of light");
    assert_eq!(body["synonyms"], serde_json::json!([]));
    assert_eq!(body["translations"], serde_json::json!([]));
    assert_eq!(body["popculture"], serde_json::json!([]));
    assert!(body.get("titles").is_none());
}

#[tokio::test]
async fn test_repeated_requests_hit_cache() {
    let (base, calls) = spawn_counting_api().await;
    let client = reqwest::Client::new();

    for path in ["light", "LIGHT", "%20light%20"] {
        let response = client
            .get(format!("{}/api/word/{}", base, path))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_blank_word_is_bad_request() {
    let (base, calls) = spawn_counting_api().await;

    let response = reqwest::get(format!("{}/api/word/%20%20", base)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Word required");
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_aggregation_failure_is_server_error() {
    let base = spawn_api(vec![Arc::new(PanickingSource) as Arc<dyn LexicalSource>]).await;

    let response = reqwest::get(format!("{}/api/word/light", base)).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Failed to fetch word data");
}

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let (base, _calls) = spawn_counting_api().await;

    let response = reqwest::Client::new()
        .get(format!("{}/api/health", base))
        .header("Origin", "http://localhost:5173")
        .send()
        .await
        .unwrap();

    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}
