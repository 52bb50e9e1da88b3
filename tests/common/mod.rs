use std::sync::Arc;

use axum::{
    body::Body,
    http::{Method, Request},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use prodtrack_api::models::ProductionLogEntry;
use prodtrack_api::{config::AppConfig, handlers, store::JsonStore, AppState};

/// Test harness serving the full router over a temp-file backed store.
pub struct TestApp {
    router: Router,
    pub store: Arc<JsonStore>,
    _data_dir: TempDir,
}

impl TestApp {
    /// Fresh application with an empty data file.
    pub async fn new() -> Self {
        let data_dir = tempfile::tempdir().expect("failed to create temp dir");
        let data_file = data_dir.path().join("db.json");

        let store = Arc::new(
            JsonStore::open(&data_file, None)
                .await
                .expect("failed to open test store"),
        );
        let state = AppState::new(AppConfig::default(), store.clone());

        let router = Router::new()
            .merge(handlers::health::router())
            .nest("/api/v1", prodtrack_api::api_router())
            .with_state(state);

        Self {
            router,
            store,
            _data_dir: data_dir,
        }
    }

    /// Send a JSON request against the router.
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> axum::response::Response {
        let mut builder = Request::builder().method(method).uri(uri);

        let body = if let Some(json) = body {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&json).expect("failed to serialize json request body"))
        } else {
            Body::empty()
        };

        let request = builder.body(body).expect("failed to build request");
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router error during test request")
    }

    /// Insert a production log row directly, bypassing the API.
    ///
    /// Used to plant legacy-schema rows that the POST endpoint no longer
    /// accepts.
    #[allow(dead_code)]
    pub async fn seed_log(&self, entry: ProductionLogEntry) {
        self.store
            .mutate(|db| db.production_logs.push(entry))
            .await
            .expect("failed to seed production log");
    }
}

/// Collect a response body as JSON.
pub async fn response_json(response: axum::response::Response) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("failed to read response body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("response body was not valid json")
}
