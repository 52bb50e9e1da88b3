use std::{net::SocketAddr, sync::Arc, time::Duration};

use anyhow::{bail, Context};
use axum::{routing::get, Router};
use http::HeaderValue;
use tokio::signal;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

use prodtrack_api as api;
use prodtrack_api::store::{BackupPolicy, JsonStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = api::config::load_config()?;
    api::config::init_tracing(&cfg.log_level, cfg.log_json);

    let backup = if cfg.backup_enabled {
        let mut policy = BackupPolicy::new(&cfg.backup_dir);
        if let Some(key) = cfg.backup_key_bytes()? {
            info!("backup integrity tags enabled");
            policy = policy.with_hmac_key(key);
        }
        Some(policy)
    } else {
        None
    };

    let store = Arc::new(JsonStore::open(&cfg.data_file, backup).await?);
    let app_state = api::AppState::new(cfg.clone(), store);

    // CORS: explicit origins from config, permissive in development
    let configured_origins: Option<Vec<HeaderValue>> = cfg
        .cors_allowed_origins
        .as_ref()
        .map(|raw| {
            raw.split(',')
                .filter_map(|origin| {
                    let trimmed = origin.trim();
                    if trimmed.is_empty() {
                        None
                    } else {
                        HeaderValue::from_str(trimmed).ok()
                    }
                })
                .collect::<Vec<_>>()
        })
        .filter(|origins| !origins.is_empty());

    let cors_layer = if let Some(origins) = configured_origins {
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    } else if cfg.is_development() {
        info!("using permissive CORS (development environment)");
        CorsLayer::permissive()
    } else {
        bail!("Missing CORS configuration: set APP__CORS_ALLOWED_ORIGINS");
    };

    let app = Router::<api::AppState>::new()
        .route("/", get(|| async { "prodtrack-api up" }))
        .merge(api::handlers::health::router())
        .nest("/api/v1", api::api_router())
        .merge(api::openapi::swagger_ui())
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            cfg.request_timeout_secs,
        )))
        .layer(CompressionLayer::new())
        .layer(cors_layer)
        .with_state(app_state);

    let addr: SocketAddr = format!("{}:{}", cfg.host, cfg.port)
        .parse()
        .context("invalid host/port configuration")?;
    info!("prodtrack-api listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        let mut sigterm =
            signal(SignalKind::terminate()).expect("failed to install signal handler");
        sigterm.recv().await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
