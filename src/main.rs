use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{extract::DefaultBodyLimit, routing::get, Router};
use jobhunt_backend::{
    config::{get_config, init_config},
    middleware::{cors::cors_layer, rate_limit},
    routes,
    store::{MemoryStore, RecordStore, RemoteStore},
    AppState,
};
use tokio::net::TcpListener;
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    init_config()?;
    let config = get_config();

    let store: Arc<dyn RecordStore> = match &config.records_base_url {
        Some(base_url) => {
            info!("Using hosted record store at {}", base_url);
            Arc::new(RemoteStore::new(
                base_url.clone(),
                config.records_api_key.clone(),
            ))
        }
        None => {
            info!("RECORDS_BASE_URL not set, running against the in-memory fallback store");
            Arc::new(MemoryStore::with_seed(Duration::from_millis(
                config.memory_store_latency_ms,
            )))
        }
    };
    let app_state = AppState::new(store);

    let base_routes = Router::new().route("/health", get(routes::health::health));

    let api = Router::new()
        .merge(routes::jobs::routes())
        .merge(routes::applications::routes())
        .merge(routes::alerts::routes())
        .merge(routes::resumes::routes())
        .merge(routes::questions::routes())
        .layer(axum::middleware::from_fn_with_state(
            rate_limit::RpsLimit::new(config.api_rps),
            rate_limit::limit_rps,
        ));

    info!("Serving uploads from: {}", config.uploads_dir);

    let app = base_routes
        .merge(api)
        .nest_service("/uploads", ServeDir::new(&config.uploads_dir))
        .with_state(app_state)
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(config.max_resume_bytes + 64 * 1024));

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
