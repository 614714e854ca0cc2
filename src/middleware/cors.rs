use tower_http::cors::{Any, CorsLayer};

/// Everything this API serves is public listing data, so CORS stays wide
/// open for browser clients on any origin.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}
