use axum::{Router, routing::get};
use heizen_config::HealthConfig;

/// Liveness route at the configured path, or nothing when disabled
pub(crate) fn router(config: &HealthConfig) -> Option<Router> {
    config.enabled.then(|| Router::new().route(&config.path, get(liveness)))
}

async fn liveness() -> &'static str {
    "ok"
}
