// Application state and router
use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::{
    app_config::AppConfig,
    handlers::{check_link, health},
    middleware::dynamic_cors_middleware,
    services::{link_checker::LinkChecker, scan_provider::ScanProvider},
    utils::urlscan_client::UrlscanClient,
};

// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub link_checker: Arc<LinkChecker>,
}

impl AppState {
    pub fn new(config: AppConfig, provider: Arc<dyn ScanProvider>) -> Self {
        let link_checker = LinkChecker::from_config(&config, provider);
        Self {
            config: Arc::new(config),
            link_checker: Arc::new(link_checker),
        }
    }

    /// State backed by the real urlscan.io client
    pub fn with_urlscan(config: AppConfig) -> Self {
        let provider = Arc::new(UrlscanClient::new(&config.scanner));
        Self::new(config, provider)
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/check-link", post(check_link::check_link))
        .route("/health", get(health::health_check))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            dynamic_cors_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
