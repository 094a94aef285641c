//! Application state and router assembly.

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use shared::jwt::JwtKeys;

use crate::config::Config;
use crate::middleware::{metrics_handler, metrics_middleware};
use crate::routes::{auth, finance, health, members, plans, seats};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub jwt: JwtKeys,
    pub metrics: PrometheusHandle,
}

pub fn create_app(config: Config, pool: PgPool, metrics: PrometheusHandle) -> Router {
    let request_timeout = Duration::from_secs(config.server.request_timeout_secs);
    let jwt = JwtKeys::new(&config.jwt.secret, config.jwt.token_expiry_secs);

    // Build CORS layer based on configuration
    let cors = if config.security.cors_origins.is_empty() {
        // Default: allow any origin (for development)
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        use tower_http::cors::AllowOrigin;
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    let state = AppState {
        pool,
        config: Arc::new(config),
        jwt,
        metrics,
    };

    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/live", get(health::liveness))
        .route("/metrics", get(metrics_handler))
        .route("/api/v1/auth/register", post(auth::register))
        .route("/api/v1/auth/login", post(auth::login))
        .route(
            "/api/v1/members",
            get(members::list_members).post(members::create_member),
        )
        .route("/api/v1/members/overview", get(members::roster_overview))
        .route("/api/v1/members/:id", get(members::get_member))
        .route(
            "/api/v1/plans",
            get(plans::list_plans).post(plans::create_plan),
        )
        .route("/api/v1/plans/:id", get(plans::get_plan))
        .route(
            "/api/v1/seats",
            get(seats::list_seats).post(seats::add_seats),
        )
        .route("/api/v1/seats/:id/allot", post(seats::allot_seat))
        .route(
            "/api/v1/finance/entries",
            get(finance::list_entries).post(finance::create_entry),
        )
        .route(
            "/api/v1/finance/entries/:id",
            put(finance::update_entry).delete(finance::delete_entry),
        )
        .route("/api/v1/finance/dashboard", get(finance::dashboard))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(request_timeout))
        .layer(CompressionLayer::new())
        .layer(cors)
        .with_state(state)
}
