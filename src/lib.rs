pub mod auth;
pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod feedback;
pub mod handlers;
pub mod middleware;
pub mod services;
pub mod state;

use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

use crate::middleware::{jwt_auth_middleware, optional_jwt_auth_middleware};
use crate::state::AppState;

/// Build the full HTTP application for the given state
pub fn app(state: AppState) -> Router {
    let api = &state.config.api;
    let security = &state.config.security;

    let router = Router::new()
        // Public
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        // Public auth routes
        .merge(auth_public_routes())
        // Optional auth
        .merge(feedback_routes(state.clone()))
        // Protected
        .merge(auth_routes(state.clone()))
        .merge(entry_routes(state.clone()))
        // Global middleware
        .layer(DefaultBodyLimit::max(api.max_request_size_bytes));

    let router = if security.enable_cors {
        router.layer(cors_layer(state.config.is_development(), &security.cors_origins))
    } else {
        router
    };

    let router = if api.enable_request_logging {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    };

    router.with_state(state)
}

fn auth_public_routes() -> Router<AppState> {
    use handlers::public::auth;

    Router::new()
        .route("/auth/signup", post(auth::signup_post))
        .route("/auth/signin", post(auth::signin_post))
        .route("/auth/refresh", post(auth::refresh_post))
}

fn feedback_routes(state: AppState) -> Router<AppState> {
    use handlers::public;

    Router::new()
        .route("/feedback", post(public::feedback_post))
        .route_layer(from_fn_with_state(state, optional_jwt_auth_middleware))
}

fn auth_routes(state: AppState) -> Router<AppState> {
    use handlers::protected::auth;

    Router::new()
        .route("/auth/whoami", get(auth::whoami_get))
        .route_layer(from_fn_with_state(state, jwt_auth_middleware))
}

fn entry_routes(state: AppState) -> Router<AppState> {
    use handlers::protected::entries;

    Router::new()
        // Collection operations
        .route(
            "/entries",
            get(entries::entries_list).post(entries::entry_create),
        )
        // Record-level operations
        .route(
            "/entries/:id",
            get(entries::entry_get)
                .put(entries::entry_put)
                .patch(entries::entry_patch)
                .delete(entries::entry_delete),
        )
        .route_layer(from_fn_with_state(state, jwt_auth_middleware))
}

fn cors_layer(development: bool, origins: &[String]) -> CorsLayer {
    if development && origins.is_empty() {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods(Any)
        .allow_headers(Any)
}
