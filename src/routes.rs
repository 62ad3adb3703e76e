use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::SecurityConfig;
use crate::handlers::{self, protected, public};
use crate::middleware::token_auth_middleware;
use crate::state::AppState;

/// Full application router: public endpoints, token-protected endpoints,
/// then the global layers.
pub fn app(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/health", get(handlers::health))
        .merge(public_routes())
        .merge(protected_routes(state.clone()))
        .layer(DefaultBodyLimit::max(state.config.api.max_request_size_bytes));

    if state.config.security.enable_cors {
        router = router.layer(cors_layer(&state.config.security));
    }

    router.layer(TraceLayer::new_for_http()).with_state(state)
}

fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/api/users", post(public::user_register))
        .route("/api/users/login", post(public::user_login))
}

fn protected_routes(state: AppState) -> Router<AppState> {
    Router::new()
        // Account
        .route(
            "/api/users/current",
            get(protected::user_current).patch(protected::user_update),
        )
        .route("/api/users/logout", axum::routing::delete(protected::user_logout))
        // Contacts
        .route(
            "/api/contacts",
            get(protected::contact_search).post(protected::contact_create),
        )
        .route(
            "/api/contacts/:contact_id",
            get(protected::contact_get)
                .put(protected::contact_update)
                .delete(protected::contact_delete),
        )
        // Addresses
        .route(
            "/api/contacts/:contact_id/addresses",
            get(protected::address_list).post(protected::address_create),
        )
        .route(
            "/api/contacts/:contact_id/addresses/:address_id",
            get(protected::address_get)
                .put(protected::address_update)
                .delete(protected::address_delete),
        )
        // route_layer: unmatched paths stay 404 instead of 401
        .route_layer(middleware::from_fn_with_state(state, token_auth_middleware))
}

/// Explicit origins when configured, otherwise permissive
fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    if security.cors_origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}
