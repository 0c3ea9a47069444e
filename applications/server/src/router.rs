/// HTTP routing
use crate::{api, middleware, state::AppState};
use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

/// Build the full application router, everything mounted under `/api`
pub fn create_router(app_state: AppState) -> Router {
    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(api::health::health))
        .route("/auth/register", post(api::auth::register))
        .route("/auth/login", post(api::auth::login));

    // Protected routes (auth required)
    let protected_routes = Router::new()
        // Records
        .route(
            "/records",
            get(api::records::list_records).post(api::records::create_record),
        )
        .route("/records/search", get(api::records::search_records))
        .route(
            "/records/:id",
            get(api::records::get_record)
                .put(api::records::update_record)
                .delete(api::records::delete_record),
        )
        // Reference data
        .route("/genres", get(api::reference::list_genres))
        .route("/conditions", get(api::reference::list_conditions))
        .layer(axum_middleware::from_fn_with_state(
            Arc::clone(&app_state.auth_service),
            middleware::auth_middleware,
        ));

    Router::new()
        .nest("/api", public_routes.merge(protected_routes))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(true)),
        )
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
