//! Route registration

use super::dto::SocketStatusDto;
use super::handlers;
use super::openapi::{ApiDoc, OPENAPI_PATH};
use crate::domain::Service;
use axum::{
    routing::{delete, get, post},
    Extension, Json, Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

const SOCKET_ALIAS: &str = "/api/socketio";

/// Knobs for route registration
#[derive(Debug, Clone)]
pub struct RouteOptions {
    /// Mount `/api/test/*` and `/api/test-db`
    pub enable_test_routes: bool,
    /// Canonical path of the socket liveness endpoint
    pub socket_path: String,
}

impl Default for RouteOptions {
    fn default() -> Self {
        Self {
            enable_test_routes: false,
            socket_path: "/api/socket".to_string(),
        }
    }
}

/// Register all REST routes
pub fn register_routes(router: Router, service: Arc<Service>, options: &RouteOptions) -> Router {
    let mut router = router
        // Guests
        .route("/api/guests", get(handlers::list_guests).post(handlers::create_guest))
        // History
        .route("/api/consulted-storefronts", get(handlers::list_consulted_storefronts))
        .route(
            "/api/consulted-storefronts/{id}",
            delete(handlers::delete_consulted_storefront),
        )
        .route("/api/search-history", get(handlers::list_search_history))
        .route("/api/search-history/{id}", delete(handlers::delete_search_history))
        // Partner media
        .route(
            "/api/partner-storefront/{storefront_id}/media/{media_id}",
            delete(handlers::delete_storefront_media),
        )
        .route(
            "/api/partner-storefront/media/{media_id}",
            delete(handlers::delete_media),
        )
        // Public profiles
        .route("/api/storefront/{id}", get(handlers::get_storefront))
        .route("/api/establishments/{id}", get(handlers::get_establishment))
        // Billing
        .route("/api/stripe/create-customer", post(handlers::create_customer))
        .route("/api/subscription/plans", get(handlers::list_subscription_plans))
        // Photos
        .route(
            "/api/user/photos/albums",
            get(handlers::list_albums).post(handlers::create_album),
        )
        .route("/api/user/photos/{id}", delete(handlers::delete_photo))
        .route(OPENAPI_PATH, get(|| async { Json(ApiDoc::openapi()) }));

    router = register_socket_status(router, &options.socket_path);

    if options.enable_test_routes {
        tracing::warn!("Test utility routes enabled");
        router = router
            .route("/api/test/create-partner", post(handlers::create_test_partner))
            .route("/api/test/reset-db", post(handlers::reset_database))
            .route("/api/test-db", get(handlers::database_status));
    }

    router.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(Extension(service)),
    )
}

/// Liveness stub for the socket endpoint. Message fan-out happens on the
/// external socket server.
fn register_socket_status(router: Router, socket_path: &str) -> Router {
    let status = SocketStatusDto {
        status: "ok".to_string(),
        path: socket_path.to_string(),
    };
    let handler = move || {
        let status = status.clone();
        async move { Json(status) }
    };

    let router = router.route(socket_path, get(handler.clone()));
    if socket_path == SOCKET_ALIAS {
        router
    } else {
        router.route(SOCKET_ALIAS, get(handler))
    }
}
