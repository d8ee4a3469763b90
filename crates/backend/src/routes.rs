use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::{handlers, system};

/// All application routes
pub fn configure_routes() -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // Auth (public)
        .route(
            "/api/system/auth/login",
            post(system::handlers::auth::login),
        )
        // Auth (protected)
        .route(
            "/api/system/auth/logout",
            post(system::handlers::auth::logout)
                .layer(middleware::from_fn(system::auth::middleware::require_auth)),
        )
        .route(
            "/api/system/auth/me",
            get(system::handlers::auth::current_user)
                .layer(middleware::from_fn(system::auth::middleware::require_auth)),
        )
        // Analytics payloads
        .route(
            "/api/payloads/latest",
            get(handlers::payloads::latest)
                .layer(middleware::from_fn(system::auth::middleware::require_auth)),
        )
        .route(
            "/api/payloads",
            post(handlers::payloads::upload)
                .layer(middleware::from_fn(system::auth::middleware::require_admin)),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    // Type-checks the whole route table, auth layers included.
    #[test]
    fn route_table_assembles() {
        let _router = configure_routes();
    }
}
