//! Route definitions for the inventory management platform
//!
//! Every protected router applies `auth_middleware` first and then the
//! `require_role` access gate for the role it serves.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use shared::models::AccessRole;

use crate::{
    handlers,
    middleware::{auth_middleware, require_role},
    AppState,
};

/// Create API routes
pub fn api_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        // Health check (public)
        .route("/health", get(handlers::health_check))
        // Auth routes (public)
        .nest("/auth", auth_routes())
        // Admin routes
        .nest("/dashboard", gated(dashboard_routes(), AccessRole::Admin, state))
        .nest("/suppliers", gated(supplier_directory_routes(), AccessRole::Admin, state))
        .nest("/products", gated(product_routes(), AccessRole::Admin, state))
        .nest("/inventory", gated(inventory_routes(), AccessRole::Admin, state))
        // Supplier routes
        .nest("/supplier", gated(supplier_routes(), AccessRole::Supplier, state))
}

/// Apply authentication and the role gate to a router
fn gated(router: Router<AppState>, required: AccessRole, state: &AppState) -> Router<AppState> {
    router
        .route_layer(middleware::from_fn_with_state(required, require_role))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
}

/// Authentication routes (public)
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(handlers::login))
        .route("/register", post(handlers::register))
}

/// Admin dashboard routes
fn dashboard_routes() -> Router<AppState> {
    Router::new().route("/", get(handlers::get_dashboard))
}

/// Supplier directory routes (admin)
fn supplier_directory_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_suppliers))
        .route(
            "/:supplier_id",
            get(handlers::get_supplier).delete(handlers::delete_supplier),
        )
}

/// Product browsing and intake routes (admin)
fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_products))
        .route("/:product_id", get(handlers::get_product))
        .route("/:product_id/intake", post(handlers::intake_stock))
}

/// Inventory report routes (admin)
fn inventory_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_inventory))
        .route("/:inventory_id", get(handlers::get_inventory))
}

/// Supplier self-service routes
fn supplier_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/profile",
            get(handlers::get_profile).put(handlers::update_profile),
        )
        .route(
            "/products",
            get(handlers::list_own_products).post(handlers::create_product),
        )
        .route(
            "/products/:product_id",
            get(handlers::get_own_product)
                .put(handlers::update_product)
                .delete(handlers::delete_product),
        )
}
