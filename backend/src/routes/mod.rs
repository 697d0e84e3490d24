//! Route definitions for the Clinic Administration Platform

use axum::{middleware, routing::get, Router};

use crate::{handlers, middleware::auth_middleware, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check (public)
        .route("/health", get(handlers::health_check))
        // Protected routes - medication registry and stock control
        .nest("/medications", medication_routes())
        // Protected routes - stock log across all medications
        .nest("/adjustments", adjustment_routes())
        // Protected routes - stock and expiry alerts
        .nest("/alerts", alert_routes())
        // Protected routes - supplier directory
        .nest("/suppliers", supplier_routes())
}

/// Medication registry and stock control routes (protected)
fn medication_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_medications).post(handlers::create_medication),
        )
        .route(
            "/:medication_id",
            get(handlers::get_medication)
                .put(handlers::update_medication)
                .delete(handlers::deactivate_medication),
        )
        .route(
            "/:medication_id/status",
            get(handlers::get_medication_status),
        )
        .route(
            "/:medication_id/adjustments",
            get(handlers::get_medication_stock_log).post(handlers::apply_adjustment),
        )
        .route(
            "/:medication_id/adjustments/preview",
            get(handlers::preview_adjustment),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Stock log routes (protected)
fn adjustment_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_stock_log))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Alert routes (protected)
fn alert_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::get_stock_alerts))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Supplier directory routes (protected)
fn supplier_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_suppliers).post(handlers::create_supplier),
        )
        .route(
            "/:supplier_id",
            get(handlers::get_supplier)
                .put(handlers::update_supplier)
                .delete(handlers::delete_supplier),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}
