// libs/catalog-cell/src/router.rs
use std::sync::Arc;

use axum::{
    routing::{delete, get},
    Router,
};

use shared_database::AppContext;

use crate::handlers;
use crate::services::CatalogState;

pub fn catalog_routes(ctx: Arc<AppContext>) -> Router {
    let state = Arc::new(CatalogState::new(&ctx));

    Router::new()
        .route(
            "/services",
            get(handlers::list_services).post(handlers::create_service),
        )
        .route(
            "/services/{id}",
            get(handlers::get_service)
                .put(handlers::update_service)
                .delete(handlers::delete_service),
        )
        .route(
            "/staff",
            get(handlers::list_staff).post(handlers::create_staff),
        )
        .route(
            "/staff/{id}",
            get(handlers::get_staff)
                .put(handlers::update_staff)
                .delete(handlers::delete_staff),
        )
        .route(
            "/staff/by-service/{service_id}",
            get(handlers::staff_by_service),
        )
        .route(
            "/staff/{id}/services",
            get(handlers::services_for_staff).post(handlers::assign_service),
        )
        .route(
            "/staff/{id}/services/{service_id}",
            delete(handlers::unassign_service),
        )
        .with_state(state)
}
