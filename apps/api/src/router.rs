use std::sync::Arc;

use axum::{routing::get, Router};

use booking_cell::router::appointment_routes;
use catalog_cell::router::catalog_routes;
use schedule_cell::router::schedule_routes;
use shared_database::AppContext;

use crate::demo::demo_routes;
use crate::health;

pub fn create_router(ctx: Arc<AppContext>) -> Router {
    let booking_api = Router::new()
        .merge(catalog_routes(Arc::clone(&ctx)))
        .merge(schedule_routes(Arc::clone(&ctx)))
        .merge(appointment_routes(Arc::clone(&ctx)));

    Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::check))
        .route("/info", get(health::info))
        .nest("/api/demo-data", demo_routes(Arc::clone(&ctx)))
        .nest("/api/booking", booking_api)
}
