// libs/booking-cell/src/router.rs
use std::sync::Arc;

use axum::{
    routing::{get, put},
    Router,
};

use shared_database::AppContext;

use crate::handlers;
use crate::services::BookingEngine;

pub fn appointment_routes(ctx: Arc<AppContext>) -> Router {
    let engine = Arc::new(BookingEngine::new(&ctx));

    Router::new()
        .route(
            "/appointments",
            get(handlers::list_appointments).post(handlers::book_appointment),
        )
        .route(
            "/appointments/detailed",
            get(handlers::list_appointments_detailed),
        )
        .route("/appointments/{id}", get(handlers::get_appointment))
        .route("/appointments/{id}/cancel", put(handlers::cancel_appointment))
        .route(
            "/appointments/{id}/complete",
            put(handlers::complete_appointment),
        )
        .with_state(engine)
}
