// libs/schedule-cell/src/router.rs
use std::sync::Arc;

use axum::{routing::get, Router};

use shared_database::AppContext;

use crate::handlers;
use crate::services::ScheduleAdmission;

pub fn schedule_routes(ctx: Arc<AppContext>) -> Router {
    let admission = Arc::new(ScheduleAdmission::new(Arc::clone(&ctx.store)));

    Router::new()
        .route(
            "/schedules",
            get(handlers::list_schedules).post(handlers::create_schedule),
        )
        .route(
            "/schedules/{id}",
            get(handlers::get_schedule)
                .put(handlers::update_schedule)
                .delete(handlers::delete_schedule),
        )
        .route("/schedules/staff/{staff_id}", get(handlers::schedules_by_staff))
        .with_state(admission)
}
