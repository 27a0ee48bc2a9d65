// libs/schedule-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use shared_models::AppError;

use crate::models::{CreateScheduleRequest, Schedule, UpdateScheduleRequest};
use crate::services::ScheduleAdmission;

pub async fn list_schedules(
    State(admission): State<Arc<ScheduleAdmission>>,
) -> Result<Json<Vec<Schedule>>, AppError> {
    Ok(Json(admission.list().await?))
}

pub async fn get_schedule(
    State(admission): State<Arc<ScheduleAdmission>>,
    Path(id): Path<i64>,
) -> Result<Json<Schedule>, AppError> {
    Ok(Json(admission.get(id).await?))
}

pub async fn schedules_by_staff(
    State(admission): State<Arc<ScheduleAdmission>>,
    Path(staff_id): Path<i64>,
) -> Result<Json<Vec<Schedule>>, AppError> {
    Ok(Json(admission.list_for_staff(staff_id).await?))
}

pub async fn create_schedule(
    State(admission): State<Arc<ScheduleAdmission>>,
    Json(request): Json<CreateScheduleRequest>,
) -> Result<(StatusCode, Json<Schedule>), AppError> {
    let schedule = admission.create(&request).await?;
    Ok((StatusCode::CREATED, Json(schedule)))
}

pub async fn update_schedule(
    State(admission): State<Arc<ScheduleAdmission>>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateScheduleRequest>,
) -> Result<Json<Schedule>, AppError> {
    Ok(Json(admission.update(id, &request).await?))
}

pub async fn delete_schedule(
    State(admission): State<Arc<ScheduleAdmission>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    admission.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
