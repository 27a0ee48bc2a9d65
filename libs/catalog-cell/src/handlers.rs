// libs/catalog-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use shared_models::AppError;

use crate::models::{AssignServiceRequest, Assignment, Service, ServicePayload, Staff, StaffPayload};
use crate::services::CatalogState;

// ==============================================================================
// SERVICE HANDLERS
// ==============================================================================

pub async fn list_services(
    State(state): State<Arc<CatalogState>>,
) -> Result<Json<Vec<Service>>, AppError> {
    Ok(Json(state.services.list().await?))
}

pub async fn get_service(
    State(state): State<Arc<CatalogState>>,
    Path(id): Path<i64>,
) -> Result<Json<Service>, AppError> {
    Ok(Json(state.services.get(id).await?))
}

pub async fn create_service(
    State(state): State<Arc<CatalogState>>,
    Json(payload): Json<ServicePayload>,
) -> Result<(StatusCode, Json<Service>), AppError> {
    let service = state.services.create(&payload).await?;
    Ok((StatusCode::CREATED, Json(service)))
}

pub async fn update_service(
    State(state): State<Arc<CatalogState>>,
    Path(id): Path<i64>,
    Json(payload): Json<ServicePayload>,
) -> Result<Json<Service>, AppError> {
    Ok(Json(state.services.update(id, &payload).await?))
}

pub async fn delete_service(
    State(state): State<Arc<CatalogState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.services.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ==============================================================================
// STAFF HANDLERS
// ==============================================================================

pub async fn list_staff(
    State(state): State<Arc<CatalogState>>,
) -> Result<Json<Vec<Staff>>, AppError> {
    Ok(Json(state.staff.list().await?))
}

pub async fn get_staff(
    State(state): State<Arc<CatalogState>>,
    Path(id): Path<i64>,
) -> Result<Json<Staff>, AppError> {
    Ok(Json(state.staff.get(id).await?))
}

pub async fn create_staff(
    State(state): State<Arc<CatalogState>>,
    Json(payload): Json<StaffPayload>,
) -> Result<(StatusCode, Json<Staff>), AppError> {
    let staff = state.staff.create(&payload).await?;
    Ok((StatusCode::CREATED, Json(staff)))
}

pub async fn update_staff(
    State(state): State<Arc<CatalogState>>,
    Path(id): Path<i64>,
    Json(payload): Json<StaffPayload>,
) -> Result<Json<Staff>, AppError> {
    Ok(Json(state.staff.update(id, &payload).await?))
}

pub async fn delete_staff(
    State(state): State<Arc<CatalogState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.staff.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn staff_by_service(
    State(state): State<Arc<CatalogState>>,
    Path(service_id): Path<i64>,
) -> Result<Json<Vec<Staff>>, AppError> {
    Ok(Json(state.eligibility.staff_for_service(service_id).await?))
}

// ==============================================================================
// ELIGIBILITY HANDLERS
// ==============================================================================

pub async fn services_for_staff(
    State(state): State<Arc<CatalogState>>,
    Path(staff_id): Path<i64>,
) -> Result<Json<Vec<Service>>, AppError> {
    Ok(Json(state.eligibility.services_for_staff(staff_id).await?))
}

pub async fn assign_service(
    State(state): State<Arc<CatalogState>>,
    Path(staff_id): Path<i64>,
    Json(request): Json<AssignServiceRequest>,
) -> Result<(StatusCode, Json<Assignment>), AppError> {
    let assignment = state
        .eligibility
        .assign(staff_id, request.service_id)
        .await?;
    Ok((StatusCode::CREATED, Json(assignment)))
}

pub async fn unassign_service(
    State(state): State<Arc<CatalogState>>,
    Path((staff_id, service_id)): Path<(i64, i64)>,
) -> Result<StatusCode, AppError> {
    state.eligibility.unassign(staff_id, service_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
