// libs/booking-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;

use shared_models::AppError;

use crate::models::{
    Appointment, AppointmentDetail, AppointmentListParams, BookAppointmentRequest,
};
use crate::services::BookingEngine;

pub async fn book_appointment(
    State(engine): State<Arc<BookingEngine>>,
    Json(request): Json<BookAppointmentRequest>,
) -> Result<(StatusCode, Json<Appointment>), AppError> {
    let appointment = engine.book_appointment(request).await?;
    Ok((StatusCode::CREATED, Json(appointment)))
}

pub async fn get_appointment(
    State(engine): State<Arc<BookingEngine>>,
    Path(id): Path<i64>,
) -> Result<Json<Appointment>, AppError> {
    Ok(Json(engine.get_appointment(id).await?))
}

/// `GET /appointments` with optional `staff_id`, `email`, `upcoming`, and
/// `limit` filters, mirroring the filtered store reads.
pub async fn list_appointments(
    State(engine): State<Arc<BookingEngine>>,
    Query(params): Query<AppointmentListParams>,
) -> Result<Json<Vec<Appointment>>, AppError> {
    let appointments = if params.upcoming {
        engine.upcoming_appointments(Utc::now(), params.limit).await?
    } else if let Some(staff_id) = params.staff_id {
        engine.appointments_by_staff(staff_id).await?
    } else if let Some(email) = params.email.as_deref() {
        engine.appointments_by_customer(email).await?
    } else {
        engine.list_appointments().await?
    };
    Ok(Json(appointments))
}

pub async fn list_appointments_detailed(
    State(engine): State<Arc<BookingEngine>>,
    Query(params): Query<AppointmentListParams>,
) -> Result<Json<Vec<AppointmentDetail>>, AppError> {
    let details = engine
        .appointments_detailed(params.staff_id, params.email.as_deref())
        .await?;
    Ok(Json(details))
}

pub async fn cancel_appointment(
    State(engine): State<Arc<BookingEngine>>,
    Path(id): Path<i64>,
) -> Result<Json<Appointment>, AppError> {
    Ok(Json(engine.cancel_appointment(id).await?))
}

pub async fn complete_appointment(
    State(engine): State<Arc<BookingEngine>>,
    Path(id): Path<i64>,
) -> Result<Json<Appointment>, AppError> {
    Ok(Json(engine.complete_appointment(id).await?))
}
