// libs/booking-cell/src/models.rs
use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use shared_models::AppError;

// ==============================================================================
// CORE APPOINTMENT MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: i64,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
    pub staff_id: i64,
    pub service_id: i64,
    pub appointment_datetime: DateTime<Utc>,
    /// Copied from the service at booking time; later service edits never
    /// rewrite an existing appointment.
    pub duration_minutes: i32,
    pub status: AppointmentStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Appointment {
    /// End of the half-open interval `[start, start + duration)`.
    pub fn end_datetime(&self) -> DateTime<Utc> {
        self.appointment_datetime + Duration::minutes(self.duration_minutes as i64)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Confirmed,
    Cancelled,
    Completed,
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::Confirmed => write!(f, "confirmed"),
            AppointmentStatus::Cancelled => write!(f, "cancelled"),
            AppointmentStatus::Completed => write!(f, "completed"),
        }
    }
}

/// Appointment joined with the service price for revenue listings
/// (PostgREST embed of `services.price_cents`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentDetail {
    #[serde(flatten)]
    pub appointment: Appointment,
    pub service: ServicePriceRef,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServicePriceRef {
    pub price_cents: i64,
}

// ==============================================================================
// REQUEST MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookAppointmentRequest {
    pub customer_name: String,
    pub customer_email: String,
    #[serde(default)]
    pub customer_phone: Option<String>,
    pub staff_id: i64,
    pub service_id: i64,
    pub appointment_datetime: DateTime<Utc>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppointmentListParams {
    pub staff_id: Option<i64>,
    pub email: Option<String>,
    #[serde(default)]
    pub upcoming: bool,
    pub limit: Option<i64>,
}

// ==============================================================================
// ERRORS
// ==============================================================================

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("{0}")]
    Validation(String),

    #[error("staff not found")]
    StaffNotFound,

    #[error("service not found")]
    ServiceNotFound,

    #[error("appointment not found")]
    AppointmentNotFound,

    #[error("staff member does not offer this service")]
    IneligibleService,

    #[error("appointment time is outside staff member's working hours")]
    OutsideWorkingHours,

    #[error("appointment time conflicts with an existing appointment")]
    SchedulingConflict,

    #[error("appointment is already cancelled")]
    AlreadyCancelled,

    #[error("appointment is already completed")]
    AlreadyCompleted,

    #[error("cannot complete a cancelled appointment")]
    CannotCompleteCancelled,

    #[error("storage error: {0}")]
    Storage(String),
}

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::Validation(msg) => AppError::BadRequest(msg),
            BookingError::StaffNotFound => AppError::NotFound("staff not found".to_string()),
            BookingError::ServiceNotFound => AppError::NotFound("service not found".to_string()),
            BookingError::AppointmentNotFound => {
                AppError::NotFound("appointment not found".to_string())
            }
            BookingError::IneligibleService
            | BookingError::OutsideWorkingHours
            | BookingError::SchedulingConflict
            | BookingError::AlreadyCancelled
            | BookingError::AlreadyCompleted
            | BookingError::CannotCompleteCancelled => AppError::Conflict(err.to_string()),
            BookingError::Storage(detail) => {
                tracing::error!("booking storage failure: {}", detail);
                AppError::Internal("storage operation failed".to_string())
            }
        }
    }
}
