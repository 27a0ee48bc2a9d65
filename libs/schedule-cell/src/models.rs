// libs/schedule-cell/src/models.rs
use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use shared_models::AppError;

/// Recurring weekly availability window, keyed by (staff, day-of-week).
/// Times are civil time-of-day; the business reference offset is applied only
/// when comparing against appointment instants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schedule {
    pub id: i64,
    pub staff_id: i64,
    /// 0 = Sunday .. 6 = Saturday.
    pub day_of_week: i32,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// `HH:MM` wire format for schedule times.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&time.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        // Stored rows may carry seconds (TIME columns round-trip as HH:MM:SS).
        NaiveTime::parse_from_str(&raw, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(&raw, "%H:%M:%S"))
            .map_err(serde::de::Error::custom)
    }
}

// ==============================================================================
// REQUEST MODELS
// ==============================================================================

/// Times arrive as raw strings so the strict `HH:MM` validator can see them
/// before any parsing happens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateScheduleRequest {
    pub staff_id: i64,
    pub day_of_week: i32,
    pub start_time: String,
    pub end_time: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateScheduleRequest {
    pub day_of_week: i32,
    pub start_time: String,
    pub end_time: String,
}

// ==============================================================================
// ERRORS
// ==============================================================================

#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("{0}")]
    Validation(String),

    #[error("staff not found")]
    StaffNotFound,

    #[error("schedule not found")]
    ScheduleNotFound,

    #[error("schedule overlaps with an existing schedule for this staff member on the same day")]
    Overlap,

    #[error("storage error: {0}")]
    Storage(String),
}

impl From<ScheduleError> for AppError {
    fn from(err: ScheduleError) -> Self {
        match err {
            ScheduleError::Validation(msg) => AppError::BadRequest(msg),
            ScheduleError::StaffNotFound => AppError::NotFound("staff not found".to_string()),
            ScheduleError::ScheduleNotFound => AppError::NotFound("schedule not found".to_string()),
            ScheduleError::Overlap => AppError::Conflict(
                "schedule overlaps with an existing schedule for this staff member on the same day"
                    .to_string(),
            ),
            ScheduleError::Storage(detail) => {
                tracing::error!("schedule storage failure: {}", detail);
                AppError::Internal("storage operation failed".to_string())
            }
        }
    }
}
