// libs/catalog-cell/src/models.rs
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use shared_models::AppError;

// ==============================================================================
// CATALOG MODELS
// ==============================================================================

/// A bookable service. Duration is copied onto appointments at booking time,
/// so edits here never rewrite history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub duration_minutes: i32,
    pub price_cents: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StaffRole {
    Provider,
    Admin,
}

impl fmt::Display for StaffRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StaffRole::Provider => write!(f, "provider"),
            StaffRole::Admin => write!(f, "admin"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Staff {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: StaffRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Staff <-> service eligibility junction row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assignment {
    pub staff_id: i64,
    pub service_id: i64,
}

// ==============================================================================
// REQUEST MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServicePayload {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub duration_minutes: i32,
    pub price_cents: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffPayload {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub role: StaffRole,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssignServiceRequest {
    pub service_id: i64,
}

// ==============================================================================
// ERRORS
// ==============================================================================

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("{0}")]
    Validation(String),

    #[error("service not found")]
    ServiceNotFound,

    #[error("staff not found")]
    StaffNotFound,

    #[error("staff with this email already exists")]
    DuplicateEmail,

    #[error("service is already assigned to this staff member")]
    AlreadyAssigned,

    #[error("{0}")]
    InUse(String),

    #[error("storage error: {0}")]
    Storage(String),
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Validation(msg) => AppError::BadRequest(msg),
            CatalogError::ServiceNotFound => AppError::NotFound("service not found".to_string()),
            CatalogError::StaffNotFound => AppError::NotFound("staff not found".to_string()),
            CatalogError::DuplicateEmail => {
                AppError::Conflict("staff with this email already exists".to_string())
            }
            CatalogError::AlreadyAssigned => {
                AppError::Conflict("service is already assigned to this staff member".to_string())
            }
            CatalogError::InUse(msg) => AppError::Conflict(msg),
            CatalogError::Storage(detail) => {
                // Raw storage detail stays in the logs, never in the response.
                tracing::error!("catalog storage failure: {}", detail);
                AppError::Internal("storage operation failed".to_string())
            }
        }
    }
}
