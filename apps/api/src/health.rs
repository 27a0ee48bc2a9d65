use axum::Json;
use chrono::Utc;
use serde::Serialize;

/// Typed health/info payloads: named fields instead of string-keyed maps.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct AppInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub hostname: String,
    pub timestamp: String,
}

pub async fn root() -> &'static str {
    "Slotbook API is running!"
}

pub async fn check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        timestamp: Utc::now().to_rfc3339(),
    })
}

pub async fn info() -> Json<AppInfo> {
    Json(AppInfo {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        hostname: std::env::var("HOSTNAME").unwrap_or_else(|_| "unknown".to_string()),
        timestamp: Utc::now().to_rfc3339(),
    })
}
