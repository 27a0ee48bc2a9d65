use std::sync::Arc;

use serde_json::json;

use shared_config::{default_schedule_offset, parse_utc_offset, AppConfig};

pub struct TestConfig {
    pub postgrest_url: String,
    pub postgrest_api_key: String,
    pub schedule_utc_offset: String,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            postgrest_url: "http://localhost:54321".to_string(),
            postgrest_api_key: "test-api-key".to_string(),
            schedule_utc_offset: "-08:00".to_string(),
        }
    }
}

impl TestConfig {
    /// Config pointing at a wiremock server standing in for PostgREST.
    pub fn for_mock_server(url: &str) -> Self {
        Self {
            postgrest_url: url.to_string(),
            ..Self::default()
        }
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            postgrest_url: self.postgrest_url.clone(),
            postgrest_api_key: self.postgrest_api_key.clone(),
            schedule_utc_offset: parse_utc_offset(&self.schedule_utc_offset)
                .unwrap_or_else(default_schedule_offset),
        }
    }

    pub fn to_arc(&self) -> Arc<AppConfig> {
        Arc::new(self.to_app_config())
    }
}

/// Canned PostgREST row JSON for the booking tables, shaped exactly like the
/// stores expect them back.
pub struct MockStoreRows;

impl MockStoreRows {
    pub fn service_row(id: i64, name: &str, duration_minutes: i32, price_cents: i64) -> serde_json::Value {
        json!({
            "id": id,
            "name": name,
            "description": format!("{name} description"),
            "duration_minutes": duration_minutes,
            "price_cents": price_cents,
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-01-01T00:00:00Z"
        })
    }

    pub fn staff_row(id: i64, name: &str, email: &str) -> serde_json::Value {
        json!({
            "id": id,
            "name": name,
            "email": email,
            "phone": "555-0100",
            "role": "provider",
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-01-01T00:00:00Z"
        })
    }

    pub fn schedule_row(
        id: i64,
        staff_id: i64,
        day_of_week: i32,
        start_time: &str,
        end_time: &str,
    ) -> serde_json::Value {
        json!({
            "id": id,
            "staff_id": staff_id,
            "day_of_week": day_of_week,
            "start_time": start_time,
            "end_time": end_time,
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-01-01T00:00:00Z"
        })
    }

    pub fn assignment_row(staff_id: i64, service_id: i64) -> serde_json::Value {
        json!({
            "staff_id": staff_id,
            "service_id": service_id
        })
    }

    pub fn appointment_row(
        id: i64,
        staff_id: i64,
        service_id: i64,
        appointment_datetime: &str,
        duration_minutes: i32,
        status: &str,
    ) -> serde_json::Value {
        json!({
            "id": id,
            "customer_name": "Test Customer",
            "customer_email": "customer@example.com",
            "customer_phone": "555-0199",
            "staff_id": staff_id,
            "service_id": service_id,
            "appointment_datetime": appointment_datetime,
            "duration_minutes": duration_minutes,
            "status": status,
            "notes": null,
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-01-01T00:00:00Z"
        })
    }
}
