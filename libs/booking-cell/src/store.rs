// libs/booking-cell/src/store.rs
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde_json::json;

use shared_database::PostgrestClient;

use crate::models::{Appointment, AppointmentDetail, AppointmentStatus, BookingError};

/// Candidate window for the conflict check. No appointment lasts anywhere
/// near this long, so anything starting earlier cannot reach into the slot.
const CANDIDATE_LOOKBACK_HOURS: i64 = 24;

fn storage_err(err: anyhow::Error) -> BookingError {
    BookingError::Storage(err.to_string())
}

fn encode_ts(ts: DateTime<Utc>) -> String {
    urlencoding::encode(&ts.to_rfc3339()).into_owned()
}

/// Row fields for a brand-new appointment; the engine fills duration and
/// status, the store stamps timestamps.
pub struct NewAppointment {
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
    pub staff_id: i64,
    pub service_id: i64,
    pub appointment_datetime: DateTime<Utc>,
    pub duration_minutes: i32,
    pub status: AppointmentStatus,
    pub notes: Option<String>,
}

pub struct AppointmentStore {
    store: Arc<PostgrestClient>,
}

impl AppointmentStore {
    pub fn new(store: Arc<PostgrestClient>) -> Self {
        Self { store }
    }

    pub async fn create(&self, new: &NewAppointment) -> Result<Appointment, BookingError> {
        let now = Utc::now();
        let row = json!({
            "customer_name": new.customer_name,
            "customer_email": new.customer_email,
            "customer_phone": new.customer_phone,
            "staff_id": new.staff_id,
            "service_id": new.service_id,
            "appointment_datetime": new.appointment_datetime.to_rfc3339(),
            "duration_minutes": new.duration_minutes,
            "status": new.status,
            "notes": new.notes,
            "created_at": now.to_rfc3339(),
            "updated_at": now.to_rfc3339(),
        });
        self.store
            .insert_one("appointments", row)
            .await
            .map_err(storage_err)
    }

    pub async fn get(&self, id: i64) -> Result<Option<Appointment>, BookingError> {
        let rows: Vec<Appointment> = self
            .store
            .select("appointments", &format!("id=eq.{id}"))
            .await
            .map_err(storage_err)?;
        Ok(rows.into_iter().next())
    }

    pub async fn list(&self) -> Result<Vec<Appointment>, BookingError> {
        self.store
            .select("appointments", "order=appointment_datetime.desc")
            .await
            .map_err(storage_err)
    }

    pub async fn list_by_staff(&self, staff_id: i64) -> Result<Vec<Appointment>, BookingError> {
        self.store
            .select(
                "appointments",
                &format!("staff_id=eq.{staff_id}&order=appointment_datetime.desc"),
            )
            .await
            .map_err(storage_err)
    }

    pub async fn list_by_customer(&self, email: &str) -> Result<Vec<Appointment>, BookingError> {
        self.store
            .select(
                "appointments",
                &format!(
                    "customer_email=eq.{}&order=appointment_datetime.desc",
                    urlencoding::encode(email)
                ),
            )
            .await
            .map_err(storage_err)
    }

    /// Upcoming, non-cancelled appointments from `now`, soonest first.
    pub async fn list_upcoming(
        &self,
        now: DateTime<Utc>,
        limit: i64,
    ) -> Result<Vec<Appointment>, BookingError> {
        self.store
            .select(
                "appointments",
                &format!(
                    "appointment_datetime=gte.{}&status=neq.cancelled&order=appointment_datetime.asc&limit={limit}",
                    encode_ts(now)
                ),
            )
            .await
            .map_err(storage_err)
    }

    /// Non-cancelled appointments for one staff member that could overlap the
    /// slot `[start, end)`. The window is deliberately generous; the precise
    /// half-open interval check happens in memory.
    pub async fn overlapping_candidates(
        &self,
        staff_id: i64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Appointment>, BookingError> {
        let earliest = start - Duration::hours(CANDIDATE_LOOKBACK_HOURS);
        self.store
            .select(
                "appointments",
                &format!(
                    "staff_id=eq.{staff_id}&status=neq.cancelled&appointment_datetime=gte.{}&appointment_datetime=lt.{}&order=appointment_datetime.asc",
                    encode_ts(earliest),
                    encode_ts(end)
                ),
            )
            .await
            .map_err(storage_err)
    }

    pub async fn set_status(
        &self,
        id: i64,
        status: AppointmentStatus,
    ) -> Result<Option<Appointment>, BookingError> {
        let patch = json!({
            "status": status,
            "updated_at": Utc::now().to_rfc3339(),
        });
        let rows: Vec<Appointment> = self
            .store
            .update_where("appointments", &format!("id=eq.{id}"), patch)
            .await
            .map_err(storage_err)?;
        Ok(rows.into_iter().next())
    }

    // ==========================================================================
    // PRICE-EMBEDDED LISTINGS
    // ==========================================================================

    async fn list_detailed_where(&self, filters: &str) -> Result<Vec<AppointmentDetail>, BookingError> {
        let select = "select=*,service:services(price_cents)";
        let query = if filters.is_empty() {
            format!("{select}&order=appointment_datetime.desc")
        } else {
            format!("{select}&{filters}&order=appointment_datetime.desc")
        };
        self.store
            .select("appointments", &query)
            .await
            .map_err(storage_err)
    }

    pub async fn list_detailed(&self) -> Result<Vec<AppointmentDetail>, BookingError> {
        self.list_detailed_where("").await
    }

    pub async fn list_detailed_by_staff(
        &self,
        staff_id: i64,
    ) -> Result<Vec<AppointmentDetail>, BookingError> {
        self.list_detailed_where(&format!("staff_id=eq.{staff_id}")).await
    }

    pub async fn list_detailed_by_customer(
        &self,
        email: &str,
    ) -> Result<Vec<AppointmentDetail>, BookingError> {
        self.list_detailed_where(&format!("customer_email=eq.{}", urlencoding::encode(email)))
            .await
    }
}
