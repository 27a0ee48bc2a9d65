// libs/booking-cell/src/services/conflict.rs
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use shared_database::PostgrestClient;

use crate::models::BookingError;
use crate::store::AppointmentStore;

/// Detects overlap between a proposed slot and a staff member's existing
/// non-cancelled appointments. The store narrows the candidate set to a time
/// window; the precise rule runs here.
pub struct ConflictChecker {
    appointments: AppointmentStore,
}

impl ConflictChecker {
    pub fn new(store: Arc<PostgrestClient>) -> Self {
        Self {
            appointments: AppointmentStore::new(store),
        }
    }

    pub async fn has_conflict(
        &self,
        staff_id: i64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        exclude_appointment_id: Option<i64>,
    ) -> Result<bool, BookingError> {
        debug!(
            "Checking conflicts for staff {} from {} to {}",
            staff_id, start, end
        );

        let candidates = self
            .appointments
            .overlapping_candidates(staff_id, start, end)
            .await?;

        let conflicting = candidates.iter().find(|appt| {
            exclude_appointment_id != Some(appt.id)
                && intervals_overlap(appt.appointment_datetime, appt.end_datetime(), start, end)
        });

        if let Some(appt) = conflicting {
            warn!(
                "Conflict detected for staff {}: appointment {} occupies {} to {}",
                staff_id,
                appt.id,
                appt.appointment_datetime,
                appt.end_datetime()
            );
            return Ok(true);
        }

        Ok(false)
    }
}

/// Half-open interval overlap: `[s1,e1)` and `[s2,e2)` overlap iff
/// `s1 < e2 && s2 < e1`. Back-to-back appointments never conflict.
pub fn intervals_overlap(
    s1: DateTime<Utc>,
    e1: DateTime<Utc>,
    s2: DateTime<Utc>,
    e2: DateTime<Utc>,
) -> bool {
    s1 < e2 && s2 < e1
}
