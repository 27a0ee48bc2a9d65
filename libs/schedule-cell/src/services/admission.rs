// libs/schedule-cell/src/services/admission.rs
use std::sync::Arc;

use chrono::NaiveTime;
use tracing::{debug, info, warn};

use catalog_cell::store::StaffStore;
use shared_database::PostgrestClient;
use shared_utils::validate::{is_valid_hhmm, minutes_since_midnight, parse_hhmm};

use crate::models::{CreateScheduleRequest, Schedule, ScheduleError, UpdateScheduleRequest};
use crate::store::ScheduleStore;

/// Admits schedule windows: field validation, staff existence, and the
/// no-overlap invariant across a staff member's windows on one weekday. The
/// store itself never enforces this, so every write path goes through here.
pub struct ScheduleAdmission {
    schedules: ScheduleStore,
    staff: StaffStore,
}

impl ScheduleAdmission {
    pub fn new(store: Arc<PostgrestClient>) -> Self {
        Self {
            schedules: ScheduleStore::new(Arc::clone(&store)),
            staff: StaffStore::new(store),
        }
    }

    pub async fn create(&self, request: &CreateScheduleRequest) -> Result<Schedule, ScheduleError> {
        let (start, end) = validate_window(request.day_of_week, &request.start_time, &request.end_time)?;

        if self
            .staff
            .get(request.staff_id)
            .await
            .map_err(|e| ScheduleError::Storage(e.to_string()))?
            .is_none()
        {
            return Err(ScheduleError::StaffNotFound);
        }

        let existing = self.schedules.list_for_staff(request.staff_id).await?;
        self.reject_overlaps(&existing, request.day_of_week, start, end, None)?;

        let schedule = self
            .schedules
            .create(request.staff_id, request.day_of_week, start, end)
            .await?;
        info!(
            "Schedule {} created for staff {} on day {}",
            schedule.id, schedule.staff_id, schedule.day_of_week
        );
        Ok(schedule)
    }

    pub async fn update(
        &self,
        id: i64,
        request: &UpdateScheduleRequest,
    ) -> Result<Schedule, ScheduleError> {
        let (start, end) = validate_window(request.day_of_week, &request.start_time, &request.end_time)?;

        let current = self
            .schedules
            .get(id)
            .await?
            .ok_or(ScheduleError::ScheduleNotFound)?;

        let existing = self.schedules.list_for_staff(current.staff_id).await?;
        self.reject_overlaps(&existing, request.day_of_week, start, end, Some(id))?;

        self.schedules
            .update(id, request.day_of_week, start, end)
            .await?
            .ok_or(ScheduleError::ScheduleNotFound)
    }

    pub async fn get(&self, id: i64) -> Result<Schedule, ScheduleError> {
        self.schedules
            .get(id)
            .await?
            .ok_or(ScheduleError::ScheduleNotFound)
    }

    pub async fn list(&self) -> Result<Vec<Schedule>, ScheduleError> {
        self.schedules.list().await
    }

    pub async fn list_for_staff(&self, staff_id: i64) -> Result<Vec<Schedule>, ScheduleError> {
        self.schedules.list_for_staff(staff_id).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ScheduleError> {
        debug!("Deleting schedule {}", id);
        self.schedules.delete(id).await
    }

    /// Pairwise comparison against every other window the staff member owns
    /// on the same weekday; `exclude` drops the row being edited.
    fn reject_overlaps(
        &self,
        existing: &[Schedule],
        day_of_week: i32,
        start: NaiveTime,
        end: NaiveTime,
        exclude: Option<i64>,
    ) -> Result<(), ScheduleError> {
        for window in existing {
            if Some(window.id) == exclude || window.day_of_week != day_of_week {
                continue;
            }
            if windows_overlap(start, end, window.start_time, window.end_time) {
                warn!(
                    "Schedule window {}-{} overlaps existing schedule {}",
                    start, end, window.id
                );
                return Err(ScheduleError::Overlap);
            }
        }
        Ok(())
    }
}

fn validate_window(
    day_of_week: i32,
    start_time: &str,
    end_time: &str,
) -> Result<(NaiveTime, NaiveTime), ScheduleError> {
    if !(0..=6).contains(&day_of_week) {
        return Err(ScheduleError::Validation(
            "day of week must be between 0 (Sunday) and 6 (Saturday)".to_string(),
        ));
    }
    if start_time.is_empty() || end_time.is_empty() {
        return Err(ScheduleError::Validation(
            "start time and end time are required".to_string(),
        ));
    }
    if !is_valid_hhmm(start_time) || !is_valid_hhmm(end_time) {
        return Err(ScheduleError::Validation(
            "time must be in HH:MM format".to_string(),
        ));
    }

    let start = parse_hhmm(start_time)
        .ok_or_else(|| ScheduleError::Validation("time must be in HH:MM format".to_string()))?;
    let end = parse_hhmm(end_time)
        .ok_or_else(|| ScheduleError::Validation("time must be in HH:MM format".to_string()))?;

    if start >= end {
        return Err(ScheduleError::Validation(
            "start time must be before end time".to_string(),
        ));
    }

    Ok((start, end))
}

/// Half-open overlap on civil time-of-day: `[s1,e1)` and `[s2,e2)` overlap
/// iff `s1 < e2 && s2 < e1`. Touching endpoints do not overlap.
pub fn windows_overlap(s1: NaiveTime, e1: NaiveTime, s2: NaiveTime, e2: NaiveTime) -> bool {
    let (s1, e1) = (minutes_since_midnight(s1), minutes_since_midnight(e1));
    let (s2, e2) = (minutes_since_midnight(s2), minutes_since_midnight(e2));
    s1 < e2 && s2 < e1
}
