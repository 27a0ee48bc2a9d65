// libs/booking-cell/src/services/hours.rs
use std::sync::Arc;

use chrono::{DateTime, Datelike, FixedOffset, Timelike, Utc};
use tracing::debug;

use schedule_cell::store::ScheduleStore;
use shared_database::PostgrestClient;
use shared_utils::validate::minutes_since_midnight;

use crate::models::BookingError;

/// Working-hours admission. Schedules hold civil time-of-day, so the
/// appointment instant is normalized into the business reference offset
/// before any comparison; raw UTC never meets a schedule window directly.
pub struct WorkingHoursCheck {
    schedules: ScheduleStore,
    offset: FixedOffset,
}

impl WorkingHoursCheck {
    pub fn new(store: Arc<PostgrestClient>, offset: FixedOffset) -> Self {
        Self {
            schedules: ScheduleStore::new(store),
            offset,
        }
    }

    /// True when `[start, start + duration)` sits fully inside at least one
    /// of the staff member's windows for that civil weekday.
    pub async fn admits(
        &self,
        staff_id: i64,
        start_utc: DateTime<Utc>,
        duration_minutes: i32,
    ) -> Result<bool, BookingError> {
        let (day_of_week, start_minutes) = civil_day_and_minutes(start_utc, self.offset);
        let end_minutes = start_minutes + duration_minutes;

        let windows = self
            .schedules
            .list_for_staff_day(staff_id, day_of_week)
            .await
            .map_err(|e| BookingError::Storage(e.to_string()))?;

        debug!(
            "Working-hours check for staff {}: day {} minutes {}-{} against {} windows",
            staff_id,
            day_of_week,
            start_minutes,
            end_minutes,
            windows.len()
        );

        Ok(windows.iter().any(|window| {
            fits_window(
                start_minutes,
                end_minutes,
                minutes_since_midnight(window.start_time),
                minutes_since_midnight(window.end_time),
            )
        }))
    }
}

/// Civil weekday (0 = Sunday) and minutes since midnight of an instant in the
/// given offset.
pub fn civil_day_and_minutes(instant: DateTime<Utc>, offset: FixedOffset) -> (i32, i32) {
    let local = instant.with_timezone(&offset);
    let day_of_week = local.weekday().num_days_from_sunday() as i32;
    let minutes = (local.hour() * 60 + local.minute()) as i32;
    (day_of_week, minutes)
}

/// Full containment: the appointment interval must fit inside the window.
/// An end past midnight exceeds every same-day window by construction.
pub fn fits_window(appt_start: i32, appt_end: i32, win_start: i32, win_end: i32) -> bool {
    appt_start >= win_start && appt_end <= win_end
}
