// libs/schedule-cell/src/store.rs
use std::sync::Arc;

use chrono::{NaiveTime, Utc};
use serde_json::json;

use shared_database::PostgrestClient;

use crate::models::{Schedule, ScheduleError};

fn storage_err(err: anyhow::Error) -> ScheduleError {
    ScheduleError::Storage(err.to_string())
}

fn hhmm(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

pub struct ScheduleStore {
    store: Arc<PostgrestClient>,
}

impl ScheduleStore {
    pub fn new(store: Arc<PostgrestClient>) -> Self {
        Self { store }
    }

    pub async fn create(
        &self,
        staff_id: i64,
        day_of_week: i32,
        start_time: NaiveTime,
        end_time: NaiveTime,
    ) -> Result<Schedule, ScheduleError> {
        let now = Utc::now();
        let row = json!({
            "staff_id": staff_id,
            "day_of_week": day_of_week,
            "start_time": hhmm(start_time),
            "end_time": hhmm(end_time),
            "created_at": now.to_rfc3339(),
            "updated_at": now.to_rfc3339(),
        });
        self.store
            .insert_one("schedules", row)
            .await
            .map_err(storage_err)
    }

    pub async fn get(&self, id: i64) -> Result<Option<Schedule>, ScheduleError> {
        let rows: Vec<Schedule> = self
            .store
            .select("schedules", &format!("id=eq.{id}"))
            .await
            .map_err(storage_err)?;
        Ok(rows.into_iter().next())
    }

    pub async fn list(&self) -> Result<Vec<Schedule>, ScheduleError> {
        self.store
            .select("schedules", "order=staff_id.asc,day_of_week.asc,start_time.asc")
            .await
            .map_err(storage_err)
    }

    pub async fn list_for_staff(&self, staff_id: i64) -> Result<Vec<Schedule>, ScheduleError> {
        self.store
            .select(
                "schedules",
                &format!("staff_id=eq.{staff_id}&order=day_of_week.asc,start_time.asc"),
            )
            .await
            .map_err(storage_err)
    }

    /// Windows for one staff member on one weekday; what the booking engine's
    /// working-hours check consumes.
    pub async fn list_for_staff_day(
        &self,
        staff_id: i64,
        day_of_week: i32,
    ) -> Result<Vec<Schedule>, ScheduleError> {
        self.store
            .select(
                "schedules",
                &format!("staff_id=eq.{staff_id}&day_of_week=eq.{day_of_week}&order=start_time.asc"),
            )
            .await
            .map_err(storage_err)
    }

    pub async fn update(
        &self,
        id: i64,
        day_of_week: i32,
        start_time: NaiveTime,
        end_time: NaiveTime,
    ) -> Result<Option<Schedule>, ScheduleError> {
        let patch = json!({
            "day_of_week": day_of_week,
            "start_time": hhmm(start_time),
            "end_time": hhmm(end_time),
            "updated_at": Utc::now().to_rfc3339(),
        });
        let rows: Vec<Schedule> = self
            .store
            .update_where("schedules", &format!("id=eq.{id}"), patch)
            .await
            .map_err(storage_err)?;
        Ok(rows.into_iter().next())
    }

    pub async fn delete(&self, id: i64) -> Result<(), ScheduleError> {
        self.store
            .delete_where("schedules", &format!("id=eq.{id}"))
            .await
            .map_err(storage_err)
    }
}
