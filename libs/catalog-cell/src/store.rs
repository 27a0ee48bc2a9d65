// libs/catalog-cell/src/store.rs
use std::sync::Arc;

use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

use shared_database::PostgrestClient;

use crate::models::{Assignment, CatalogError, Service, ServicePayload, Staff, StaffPayload};

fn storage_err(err: anyhow::Error) -> CatalogError {
    CatalogError::Storage(err.to_string())
}

// ==============================================================================
// SERVICE STORE
// ==============================================================================

pub struct ServiceStore {
    store: Arc<PostgrestClient>,
}

impl ServiceStore {
    pub fn new(store: Arc<PostgrestClient>) -> Self {
        Self { store }
    }

    pub async fn create(&self, payload: &ServicePayload) -> Result<Service, CatalogError> {
        let now = Utc::now();
        let row = json!({
            "name": payload.name,
            "description": payload.description,
            "duration_minutes": payload.duration_minutes,
            "price_cents": payload.price_cents,
            "created_at": now.to_rfc3339(),
            "updated_at": now.to_rfc3339(),
        });
        self.store
            .insert_one("services", row)
            .await
            .map_err(storage_err)
    }

    pub async fn get(&self, id: i64) -> Result<Option<Service>, CatalogError> {
        let rows: Vec<Service> = self
            .store
            .select("services", &format!("id=eq.{id}"))
            .await
            .map_err(storage_err)?;
        Ok(rows.into_iter().next())
    }

    pub async fn list(&self) -> Result<Vec<Service>, CatalogError> {
        self.store
            .select("services", "order=id.asc")
            .await
            .map_err(storage_err)
    }

    pub async fn update(
        &self,
        id: i64,
        payload: &ServicePayload,
    ) -> Result<Option<Service>, CatalogError> {
        let patch = json!({
            "name": payload.name,
            "description": payload.description,
            "duration_minutes": payload.duration_minutes,
            "price_cents": payload.price_cents,
            "updated_at": Utc::now().to_rfc3339(),
        });
        let rows: Vec<Service> = self
            .store
            .update_where("services", &format!("id=eq.{id}"), patch)
            .await
            .map_err(storage_err)?;
        Ok(rows.into_iter().next())
    }

    pub async fn delete(&self, id: i64) -> Result<(), CatalogError> {
        self.store
            .delete_where("services", &format!("id=eq.{id}"))
            .await
            .map_err(storage_err)
    }
}

// ==============================================================================
// STAFF STORE
// ==============================================================================

pub struct StaffStore {
    store: Arc<PostgrestClient>,
}

impl StaffStore {
    pub fn new(store: Arc<PostgrestClient>) -> Self {
        Self { store }
    }

    pub async fn create(&self, payload: &StaffPayload) -> Result<Staff, CatalogError> {
        let now = Utc::now();
        let row = json!({
            "name": payload.name,
            "email": payload.email,
            "phone": payload.phone,
            "role": payload.role,
            "created_at": now.to_rfc3339(),
            "updated_at": now.to_rfc3339(),
        });
        self.store
            .insert_one("staff", row)
            .await
            .map_err(storage_err)
    }

    pub async fn get(&self, id: i64) -> Result<Option<Staff>, CatalogError> {
        let rows: Vec<Staff> = self
            .store
            .select("staff", &format!("id=eq.{id}"))
            .await
            .map_err(storage_err)?;
        Ok(rows.into_iter().next())
    }

    pub async fn get_by_email(&self, email: &str) -> Result<Option<Staff>, CatalogError> {
        let rows: Vec<Staff> = self
            .store
            .select("staff", &format!("email=eq.{}", urlencoding::encode(email)))
            .await
            .map_err(storage_err)?;
        Ok(rows.into_iter().next())
    }

    pub async fn list(&self) -> Result<Vec<Staff>, CatalogError> {
        self.store
            .select("staff", "order=id.asc")
            .await
            .map_err(storage_err)
    }

    pub async fn update(
        &self,
        id: i64,
        payload: &StaffPayload,
    ) -> Result<Option<Staff>, CatalogError> {
        let patch = json!({
            "name": payload.name,
            "email": payload.email,
            "phone": payload.phone,
            "role": payload.role,
            "updated_at": Utc::now().to_rfc3339(),
        });
        let rows: Vec<Staff> = self
            .store
            .update_where("staff", &format!("id=eq.{id}"), patch)
            .await
            .map_err(storage_err)?;
        Ok(rows.into_iter().next())
    }

    /// Schedules and eligibility rows cascade at the database.
    pub async fn delete(&self, id: i64) -> Result<(), CatalogError> {
        self.store
            .delete_where("staff", &format!("id=eq.{id}"))
            .await
            .map_err(storage_err)
    }
}

// ==============================================================================
// ELIGIBILITY STORE (staff_services junction)
// ==============================================================================

#[derive(Deserialize)]
struct ServiceJoinRow {
    service: Service,
}

#[derive(Deserialize)]
struct StaffJoinRow {
    staff: Staff,
}

pub struct EligibilityStore {
    store: Arc<PostgrestClient>,
}

impl EligibilityStore {
    pub fn new(store: Arc<PostgrestClient>) -> Self {
        Self { store }
    }

    pub async fn assign(&self, staff_id: i64, service_id: i64) -> Result<Assignment, CatalogError> {
        let row = json!({
            "staff_id": staff_id,
            "service_id": service_id,
        });
        self.store
            .insert_one("staff_services", row)
            .await
            .map_err(storage_err)
    }

    pub async fn unassign(&self, staff_id: i64, service_id: i64) -> Result<(), CatalogError> {
        self.store
            .delete_where(
                "staff_services",
                &format!("staff_id=eq.{staff_id}&service_id=eq.{service_id}"),
            )
            .await
            .map_err(storage_err)
    }

    pub async fn is_assigned(&self, staff_id: i64, service_id: i64) -> Result<bool, CatalogError> {
        let rows: Vec<Assignment> = self
            .store
            .select(
                "staff_services",
                &format!("staff_id=eq.{staff_id}&service_id=eq.{service_id}"),
            )
            .await
            .map_err(storage_err)?;
        Ok(!rows.is_empty())
    }

    pub async fn services_for_staff(&self, staff_id: i64) -> Result<Vec<Service>, CatalogError> {
        let rows: Vec<ServiceJoinRow> = self
            .store
            .select(
                "staff_services",
                &format!("select=service:services(*)&staff_id=eq.{staff_id}"),
            )
            .await
            .map_err(storage_err)?;
        Ok(rows.into_iter().map(|row| row.service).collect())
    }

    pub async fn staff_for_service(&self, service_id: i64) -> Result<Vec<Staff>, CatalogError> {
        let rows: Vec<StaffJoinRow> = self
            .store
            .select(
                "staff_services",
                &format!("select=staff:staff(*)&service_id=eq.{service_id}"),
            )
            .await
            .map_err(storage_err)?;
        Ok(rows.into_iter().map(|row| row.staff).collect())
    }
}

// ==============================================================================
// APPOINTMENT REFERENCE PROBES
// ==============================================================================

#[derive(Deserialize)]
struct IdRow {
    #[allow(dead_code)]
    id: i64,
}

/// Read-only probes into the appointments table backing the deletion guards.
/// Any status counts: history keeps its referents.
pub struct AppointmentRefStore {
    store: Arc<PostgrestClient>,
}

impl AppointmentRefStore {
    pub fn new(store: Arc<PostgrestClient>) -> Self {
        Self { store }
    }

    pub async fn any_for_service(&self, service_id: i64) -> Result<bool, CatalogError> {
        let rows: Vec<IdRow> = self
            .store
            .select(
                "appointments",
                &format!("select=id&service_id=eq.{service_id}&limit=1"),
            )
            .await
            .map_err(storage_err)?;
        Ok(!rows.is_empty())
    }

    pub async fn any_for_staff(&self, staff_id: i64) -> Result<bool, CatalogError> {
        let rows: Vec<IdRow> = self
            .store
            .select(
                "appointments",
                &format!("select=id&staff_id=eq.{staff_id}&limit=1"),
            )
            .await
            .map_err(storage_err)?;
        Ok(!rows.is_empty())
    }
}
