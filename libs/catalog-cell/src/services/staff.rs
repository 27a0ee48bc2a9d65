// libs/catalog-cell/src/services/staff.rs
use std::sync::Arc;

use tracing::{debug, info};

use shared_database::PostgrestClient;
use shared_utils::validate::is_valid_email;

use crate::models::{CatalogError, Staff, StaffPayload};
use crate::store::{AppointmentRefStore, StaffStore};

pub struct StaffDirectory {
    staff: StaffStore,
    appointment_refs: AppointmentRefStore,
}

impl StaffDirectory {
    pub fn new(store: Arc<PostgrestClient>) -> Self {
        Self {
            staff: StaffStore::new(Arc::clone(&store)),
            appointment_refs: AppointmentRefStore::new(store),
        }
    }

    pub async fn create(&self, payload: &StaffPayload) -> Result<Staff, CatalogError> {
        validate_staff(payload)?;

        if self.staff.get_by_email(&payload.email).await?.is_some() {
            return Err(CatalogError::DuplicateEmail);
        }

        let staff = self.staff.create(payload).await?;
        info!("Staff {} created: {}", staff.id, staff.email);
        Ok(staff)
    }

    pub async fn update(&self, id: i64, payload: &StaffPayload) -> Result<Staff, CatalogError> {
        validate_staff(payload)?;

        // Email stays unique across the directory; the row being edited is
        // allowed to keep its own address.
        if let Some(existing) = self.staff.get_by_email(&payload.email).await? {
            if existing.id != id {
                return Err(CatalogError::DuplicateEmail);
            }
        }

        self.staff
            .update(id, payload)
            .await?
            .ok_or(CatalogError::StaffNotFound)
    }

    pub async fn get(&self, id: i64) -> Result<Staff, CatalogError> {
        self.staff.get(id).await?.ok_or(CatalogError::StaffNotFound)
    }

    pub async fn list(&self) -> Result<Vec<Staff>, CatalogError> {
        self.staff.list().await
    }

    /// Blocked while any appointment references the staff member. Schedules
    /// and eligibility rows cascade with the row itself.
    pub async fn delete(&self, id: i64) -> Result<(), CatalogError> {
        debug!("Deleting staff {}", id);

        if self.appointment_refs.any_for_staff(id).await? {
            return Err(CatalogError::InUse(
                "cannot delete staff member with existing appointments".to_string(),
            ));
        }

        self.staff.delete(id).await
    }
}

fn validate_staff(payload: &StaffPayload) -> Result<(), CatalogError> {
    if payload.name.is_empty() {
        return Err(CatalogError::Validation("staff name is required".to_string()));
    }
    if payload.email.is_empty() {
        return Err(CatalogError::Validation("staff email is required".to_string()));
    }
    if !is_valid_email(&payload.email) {
        return Err(CatalogError::Validation("invalid email format".to_string()));
    }
    Ok(())
}
