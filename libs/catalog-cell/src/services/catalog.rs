// libs/catalog-cell/src/services/catalog.rs
use std::sync::Arc;

use tracing::{debug, info};

use shared_database::PostgrestClient;

use crate::models::{CatalogError, Service, ServicePayload};
use crate::store::{AppointmentRefStore, EligibilityStore, ServiceStore};

pub struct ServiceCatalog {
    services: ServiceStore,
    eligibility: EligibilityStore,
    appointment_refs: AppointmentRefStore,
}

impl ServiceCatalog {
    pub fn new(store: Arc<PostgrestClient>) -> Self {
        Self {
            services: ServiceStore::new(Arc::clone(&store)),
            eligibility: EligibilityStore::new(Arc::clone(&store)),
            appointment_refs: AppointmentRefStore::new(store),
        }
    }

    pub async fn create(&self, payload: &ServicePayload) -> Result<Service, CatalogError> {
        validate_service(payload)?;
        let service = self.services.create(payload).await?;
        info!("Service {} created: {}", service.id, service.name);
        Ok(service)
    }

    pub async fn update(&self, id: i64, payload: &ServicePayload) -> Result<Service, CatalogError> {
        validate_service(payload)?;
        self.services
            .update(id, payload)
            .await?
            .ok_or(CatalogError::ServiceNotFound)
    }

    pub async fn get(&self, id: i64) -> Result<Service, CatalogError> {
        self.services.get(id).await?.ok_or(CatalogError::ServiceNotFound)
    }

    pub async fn list(&self) -> Result<Vec<Service>, CatalogError> {
        self.services.list().await
    }

    /// Deletion is blocked while any staff is eligible for the service or any
    /// appointment, whatever its status, still references it.
    pub async fn delete(&self, id: i64) -> Result<(), CatalogError> {
        debug!("Deleting service {}", id);

        let assigned_staff = self.eligibility.staff_for_service(id).await?;
        if !assigned_staff.is_empty() {
            return Err(CatalogError::InUse(
                "cannot delete service that is assigned to staff members".to_string(),
            ));
        }

        if self.appointment_refs.any_for_service(id).await? {
            return Err(CatalogError::InUse(
                "cannot delete service that has existing appointments".to_string(),
            ));
        }

        self.services.delete(id).await
    }
}

fn validate_service(payload: &ServicePayload) -> Result<(), CatalogError> {
    if payload.name.is_empty() {
        return Err(CatalogError::Validation("service name is required".to_string()));
    }
    if payload.duration_minutes <= 0 {
        return Err(CatalogError::Validation("duration must be positive".to_string()));
    }
    if payload.price_cents < 0 {
        return Err(CatalogError::Validation("price cannot be negative".to_string()));
    }
    Ok(())
}
