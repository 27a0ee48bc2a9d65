// libs/catalog-cell/src/services/eligibility.rs
use std::sync::Arc;

use tracing::info;

use shared_database::PostgrestClient;

use crate::models::{Assignment, CatalogError, Service, Staff};
use crate::store::{EligibilityStore, ServiceStore, StaffStore};

/// Owns the staff <-> service eligibility relation. A booking is only valid
/// when (staff, service) is a member, so the booking engine probes this
/// service too.
pub struct EligibilityService {
    staff: StaffStore,
    services: ServiceStore,
    eligibility: EligibilityStore,
}

impl EligibilityService {
    pub fn new(store: Arc<PostgrestClient>) -> Self {
        Self {
            staff: StaffStore::new(Arc::clone(&store)),
            services: ServiceStore::new(Arc::clone(&store)),
            eligibility: EligibilityStore::new(store),
        }
    }

    pub async fn assign(&self, staff_id: i64, service_id: i64) -> Result<Assignment, CatalogError> {
        if self.staff.get(staff_id).await?.is_none() {
            return Err(CatalogError::StaffNotFound);
        }
        if self.services.get(service_id).await?.is_none() {
            return Err(CatalogError::ServiceNotFound);
        }
        if self.eligibility.is_assigned(staff_id, service_id).await? {
            return Err(CatalogError::AlreadyAssigned);
        }

        let assignment = self.eligibility.assign(staff_id, service_id).await?;
        info!("Service {} assigned to staff {}", service_id, staff_id);
        Ok(assignment)
    }

    pub async fn unassign(&self, staff_id: i64, service_id: i64) -> Result<(), CatalogError> {
        self.eligibility.unassign(staff_id, service_id).await
    }

    pub async fn is_assigned(&self, staff_id: i64, service_id: i64) -> Result<bool, CatalogError> {
        self.eligibility.is_assigned(staff_id, service_id).await
    }

    pub async fn services_for_staff(&self, staff_id: i64) -> Result<Vec<Service>, CatalogError> {
        self.eligibility.services_for_staff(staff_id).await
    }

    pub async fn staff_for_service(&self, service_id: i64) -> Result<Vec<Staff>, CatalogError> {
        self.eligibility.staff_for_service(service_id).await
    }
}
