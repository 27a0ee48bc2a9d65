pub mod catalog;
pub mod eligibility;
pub mod staff;

use std::sync::Arc;

use shared_database::AppContext;

pub use catalog::ServiceCatalog;
pub use eligibility::EligibilityService;
pub use staff::StaffDirectory;

/// Catalog services built once at startup and shared by the handlers.
pub struct CatalogState {
    pub services: ServiceCatalog,
    pub staff: StaffDirectory,
    pub eligibility: EligibilityService,
}

impl CatalogState {
    pub fn new(ctx: &AppContext) -> Self {
        Self {
            services: ServiceCatalog::new(Arc::clone(&ctx.store)),
            staff: StaffDirectory::new(Arc::clone(&ctx.store)),
            eligibility: EligibilityService::new(Arc::clone(&ctx.store)),
        }
    }
}
