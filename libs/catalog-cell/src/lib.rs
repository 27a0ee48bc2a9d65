pub mod handlers;
pub mod models;
pub mod router;
pub mod services;
pub mod store;

pub use models::*;
pub use router::catalog_routes;
pub use services::{CatalogState, EligibilityService, ServiceCatalog, StaffDirectory};
