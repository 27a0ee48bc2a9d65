pub mod handlers;
pub mod models;
pub mod router;
pub mod services;
pub mod store;

pub use models::*;
pub use router::schedule_routes;
pub use services::ScheduleAdmission;
pub use store::ScheduleStore;
