pub mod admission;

pub use admission::ScheduleAdmission;
