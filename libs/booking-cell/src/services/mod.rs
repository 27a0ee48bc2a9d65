pub mod booking;
pub mod conflict;
pub mod hours;
pub mod lifecycle;
pub mod locks;

pub use booking::BookingEngine;
pub use conflict::ConflictChecker;
pub use hours::WorkingHoursCheck;
pub use lifecycle::AppointmentLifecycle;
pub use locks::StaffSlotLocks;
