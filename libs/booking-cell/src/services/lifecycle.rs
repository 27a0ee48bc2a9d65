// libs/booking-cell/src/services/lifecycle.rs
use tracing::{debug, warn};

use crate::models::{AppointmentStatus, BookingError};

/// The appointment state machine: confirmed is the only initial state, and
/// cancelled/completed are terminal. No transition ever leaves a terminal
/// state.
pub struct AppointmentLifecycle;

impl AppointmentLifecycle {
    pub fn new() -> Self {
        Self
    }

    pub fn valid_transitions(&self, current: &AppointmentStatus) -> Vec<AppointmentStatus> {
        match current {
            AppointmentStatus::Confirmed => {
                vec![AppointmentStatus::Cancelled, AppointmentStatus::Completed]
            }
            AppointmentStatus::Cancelled | AppointmentStatus::Completed => vec![],
        }
    }

    pub fn validate_cancel(&self, current: &AppointmentStatus) -> Result<(), BookingError> {
        debug!("Validating cancel from {:?}", current);
        match current {
            AppointmentStatus::Cancelled => {
                warn!("Cancel rejected: appointment is already cancelled");
                Err(BookingError::AlreadyCancelled)
            }
            AppointmentStatus::Completed => {
                warn!("Cancel rejected: appointment is already completed");
                Err(BookingError::AlreadyCompleted)
            }
            // No check against the clock: past appointments cancel too.
            AppointmentStatus::Confirmed => Ok(()),
        }
    }

    pub fn validate_complete(&self, current: &AppointmentStatus) -> Result<(), BookingError> {
        debug!("Validating complete from {:?}", current);
        match current {
            AppointmentStatus::Completed => {
                warn!("Complete rejected: appointment is already completed");
                Err(BookingError::AlreadyCompleted)
            }
            AppointmentStatus::Cancelled => {
                warn!("Complete rejected: appointment is cancelled");
                Err(BookingError::CannotCompleteCancelled)
            }
            AppointmentStatus::Confirmed => Ok(()),
        }
    }
}

impl Default for AppointmentLifecycle {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn confirmed_can_cancel_or_complete() {
        let lifecycle = AppointmentLifecycle::new();
        assert!(lifecycle.validate_cancel(&AppointmentStatus::Confirmed).is_ok());
        assert!(lifecycle.validate_complete(&AppointmentStatus::Confirmed).is_ok());
    }

    #[test]
    fn cancel_is_idempotent_rejecting() {
        let lifecycle = AppointmentLifecycle::new();
        assert_matches!(
            lifecycle.validate_cancel(&AppointmentStatus::Cancelled),
            Err(BookingError::AlreadyCancelled)
        );
    }

    #[test]
    fn completed_appointments_cannot_cancel() {
        let lifecycle = AppointmentLifecycle::new();
        assert_matches!(
            lifecycle.validate_cancel(&AppointmentStatus::Completed),
            Err(BookingError::AlreadyCompleted)
        );
    }

    #[test]
    fn complete_after_cancel_always_fails() {
        let lifecycle = AppointmentLifecycle::new();
        assert_matches!(
            lifecycle.validate_complete(&AppointmentStatus::Cancelled),
            Err(BookingError::CannotCompleteCancelled)
        );
    }

    #[test]
    fn complete_twice_fails() {
        let lifecycle = AppointmentLifecycle::new();
        assert_matches!(
            lifecycle.validate_complete(&AppointmentStatus::Completed),
            Err(BookingError::AlreadyCompleted)
        );
    }

    #[test]
    fn terminal_states_have_no_transitions() {
        let lifecycle = AppointmentLifecycle::new();
        assert!(lifecycle.valid_transitions(&AppointmentStatus::Cancelled).is_empty());
        assert!(lifecycle.valid_transitions(&AppointmentStatus::Completed).is_empty());
    }
}
