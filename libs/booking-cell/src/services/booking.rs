// libs/booking-cell/src/services/booking.rs
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use tracing::{debug, info, warn};

use catalog_cell::store::{EligibilityStore, ServiceStore, StaffStore};
use shared_database::AppContext;
use shared_utils::validate::is_valid_email;

use crate::models::{
    Appointment, AppointmentDetail, AppointmentStatus, BookAppointmentRequest, BookingError,
};
use crate::services::conflict::ConflictChecker;
use crate::services::hours::WorkingHoursCheck;
use crate::services::lifecycle::AppointmentLifecycle;
use crate::services::locks::StaffSlotLocks;
use crate::store::{AppointmentStore, NewAppointment};

const DEFAULT_UPCOMING_LIMIT: i64 = 50;

/// The booking decision engine. Admits an appointment only when the staff is
/// eligible for the service, the slot sits inside a working-hours window, and
/// no existing appointment overlaps; then commits exactly one row. Also
/// governs the cancel/complete transitions.
pub struct BookingEngine {
    staff: StaffStore,
    services: ServiceStore,
    eligibility: EligibilityStore,
    appointments: AppointmentStore,
    hours: WorkingHoursCheck,
    conflicts: ConflictChecker,
    lifecycle: AppointmentLifecycle,
    locks: StaffSlotLocks,
}

impl BookingEngine {
    pub fn new(ctx: &AppContext) -> Self {
        Self {
            staff: StaffStore::new(Arc::clone(&ctx.store)),
            services: ServiceStore::new(Arc::clone(&ctx.store)),
            eligibility: EligibilityStore::new(Arc::clone(&ctx.store)),
            appointments: AppointmentStore::new(Arc::clone(&ctx.store)),
            hours: WorkingHoursCheck::new(Arc::clone(&ctx.store), ctx.config.schedule_utc_offset),
            conflicts: ConflictChecker::new(Arc::clone(&ctx.store)),
            lifecycle: AppointmentLifecycle::new(),
            locks: StaffSlotLocks::new(),
        }
    }

    /// Checks run in order and short-circuit on the first failure; the insert
    /// only happens after every check passes, so a failed booking writes
    /// nothing.
    pub async fn book_appointment(
        &self,
        request: BookAppointmentRequest,
    ) -> Result<Appointment, BookingError> {
        validate_booking_request(&request)?;

        info!(
            "Booking appointment for {} with staff {} at {}",
            request.customer_email, request.staff_id, request.appointment_datetime
        );

        // Everything from the first read to the insert runs under the staff
        // member's advisory lock, so a racing booking for the same staff sees
        // this one's row in its conflict check.
        let _slot_guard = self.locks.acquire(request.staff_id).await;

        let staff = self
            .staff
            .get(request.staff_id)
            .await
            .map_err(|e| BookingError::Storage(e.to_string()))?
            .ok_or(BookingError::StaffNotFound)?;

        let service = self
            .services
            .get(request.service_id)
            .await
            .map_err(|e| BookingError::Storage(e.to_string()))?
            .ok_or(BookingError::ServiceNotFound)?;

        let eligible = self
            .eligibility
            .is_assigned(staff.id, service.id)
            .await
            .map_err(|e| BookingError::Storage(e.to_string()))?;
        if !eligible {
            warn!(
                "Booking rejected: staff {} does not offer service {}",
                staff.id, service.id
            );
            return Err(BookingError::IneligibleService);
        }

        if !self
            .hours
            .admits(staff.id, request.appointment_datetime, service.duration_minutes)
            .await?
        {
            warn!(
                "Booking rejected: {} is outside working hours for staff {}",
                request.appointment_datetime, staff.id
            );
            return Err(BookingError::OutsideWorkingHours);
        }

        let end = request.appointment_datetime + Duration::minutes(service.duration_minutes as i64);
        if self
            .conflicts
            .has_conflict(staff.id, request.appointment_datetime, end, None)
            .await?
        {
            return Err(BookingError::SchedulingConflict);
        }

        let appointment = self
            .appointments
            .create(&NewAppointment {
                customer_name: request.customer_name,
                customer_email: request.customer_email,
                customer_phone: request.customer_phone,
                staff_id: staff.id,
                service_id: service.id,
                appointment_datetime: request.appointment_datetime,
                duration_minutes: service.duration_minutes,
                status: AppointmentStatus::Confirmed,
                notes: request.notes,
            })
            .await?;

        info!(
            "Appointment {} booked with staff {} for service {}",
            appointment.id, staff.id, service.id
        );
        Ok(appointment)
    }

    pub async fn cancel_appointment(&self, id: i64) -> Result<Appointment, BookingError> {
        debug!("Cancelling appointment {}", id);

        let appointment = self
            .appointments
            .get(id)
            .await?
            .ok_or(BookingError::AppointmentNotFound)?;

        self.lifecycle.validate_cancel(&appointment.status)?;

        let cancelled = self
            .appointments
            .set_status(id, AppointmentStatus::Cancelled)
            .await?
            .ok_or(BookingError::AppointmentNotFound)?;

        info!("Appointment {} cancelled", id);
        Ok(cancelled)
    }

    pub async fn complete_appointment(&self, id: i64) -> Result<Appointment, BookingError> {
        debug!("Completing appointment {}", id);

        let appointment = self
            .appointments
            .get(id)
            .await?
            .ok_or(BookingError::AppointmentNotFound)?;

        self.lifecycle.validate_complete(&appointment.status)?;

        let completed = self
            .appointments
            .set_status(id, AppointmentStatus::Completed)
            .await?
            .ok_or(BookingError::AppointmentNotFound)?;

        info!("Appointment {} completed", id);
        Ok(completed)
    }

    // ==========================================================================
    // PASS-THROUGH READS
    // ==========================================================================

    pub async fn get_appointment(&self, id: i64) -> Result<Appointment, BookingError> {
        self.appointments
            .get(id)
            .await?
            .ok_or(BookingError::AppointmentNotFound)
    }

    pub async fn list_appointments(&self) -> Result<Vec<Appointment>, BookingError> {
        self.appointments.list().await
    }

    pub async fn appointments_by_staff(&self, staff_id: i64) -> Result<Vec<Appointment>, BookingError> {
        self.appointments.list_by_staff(staff_id).await
    }

    pub async fn appointments_by_customer(&self, email: &str) -> Result<Vec<Appointment>, BookingError> {
        self.appointments.list_by_customer(email).await
    }

    pub async fn upcoming_appointments(
        &self,
        now: DateTime<Utc>,
        limit: Option<i64>,
    ) -> Result<Vec<Appointment>, BookingError> {
        let limit = match limit {
            Some(value) if value > 0 => value,
            _ => DEFAULT_UPCOMING_LIMIT,
        };
        self.appointments.list_upcoming(now, limit).await
    }

    pub async fn appointments_detailed(
        &self,
        staff_id: Option<i64>,
        customer_email: Option<&str>,
    ) -> Result<Vec<AppointmentDetail>, BookingError> {
        match (staff_id, customer_email) {
            (Some(staff_id), _) => self.appointments.list_detailed_by_staff(staff_id).await,
            (None, Some(email)) => self.appointments.list_detailed_by_customer(email).await,
            (None, None) => self.appointments.list_detailed().await,
        }
    }
}

fn validate_booking_request(request: &BookAppointmentRequest) -> Result<(), BookingError> {
    if request.customer_name.is_empty() {
        return Err(BookingError::Validation("customer name is required".to_string()));
    }
    if request.customer_email.is_empty() {
        return Err(BookingError::Validation("customer email is required".to_string()));
    }
    if !is_valid_email(&request.customer_email) {
        return Err(BookingError::Validation("invalid email format".to_string()));
    }
    if request.staff_id <= 0 {
        return Err(BookingError::Validation("valid staff ID is required".to_string()));
    }
    if request.service_id <= 0 {
        return Err(BookingError::Validation("valid service ID is required".to_string()));
    }
    Ok(())
}
