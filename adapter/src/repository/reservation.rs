use chrono::NaiveDateTime;
use derive_new::new;
use kernel::model::{
    id::{ReservationId, UserId},
    reservation::{
        event::{CancelReservation, CreateReservation},
        is_valid_duration, quote_amount, Overstay, OverstayAlert, Reservation, ReservationStatus,
    },
    round_cents,
    slot::SlotHolder,
};
use kernel::repository::reservation::ReservationRepository;
use shared::error::{AppError, AppResult};

use crate::{database::Database, repository::release_slot};

#[derive(new)]
pub struct ReservationRepositoryImpl {
    db: Database,
}

impl ReservationRepository for ReservationRepositoryImpl {
    fn create(&self, event: CreateReservation) -> AppResult<ReservationId> {
        // ファイルには小数点以下 2 桁で保存するので、先に丸めてから検証する
        let duration_hours = round_cents(event.duration_hours);
        if !is_valid_duration(duration_hours) {
            return Err(AppError::InvalidInput(
                "Invalid duration! Please enter 1-24 hours.".into(),
            ));
        }

        let mut guard = self.db.write();
        let tables = &mut *guard;

        let user = tables.users.get(&event.user_id).ok_or_else(|| {
            AppError::EntityNotFound(format!("User {} not found", event.user_id))
        })?;
        if !user.is_active {
            return Err(AppError::UnprocessableEntity(format!(
                "User {} is deactivated",
                event.user_id
            )));
        }

        let vehicle = tables.vehicles.get(&event.vehicle_id).ok_or_else(|| {
            AppError::EntityNotFound(format!("Vehicle {} not found", event.vehicle_id))
        })?;
        if vehicle.user_id != event.user_id {
            return Err(AppError::ForbiddenOperation);
        }
        let vehicle_type = vehicle.vehicle_type;

        let reservation_id = tables.next_reservation_id();
        let slot = tables.slots.get_mut(&event.slot_id).ok_or_else(|| {
            AppError::EntityNotFound(format!("Slot {} not found", event.slot_id))
        })?;
        if slot.slot_type != vehicle_type {
            return Err(AppError::UnprocessableEntity(format!(
                "Slot {} is for {} vehicles, not {}",
                slot.slot_id,
                slot.slot_type.label(),
                vehicle_type.label()
            )));
        }
        if !slot.is_available() {
            return Err(AppError::UnprocessableEntity(format!(
                "Slot {} is not available",
                slot.slot_id
            )));
        }

        slot.reserve(SlotHolder {
            vehicle_id: event.vehicle_id,
            user_id: event.user_id,
            reserved_at: event.reserved_at,
        });
        let reservation = Reservation {
            reservation_id,
            user_id: event.user_id,
            slot_id: event.slot_id,
            vehicle_id: event.vehicle_id,
            start_time: event.reserved_at,
            end_time: None,
            status: ReservationStatus::Active,
            duration_hours,
            total_amount: quote_amount(duration_hours, vehicle_type),
        };
        tracing::info!(
            %reservation_id,
            user_id = %event.user_id,
            slot_id = %event.slot_id,
            duration_hours,
            total_amount = reservation.total_amount,
            "slot reserved"
        );
        tables.reservations.insert(reservation_id, reservation);
        Ok(reservation_id)
    }

    fn cancel(&self, event: CancelReservation) -> AppResult<()> {
        let mut guard = self.db.write();
        let tables = &mut *guard;

        let reservation = tables
            .reservations
            .get_mut(&event.reservation_id)
            .ok_or_else(|| {
                AppError::EntityNotFound(format!(
                    "Reservation {} not found",
                    event.reservation_id
                ))
            })?;
        if !event.requested_by.may_act_for(reservation.user_id) {
            return Err(AppError::ForbiddenOperation);
        }
        if !reservation.is_active() {
            return Err(AppError::UnprocessableEntity(format!(
                "Reservation {} is {}, not active",
                reservation.reservation_id, reservation.status
            )));
        }

        // 支払い済みでも返金はしない
        reservation.cancel(event.cancelled_at);
        release_slot(&mut tables.slots, reservation);
        tracing::info!(
            reservation_id = %event.reservation_id,
            requested_by = ?event.requested_by,
            "reservation cancelled"
        );
        Ok(())
    }

    fn find_by_id(&self, reservation_id: ReservationId) -> AppResult<Option<Reservation>> {
        Ok(self.db.read().reservations.get(&reservation_id).cloned())
    }

    fn find_by_user_id(&self, user_id: UserId) -> AppResult<Vec<Reservation>> {
        Ok(self
            .db
            .read()
            .reservations
            .values()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }

    fn find_active_by_user_id(&self, user_id: UserId) -> AppResult<Vec<Reservation>> {
        Ok(self
            .db
            .read()
            .reservations
            .values()
            .filter(|r| r.user_id == user_id && r.is_active())
            .cloned()
            .collect())
    }

    fn find_unpaid_by_user_id(&self, user_id: UserId) -> AppResult<Vec<Reservation>> {
        let tables = self.db.read();
        Ok(tables
            .reservations
            .values()
            .filter(|r| {
                r.user_id == user_id
                    && r.is_active()
                    && !tables.has_completed_payment(r.reservation_id)
            })
            .cloned()
            .collect())
    }

    fn find_all(&self) -> AppResult<Vec<Reservation>> {
        Ok(self.db.read().reservations.values().cloned().collect())
    }

    fn find_overstays(
        &self,
        user_id: Option<UserId>,
        now: NaiveDateTime,
    ) -> AppResult<Vec<OverstayAlert>> {
        let tables = self.db.read();
        let alerts = tables
            .reservations
            .values()
            .filter(|r| user_id.map_or(true, |id| r.user_id == id))
            .filter_map(|r| {
                let slot_type = tables.slots.get(&r.slot_id)?.slot_type;
                let overstay = Overstay::assess(r, slot_type, now)?;
                Some(OverstayAlert {
                    reservation: r.clone(),
                    slot_type,
                    overstay,
                })
            })
            .collect();
        Ok(alerts)
    }
}
