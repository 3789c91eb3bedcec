use derive_new::new;
use kernel::model::{
    id::{PaymentId, ReservationId, UserId},
    payment::{event::CreatePayment, Payment, PaymentStatus},
    slot::SlotState,
};
use kernel::repository::payment::PaymentRepository;
use shared::error::{AppError, AppResult};

use crate::database::Database;

#[derive(new)]
pub struct PaymentRepositoryImpl {
    db: Database,
}

impl PaymentRepository for PaymentRepositoryImpl {
    fn create(&self, event: CreatePayment) -> AppResult<PaymentId> {
        let mut guard = self.db.write();
        let tables = &mut *guard;

        let reservation = tables
            .reservations
            .get(&event.reservation_id)
            .ok_or_else(|| {
                AppError::EntityNotFound(format!(
                    "Reservation {} not found",
                    event.reservation_id
                ))
            })?;
        if reservation.user_id != event.requested_by {
            return Err(AppError::ForbiddenOperation);
        }
        if !reservation.is_active() {
            return Err(AppError::UnprocessableEntity(format!(
                "Reservation {} is {}, not active",
                reservation.reservation_id, reservation.status
            )));
        }
        if tables.has_completed_payment(event.reservation_id) {
            return Err(AppError::UnprocessableEntity(format!(
                "Reservation {} is already paid",
                event.reservation_id
            )));
        }

        // 予約中 (未払い) の枠だけが占有に移れる
        let slot = tables
            .slots
            .get_mut(&reservation.slot_id)
            .filter(|slot| {
                matches!(slot.state, SlotState::Reserved(holder)
                    if holder.vehicle_id == reservation.vehicle_id)
            })
            .ok_or_else(|| {
                tracing::warn!(
                    slot_id = %reservation.slot_id,
                    reservation_id = %reservation.reservation_id,
                    "paid reservation does not hold its slot"
                );
                AppError::UnprocessableEntity(format!(
                    "Slot {} is not reserved for reservation {}",
                    reservation.slot_id, reservation.reservation_id
                ))
            })?;
        slot.occupy();

        let payment_id = tables.next_payment_id();
        let payment = Payment {
            payment_id,
            user_id: reservation.user_id,
            reservation_id: reservation.reservation_id,
            amount: reservation.total_amount,
            method: event.method,
            paid_at: event.paid_at,
            status: PaymentStatus::Completed,
        };
        tracing::info!(
            %payment_id,
            reservation_id = %event.reservation_id,
            amount = payment.amount,
            method = %payment.method,
            "payment completed"
        );
        tables.payments.insert(payment_id, payment);
        Ok(payment_id)
    }

    fn has_completed_payment(&self, reservation_id: ReservationId) -> AppResult<bool> {
        Ok(self.db.read().has_completed_payment(reservation_id))
    }

    fn find_by_user_id(&self, user_id: UserId) -> AppResult<Vec<Payment>> {
        Ok(self
            .db
            .read()
            .payments
            .values()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect())
    }

    fn find_all(&self) -> AppResult<Vec<Payment>> {
        Ok(self.db.read().payments.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{
        fixture::{at, seeded},
        reservation::ReservationRepositoryImpl,
    };
    use kernel::{
        model::{
            actor::Actor,
            id::{SlotId, VehicleId},
            payment::PaymentMethod,
            reservation::event::{CancelReservation, CreateReservation},
            slot::{SlotHolder, SlotStatus},
        },
        repository::reservation::ReservationRepository,
    };

    fn booked(db: &Database) -> ReservationId {
        ReservationRepositoryImpl::new(db.clone())
            .create(CreateReservation::new(
                UserId::new(6),
                VehicleId::new(14),
                SlotId::new(85),
                2.0,
                at(10, 0),
            ))
            .unwrap()
    }

    #[test]
    fn payment_charges_the_quoted_amount_and_occupies_the_slot() {
        let db = seeded();
        let rid = booked(&db);
        let repo = PaymentRepositoryImpl::new(db.clone());

        let pid = repo
            .create(CreatePayment::new(
                rid,
                UserId::new(6),
                PaymentMethod::Nagad,
                at(10, 1),
            ))
            .unwrap();
        assert_eq!(pid, PaymentId::new(1));

        let paid = repo.find_by_user_id(UserId::new(6)).unwrap();
        assert_eq!(paid.len(), 1);
        assert_eq!(paid[0].amount, 100.0);
        assert_eq!(paid[0].status, PaymentStatus::Completed);
        assert!(repo.has_completed_payment(rid).unwrap());

        let tables = db.read();
        let slot = &tables.slots[&SlotId::new(85)];
        assert_eq!(slot.status(), SlotStatus::Occupied);
        assert_eq!(slot.holder().map(|h| h.vehicle_id), Some(VehicleId::new(14)));
        assert!(tables.reservations[&rid].is_active());
    }

    #[test]
    fn second_payment_is_rejected() {
        let db = seeded();
        let rid = booked(&db);
        let repo = PaymentRepositoryImpl::new(db.clone());
        repo.create(CreatePayment::new(
            rid,
            UserId::new(6),
            PaymentMethod::Cash,
            at(10, 1),
        ))
        .unwrap();

        let again = repo.create(CreatePayment::new(
            rid,
            UserId::new(6),
            PaymentMethod::Card,
            at(10, 2),
        ));
        assert!(
            matches!(again, Err(AppError::UnprocessableEntity(m)) if m.contains("already paid"))
        );
        assert_eq!(repo.find_all().unwrap().len(), 1);
    }

    #[test]
    fn only_the_owner_pays_for_an_active_reservation() {
        let db = seeded();
        let rid = booked(&db);
        let repo = PaymentRepositoryImpl::new(db.clone());

        let stranger = repo.create(CreatePayment::new(
            rid,
            UserId::new(5),
            PaymentMethod::Cash,
            at(10, 1),
        ));
        assert!(matches!(stranger, Err(AppError::ForbiddenOperation)));

        ReservationRepositoryImpl::new(db.clone())
            .cancel(CancelReservation::new(
                rid,
                Actor::Customer(UserId::new(6)),
                at(10, 5),
            ))
            .unwrap();
        let cancelled = repo.create(CreatePayment::new(
            rid,
            UserId::new(6),
            PaymentMethod::Cash,
            at(10, 6),
        ));
        assert!(matches!(cancelled, Err(AppError::UnprocessableEntity(_))));
        assert!(db.read().slots[&SlotId::new(85)].is_available());

        let missing = repo.create(CreatePayment::new(
            ReservationId::new(77),
            UserId::new(6),
            PaymentMethod::Cash,
            at(10, 6),
        ));
        assert!(matches!(missing, Err(AppError::EntityNotFound(_))));
    }

    #[test]
    fn payment_requires_the_slot_to_be_reserved_for_the_booking() {
        let db = seeded();
        let rid = booked(&db);
        let repo = PaymentRepositoryImpl::new(db.clone());
        db.write().slots.get_mut(&SlotId::new(85)).unwrap().release();

        let res = repo.create(CreatePayment::new(
            rid,
            UserId::new(6),
            PaymentMethod::Card,
            at(10, 1),
        ));
        assert!(matches!(res, Err(AppError::UnprocessableEntity(m)) if m.contains("not reserved")));
        assert!(repo.find_all().unwrap().is_empty());
        assert!(db.read().slots[&SlotId::new(85)].is_available());

        // 別の車両が押さえている枠でも支払えない
        db.write()
            .slots
            .get_mut(&SlotId::new(85))
            .unwrap()
            .reserve(SlotHolder {
                vehicle_id: VehicleId::new(99),
                user_id: UserId::new(6),
                reserved_at: at(10, 0),
            });
        let res = repo.create(CreatePayment::new(
            rid,
            UserId::new(6),
            PaymentMethod::Card,
            at(10, 2),
        ));
        assert!(matches!(res, Err(AppError::UnprocessableEntity(_))));
        assert_eq!(db.read().slots[&SlotId::new(85)].status(), SlotStatus::Reserved);
        assert!(!repo.has_completed_payment(rid).unwrap());
    }
}
