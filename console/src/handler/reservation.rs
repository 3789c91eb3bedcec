use chrono::NaiveDateTime;
use kernel::model::{
    actor::Actor,
    id::{ReservationId, UserId},
    reservation::{event::CancelReservation, OverstayAlert, Reservation},
};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::model::reservation::{CreateReservationRequest, CreateReservationRequestWithUser};

pub fn reserve_slot(
    registry: &AppRegistry,
    user_id: UserId,
    req: CreateReservationRequest,
    now: NaiveDateTime,
) -> AppResult<Reservation> {
    let reservation_id = registry
        .reservation_repository()
        .create(CreateReservationRequestWithUser::new(user_id, req, now).into())?;
    find_reservation(registry, reservation_id)
}

pub fn cancel_reservation(
    registry: &AppRegistry,
    requested_by: Actor,
    reservation_id: ReservationId,
    now: NaiveDateTime,
) -> AppResult<()> {
    registry
        .reservation_repository()
        .cancel(CancelReservation::new(reservation_id, requested_by, now))
}

pub fn find_reservation(
    registry: &AppRegistry,
    reservation_id: ReservationId,
) -> AppResult<Reservation> {
    registry
        .reservation_repository()
        .find_by_id(reservation_id)
        .and_then(|r| match r {
            Some(r) => Ok(r),
            None => Err(AppError::EntityNotFound(format!(
                "Reservation {reservation_id} not found"
            ))),
        })
}

pub fn show_booking_history(
    registry: &AppRegistry,
    user_id: UserId,
) -> AppResult<Vec<Reservation>> {
    registry.reservation_repository().find_by_user_id(user_id)
}

pub fn show_active_reservations(
    registry: &AppRegistry,
    user_id: UserId,
) -> AppResult<Vec<Reservation>> {
    registry.reservation_repository().find_active_by_user_id(user_id)
}

pub fn show_unpaid_reservations(
    registry: &AppRegistry,
    user_id: UserId,
) -> AppResult<Vec<Reservation>> {
    registry.reservation_repository().find_unpaid_by_user_id(user_id)
}

pub fn show_all_active_reservations(registry: &AppRegistry) -> AppResult<Vec<Reservation>> {
    Ok(registry
        .reservation_repository()
        .find_all()?
        .into_iter()
        .filter(Reservation::is_active)
        .collect())
}

/// `None` checks every customer.
pub fn check_overstays(
    registry: &AppRegistry,
    user_id: Option<UserId>,
    now: NaiveDateTime,
) -> AppResult<Vec<OverstayAlert>> {
    registry.reservation_repository().find_overstays(user_id, now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        handler::{
            fixture::{at, registry},
            user::register_user,
            vehicle::register_vehicle,
        },
        model::{user::CreateUserRequest, vehicle::CreateVehicleRequest},
    };
    use kernel::model::{
        id::{SlotId, VehicleId},
        vehicle::VehicleType,
    };

    fn customer_with_truck(registry: &AppRegistry) -> (UserId, VehicleId) {
        let user_id = register_user(
            registry,
            CreateUserRequest::new(
                "Jamal".into(),
                "01922222222".into(),
                "jamal@mail.com".into(),
                "pw".into(),
            ),
            at(7, 0),
        )
        .unwrap();
        let vehicle_id = register_vehicle(
            registry,
            user_id,
            CreateVehicleRequest::new(VehicleType::Truck, "CTG-9".into(), "blue".into()),
            at(7, 1),
        )
        .unwrap();
        (user_id, vehicle_id)
    }

    #[test]
    fn reserve_returns_the_quote() {
        let registry = registry();
        let (user_id, vehicle_id) = customer_with_truck(&registry);

        let reservation = reserve_slot(
            &registry,
            user_id,
            CreateReservationRequest::new(vehicle_id, SlotId::new(81), 1.5),
            at(8, 0),
        )
        .unwrap();
        assert_eq!(reservation.total_amount, 75.0);
        assert_eq!(show_active_reservations(&registry, user_id).unwrap().len(), 1);
        assert_eq!(show_unpaid_reservations(&registry, user_id).unwrap().len(), 1);
    }

    #[test]
    fn administrator_cancels_and_overstays_are_cleared() {
        let registry = registry();
        let (user_id, vehicle_id) = customer_with_truck(&registry);
        let reservation = reserve_slot(
            &registry,
            user_id,
            CreateReservationRequest::new(vehicle_id, SlotId::new(90), 1.0),
            at(8, 0),
        )
        .unwrap();

        let alerts = check_overstays(&registry, None, at(10, 0)).unwrap();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].overstay.additional_charge, 75.0);

        cancel_reservation(
            &registry,
            Actor::Administrator,
            reservation.reservation_id,
            at(10, 0),
        )
        .unwrap();
        assert!(check_overstays(&registry, None, at(10, 0)).unwrap().is_empty());
        assert!(show_all_active_reservations(&registry).unwrap().is_empty());
        assert_eq!(show_booking_history(&registry, user_id).unwrap().len(), 1);
    }
}
