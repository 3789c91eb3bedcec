use kernel::model::{
    id::UserId,
    report::{DailyReport, SlotUsageReport, UserReport},
};
use registry::AppRegistry;
use shared::error::AppResult;

use crate::{handler::user::show_user_history, model::report::UserReportView};

pub fn generate_user_report(registry: &AppRegistry, user_id: UserId) -> AppResult<UserReportView> {
    let history = show_user_history(registry, user_id)?;
    Ok(UserReportView {
        report: UserReport::build(
            &history.vehicles,
            &history.reservations,
            &history.payments,
        ),
        user: history.user,
    })
}

pub fn generate_slot_usage_report(registry: &AppRegistry) -> AppResult<SlotUsageReport> {
    let slots = registry.slot_repository().find_all()?;
    Ok(SlotUsageReport::build(&slots))
}

pub fn generate_daily_report(registry: &AppRegistry) -> AppResult<DailyReport> {
    Ok(DailyReport::build(
        &registry.user_repository().find_all()?,
        &registry.vehicle_repository().find_all()?,
        &registry.slot_repository().find_all()?,
        &registry.reservation_repository().find_all()?,
        &registry.payment_repository().find_all()?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        handler::{
            fixture::{at, registry},
            payment::pay_reservation,
            reservation::reserve_slot,
            user::register_user,
            vehicle::register_vehicle,
        },
        model::{
            reservation::CreateReservationRequest, user::CreateUserRequest,
            vehicle::CreateVehicleRequest,
        },
    };
    use kernel::model::{
        id::SlotId, payment::PaymentMethod, report::CustomerTier, vehicle::VehicleType,
    };

    #[test]
    fn paid_booking_shows_up_in_every_report() {
        let registry = registry();
        let user_id = register_user(
            &registry,
            CreateUserRequest::new(
                "Sumi".into(),
                "01633333333".into(),
                "sumi@mail.com".into(),
                "pw".into(),
            ),
            at(7, 0),
        )
        .unwrap();
        let vehicle_id = register_vehicle(
            &registry,
            user_id,
            CreateVehicleRequest::new(VehicleType::Truck, "SYL-4".into(), "grey".into()),
            at(7, 1),
        )
        .unwrap();
        let reservation = reserve_slot(
            &registry,
            user_id,
            CreateReservationRequest::new(vehicle_id, SlotId::new(100), 2.0),
            at(8, 0),
        )
        .unwrap();
        let payment = pay_reservation(
            &registry,
            user_id,
            reservation.reservation_id,
            PaymentMethod::Nagad,
            at(8, 1),
        )
        .unwrap();
        assert_eq!(payment.amount, 100.0);

        let mine = generate_user_report(&registry, user_id).unwrap();
        assert_eq!(mine.report.payments.total_paid, 100.0);
        assert_eq!(mine.report.payments.mobile, 1);
        assert_eq!(mine.report.tier(), CustomerTier::Silver);

        let usage = generate_slot_usage_report(&registry).unwrap();
        assert_eq!(usage.total_occupied(), 1);
        assert_eq!(usage.hourly_revenue(), 50.0);

        let daily = generate_daily_report(&registry).unwrap();
        assert_eq!(daily.total_users, 1);
        assert_eq!(daily.bookings.active, 1);
        assert_eq!(daily.revenue, 100.0);
    }
}
