use chrono::NaiveDateTime;
use kernel::model::{
    id::{ReservationId, UserId},
    payment::{event::CreatePayment, Payment, PaymentMethod},
};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

pub fn pay_reservation(
    registry: &AppRegistry,
    user_id: UserId,
    reservation_id: ReservationId,
    method: PaymentMethod,
    now: NaiveDateTime,
) -> AppResult<Payment> {
    let payment_repository = registry.payment_repository();
    let payment_id =
        payment_repository.create(CreatePayment::new(reservation_id, user_id, method, now))?;
    payment_repository
        .find_by_user_id(user_id)?
        .into_iter()
        .find(|p| p.payment_id == payment_id)
        .ok_or_else(|| AppError::EntityNotFound(format!("Payment {payment_id} not found")))
}

pub fn show_payment_history(registry: &AppRegistry, user_id: UserId) -> AppResult<Vec<Payment>> {
    registry.payment_repository().find_by_user_id(user_id)
}
