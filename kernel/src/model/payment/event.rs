use crate::model::{
    id::{ReservationId, UserId},
    payment::PaymentMethod,
};
use chrono::NaiveDateTime;
use derive_new::new;

#[derive(new)]
pub struct CreatePayment {
    pub reservation_id: ReservationId,
    pub requested_by: UserId,
    pub method: PaymentMethod,
    pub paid_at: NaiveDateTime,
}
