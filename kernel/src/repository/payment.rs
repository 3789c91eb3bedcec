use crate::model::{
    id::{PaymentId, ReservationId, UserId},
    payment::{event::CreatePayment, Payment},
};
use shared::error::AppResult;

pub trait PaymentRepository {
    // 支払いを記録し、駐車枠を occupied にする
    fn create(&self, event: CreatePayment) -> AppResult<PaymentId>;
    fn has_completed_payment(&self, reservation_id: ReservationId) -> AppResult<bool>;
    fn find_by_user_id(&self, user_id: UserId) -> AppResult<Vec<Payment>>;
    fn find_all(&self) -> AppResult<Vec<Payment>>;
}
