use crate::model::{
    id::{ReservationId, UserId},
    reservation::{
        event::{CancelReservation, CreateReservation},
        OverstayAlert, Reservation,
    },
};
use chrono::NaiveDateTime;
use shared::error::AppResult;

pub trait ReservationRepository {
    // 予約を作成し、対象の駐車枠を reserved にする
    fn create(&self, event: CreateReservation) -> AppResult<ReservationId>;
    // 予約を取り消し、駐車枠を解放する
    fn cancel(&self, event: CancelReservation) -> AppResult<()>;
    fn find_by_id(&self, reservation_id: ReservationId) -> AppResult<Option<Reservation>>;
    fn find_by_user_id(&self, user_id: UserId) -> AppResult<Vec<Reservation>>;
    fn find_active_by_user_id(&self, user_id: UserId) -> AppResult<Vec<Reservation>>;
    // 有効かつ支払い完了の記録がない予約
    fn find_unpaid_by_user_id(&self, user_id: UserId) -> AppResult<Vec<Reservation>>;
    fn find_all(&self) -> AppResult<Vec<Reservation>>;
    // user_id が None のときは全ユーザーが対象
    fn find_overstays(
        &self,
        user_id: Option<UserId>,
        now: NaiveDateTime,
    ) -> AppResult<Vec<OverstayAlert>>;
}
