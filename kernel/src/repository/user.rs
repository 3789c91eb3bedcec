use crate::model::{
    id::{ReservationId, UserId},
    user::{
        event::{CreateUser, DeactivateUser, UpdateProfile},
        User, UserSearch,
    },
};
use shared::error::AppResult;

pub trait UserRepository {
    // 電話番号・メールアドレスの重複を確認して登録する
    fn create(&self, event: CreateUser) -> AppResult<UserId>;
    // 有効なユーザーのみログインできる
    fn authenticate(&self, phone: &str, password: &str) -> AppResult<User>;
    fn update_profile(&self, event: UpdateProfile) -> AppResult<()>;
    // 無効化と同時に有効な予約をすべて取り消す。取り消した予約 ID を返す
    fn deactivate(&self, event: DeactivateUser) -> AppResult<Vec<ReservationId>>;
    fn find_by_id(&self, user_id: UserId) -> AppResult<Option<User>>;
    fn find_all(&self) -> AppResult<Vec<User>>;
    fn search(&self, query: &UserSearch) -> AppResult<Vec<User>>;
}
