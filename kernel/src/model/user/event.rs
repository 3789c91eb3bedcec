use crate::model::id::UserId;
use chrono::NaiveDateTime;
use derive_new::new;

#[derive(new)]
pub struct CreateUser {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub password: String,
    pub registered_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileField {
    Name(String),
    Phone(String),
    Email(String),
    Password(String),
}

#[derive(new, Debug)]
pub struct UpdateProfile {
    pub user_id: UserId,
    pub field: ProfileField,
}

#[derive(new)]
pub struct DeactivateUser {
    pub user_id: UserId,
    pub deactivated_at: NaiveDateTime,
}
