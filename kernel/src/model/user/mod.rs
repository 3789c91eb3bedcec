use crate::model::id::UserId;
use chrono::NaiveDateTime;

pub mod event;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub user_id: UserId,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub password: String,
    pub registered_at: NaiveDateTime,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserSearch {
    Name(String),
    Phone(String),
    Email(String),
    Id(UserId),
}

impl UserSearch {
    pub fn matches(&self, user: &User) -> bool {
        match self {
            UserSearch::Name(term) => user.name.contains(term.as_str()),
            UserSearch::Phone(term) => user.phone.contains(term.as_str()),
            UserSearch::Email(term) => user.email.contains(term.as_str()),
            UserSearch::Id(user_id) => user.user_id == *user_id,
        }
    }
}
