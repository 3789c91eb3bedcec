use std::fmt;

use chrono::NaiveDateTime;
use derive_new::new;
use garde::Validate;
use kernel::model::{
    id::UserId,
    user::{
        event::{CreateUser, ProfileField},
        User,
    },
};

use super::{email_address, format_time, phone_number, single_word};

#[derive(Debug, Validate, new)]
pub struct CreateUserRequest {
    #[garde(custom(single_word))]
    pub name: String,
    #[garde(custom(phone_number))]
    pub phone: String,
    #[garde(custom(email_address))]
    pub email: String,
    #[garde(custom(single_word))]
    pub password: String,
}

#[derive(new)]
pub struct CreateUserRequestWithTime(CreateUserRequest, NaiveDateTime);

impl From<CreateUserRequestWithTime> for CreateUser {
    fn from(value: CreateUserRequestWithTime) -> Self {
        let CreateUserRequestWithTime(
            CreateUserRequest {
                name,
                phone,
                email,
                password,
            },
            registered_at,
        ) = value;
        CreateUser {
            name,
            phone,
            email,
            password,
            registered_at,
        }
    }
}

#[derive(Debug, new)]
pub struct LoginRequest {
    pub phone: String,
    pub password: String,
}

#[derive(Debug, new)]
pub struct AdminLoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileFieldKind {
    Name,
    Phone,
    Email,
    Password,
}

#[derive(Debug, Validate, new)]
pub struct UpdateProfileRequest {
    #[garde(skip)]
    pub kind: ProfileFieldKind,
    #[garde(custom(valid_for(&self.kind)))]
    pub value: String,
}

fn valid_for(kind: &ProfileFieldKind) -> impl FnOnce(&str, &()) -> garde::Result + '_ {
    move |value, ctx| match kind {
        ProfileFieldKind::Phone => phone_number(value, ctx),
        ProfileFieldKind::Email => email_address(value, ctx),
        ProfileFieldKind::Name | ProfileFieldKind::Password => single_word(value, ctx),
    }
}

impl From<UpdateProfileRequest> for ProfileField {
    fn from(value: UpdateProfileRequest) -> Self {
        let UpdateProfileRequest { kind, value } = value;
        match kind {
            ProfileFieldKind::Name => ProfileField::Name(value),
            ProfileFieldKind::Phone => ProfileField::Phone(value),
            ProfileFieldKind::Email => ProfileField::Email(value),
            ProfileFieldKind::Password => ProfileField::Password(value),
        }
    }
}

/// One row of the user list. The password is never shown.
pub struct UserView {
    pub user_id: UserId,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub registered_at: NaiveDateTime,
    pub is_active: bool,
}

impl From<User> for UserView {
    fn from(value: User) -> Self {
        let User {
            user_id,
            name,
            phone,
            email,
            registered_at,
            is_active,
            ..
        } = value;
        Self {
            user_id,
            name,
            phone,
            email,
            registered_at,
            is_active,
        }
    }
}

impl fmt::Display for UserView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<6} {:<16} {:<12} {:<24} {:<17} {}",
            self.user_id,
            self.name,
            self.phone,
            self.email,
            format_time(&self.registered_at),
            if self.is_active { "Active" } else { "Inactive" }
        )
    }
}
