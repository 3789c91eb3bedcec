use kernel::model::{id::UserId, user::User};

use super::{format_flag, format_timestamp, parse_field, parse_flag, parse_timestamp, Record};

// users.txt: id name phone email password reg_date is_active
pub struct UserRow(pub User);

impl Record for UserRow {
    const FIELDS: usize = 7;

    fn from_fields(fields: &[&str]) -> Result<Self, String> {
        Ok(Self(User {
            user_id: parse_field::<UserId>(fields[0], "user id")?,
            name: fields[1].to_string(),
            phone: fields[2].to_string(),
            email: fields[3].to_string(),
            password: fields[4].to_string(),
            registered_at: parse_timestamp(fields[5], "registration date")?,
            is_active: parse_flag(fields[6], "active flag")?,
        }))
    }

    fn to_line(&self) -> String {
        let User {
            user_id,
            name,
            phone,
            email,
            password,
            registered_at,
            is_active,
        } = &self.0;
        format!(
            "{} {} {} {} {} {} {}",
            user_id,
            name,
            phone,
            email,
            password,
            format_timestamp(registered_at),
            format_flag(*is_active)
        )
    }
}

impl From<UserRow> for User {
    fn from(value: UserRow) -> Self {
        value.0
    }
}
