pub mod payment;
pub mod report;
pub mod reservation;
pub mod slot;
pub mod user;
pub mod vehicle;

use chrono::NaiveDateTime;

// データファイルは空白区切りなので、文字列項目に空白は許さない
pub(crate) fn single_word(value: &str, _: &()) -> garde::Result {
    if value.is_empty() {
        return Err(garde::Error::new("must not be empty"));
    }
    if value.chars().any(char::is_whitespace) {
        return Err(garde::Error::new("must not contain spaces"));
    }
    Ok(())
}

pub(crate) fn phone_number(value: &str, _: &()) -> garde::Result {
    if value.len() != 11 || !value.chars().all(|c| c.is_ascii_digit()) {
        return Err(garde::Error::new("Invalid phone number! Must be 11 digits."));
    }
    Ok(())
}

pub(crate) fn email_address(value: &str, ctx: &()) -> garde::Result {
    single_word(value, ctx)?;
    if value.len() < 5 || value.matches('@').count() != 1 || !value.contains('.') {
        return Err(garde::Error::new("Invalid email format!"));
    }
    Ok(())
}

pub(crate) fn format_time(at: &NaiveDateTime) -> String {
    at.format("%Y-%m-%d %H:%M").to_string()
}
