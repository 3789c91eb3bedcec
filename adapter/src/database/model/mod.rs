use std::{fmt::Display, str::FromStr};

use chrono::NaiveDateTime;

pub mod payment;
pub mod reservation;
pub mod slot;
pub mod user;
pub mod vehicle;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H:%M:%S";
// 空文字は空白区切りで読めないため、代わりにこの記号を書き出す
pub const EMPTY_FIELD: &str = "-";

/// One line of a whitespace separated data file.
pub trait Record: Sized {
    const FIELDS: usize;

    fn from_fields(fields: &[&str]) -> Result<Self, String>;

    fn to_line(&self) -> String;

    fn parse_line(line: &str) -> Result<Self, String> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != Self::FIELDS {
            return Err(format!(
                "expected {} fields, found {}",
                Self::FIELDS,
                fields.len()
            ));
        }
        Self::from_fields(&fields)
    }
}

pub fn parse_field<T>(value: &str, name: &str) -> Result<T, String>
where
    T: FromStr,
    T::Err: Display,
{
    value
        .parse::<T>()
        .map_err(|e| format!("invalid {name} `{value}`: {e}"))
}

pub fn parse_flag(value: &str, name: &str) -> Result<bool, String> {
    match value {
        "1" => Ok(true),
        "0" => Ok(false),
        _ => Err(format!("invalid {name} `{value}`: expected 0 or 1")),
    }
}

pub fn parse_timestamp(value: &str, name: &str) -> Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)
        .map_err(|e| format!("invalid {name} `{value}`: {e}"))
}

pub fn parse_optional_timestamp(value: &str, name: &str) -> Result<Option<NaiveDateTime>, String> {
    if value == EMPTY_FIELD {
        Ok(None)
    } else {
        parse_timestamp(value, name).map(Some)
    }
}

pub fn format_timestamp(value: &NaiveDateTime) -> String {
    value.format(TIMESTAMP_FORMAT).to_string()
}

pub fn format_optional_timestamp(value: Option<&NaiveDateTime>) -> String {
    value
        .map(format_timestamp)
        .unwrap_or_else(|| EMPTY_FIELD.to_string())
}

pub fn format_flag(value: bool) -> &'static str {
    if value {
        "1"
    } else {
        "0"
    }
}
