use std::fmt::Display;
use std::str::FromStr;

use chrono::NaiveDateTime;

use crate::error::{PeakListError, Result};
use crate::xml::Element;

/// Timestamp layout used by every date attribute in the format
pub const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

fn invalid(e: &Element, attr_name: &str, value: &str, reason: impl Display) -> PeakListError {
    PeakListError::InvalidAttribute {
        element: e.name.clone(),
        attribute: attr_name.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn attr_parsed<T>(e: &Element, attr_name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: Display,
{
    match e.attribute(attr_name) {
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|err| invalid(e, attr_name, value, err)),
        None => Ok(None),
    }
}

pub fn attr_string(e: &Element, attr_name: &str) -> Option<String> {
    e.attribute(attr_name).map(str::to_string)
}

pub fn attr_i64(e: &Element, attr_name: &str) -> Result<Option<i64>> {
    attr_parsed(e, attr_name)
}

pub fn attr_f64(e: &Element, attr_name: &str) -> Result<Option<f64>> {
    attr_parsed(e, attr_name)
}

pub fn attr_datetime(e: &Element, attr_name: &str) -> Result<Option<NaiveDateTime>> {
    match e.attribute(attr_name) {
        Some(value) => NaiveDateTime::parse_from_str(value.trim(), DATETIME_FORMAT)
            .map(Some)
            .map_err(|err| invalid(e, attr_name, value, err)),
        None => Ok(None),
    }
}

pub fn format_datetime(value: &NaiveDateTime) -> String {
    value.format(DATETIME_FORMAT).to_string()
}

/// Sets the attribute only when a value is present
pub fn set_attr_optional<T: ToString>(e: &mut Element, attr_name: &str, value: Option<T>) {
    if let Some(value) = value {
        e.set_attribute(attr_name, value.to_string());
    }
}
