//! Explicit schema checks for request bodies.
//!
//! Handlers take the body as untyped JSON and run it through a [`Schema`],
//! which records every failing field instead of stopping at the first one.

use serde_json::{Map, Value};
use time::{
    format_description::well_known::Rfc3339, macros::format_description, Date, OffsetDateTime,
};

use crate::error::{AppError, FieldIssue};

pub struct Schema<'a> {
    fields: Option<&'a Map<String, Value>>,
    issues: Vec<FieldIssue>,
}

impl<'a> Schema<'a> {
    pub fn new(body: &'a Value) -> Self {
        match body.as_object() {
            Some(fields) => Self {
                fields: Some(fields),
                issues: Vec::new(),
            },
            None => Self {
                fields: None,
                issues: vec![FieldIssue::new("body", "expected a JSON object")],
            },
        }
    }

    /// A field that must be present. `aliases` are accepted alternative names.
    pub fn required<T>(
        &mut self,
        name: &str,
        aliases: &[&str],
        parse: fn(&Value) -> Result<T, &'static str>,
    ) -> Option<T> {
        let fields = self.fields?;
        match lookup(fields, name, aliases) {
            Some(value) => self.parse_value(name, value, parse),
            None => {
                self.issues.push(FieldIssue::new(name, "required"));
                None
            }
        }
    }

    /// A field that may be absent or null.
    pub fn optional<T>(
        &mut self,
        name: &str,
        aliases: &[&str],
        parse: fn(&Value) -> Result<T, &'static str>,
    ) -> Option<T> {
        let value = lookup(self.fields?, name, aliases)?;
        self.parse_value(name, value, parse)
    }

    fn parse_value<T>(
        &mut self,
        name: &str,
        value: &Value,
        parse: fn(&Value) -> Result<T, &'static str>,
    ) -> Option<T> {
        match parse(value) {
            Ok(parsed) => Some(parsed),
            Err(message) => {
                self.issues.push(FieldIssue::new(name, message));
                None
            }
        }
    }

    pub fn into_error(self) -> AppError {
        AppError::Validation(self.issues)
    }

    pub fn check(self) -> Result<(), AppError> {
        if self.issues.is_empty() {
            Ok(())
        } else {
            Err(self.into_error())
        }
    }
}

fn lookup<'v>(fields: &'v Map<String, Value>, name: &str, aliases: &[&str]) -> Option<&'v Value> {
    std::iter::once(&name)
        .chain(aliases)
        .filter_map(|key| fields.get(*key))
        .find(|value| !value.is_null())
}

pub fn string(value: &Value) -> Result<String, &'static str> {
    value
        .as_str()
        .map(str::to_owned)
        .ok_or("expected a string")
}

/// RFC 3339 timestamps, or a bare `YYYY-MM-DD` date meaning midnight UTC.
pub fn timestamp(value: &Value) -> Result<OffsetDateTime, &'static str> {
    const INVALID: &str = "expected an RFC 3339 timestamp or a YYYY-MM-DD date";
    let raw = value.as_str().ok_or(INVALID)?;
    if let Ok(parsed) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Ok(parsed);
    }
    Date::parse(raw, format_description!("[year]-[month]-[day]"))
        .map(|date| date.midnight().assume_utc())
        .map_err(|_| INVALID)
}

/// Booleans, 0/1, or their string spellings.
pub fn flag(value: &Value) -> Result<bool, &'static str> {
    const INVALID: &str = "expected a boolean";
    match value {
        Value::Bool(b) => Ok(*b),
        Value::Number(n) => match n.as_i64() {
            Some(0) => Ok(false),
            Some(1) => Ok(true),
            _ => Err(INVALID),
        },
        Value::String(s) => match s.as_str() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            _ => Err(INVALID),
        },
        _ => Err(INVALID),
    }
}
