use chrono::{DateTime, NaiveDate};
use serde::Serialize;
use serde_json::Value;

/// One failed check, in the shape clients of this API already parse
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub value: Value,
    pub msg: String,
    pub param: String,
    pub location: &'static str,
}

impl FieldError {
    pub fn body(param: &str, value: Option<&str>, msg: &str) -> Self {
        Self {
            value: value.map(|v| Value::String(v.to_string())).unwrap_or(Value::Null),
            msg: msg.to_string(),
            param: param.to_string(),
            location: "body",
        }
    }
}

/// Runs every check of one request body and hands back either all the
/// checked values or all the failures, in the order the checks were added.
///
/// Values nest as they are added: two checks yield `(((), a), b)`.
#[derive(Debug)]
pub struct Validator<T> {
    outcome: Result<T, Vec<FieldError>>,
}

impl Validator<()> {
    pub fn new() -> Self {
        Self { outcome: Ok(()) }
    }
}

impl Default for Validator<()> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Validator<T> {
    pub fn check<U>(self, next: Result<U, FieldError>) -> Validator<(T, U)> {
        let outcome = match (self.outcome, next) {
            (Ok(checked), Ok(value)) => Ok((checked, value)),
            (Ok(_), Err(error)) => Err(vec![error]),
            (Err(errors), Ok(_)) => Err(errors),
            (Err(mut errors), Err(error)) => {
                errors.push(error);
                Err(errors)
            }
        };
        Validator { outcome }
    }

    pub fn finish(self) -> Result<T, Vec<FieldError>> {
        self.outcome
    }
}

/// Present and not blank. The value is kept exactly as sent.
pub fn required(param: &str, value: Option<String>, msg: &str) -> Result<String, FieldError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        other => Err(FieldError::body(param, other.as_deref(), msg)),
    }
}

pub fn required_date(param: &str, value: Option<String>, missing: &str, invalid: &str) -> Result<NaiveDate, FieldError> {
    let raw = required(param, value, missing)?;
    parse_date(raw.trim()).ok_or_else(|| FieldError::body(param, Some(raw.as_str()), invalid))
}

/// Parse a date when one was supplied; blank counts as absent
pub fn optional_date(param: &str, value: Option<String>, msg: &str) -> Result<Option<NaiveDate>, FieldError> {
    match value.filter(|v| !v.trim().is_empty()) {
        Some(raw) => parse_date(raw.trim())
            .map(Some)
            .ok_or_else(|| FieldError::body(param, Some(raw.as_str()), msg)),
        None => Ok(None),
    }
}

/// Accepts `YYYY-MM-DD` or a full RFC 3339 timestamp
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

/// Optional free-text field: blank strings count as absent
pub fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
