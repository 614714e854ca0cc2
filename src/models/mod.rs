use chrono::{DateTime, Utc};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde_json::Value;

pub mod alert;
pub mod application;
pub mod job;
pub mod question;
pub mod resume;

pub use alert::{Alert, AlertFilters, AlertFrequency, SalaryBand};
pub use application::{Application, ApplicationStatus};
pub use job::{Job, SalaryRange};
pub use question::{InterviewQuestion, QuestionCategory, QuestionDifficulty};
pub use resume::Resume;

// Normalization helpers shared by the entity modules. Each accepts the raw
// field straight out of a record and produces the documented default when the
// field is absent or malformed; none of them can fail.

pub(crate) fn text(value: Option<&Value>) -> String {
    value.and_then(Value::as_str).unwrap_or_default().to_string()
}

/// Splits a delimited text blob into trimmed, non-empty entries. Fields
/// already carried as JSON arrays are accepted as-is.
pub(crate) fn split_list(value: Option<&Value>, delimiter: char) -> Vec<String> {
    let parts: Vec<&str> = match value {
        Some(Value::String(s)) => s.split(delimiter).collect(),
        Some(Value::Array(items)) => items.iter().filter_map(Value::as_str).collect(),
        _ => return Vec::new(),
    };
    parts
        .into_iter()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(String::from)
        .collect()
}

pub(crate) fn decimal(value: Option<&Value>) -> Decimal {
    match value {
        Some(Value::Number(n)) => n
            .as_i64()
            .map(Decimal::from)
            .or_else(|| n.as_f64().and_then(Decimal::from_f64))
            .unwrap_or(Decimal::ZERO),
        Some(Value::String(s)) => s.parse().unwrap_or(Decimal::ZERO),
        _ => Decimal::ZERO,
    }
}

pub(crate) fn boolean(value: Option<&Value>) -> bool {
    value.and_then(Value::as_bool).unwrap_or(false)
}

pub(crate) fn optional_timestamp(value: Option<&Value>) -> Option<DateTime<Utc>> {
    value
        .and_then(Value::as_str)
        .and_then(crate::utils::time::from_rfc3339)
}

/// Required timestamps fall back to the Unix epoch rather than "now" so that
/// normalization stays pure and idempotent.
pub(crate) fn timestamp(value: Option<&Value>) -> DateTime<Utc> {
    optional_timestamp(value).unwrap_or(DateTime::UNIX_EPOCH)
}
