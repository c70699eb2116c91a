//! Internal helpers for input normalization and parsing.
//!
//! These utilities are **not** part of the public API. They centralize
//! validation and mapping logic so the engine enforces consistent invariants.

use chrono::NaiveDate;
use crate::{EngineError, ResultEngine};

/// Storage format for calendar dates.
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

/// Trim and collapse inner whitespace of a required label.
pub(crate) fn normalize_required_name(value: &str, label: &str) -> ResultEngine<String> {
    normalize_optional_text(Some(value))
        .ok_or_else(|| EngineError::InvalidName(format!("{label} name must not be empty")))
}

/// Trim and collapse inner whitespace; blank input means "no value".
pub(crate) fn normalize_optional_text(value: Option<&str>) -> Option<String> {
    let value = value?;
    let mut out = String::new();
    for token in value.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(token);
    }
    if out.is_empty() { None } else { Some(out) }
}

/// Parse a stored `YYYY-MM-DD` date, attributing failures to `item_id`.
pub(crate) fn parse_item_date(item_id: &str, value: &str, label: &str) -> ResultEngine<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| {
        EngineError::validation(item_id, format!("unparseable {label} date '{value}'"))
    })
}

pub(crate) fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}
