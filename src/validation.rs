//! Field checks shared by the entity services.

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{AppError, AppResult};

time::serde::format_description!(pub iso_date, Date, "[year]-[month]-[day]");
time::serde::format_description!(pub clock_time, Time, "[hour]:[minute]");

/// A string outside one of the fixed vocabularies (gender, appointment status).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {field} value: '{value}' (expected one of: {expected})")]
pub struct InvalidVariant {
    pub field: &'static str,
    pub value: String,
    pub expected: &'static str,
}

impl From<InvalidVariant> for AppError {
    fn from(e: InvalidVariant) -> Self {
        AppError::Validation(e.to_string())
    }
}

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Trimmed value of a required text field.
pub fn required(field: &'static str, value: &str) -> AppResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::validation(format!("{field} is required")));
    }
    Ok(value.to_string())
}

/// Blank optional text is stored as NULL.
pub fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub fn max_len(field: &'static str, value: &str, max: usize) -> AppResult<()> {
    if value.chars().count() > max {
        return Err(AppError::validation(format!(
            "{field} exceeds maximum length of {max} characters"
        )));
    }
    Ok(())
}

pub fn normalize_email(email: &str) -> AppResult<String> {
    let email = email.trim().to_lowercase();
    if !is_valid_email(&email) {
        return Err(AppError::validation("Invalid email"));
    }
    max_len("email", &email, 255)?;
    Ok(email)
}

pub fn non_negative(field: &'static str, value: f64) -> AppResult<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(AppError::validation(format!("{field} must be zero or greater")));
    }
    Ok(value)
}

pub fn positive(field: &'static str, value: f64) -> AppResult<f64> {
    if !value.is_finite() || value <= 0.0 {
        return Err(AppError::validation(format!("{field} must be greater than zero")));
    }
    Ok(value)
}

/// Upper bound matching the precision of the backing `NUMERIC` column.
pub fn at_most(field: &'static str, value: f64, max: f64) -> AppResult<f64> {
    if value > max {
        return Err(AppError::validation(format!("{field} must be at most {max}")));
    }
    Ok(value)
}
