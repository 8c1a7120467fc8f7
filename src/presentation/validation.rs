use std::borrow::Cow;

use serde::Serialize;
use validator::{ValidationError, ValidationErrors};

use crate::domain::models::user::Role;

/// One entry of the `errors` array returned for rejected input
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub path: Vec<String>,
    pub code: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, code: &str, message: impl Into<String>) -> Self {
        Self {
            path: if field.is_empty() {
                Vec::new()
            } else {
                vec![to_camel_case(field)]
            },
            code: code.to_string(),
            message: message.into(),
        }
    }

    /// Body that is not JSON or does not have the expected field types
    pub fn malformed_body(error: &serde_json::Error) -> Self {
        Self::new("", "invalid_json", error.to_string())
    }
}

/// Flatten validator output, ordered by field name
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|(a, _), (b, _)| a.cmp(b));
    fields
        .into_iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid {}", to_camel_case(&field)));
                FieldError::new(&field, &error.code, message)
            })
        })
        .collect()
}

fn to_camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper_next = false;
    for c in field.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

pub fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
    let has_upper = password.chars().any(|c| c.is_uppercase());
    let has_lower = password.chars().any(|c| c.is_lowercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    if has_upper && has_lower && has_digit {
        Ok(())
    } else {
        Err(invalid(
            "weak_password",
            "Password must contain an uppercase letter, a lowercase letter and a number",
        ))
    }
}

pub fn validate_role(role: &str) -> Result<(), ValidationError> {
    match role.parse::<Role>() {
        Ok(role) if role.is_self_assignable() => Ok(()),
        _ => Err(invalid("invalid_role", "Role must be USER or COACH")),
    }
}

/// Optional leading `+`, then 8 to 15 digits
pub fn validate_phone_number(phone_number: &str) -> Result<(), ValidationError> {
    let digits = phone_number.strip_prefix('+').unwrap_or(phone_number);
    let valid = (8..=15).contains(&digits.len())
        && digits.chars().all(|c| c.is_ascii_digit())
        && !digits.starts_with('0');
    if valid {
        Ok(())
    } else {
        Err(invalid("invalid_phone_number", "Invalid phone number"))
    }
}
