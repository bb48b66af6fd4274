// Validation utilities module
// Shared regular expressions and custom validation functions for request DTOs

use once_cell::sync::Lazy;
use regex::Regex;
use validator::ValidationError;

/// Email format accepted at sign-up and sign-in.
/// Local part allows dots, underscores and dashes; TLD is 2-4 letters.
pub static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[a-zA-Z0-9._-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,4}$")
        .expect("email regex is valid")
});

/// Validates that a string is not blank (whitespace-only counts as blank).
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::new("blank"))
    } else {
        Ok(())
    }
}

/// Collapse a `ValidationErrors` tree into one client-facing message.
/// Field order is sorted so the message is deterministic.
pub fn validation_message(errors: &validator::ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by_key(|(field, _)| *field);

    let messages: Vec<String> = fields
        .iter()
        .flat_map(|(_, errs)| errs.iter())
        .map(|err| {
            err.message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| "request validation failed".to_string())
        })
        .collect();

    if messages.is_empty() {
        "request validation failed".to_string()
    } else {
        messages.join(", ")
    }
}
