//! Declarative request validation
//!
//! Request payloads derive [`validator::Validate`]; this module flattens the
//! resulting error tree into the per-field message list the error body
//! carries.

use crate::core::error::ApiError;
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

/// Run a payload's declared validations, mapping failures to
/// [`ApiError::Validation`].
pub fn check(payload: &impl Validate) -> Result<(), ApiError> {
    payload
        .validate()
        .map_err(|errors| ApiError::Validation(flatten(&errors, "")))
}

/// Flatten nested validation errors into "path: message" strings.
fn flatten(errors: &ValidationErrors, prefix: &str) -> Vec<String> {
    let mut messages = Vec::new();

    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{prefix}.{field}")
        };

        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                for error in field_errors {
                    let message = error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("invalid value ({})", error.code));
                    messages.push(format!("{path}: {message}"));
                }
            }
            ValidationErrorsKind::Struct(nested) => {
                messages.extend(flatten(nested, &path));
            }
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    messages.extend(flatten(nested, &format!("{path}[{index}]")));
                }
            }
        }
    }

    messages.sort();
    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, Validate)]
    struct Item {
        #[validate(length(min = 1, message = "Item name is required"))]
        name: String,
        #[validate(range(min = 1, message = "Quantity must be at least 1"))]
        quantity: u32,
    }

    #[derive(Debug, Deserialize, Validate)]
    struct Payload {
        #[validate(range(min = 0.0, message = "Total amount must be a positive number"))]
        total: f64,
        #[validate(nested)]
        items: Vec<Item>,
    }

    #[test]
    fn valid_payload_passes() {
        let payload = Payload {
            total: 686.0,
            items: vec![Item {
                name: "Pizza".to_string(),
                quantity: 2,
            }],
        };
        assert!(check(&payload).is_ok());
    }

    #[test]
    fn failures_become_per_field_messages() {
        let payload = Payload {
            total: -1.0,
            items: vec![Item {
                name: String::new(),
                quantity: 0,
            }],
        };

        let err = check(&payload).unwrap_err();
        let ApiError::Validation(messages) = err else {
            panic!("expected validation error");
        };

        assert_eq!(messages.len(), 3);
        assert!(messages.iter().any(|m| m.contains("total:")));
        assert!(messages.iter().any(|m| m.contains("items[0].name:")));
        assert!(messages
            .iter()
            .any(|m| m.contains("Quantity must be at least 1")));
    }
}
