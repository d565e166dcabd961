/// Accumulating validation primitives
use super::base::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single validation failure message
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        ValidationError {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Ordered collection of validation errors.
///
/// Appending never fails. A notification only becomes an error when a use case
/// decides to surface it, either as [`DomainError::Validation`] or as the `Err`
/// side of a returned `Result`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Notification {
    errors: Vec<ValidationError>,
}

impl Notification {
    pub fn new() -> Self {
        Notification { errors: Vec::new() }
    }

    /// Notification holding a single error
    pub fn with_error(error: ValidationError) -> Self {
        Notification {
            errors: vec![error],
        }
    }

    pub fn append(&mut self, error: ValidationError) -> &mut Self {
        self.errors.push(error);
        self
    }

    /// Merge another notification, keeping its errors after ours
    pub fn append_all(&mut self, other: Notification) -> &mut Self {
        self.errors.extend(other.errors);
        self
    }

    /// Run a fallible step and fold its failure into this notification.
    ///
    /// Validation failures contribute all of their errors; any other error is
    /// recorded as one error carrying its message. Returns the step's value on
    /// success.
    pub fn validate<T>(&mut self, validation: impl FnOnce() -> DomainResult<T>) -> Option<T> {
        match validation() {
            Ok(value) => Some(value),
            Err(DomainError::Validation { errors, .. }) => {
                self.errors.extend(errors);
                None
            }
            Err(other) => {
                self.append(ValidationError::new(other.to_string()));
                None
            }
        }
    }

    pub fn has_error(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn first_error(&self) -> Option<&ValidationError> {
        self.errors.first()
    }

    pub fn into_errors(self) -> Vec<ValidationError> {
        self.errors
    }
}

impl From<DomainError> for Notification {
    fn from(error: DomainError) -> Self {
        let mut notification = Notification::new();
        notification.validate::<()>(|| Err(error));
        notification
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.errors.iter().map(|e| e.message()).collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl std::error::Error for Notification {}

/// Check a required text field: present, not blank, and a trimmed length in
/// `[min, max]` characters.
pub fn check_text_field(
    field: &str,
    value: Option<&str>,
    min: usize,
    max: usize,
    handler: &mut Notification,
) {
    let Some(value) = value else {
        handler.append(ValidationError::new(format!("'{}' should not be null", field)));
        return;
    };

    if value.trim().is_empty() {
        handler.append(ValidationError::new(format!("'{}' should not be empty", field)));
        return;
    }

    let length = value.trim().chars().count();
    if length < min || length > max {
        handler.append(ValidationError::new(format!(
            "'{}' must be between {} and {} characters",
            field, min, max
        )));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_notification_has_no_error() {
        let notification = Notification::new();
        assert!(!notification.has_error());
        assert!(notification.first_error().is_none());
    }

    #[test]
    fn test_append_keeps_order() {
        let mut notification = Notification::new();
        notification
            .append(ValidationError::new("first"))
            .append(ValidationError::new("second"));

        assert!(notification.has_error());
        let messages: Vec<&str> = notification.errors().iter().map(|e| e.message()).collect();
        assert_eq!(messages, vec!["first", "second"]);
    }

    #[test]
    fn test_append_all_concatenates() {
        let mut left = Notification::with_error(ValidationError::new("a"));
        let mut right = Notification::new();
        right
            .append(ValidationError::new("b"))
            .append(ValidationError::new("c"));

        left.append_all(right);

        let messages: Vec<&str> = left.errors().iter().map(|e| e.message()).collect();
        assert_eq!(messages, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_validate_returns_value_on_success() {
        let mut notification = Notification::new();
        let value = notification.validate(|| Ok(42));

        assert_eq!(value, Some(42));
        assert!(!notification.has_error());
    }

    #[test]
    fn test_validate_merges_validation_failures() {
        let mut notification = Notification::with_error(ValidationError::new("existing"));
        let inner = {
            let mut n = Notification::new();
            n.append(ValidationError::new("x")).append(ValidationError::new("y"));
            n
        };

        let value: Option<()> =
            notification.validate(|| Err(DomainError::validation("failed", inner)));

        assert!(value.is_none());
        assert_eq!(notification.errors().len(), 3);
        assert_eq!(notification.errors()[1].message(), "x");
    }

    #[test]
    fn test_validate_wraps_other_errors() {
        let mut notification = Notification::new();
        let value: Option<()> =
            notification.validate(|| Err(DomainError::Persistence("disk full".to_string())));

        assert!(value.is_none());
        assert_eq!(notification.errors().len(), 1);
        assert_eq!(
            notification.errors()[0].message(),
            "Persistence error: disk full"
        );
    }

    #[test]
    fn test_check_text_field_messages() {
        let mut notification = Notification::new();
        check_text_field("name", None, 3, 255, &mut notification);
        check_text_field("name", Some("   "), 3, 255, &mut notification);
        check_text_field("name", Some("ab "), 3, 255, &mut notification);
        check_text_field("name", Some(&"x".repeat(256)), 3, 255, &mut notification);
        check_text_field("name", Some("Movies"), 3, 255, &mut notification);

        let messages: Vec<&str> = notification.errors().iter().map(|e| e.message()).collect();
        assert_eq!(
            messages,
            vec![
                "'name' should not be null",
                "'name' should not be empty",
                "'name' must be between 3 and 255 characters",
                "'name' must be between 3 and 255 characters",
            ]
        );
    }
}
