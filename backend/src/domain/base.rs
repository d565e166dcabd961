/// Base DDD abstractions for the domain layer
use super::validation::{Notification, ValidationError};
use chrono::{DateTime, SubsecRound, Utc};
use std::fmt::{Debug, Display};
use thiserror::Error;

/// Trait for value objects - immutable objects defined by their attributes
/// Value objects are equal if all their attributes are equal
pub trait ValueObject: Clone + PartialEq + Eq + Debug {}

/// Trait for entities - objects with identity that can change over time
/// Entities are equal if their IDs are equal, regardless of other attributes
pub trait Entity: Debug {
    type Id: ValueObject;

    fn id(&self) -> &Self::Id;
}

/// Trait for aggregate roots - entities that are the entry point to an aggregate
/// Aggregates ensure consistency boundaries and encapsulate business rules
pub trait AggregateRoot: Entity {
    /// Run the aggregate's field-level checks against the handler.
    ///
    /// Never fails directly: every violation is appended to `handler`, so the
    /// caller can accumulate cross-aggregate checks into the same notification.
    fn validate(&self, handler: &mut Notification);
}

/// Trait for domain events - things that have happened in the domain
pub trait DomainEvent: Debug + Clone {
    /// The name/type of the event
    fn event_type(&self) -> &'static str;

    fn aggregate_id(&self) -> String;

    fn occurred_on(&self) -> DateTime<Utc>;
}

/// Current instant, truncated to microseconds so it survives a storage round trip.
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-specific errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Requested aggregate does not exist
    #[error("{message}")]
    NotFound { message: String },

    /// One or more invariants were violated; carries every error found
    #[error("{message}")]
    Validation {
        message: String,
        errors: Vec<ValidationError>,
    },

    /// Invalid value provided
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    /// Invalid operation
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// Backing store failure
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Media storage failure
    #[error("Storage error: {0}")]
    Storage(String),

    /// Event could not be handed to the message channel
    #[error("Messaging error: {0}")]
    Messaging(String),
}

impl DomainError {
    pub fn not_found(aggregate: &str, id: impl Display) -> Self {
        DomainError::NotFound {
            message: format!("{} with ID {} was not found", aggregate, id),
        }
    }

    pub fn validation(message: impl Into<String>, notification: Notification) -> Self {
        DomainError::Validation {
            message: message.into(),
            errors: notification.into_errors(),
        }
    }

    /// Errors carried by a validation failure, empty for every other variant
    pub fn errors(&self) -> &[ValidationError] {
        match self {
            DomainError::Validation { errors, .. } => errors,
            _ => &[],
        }
    }

    pub fn first_error(&self) -> Option<&ValidationError> {
        self.errors().first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct TestId(String);
    impl ValueObject for TestId {}

    #[derive(Debug)]
    struct TestEntity {
        id: TestId,
        #[allow(dead_code)]
        value: String,
    }

    impl Entity for TestEntity {
        type Id = TestId;

        fn id(&self) -> &Self::Id {
            &self.id
        }
    }

    #[test]
    fn test_entity_has_identity() {
        let entity1 = TestEntity {
            id: TestId("test-1".to_string()),
            value: "original".to_string(),
        };

        let entity2 = TestEntity {
            id: TestId("test-1".to_string()),
            value: "modified".to_string(),
        };

        // Entities with same ID should be considered the same entity
        assert_eq!(entity1.id(), entity2.id());
    }

    #[test]
    fn test_not_found_message() {
        let error = DomainError::not_found("Category", "123");
        assert_eq!(error.to_string(), "Category with ID 123 was not found");
        assert!(error.errors().is_empty());
    }

    #[test]
    fn test_validation_error_carries_all_errors() {
        let mut notification = Notification::new();
        notification.append(ValidationError::new("'name' should not be null"));
        notification.append(ValidationError::new("'type' should not be null"));

        let error = DomainError::validation("Could not create Aggregate CastMember", notification);

        assert_eq!(error.to_string(), "Could not create Aggregate CastMember");
        assert_eq!(error.errors().len(), 2);
        assert_eq!(
            error.first_error().map(|e| e.message()),
            Some("'name' should not be null")
        );
    }

    #[test]
    fn test_now_is_truncated_to_micros() {
        let instant = now();
        assert_eq!(instant.timestamp_subsec_nanos() % 1_000, 0);
    }
}
