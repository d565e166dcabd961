/// Value objects for the domain layer
use super::base::{DomainError, DomainResult, ValueObject};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Declares an opaque string-backed aggregate identifier.
macro_rules! identifier {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Generate a fresh, globally unique identifier
            pub fn unique() -> Self {
                $name(unique_id())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                $name(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                $name(id.to_string())
            }
        }

        impl ValueObject for $name {}

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

/// Lowercase hex UUID without separators
pub fn unique_id() -> String {
    Uuid::new_v4().simple().to_string()
}

identifier!(
    /// Unique identifier for a Category
    CategoryId
);
identifier!(
    /// Unique identifier for a Genre
    GenreId
);
identifier!(
    /// Unique identifier for a CastMember
    CastMemberId
);
identifier!(
    /// Unique identifier for a Video
    VideoId
);

/// Soft-delete state shared by Category and Genre.
///
/// `deleted_at` exists only while inactive; both transitions are idempotent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    Active,
    Inactive { deleted_at: DateTime<Utc> },
}

impl Activation {
    pub fn new(is_active: bool, now: DateTime<Utc>) -> Self {
        if is_active {
            Activation::Active
        } else {
            Activation::Inactive { deleted_at: now }
        }
    }

    /// Rebuild from stored columns, rejecting an `active`/`deleted_at` mismatch
    pub fn restore(is_active: bool, deleted_at: Option<DateTime<Utc>>) -> DomainResult<Self> {
        match (is_active, deleted_at) {
            (true, None) => Ok(Activation::Active),
            (false, Some(deleted_at)) => Ok(Activation::Inactive { deleted_at }),
            (true, Some(_)) => Err(DomainError::InvalidValue(
                "an active aggregate cannot have a deletion date".to_string(),
            )),
            (false, None) => Err(DomainError::InvalidValue(
                "an inactive aggregate requires a deletion date".to_string(),
            )),
        }
    }

    pub fn activate(self) -> Self {
        Activation::Active
    }

    /// Keeps the original deletion date when already inactive
    pub fn deactivate(self, now: DateTime<Utc>) -> Self {
        match self {
            Activation::Active => Activation::Inactive { deleted_at: now },
            inactive @ Activation::Inactive { .. } => inactive,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Activation::Active)
    }

    pub fn deleted_at(&self) -> Option<DateTime<Utc>> {
        match self {
            Activation::Active => None,
            Activation::Inactive { deleted_at } => Some(*deleted_at),
        }
    }
}

impl ValueObject for Activation {}

/// Role a cast member plays in a production
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CastMemberType {
    Actor,
    Director,
}

impl CastMemberType {
    pub fn of(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "ACTOR" => Some(CastMemberType::Actor),
            "DIRECTOR" => Some(CastMemberType::Director),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CastMemberType::Actor => "ACTOR",
            CastMemberType::Director => "DIRECTOR",
        }
    }
}

impl ValueObject for CastMemberType {}

impl fmt::Display for CastMemberType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Age rating of a video
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rating {
    #[serde(rename = "ER")]
    Er,
    #[serde(rename = "L")]
    L,
    #[serde(rename = "10")]
    Age10,
    #[serde(rename = "12")]
    Age12,
    #[serde(rename = "14")]
    Age14,
    #[serde(rename = "16")]
    Age16,
    #[serde(rename = "18")]
    Age18,
}

impl Rating {
    const ALL: [Rating; 7] = [
        Rating::Er,
        Rating::L,
        Rating::Age10,
        Rating::Age12,
        Rating::Age14,
        Rating::Age16,
        Rating::Age18,
    ];

    pub fn of(label: &str) -> Option<Self> {
        Rating::ALL
            .into_iter()
            .find(|rating| rating.name().eq_ignore_ascii_case(label.trim()))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Rating::Er => "ER",
            Rating::L => "L",
            Rating::Age10 => "10",
            Rating::Age12 => "12",
            Rating::Age14 => "14",
            Rating::Age16 => "16",
            Rating::Age18 => "18",
        }
    }
}

impl ValueObject for Rating {}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::base::now;

    #[test]
    fn test_unique_ids_differ() {
        let first = CategoryId::unique();
        let second = CategoryId::unique();

        assert_ne!(first, second);
        assert_eq!(first.as_str().len(), 32);
        assert!(!first.as_str().contains('-'));
    }

    #[test]
    fn test_ids_compare_by_value() {
        assert_eq!(GenreId::from("123"), GenreId::from("123".to_string()));
        assert_eq!(VideoId::from("abc").to_string(), "abc");
    }

    #[test]
    fn test_activation_deactivate_is_idempotent() {
        let first = now();
        let inactive = Activation::new(true, first).deactivate(first);
        let again = inactive.deactivate(first + chrono::Duration::seconds(5));

        assert!(!again.is_active());
        assert_eq!(again.deleted_at(), Some(first));
    }

    #[test]
    fn test_activation_activate_clears_deleted_at() {
        let active = Activation::new(false, now()).activate();

        assert!(active.is_active());
        assert!(active.deleted_at().is_none());
        assert_eq!(active.activate(), Activation::Active);
    }

    #[test]
    fn test_activation_restore_rejects_mismatch() {
        assert!(Activation::restore(true, Some(now())).is_err());
        assert!(Activation::restore(false, None).is_err());
        assert_eq!(Activation::restore(true, None).unwrap(), Activation::Active);
    }

    #[test]
    fn test_cast_member_type_parsing() {
        assert_eq!(CastMemberType::of("actor"), Some(CastMemberType::Actor));
        assert_eq!(CastMemberType::of("DIRECTOR"), Some(CastMemberType::Director));
        assert_eq!(CastMemberType::of("writer"), None);
    }

    #[test]
    fn test_rating_parsing() {
        assert_eq!(Rating::of("L"), Some(Rating::L));
        assert_eq!(Rating::of("er"), Some(Rating::Er));
        assert_eq!(Rating::of("18"), Some(Rating::Age18));
        assert_eq!(Rating::of("21"), None);
        assert_eq!(serde_json::to_string(&Rating::Age12).unwrap(), "\"12\"");
    }
}
