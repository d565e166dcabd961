use crate::domain::base::{now, AggregateRoot, DomainError, DomainResult, Entity};
use crate::domain::validation::{check_text_field, Notification, ValidationError};
use crate::domain::value_objects::{CastMemberId, CastMemberType};
use chrono::{DateTime, Utc};

pub const NAME_MIN_LENGTH: usize = 3;
pub const NAME_MAX_LENGTH: usize = 255;

/// A person credited in videos. Deletion is always a hard delete.
#[derive(Debug, Clone, PartialEq)]
pub struct CastMember {
    id: CastMemberId,
    name: Option<String>,
    member_type: Option<CastMemberType>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CastMember {
    pub fn new_member(
        name: Option<String>,
        member_type: Option<CastMemberType>,
    ) -> DomainResult<Self> {
        let now = now();
        let member = CastMember {
            id: CastMemberId::unique(),
            name,
            member_type,
            created_at: now,
            updated_at: now,
        };
        member.self_validate("Failed to create a Aggregate CastMember")?;
        Ok(member)
    }

    pub fn with(
        id: CastMemberId,
        name: Option<String>,
        member_type: Option<CastMemberType>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        CastMember {
            id,
            name,
            member_type,
            created_at,
            updated_at,
        }
    }

    pub fn update(
        &mut self,
        name: Option<String>,
        member_type: Option<CastMemberType>,
    ) -> DomainResult<&mut Self> {
        self.name = name;
        self.member_type = member_type;
        self.updated_at = now();
        self.self_validate("Failed to update a Aggregate CastMember")?;
        Ok(self)
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn member_type(&self) -> Option<CastMemberType> {
        self.member_type
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn self_validate(&self, message: &str) -> DomainResult<()> {
        let mut notification = Notification::new();
        self.validate(&mut notification);
        if notification.has_error() {
            return Err(DomainError::validation(message, notification));
        }
        Ok(())
    }
}

impl Entity for CastMember {
    type Id = CastMemberId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl AggregateRoot for CastMember {
    fn validate(&self, handler: &mut Notification) {
        check_text_field(
            "name",
            self.name(),
            NAME_MIN_LENGTH,
            NAME_MAX_LENGTH,
            handler,
        );
        if self.member_type.is_none() {
            handler.append(ValidationError::new("'type' should not be null"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;
    use std::time::Duration;

    #[test]
    fn test_new_member() {
        let member =
            CastMember::new_member(Some("Vin Diesel".to_string()), Some(CastMemberType::Actor))
                .unwrap();

        assert_eq!(member.name(), Some("Vin Diesel"));
        assert_eq!(member.member_type(), Some(CastMemberType::Actor));
        assert_eq!(member.created_at(), member.updated_at());
    }

    #[test]
    fn test_new_member_reports_every_error() {
        let error = CastMember::new_member(None, None).unwrap_err();

        let messages: Vec<&str> = error.errors().iter().map(|e| e.message()).collect();
        assert_eq!(
            messages,
            vec!["'name' should not be null", "'type' should not be null"]
        );
    }

    #[test]
    fn test_new_member_with_short_name_fails() {
        let error =
            CastMember::new_member(Some("Vi".to_string()), Some(CastMemberType::Director))
                .unwrap_err();
        assert_eq!(
            error.first_error().unwrap().message(),
            "'name' must be between 3 and 255 characters"
        );
    }

    #[test]
    fn test_update_member() {
        let mut member =
            CastMember::new_member(Some("vind".to_string()), Some(CastMemberType::Director))
                .unwrap();
        let id = member.id().clone();
        sleep(Duration::from_millis(1));

        member
            .update(Some("Vin Diesel".to_string()), Some(CastMemberType::Actor))
            .unwrap();

        assert_eq!(member.id(), &id);
        assert_eq!(member.name(), Some("Vin Diesel"));
        assert_eq!(member.member_type(), Some(CastMemberType::Actor));
        assert!(member.updated_at() > member.created_at());
    }

    #[test]
    fn test_update_with_missing_type_fails() {
        let mut member =
            CastMember::new_member(Some("Vin Diesel".to_string()), Some(CastMemberType::Actor))
                .unwrap();

        let error = member.update(Some("Vin Diesel".to_string()), None).unwrap_err();
        assert_eq!(
            error.first_error().unwrap().message(),
            "'type' should not be null"
        );
    }
}
