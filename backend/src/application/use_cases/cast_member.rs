use crate::application::dto::{
    CastMemberListOutput, CastMemberOutput, CreateCastMemberCommand, CreateCastMemberOutput,
    UpdateCastMemberCommand, UpdateCastMemberOutput,
};
use crate::application::gateways::CastMemberGateway;
use crate::domain::{
    CastMember, CastMemberId, DomainError, DomainResult, Entity, Notification, Pagination,
    SearchQuery,
};
use tracing::{debug, info};

pub struct CreateCastMember<'a, G: CastMemberGateway> {
    gateway: &'a mut G,
}

impl<'a, G: CastMemberGateway> CreateCastMember<'a, G> {
    pub fn new(gateway: &'a mut G) -> Self {
        Self { gateway }
    }

    pub fn execute(
        &mut self,
        command: CreateCastMemberCommand,
    ) -> DomainResult<CreateCastMemberOutput> {
        let mut notification = Notification::new();
        let member =
            notification.validate(|| CastMember::new_member(command.name, command.member_type));

        let Some(member) = member else {
            debug!("Rejected cast member: {}", notification);
            return Err(DomainError::validation(
                "Could not create Aggregate CastMember",
                notification,
            ));
        };

        let created = self.gateway.create(member)?;
        info!(cast_member_id = %created.id(), "Cast member created");
        Ok(CreateCastMemberOutput::from(&created))
    }
}

pub struct UpdateCastMember<'a, G: CastMemberGateway> {
    gateway: &'a mut G,
}

impl<'a, G: CastMemberGateway> UpdateCastMember<'a, G> {
    pub fn new(gateway: &'a mut G) -> Self {
        Self { gateway }
    }

    pub fn execute(
        &mut self,
        command: UpdateCastMemberCommand,
    ) -> DomainResult<UpdateCastMemberOutput> {
        let id = CastMemberId::from(command.id);
        let mut member = self
            .gateway
            .find_by_id(&id)?
            .ok_or_else(|| DomainError::not_found("CastMember", &id))?;

        let mut notification = Notification::new();
        notification.validate(|| {
            member
                .update(command.name, command.member_type)
                .map(|_| ())
        });

        if notification.has_error() {
            debug!(cast_member_id = %id, "Rejected cast member update: {}", notification);
            return Err(DomainError::validation(
                format!("Could not update Aggregate CastMember {}", id),
                notification,
            ));
        }

        let updated = self.gateway.update(member)?;
        Ok(UpdateCastMemberOutput::from(&updated))
    }
}

/// Use case for deleting a cast member. Deleting an unknown id is a no-op.
pub struct DeleteCastMember<'a, G: CastMemberGateway> {
    gateway: &'a mut G,
}

impl<'a, G: CastMemberGateway> DeleteCastMember<'a, G> {
    pub fn new(gateway: &'a mut G) -> Self {
        Self { gateway }
    }

    pub fn execute(&mut self, id: &str) -> DomainResult<()> {
        self.gateway.delete_by_id(&CastMemberId::from(id))
    }
}

pub struct GetCastMemberById<'a, G: CastMemberGateway> {
    gateway: &'a G,
}

impl<'a, G: CastMemberGateway> GetCastMemberById<'a, G> {
    pub fn new(gateway: &'a G) -> Self {
        Self { gateway }
    }

    pub fn execute(&self, id: &str) -> DomainResult<CastMemberOutput> {
        let id = CastMemberId::from(id);
        self.gateway
            .find_by_id(&id)?
            .map(|member| CastMemberOutput::from(&member))
            .ok_or_else(|| DomainError::not_found("CastMember", &id))
    }
}

pub struct ListCastMembers<'a, G: CastMemberGateway> {
    gateway: &'a G,
}

impl<'a, G: CastMemberGateway> ListCastMembers<'a, G> {
    pub fn new(gateway: &'a G) -> Self {
        Self { gateway }
    }

    pub fn execute(
        &self,
        query: &SearchQuery,
    ) -> DomainResult<Pagination<CastMemberListOutput>> {
        Ok(self
            .gateway
            .find_all(query)?
            .map(|member| CastMemberListOutput::from(&member)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::fakes::FakeCastMemberGateway;
    use crate::domain::CastMemberType;

    fn director() -> CastMember {
        CastMember::new_member(Some("Greta Gerwig".to_string()), Some(CastMemberType::Director))
            .unwrap()
    }

    #[test]
    fn test_create_cast_member() {
        let mut gateway = FakeCastMemberGateway::default();

        let output = CreateCastMember::new(&mut gateway)
            .execute(CreateCastMemberCommand::with(
                Some("Keanu Reeves"),
                Some(CastMemberType::Actor),
            ))
            .unwrap();

        let stored = &gateway.members[0];
        assert_eq!(output.id, stored.id().as_str());
        assert_eq!(stored.name(), Some("Keanu Reeves"));
        assert_eq!(stored.member_type(), Some(CastMemberType::Actor));
        assert_eq!(stored.created_at(), stored.updated_at());
    }

    #[test]
    fn test_create_reports_every_invalid_field() {
        let mut gateway = FakeCastMemberGateway::default();

        let error = CreateCastMember::new(&mut gateway)
            .execute(CreateCastMemberCommand::with(None, None))
            .unwrap_err();

        assert_eq!(error.to_string(), "Could not create Aggregate CastMember");
        let messages: Vec<&str> = error.errors().iter().map(|e| e.message()).collect();
        assert_eq!(
            messages,
            vec!["'name' should not be null", "'type' should not be null"]
        );
        assert_eq!(gateway.create_calls, 0);
    }

    #[test]
    fn test_create_with_short_name() {
        let mut gateway = FakeCastMemberGateway::default();

        let error = CreateCastMember::new(&mut gateway)
            .execute(CreateCastMemberCommand::with(
                Some("Jo"),
                Some(CastMemberType::Actor),
            ))
            .unwrap_err();

        assert_eq!(
            error.first_error().unwrap().message(),
            "'name' must be between 3 and 255 characters"
        );
    }

    #[test]
    fn test_update_cast_member() {
        let member = director();
        let id = member.id().to_string();
        let created_at = member.created_at();
        let mut gateway = FakeCastMemberGateway::with(vec![member]);

        let output = UpdateCastMember::new(&mut gateway)
            .execute(UpdateCastMemberCommand::with(
                &id,
                Some("Greta Celeste Gerwig"),
                Some(CastMemberType::Actor),
            ))
            .unwrap();

        assert_eq!(output.id, id);
        let stored = &gateway.members[0];
        assert_eq!(stored.name(), Some("Greta Celeste Gerwig"));
        assert_eq!(stored.member_type(), Some(CastMemberType::Actor));
        assert_eq!(stored.created_at(), created_at);
    }

    #[test]
    fn test_update_with_missing_type_is_rejected() {
        let member = director();
        let id = member.id().to_string();
        let mut gateway = FakeCastMemberGateway::with(vec![member]);

        let error = UpdateCastMember::new(&mut gateway)
            .execute(UpdateCastMemberCommand::with(&id, Some("Greta"), None))
            .unwrap_err();

        assert_eq!(
            error.to_string(),
            format!("Could not update Aggregate CastMember {}", id)
        );
        assert_eq!(
            error.first_error().unwrap().message(),
            "'type' should not be null"
        );
        assert_eq!(gateway.update_calls, 0);
    }

    #[test]
    fn test_update_missing_cast_member_is_not_found() {
        let mut gateway = FakeCastMemberGateway::default();

        let error = UpdateCastMember::new(&mut gateway)
            .execute(UpdateCastMemberCommand::with(
                "123",
                Some("Keanu Reeves"),
                Some(CastMemberType::Actor),
            ))
            .unwrap_err();

        assert_eq!(error.to_string(), "CastMember with ID 123 was not found");
    }

    #[test]
    fn test_delete_cast_member() {
        let member = director();
        let id = member.id().to_string();
        let mut gateway = FakeCastMemberGateway::with(vec![member]);

        DeleteCastMember::new(&mut gateway).execute(&id).unwrap();
        DeleteCastMember::new(&mut gateway).execute(&id).unwrap();

        assert!(gateway.members.is_empty());
        assert_eq!(gateway.delete_calls, 2);
    }

    #[test]
    fn test_get_cast_member_by_id() {
        let member = director();
        let id = member.id().to_string();
        let gateway = FakeCastMemberGateway::with(vec![member]);

        let output = GetCastMemberById::new(&gateway).execute(&id).unwrap();

        assert_eq!(output.id, id);
        assert_eq!(output.member_type, Some(CastMemberType::Director));
    }

    #[test]
    fn test_get_missing_cast_member_is_not_found() {
        let gateway = FakeCastMemberGateway::default();

        let error = GetCastMemberById::new(&gateway).execute("123").unwrap_err();

        assert_eq!(error.to_string(), "CastMember with ID 123 was not found");
    }

    #[test]
    fn test_list_cast_members_paginates() {
        let members = (0..3)
            .map(|i| {
                CastMember::new_member(Some(format!("Member {}", i)), Some(CastMemberType::Actor))
                    .unwrap()
            })
            .collect();
        let gateway = FakeCastMemberGateway::with(members);
        let query = SearchQuery::new(1, 2, "", "name", "asc");

        let page = ListCastMembers::new(&gateway).execute(&query).unwrap();

        assert_eq!(page.current_page, 1);
        assert_eq!(page.per_page, 2);
        assert_eq!(page.total, 3);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].name.as_deref(), Some("Member 2"));
    }
}
