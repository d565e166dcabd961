use crate::domain::{CastMember, CastMemberId, DomainResult, Pagination, SearchQuery};

pub trait CastMemberGateway {
    fn create(&mut self, member: CastMember) -> DomainResult<CastMember>;

    fn update(&mut self, member: CastMember) -> DomainResult<CastMember>;

    /// Hard delete; an absent id is not an error.
    fn delete_by_id(&mut self, id: &CastMemberId) -> DomainResult<()>;

    fn find_by_id(&self, id: &CastMemberId) -> DomainResult<Option<CastMember>>;

    fn find_all(&self, query: &SearchQuery) -> DomainResult<Pagination<CastMember>>;

    fn exists_by_ids(&self, ids: &[CastMemberId]) -> DomainResult<Vec<CastMemberId>>;
}
