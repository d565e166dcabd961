use crate::domain::{DomainResult, Genre, GenreId, Pagination, SearchQuery};

/// Persistence port for Genre aggregates, including their category set.
pub trait GenreGateway {
    fn create(&mut self, genre: Genre) -> DomainResult<Genre>;

    fn update(&mut self, genre: Genre) -> DomainResult<Genre>;

    /// Deleting an absent id is not an error.
    fn delete_by_id(&mut self, id: &GenreId) -> DomainResult<()>;

    fn find_by_id(&self, id: &GenreId) -> DomainResult<Option<Genre>>;

    fn find_all(&self, query: &SearchQuery) -> DomainResult<Pagination<Genre>>;

    /// Returns the subset of `ids` that exist.
    fn exists_by_ids(&self, ids: &[GenreId]) -> DomainResult<Vec<GenreId>>;
}
