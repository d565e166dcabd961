use crate::domain::{Category, CategoryId, DomainResult, Pagination, SearchQuery};

/// Persistence port for Category aggregates.
///
/// Implementations decide how searching, sorting and paging are carried out;
/// use cases only map the returned page.
pub trait CategoryGateway {
    /// Persists a new category and returns the stored aggregate.
    fn create(&mut self, category: Category) -> DomainResult<Category>;

    /// Persists changes to an existing category.
    fn update(&mut self, category: Category) -> DomainResult<Category>;

    /// Removes a category. Deleting an absent id is not an error.
    fn delete_by_id(&mut self, id: &CategoryId) -> DomainResult<()>;

    /// Returns `Ok(None)` when no category has this id.
    fn find_by_id(&self, id: &CategoryId) -> DomainResult<Option<Category>>;

    fn find_all(&self, query: &SearchQuery) -> DomainResult<Pagination<Category>>;

    /// Returns the subset of `ids` that exist.
    fn exists_by_ids(&self, ids: &[CategoryId]) -> DomainResult<Vec<CategoryId>>;
}
