use crate::domain::{DomainResult, Pagination, Video, VideoId, VideoSearchQuery};

/// Persistence port for Video aggregates, their associations and media descriptors.
pub trait VideoGateway {
    fn create(&mut self, video: Video) -> DomainResult<Video>;

    fn update(&mut self, video: Video) -> DomainResult<Video>;

    /// Deleting an absent id is not an error.
    fn delete_by_id(&mut self, id: &VideoId) -> DomainResult<()>;

    fn find_by_id(&self, id: &VideoId) -> DomainResult<Option<Video>>;

    fn find_all(&self, query: &VideoSearchQuery) -> DomainResult<Pagination<Video>>;
}
