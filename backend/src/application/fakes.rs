//! In-memory gateway doubles shared by the use case tests
use crate::application::gateways::{
    CastMemberGateway, CategoryGateway, EventService, GenreGateway, MediaResourceGateway,
    VideoGateway,
};
use crate::domain::{
    AudioVideoMedia, CastMember, CastMemberId, Category, CategoryId, DomainError, DomainEvent,
    DomainResult, Entity, Genre, GenreId, ImageMedia, Pagination, Resource, SearchQuery, Video,
    VideoId, VideoMediaType, VideoResource, VideoSearchQuery,
};
use serde::Serialize;
use std::collections::HashMap;

fn paginate<T: Clone>(items: Vec<T>, query: &SearchQuery) -> Pagination<T> {
    let total = items.len() as u64;
    let page = items
        .into_iter()
        .skip(query.offset() as usize)
        .take(query.per_page as usize)
        .collect();
    Pagination::new(query.page, query.per_page, total, page)
}

fn matches_terms(value: Option<&str>, terms: &str) -> bool {
    terms.is_empty()
        || value.is_some_and(|v| v.to_lowercase().contains(&terms.to_lowercase()))
}

fn check_failure(fail_with: &Option<DomainError>) -> DomainResult<()> {
    match fail_with {
        Some(error) => Err(error.clone()),
        None => Ok(()),
    }
}

#[derive(Default)]
pub struct FakeCategoryGateway {
    pub categories: Vec<Category>,
    pub create_calls: usize,
    pub update_calls: usize,
    pub delete_calls: usize,
    pub fail_with: Option<DomainError>,
}

impl FakeCategoryGateway {
    pub fn with(categories: Vec<Category>) -> Self {
        FakeCategoryGateway {
            categories,
            ..Default::default()
        }
    }
}

impl CategoryGateway for FakeCategoryGateway {
    fn create(&mut self, category: Category) -> DomainResult<Category> {
        self.create_calls += 1;
        check_failure(&self.fail_with)?;
        self.categories.push(category.clone());
        Ok(category)
    }

    fn update(&mut self, category: Category) -> DomainResult<Category> {
        self.update_calls += 1;
        check_failure(&self.fail_with)?;
        self.categories.retain(|c| c.id() != category.id());
        self.categories.push(category.clone());
        Ok(category)
    }

    fn delete_by_id(&mut self, id: &CategoryId) -> DomainResult<()> {
        self.delete_calls += 1;
        self.categories.retain(|c| c.id() != id);
        Ok(())
    }

    fn find_by_id(&self, id: &CategoryId) -> DomainResult<Option<Category>> {
        Ok(self.categories.iter().find(|c| c.id() == id).cloned())
    }

    fn find_all(&self, query: &SearchQuery) -> DomainResult<Pagination<Category>> {
        check_failure(&self.fail_with)?;
        let items = self
            .categories
            .iter()
            .filter(|c| matches_terms(c.name(), &query.terms))
            .cloned()
            .collect();
        Ok(paginate(items, query))
    }

    fn exists_by_ids(&self, ids: &[CategoryId]) -> DomainResult<Vec<CategoryId>> {
        Ok(ids
            .iter()
            .filter(|id| self.categories.iter().any(|c| c.id() == *id))
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct FakeGenreGateway {
    pub genres: Vec<Genre>,
    pub create_calls: usize,
    pub update_calls: usize,
    pub delete_calls: usize,
}

impl FakeGenreGateway {
    pub fn with(genres: Vec<Genre>) -> Self {
        FakeGenreGateway {
            genres,
            ..Default::default()
        }
    }
}

impl GenreGateway for FakeGenreGateway {
    fn create(&mut self, genre: Genre) -> DomainResult<Genre> {
        self.create_calls += 1;
        self.genres.push(genre.clone());
        Ok(genre)
    }

    fn update(&mut self, genre: Genre) -> DomainResult<Genre> {
        self.update_calls += 1;
        self.genres.retain(|g| g.id() != genre.id());
        self.genres.push(genre.clone());
        Ok(genre)
    }

    fn delete_by_id(&mut self, id: &GenreId) -> DomainResult<()> {
        self.delete_calls += 1;
        self.genres.retain(|g| g.id() != id);
        Ok(())
    }

    fn find_by_id(&self, id: &GenreId) -> DomainResult<Option<Genre>> {
        Ok(self.genres.iter().find(|g| g.id() == id).cloned())
    }

    fn find_all(&self, query: &SearchQuery) -> DomainResult<Pagination<Genre>> {
        let items = self
            .genres
            .iter()
            .filter(|g| matches_terms(g.name(), &query.terms))
            .cloned()
            .collect();
        Ok(paginate(items, query))
    }

    fn exists_by_ids(&self, ids: &[GenreId]) -> DomainResult<Vec<GenreId>> {
        Ok(ids
            .iter()
            .filter(|id| self.genres.iter().any(|g| g.id() == *id))
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct FakeCastMemberGateway {
    pub members: Vec<CastMember>,
    pub create_calls: usize,
    pub update_calls: usize,
    pub delete_calls: usize,
}

impl FakeCastMemberGateway {
    pub fn with(members: Vec<CastMember>) -> Self {
        FakeCastMemberGateway {
            members,
            ..Default::default()
        }
    }
}

impl CastMemberGateway for FakeCastMemberGateway {
    fn create(&mut self, member: CastMember) -> DomainResult<CastMember> {
        self.create_calls += 1;
        self.members.push(member.clone());
        Ok(member)
    }

    fn update(&mut self, member: CastMember) -> DomainResult<CastMember> {
        self.update_calls += 1;
        self.members.retain(|m| m.id() != member.id());
        self.members.push(member.clone());
        Ok(member)
    }

    fn delete_by_id(&mut self, id: &CastMemberId) -> DomainResult<()> {
        self.delete_calls += 1;
        self.members.retain(|m| m.id() != id);
        Ok(())
    }

    fn find_by_id(&self, id: &CastMemberId) -> DomainResult<Option<CastMember>> {
        Ok(self.members.iter().find(|m| m.id() == id).cloned())
    }

    fn find_all(&self, query: &SearchQuery) -> DomainResult<Pagination<CastMember>> {
        let items = self
            .members
            .iter()
            .filter(|m| matches_terms(m.name(), &query.terms))
            .cloned()
            .collect();
        Ok(paginate(items, query))
    }

    fn exists_by_ids(&self, ids: &[CastMemberId]) -> DomainResult<Vec<CastMemberId>> {
        Ok(ids
            .iter()
            .filter(|id| self.members.iter().any(|m| m.id() == *id))
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct FakeVideoGateway {
    pub videos: Vec<Video>,
    pub create_calls: usize,
    pub update_calls: usize,
    pub delete_calls: usize,
    pub fail_with: Option<DomainError>,
}

impl FakeVideoGateway {
    pub fn with(videos: Vec<Video>) -> Self {
        FakeVideoGateway {
            videos,
            ..Default::default()
        }
    }
}

impl VideoGateway for FakeVideoGateway {
    fn create(&mut self, video: Video) -> DomainResult<Video> {
        self.create_calls += 1;
        check_failure(&self.fail_with)?;
        self.videos.push(video.clone());
        Ok(video)
    }

    fn update(&mut self, video: Video) -> DomainResult<Video> {
        self.update_calls += 1;
        check_failure(&self.fail_with)?;
        self.videos.retain(|v| v.id() != video.id());
        self.videos.push(video.clone());
        Ok(video)
    }

    fn delete_by_id(&mut self, id: &VideoId) -> DomainResult<()> {
        self.delete_calls += 1;
        self.videos.retain(|v| v.id() != id);
        Ok(())
    }

    fn find_by_id(&self, id: &VideoId) -> DomainResult<Option<Video>> {
        Ok(self.videos.iter().find(|v| v.id() == id).cloned())
    }

    fn find_all(&self, query: &VideoSearchQuery) -> DomainResult<Pagination<Video>> {
        let items = self
            .videos
            .iter()
            .filter(|v| matches_terms(v.title(), &query.query.terms))
            .filter(|v| {
                query.categories.is_empty()
                    || v.categories().iter().any(|c| query.categories.contains(c))
            })
            .cloned()
            .collect();
        Ok(paginate(items, &query.query))
    }
}

#[derive(Default)]
pub struct FakeMediaResourceGateway {
    pub resources: HashMap<(VideoId, VideoMediaType), Resource>,
    pub clear_calls: usize,
    pub fail_on_store: bool,
}

impl FakeMediaResourceGateway {
    fn location(video_id: &VideoId, media_type: VideoMediaType) -> String {
        format!("videoId-{}/type-{}", video_id, media_type)
    }

    fn store(&mut self, video_id: &VideoId, resource: &VideoResource) -> DomainResult<String> {
        if self.fail_on_store {
            return Err(DomainError::Storage("bucket unavailable".to_string()));
        }
        self.resources.insert(
            (video_id.clone(), resource.media_type),
            resource.resource.clone(),
        );
        Ok(Self::location(video_id, resource.media_type))
    }
}

impl MediaResourceGateway for FakeMediaResourceGateway {
    fn store_audio_video(
        &mut self,
        video_id: &VideoId,
        resource: &VideoResource,
    ) -> DomainResult<AudioVideoMedia> {
        let location = self.store(video_id, resource)?;
        Ok(AudioVideoMedia::new(
            resource.resource.checksum(),
            resource.resource.name(),
            location,
        ))
    }

    fn store_image(
        &mut self,
        video_id: &VideoId,
        resource: &VideoResource,
    ) -> DomainResult<ImageMedia> {
        let location = self.store(video_id, resource)?;
        Ok(ImageMedia::new(
            resource.resource.checksum(),
            resource.resource.name(),
            location,
        ))
    }

    fn get_resource(
        &self,
        video_id: &VideoId,
        media_type: VideoMediaType,
    ) -> DomainResult<Option<Resource>> {
        Ok(self.resources.get(&(video_id.clone(), media_type)).cloned())
    }

    fn clear_resources(&mut self, video_id: &VideoId) -> DomainResult<()> {
        self.clear_calls += 1;
        self.resources.retain(|(id, _), _| id != video_id);
        Ok(())
    }
}

/// Records every event as JSON
#[derive(Default)]
pub struct RecordingEventService {
    pub events: Vec<serde_json::Value>,
}

impl EventService for RecordingEventService {
    fn send<E>(&mut self, event: &E) -> DomainResult<()>
    where
        E: DomainEvent + Serialize,
    {
        let payload = serde_json::to_value(event)
            .map_err(|e| DomainError::Messaging(e.to_string()))?;
        self.events.push(payload);
        Ok(())
    }
}
