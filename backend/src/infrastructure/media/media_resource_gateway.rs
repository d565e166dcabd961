use super::storage::StorageService;
use crate::application::gateways::MediaResourceGateway;
use crate::domain::{
    AudioVideoMedia, DomainResult, ImageMedia, Resource, VideoId, VideoMediaType, VideoResource,
};

/// Stores video media in a `StorageService`, one object per slot at
/// `videoId-<videoId>/type-<TYPE>`.
pub struct DefaultMediaResourceGateway<S: StorageService> {
    storage: S,
}

impl<S: StorageService> DefaultMediaResourceGateway<S> {
    pub fn new(storage: S) -> Self {
        DefaultMediaResourceGateway { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn folder(video_id: &VideoId) -> String {
        format!("videoId-{}", video_id)
    }

    fn location(video_id: &VideoId, media_type: VideoMediaType) -> String {
        format!("{}/type-{}", Self::folder(video_id), media_type)
    }

    fn store(&mut self, video_id: &VideoId, resource: &VideoResource) -> DomainResult<String> {
        let location = Self::location(video_id, resource.media_type);
        self.storage.store(&location, &resource.resource)?;
        tracing::debug!(video_id = %video_id, location = %location, "Stored media resource");
        Ok(location)
    }
}

impl<S: StorageService> MediaResourceGateway for DefaultMediaResourceGateway<S> {
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
        self.storage.get(&Self::location(video_id, media_type))
    }

    fn clear_resources(&mut self, video_id: &VideoId) -> DomainResult<()> {
        let names = self
            .storage
            .list(&format!("{}/", Self::folder(video_id)))?;
        if names.is_empty() {
            return Ok(());
        }

        self.storage.delete_all(&names)?;
        tracing::info!(video_id = %video_id, count = names.len(), "Cleared media resources");
        Ok(())
    }
}
