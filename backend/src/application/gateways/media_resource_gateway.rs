use crate::domain::{
    AudioVideoMedia, DomainResult, ImageMedia, Resource, VideoId, VideoMediaType, VideoResource,
};

/// Storage port for the binary content behind a video's media slots.
pub trait MediaResourceGateway {
    /// Stores a video or trailer resource and describes it as a pending asset.
    fn store_audio_video(
        &mut self,
        video_id: &VideoId,
        resource: &VideoResource,
    ) -> DomainResult<AudioVideoMedia>;

    /// Stores a banner or thumbnail resource.
    fn store_image(&mut self, video_id: &VideoId, resource: &VideoResource)
        -> DomainResult<ImageMedia>;

    fn get_resource(
        &self,
        video_id: &VideoId,
        media_type: VideoMediaType,
    ) -> DomainResult<Option<Resource>>;

    /// Removes every stored resource of the video.
    fn clear_resources(&mut self, video_id: &VideoId) -> DomainResult<()>;
}
