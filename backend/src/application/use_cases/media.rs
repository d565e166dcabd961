use super::video::{attach_resource, publish_events};
use crate::application::dto::{
    GetMediaCommand, MediaOutput, UpdateMediaStatusCommand, UploadMediaCommand, UploadMediaOutput,
};
use crate::application::gateways::{EventService, MediaResourceGateway, VideoGateway};
use crate::domain::{DomainError, DomainResult, MediaId, MediaStatus, VideoId, VideoMediaType};
use tracing::{info, warn};

/// Use case for storing one media asset of an existing video
pub struct UploadMedia<'a, V, R, E>
where
    V: VideoGateway,
    R: MediaResourceGateway,
    E: EventService,
{
    videos: &'a mut V,
    media: &'a mut R,
    events: &'a mut E,
}

impl<'a, V, R, E> UploadMedia<'a, V, R, E>
where
    V: VideoGateway,
    R: MediaResourceGateway,
    E: EventService,
{
    pub fn new(videos: &'a mut V, media: &'a mut R, events: &'a mut E) -> Self {
        Self {
            videos,
            media,
            events,
        }
    }

    pub fn execute(&mut self, command: UploadMediaCommand) -> DomainResult<UploadMediaOutput> {
        let video_id = VideoId::from(command.video_id);
        let mut video = self
            .videos
            .find_by_id(&video_id)?
            .ok_or_else(|| DomainError::not_found("Video", &video_id))?;

        attach_resource(self.media, &mut video, command.media_type, command.resource)?;
        let pending = video.take_events();
        self.videos.update(video)?;
        publish_events(self.events, pending)?;

        info!(video_id = %video_id, media_type = %command.media_type, "Media uploaded");
        Ok(UploadMediaOutput {
            video_id: video_id.to_string(),
            media_type: command.media_type,
        })
    }
}

/// Use case applying an encoder status report to a video's audio/video asset.
///
/// Returns whether the video changed. A resource id that matches neither the
/// video nor the trailer asset leaves the video untouched.
pub struct UpdateMediaStatus<'a, V: VideoGateway> {
    videos: &'a mut V,
}

impl<'a, V: VideoGateway> UpdateMediaStatus<'a, V> {
    pub fn new(videos: &'a mut V) -> Self {
        Self { videos }
    }

    pub fn execute(&mut self, command: UpdateMediaStatusCommand) -> DomainResult<bool> {
        if command.status == MediaStatus::Completed
            && (command.folder.trim().is_empty() || command.filename.trim().is_empty())
        {
            return Err(DomainError::InvalidValue(format!(
                "completed media {} must name its encoded folder and file",
                command.resource_id
            )));
        }

        let video_id = VideoId::from(command.video_id.as_str());
        let mut video = self
            .videos
            .find_by_id(&video_id)?
            .ok_or_else(|| DomainError::not_found("Video", &video_id))?;

        let resource_id = MediaId::from(command.resource_id.as_str());
        let Some(media_type) = video.audio_video_slot(&resource_id) else {
            warn!(
                video_id = %video_id,
                resource_id = %resource_id,
                "Status update for unknown media resource ignored"
            );
            return Ok(false);
        };

        let changed =
            video.apply_media_status(media_type, command.status, &command.encoded_location())?;
        if changed {
            self.videos.update(video)?;
            info!(
                video_id = %video_id,
                media_type = %media_type,
                status = %command.status,
                "Media status updated"
            );
        }
        Ok(changed)
    }
}

/// Use case returning the stored bytes of one of a video's media slots
pub struct GetMedia<'a, R: MediaResourceGateway> {
    media: &'a R,
}

impl<'a, R: MediaResourceGateway> GetMedia<'a, R> {
    pub fn new(media: &'a R) -> Self {
        Self { media }
    }

    pub fn execute(&self, command: GetMediaCommand) -> DomainResult<MediaOutput> {
        let media_type =
            VideoMediaType::of(&command.media_type).ok_or_else(|| DomainError::NotFound {
                message: format!("Media type {} does not exist", command.media_type),
            })?;
        let video_id = VideoId::from(command.video_id);

        self.media
            .get_resource(&video_id, media_type)?
            .map(MediaOutput::from)
            .ok_or_else(|| DomainError::NotFound {
                message: format!("Resource {} not found for video {}", media_type, video_id),
            })
    }
}
