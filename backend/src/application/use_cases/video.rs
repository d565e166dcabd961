use super::validate_associations;
use crate::application::dto::{
    CreateVideoCommand, CreateVideoOutput, UpdateVideoCommand, UpdateVideoOutput, VideoListOutput,
    VideoOutput, VideoResources,
};
use crate::application::gateways::{
    CastMemberGateway, CategoryGateway, EventService, GenreGateway, MediaResourceGateway,
    VideoGateway,
};
use crate::domain::{
    AggregateRoot, CastMemberId, CategoryId, DomainError, DomainResult, Entity, GenreId,
    Notification, Pagination, Rating, Resource, Video, VideoDetails, VideoId, VideoMediaCreated,
    VideoMediaType, VideoRelations, VideoResource, VideoSearchQuery,
};
use tracing::{debug, error, info};

/// Read access to the aggregates a video can reference
pub struct VideoAssociations<'a, C, G, M> {
    categories: &'a C,
    genres: &'a G,
    cast_members: &'a M,
}

impl<'a, C, G, M> VideoAssociations<'a, C, G, M>
where
    C: CategoryGateway,
    G: GenreGateway,
    M: CastMemberGateway,
{
    pub fn new(categories: &'a C, genres: &'a G, cast_members: &'a M) -> Self {
        Self {
            categories,
            genres,
            cast_members,
        }
    }

    /// One error per association kind with missing ids
    fn validate(&self, relations: &VideoRelations) -> DomainResult<Notification> {
        let mut notification =
            validate_associations("categories", &relations.categories, |ids| {
                self.categories.exists_by_ids(ids)
            })?;
        notification.append_all(validate_associations("genres", &relations.genres, |ids| {
            self.genres.exists_by_ids(ids)
        })?);
        notification.append_all(validate_associations(
            "cast members",
            &relations.cast_members,
            |ids| self.cast_members.exists_by_ids(ids),
        )?);
        Ok(notification)
    }
}

fn video_details(
    title: Option<String>,
    description: Option<String>,
    launched_at: Option<i32>,
    duration: f64,
    opened: bool,
    published: bool,
    rating: Option<String>,
) -> VideoDetails {
    VideoDetails {
        title,
        description,
        launched_at,
        duration,
        opened,
        published,
        rating: rating.as_deref().and_then(Rating::of),
    }
}

fn video_relations(
    categories: Vec<String>,
    genres: Vec<String>,
    cast_members: Vec<String>,
) -> VideoRelations {
    VideoRelations {
        categories: categories.into_iter().map(CategoryId::from).collect(),
        genres: genres.into_iter().map(GenreId::from).collect(),
        cast_members: cast_members.into_iter().map(CastMemberId::from).collect(),
    }
}

/// Store a resource and attach the resulting media to the matching slot
pub(super) fn attach_resource<R: MediaResourceGateway>(
    media: &mut R,
    video: &mut Video,
    media_type: VideoMediaType,
    resource: Resource,
) -> DomainResult<()> {
    let video_id = video.id().clone();
    let resource = VideoResource::new(resource, media_type);

    match media_type {
        VideoMediaType::Video => {
            video.set_video(media.store_audio_video(&video_id, &resource)?);
        }
        VideoMediaType::Trailer => {
            video.set_trailer(media.store_audio_video(&video_id, &resource)?);
        }
        VideoMediaType::Banner => {
            video.set_banner(media.store_image(&video_id, &resource)?);
        }
        VideoMediaType::Thumbnail => {
            video.set_thumbnail(media.store_image(&video_id, &resource)?);
        }
        VideoMediaType::ThumbnailHalf => {
            video.set_thumbnail_half(media.store_image(&video_id, &resource)?);
        }
    }

    debug!(video_id = %video_id, media_type = %media_type, "Stored media resource");
    Ok(())
}

fn attach_resources<R: MediaResourceGateway>(
    media: &mut R,
    video: &mut Video,
    resources: VideoResources,
) -> DomainResult<()> {
    for (media_type, resource) in resources.into_slots() {
        attach_resource(media, video, media_type, resource)?;
    }
    Ok(())
}

/// Publish events drained from a video that has been saved
pub(super) fn publish_events<E: EventService>(
    events: &mut E,
    pending: Vec<VideoMediaCreated>,
) -> DomainResult<()> {
    for event in &pending {
        events.send(event)?;
        info!(
            video_id = %event.video_id,
            resource_id = %event.resource_id,
            "Published media created event"
        );
    }
    Ok(())
}

/// Use case for creating a video with its associations and media.
///
/// If any resource fails to store, or the video fails to persist, every
/// resource stored for the new video is cleared before the error is returned.
pub struct CreateVideo<'a, V, R, E, C, G, M>
where
    V: VideoGateway,
    R: MediaResourceGateway,
    E: EventService,
{
    videos: &'a mut V,
    media: &'a mut R,
    events: &'a mut E,
    associations: VideoAssociations<'a, C, G, M>,
}

impl<'a, V, R, E, C, G, M> CreateVideo<'a, V, R, E, C, G, M>
where
    V: VideoGateway,
    R: MediaResourceGateway,
    E: EventService,
    C: CategoryGateway,
    G: GenreGateway,
    M: CastMemberGateway,
{
    pub fn new(
        videos: &'a mut V,
        media: &'a mut R,
        events: &'a mut E,
        associations: VideoAssociations<'a, C, G, M>,
    ) -> Self {
        Self {
            videos,
            media,
            events,
            associations,
        }
    }

    pub fn execute(&mut self, command: CreateVideoCommand) -> DomainResult<CreateVideoOutput> {
        let details = video_details(
            command.title,
            command.description,
            command.launched_at,
            command.duration,
            command.opened,
            command.published,
            command.rating,
        );
        let relations = video_relations(command.categories, command.genres, command.cast_members);

        let mut notification = self.associations.validate(&relations)?;
        let video = Video::new_video(details, relations);
        video.validate(&mut notification);

        if notification.has_error() {
            debug!("Rejected video: {}", notification);
            return Err(DomainError::validation(
                "Could not create Aggregate Video",
                notification,
            ));
        }

        let video_id = video.id().clone();
        let (created, pending) = match self.store_and_create(video, command.resources) {
            Ok(result) => result,
            Err(failure) => {
                error!(video_id = %video_id, "Failed to create video: {}", failure);
                if let Err(cleanup) = self.media.clear_resources(&video_id) {
                    error!(video_id = %video_id, "Failed to clear resources: {}", cleanup);
                }
                return Err(failure);
            }
        };

        publish_events(self.events, pending)?;
        info!(video_id = %created.id(), "Video created");
        Ok(CreateVideoOutput::from(&created))
    }

    fn store_and_create(
        &mut self,
        mut video: Video,
        resources: VideoResources,
    ) -> DomainResult<(Video, Vec<VideoMediaCreated>)> {
        attach_resources(self.media, &mut video, resources)?;
        let pending = video.take_events();
        let created = self.videos.create(video)?;
        Ok((created, pending))
    }
}

/// Use case for updating a video's data, associations and media
pub struct UpdateVideo<'a, V, R, E, C, G, M>
where
    V: VideoGateway,
    R: MediaResourceGateway,
    E: EventService,
{
    videos: &'a mut V,
    media: &'a mut R,
    events: &'a mut E,
    associations: VideoAssociations<'a, C, G, M>,
}

impl<'a, V, R, E, C, G, M> UpdateVideo<'a, V, R, E, C, G, M>
where
    V: VideoGateway,
    R: MediaResourceGateway,
    E: EventService,
    C: CategoryGateway,
    G: GenreGateway,
    M: CastMemberGateway,
{
    pub fn new(
        videos: &'a mut V,
        media: &'a mut R,
        events: &'a mut E,
        associations: VideoAssociations<'a, C, G, M>,
    ) -> Self {
        Self {
            videos,
            media,
            events,
            associations,
        }
    }

    pub fn execute(&mut self, command: UpdateVideoCommand) -> DomainResult<UpdateVideoOutput> {
        let id = VideoId::from(command.id);
        let mut video = self
            .videos
            .find_by_id(&id)?
            .ok_or_else(|| DomainError::not_found("Video", &id))?;

        let details = video_details(
            command.title,
            command.description,
            command.launched_at,
            command.duration,
            command.opened,
            command.published,
            command.rating,
        );
        let relations = video_relations(command.categories, command.genres, command.cast_members);

        let mut notification = self.associations.validate(&relations)?;
        video.update(details, relations);
        video.validate(&mut notification);

        if notification.has_error() {
            debug!(video_id = %id, "Rejected video update: {}", notification);
            return Err(DomainError::validation(
                format!("Could not update Aggregate Video {}", id),
                notification,
            ));
        }

        attach_resources(self.media, &mut video, command.resources)?;
        let pending = video.take_events();
        let updated = self.videos.update(video)?;

        publish_events(self.events, pending)?;
        Ok(UpdateVideoOutput::from(&updated))
    }
}

/// Use case for deleting a video and the media stored for it.
///
/// Deleting an unknown id still clears its resource prefix. Cleanup failures
/// are returned to the caller.
pub struct DeleteVideo<'a, V: VideoGateway, R: MediaResourceGateway> {
    videos: &'a mut V,
    media: &'a mut R,
}

impl<'a, V: VideoGateway, R: MediaResourceGateway> DeleteVideo<'a, V, R> {
    pub fn new(videos: &'a mut V, media: &'a mut R) -> Self {
        Self { videos, media }
    }

    pub fn execute(&mut self, id: &str) -> DomainResult<()> {
        let id = VideoId::from(id);
        self.videos.delete_by_id(&id)?;
        self.media.clear_resources(&id)
    }
}

pub struct GetVideoById<'a, V: VideoGateway> {
    gateway: &'a V,
}

impl<'a, V: VideoGateway> GetVideoById<'a, V> {
    pub fn new(gateway: &'a V) -> Self {
        Self { gateway }
    }

    pub fn execute(&self, id: &str) -> DomainResult<VideoOutput> {
        let id = VideoId::from(id);
        self.gateway
            .find_by_id(&id)?
            .map(|video| VideoOutput::from(&video))
            .ok_or_else(|| DomainError::not_found("Video", &id))
    }
}

pub struct ListVideos<'a, V: VideoGateway> {
    gateway: &'a V,
}

impl<'a, V: VideoGateway> ListVideos<'a, V> {
    pub fn new(gateway: &'a V) -> Self {
        Self { gateway }
    }

    pub fn execute(&self, query: &VideoSearchQuery) -> DomainResult<Pagination<VideoListOutput>> {
        Ok(self
            .gateway
            .find_all(query)?
            .map(|video| VideoListOutput::from(&video)))
    }
}
