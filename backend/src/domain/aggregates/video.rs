use crate::domain::base::{now, AggregateRoot, DomainResult, Entity};
use crate::domain::entities::{AudioVideoMedia, ImageMedia, MediaId, MediaStatus, VideoMediaType};
use crate::domain::events::VideoMediaCreated;
use crate::domain::validation::{check_text_field, Notification, ValidationError};
use crate::domain::value_objects::{CastMemberId, CategoryId, GenreId, Rating, VideoId};
use chrono::{DateTime, Utc};

pub const TITLE_MAX_LENGTH: usize = 255;
pub const DESCRIPTION_MAX_LENGTH: usize = 4000;

/// Descriptive fields of a video, shared by creation and update
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VideoDetails {
    pub title: Option<String>,
    pub description: Option<String>,
    pub launched_at: Option<i32>,
    pub duration: f64,
    pub opened: bool,
    pub published: bool,
    pub rating: Option<Rating>,
}

/// Ids of the aggregates a video is associated with
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VideoRelations {
    pub categories: Vec<CategoryId>,
    pub genres: Vec<GenreId>,
    pub cast_members: Vec<CastMemberId>,
}

/// Media attached to a video, one optional asset per slot
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VideoMedias {
    pub video: Option<AudioVideoMedia>,
    pub trailer: Option<AudioVideoMedia>,
    pub banner: Option<ImageMedia>,
    pub thumbnail: Option<ImageMedia>,
    pub thumbnail_half: Option<ImageMedia>,
}

/// A Video is the catalog's main aggregate: descriptive data, associations
/// to categories/genres/cast members and its media assets.
#[derive(Debug, Clone, PartialEq)]
pub struct Video {
    id: VideoId,
    details: VideoDetails,
    relations: VideoRelations,
    medias: VideoMedias,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    domain_events: Vec<VideoMediaCreated>,
}

impl Video {
    pub fn new_video(details: VideoDetails, relations: VideoRelations) -> Self {
        let now = now();
        Video {
            id: VideoId::unique(),
            details,
            relations: dedup_relations(relations),
            medias: VideoMedias::default(),
            created_at: now,
            updated_at: now,
            domain_events: Vec::new(),
        }
    }

    /// Rebuild a stored video; no events are pending on a loaded aggregate
    pub fn with(
        id: VideoId,
        details: VideoDetails,
        relations: VideoRelations,
        medias: VideoMedias,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Video {
            id,
            details,
            relations: dedup_relations(relations),
            medias,
            created_at,
            updated_at,
            domain_events: Vec::new(),
        }
    }

    /// Replace descriptive data and associations. Media is left untouched.
    pub fn update(&mut self, details: VideoDetails, relations: VideoRelations) -> &mut Self {
        self.details = details;
        self.relations = dedup_relations(relations);
        self.updated_at = now();
        self
    }

    /// Attach the main audio/video asset and announce it to the encoder
    pub fn set_video(&mut self, media: AudioVideoMedia) -> &mut Self {
        self.register_media_created(&media);
        self.medias.video = Some(media);
        self.updated_at = now();
        self
    }

    /// Attach the trailer asset and announce it to the encoder
    pub fn set_trailer(&mut self, media: AudioVideoMedia) -> &mut Self {
        self.register_media_created(&media);
        self.medias.trailer = Some(media);
        self.updated_at = now();
        self
    }

    pub fn set_banner(&mut self, media: ImageMedia) -> &mut Self {
        self.medias.banner = Some(media);
        self.updated_at = now();
        self
    }

    pub fn set_thumbnail(&mut self, media: ImageMedia) -> &mut Self {
        self.medias.thumbnail = Some(media);
        self.updated_at = now();
        self
    }

    pub fn set_thumbnail_half(&mut self, media: ImageMedia) -> &mut Self {
        self.medias.thumbnail_half = Some(media);
        self.updated_at = now();
        self
    }

    /// Slot holding the audio/video asset with the given id, if any
    pub fn audio_video_slot(&self, resource_id: &MediaId) -> Option<VideoMediaType> {
        let matches = |media: &Option<AudioVideoMedia>| {
            media.as_ref().is_some_and(|m| m.id() == resource_id)
        };

        if matches(&self.medias.video) {
            Some(VideoMediaType::Video)
        } else if matches(&self.medias.trailer) {
            Some(VideoMediaType::Trailer)
        } else {
            None
        }
    }

    /// Apply an encoder status report to the video or trailer asset.
    ///
    /// `Pending` leaves the asset unchanged. Returns whether the asset changed.
    pub fn apply_media_status(
        &mut self,
        media_type: VideoMediaType,
        status: MediaStatus,
        encoded_location: &str,
    ) -> DomainResult<bool> {
        let slot = match media_type {
            VideoMediaType::Video => &mut self.medias.video,
            VideoMediaType::Trailer => &mut self.medias.trailer,
            _ => return Ok(false),
        };

        let Some(media) = slot.take() else {
            return Ok(false);
        };

        let transitioned = match status {
            MediaStatus::Pending => Ok(media.clone()),
            MediaStatus::Processing => media.clone().processing(),
            MediaStatus::Completed => media.clone().completed(encoded_location),
        };

        match transitioned {
            Ok(next) => {
                let changed = next != media;
                *slot = Some(next);
                if changed {
                    self.updated_at = now();
                }
                Ok(changed)
            }
            Err(error) => {
                *slot = Some(media);
                Err(error)
            }
        }
    }

    /// Drain the events recorded since the aggregate was created or loaded
    pub fn take_events(&mut self) -> Vec<VideoMediaCreated> {
        std::mem::take(&mut self.domain_events)
    }

    pub fn domain_events(&self) -> &[VideoMediaCreated] {
        &self.domain_events
    }

    pub fn title(&self) -> Option<&str> {
        self.details.title.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.details.description.as_deref()
    }

    pub fn launched_at(&self) -> Option<i32> {
        self.details.launched_at
    }

    pub fn duration(&self) -> f64 {
        self.details.duration
    }

    pub fn opened(&self) -> bool {
        self.details.opened
    }

    pub fn published(&self) -> bool {
        self.details.published
    }

    pub fn rating(&self) -> Option<Rating> {
        self.details.rating
    }

    pub fn details(&self) -> &VideoDetails {
        &self.details
    }

    pub fn categories(&self) -> &[CategoryId] {
        &self.relations.categories
    }

    pub fn genres(&self) -> &[GenreId] {
        &self.relations.genres
    }

    pub fn cast_members(&self) -> &[CastMemberId] {
        &self.relations.cast_members
    }

    pub fn relations(&self) -> &VideoRelations {
        &self.relations
    }

    pub fn video(&self) -> Option<&AudioVideoMedia> {
        self.medias.video.as_ref()
    }

    pub fn trailer(&self) -> Option<&AudioVideoMedia> {
        self.medias.trailer.as_ref()
    }

    pub fn banner(&self) -> Option<&ImageMedia> {
        self.medias.banner.as_ref()
    }

    pub fn thumbnail(&self) -> Option<&ImageMedia> {
        self.medias.thumbnail.as_ref()
    }

    pub fn thumbnail_half(&self) -> Option<&ImageMedia> {
        self.medias.thumbnail_half.as_ref()
    }

    pub fn medias(&self) -> &VideoMedias {
        &self.medias
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn register_media_created(&mut self, media: &AudioVideoMedia) {
        self.domain_events.push(VideoMediaCreated::new(
            self.id.clone(),
            media.id().as_str(),
            media.raw_location(),
        ));
    }
}

fn dedup_relations(relations: VideoRelations) -> VideoRelations {
    VideoRelations {
        categories: dedup(relations.categories),
        genres: dedup(relations.genres),
        cast_members: dedup(relations.cast_members),
    }
}

fn dedup<T: PartialEq>(ids: Vec<T>) -> Vec<T> {
    let mut unique = Vec::with_capacity(ids.len());
    for id in ids {
        if !unique.contains(&id) {
            unique.push(id);
        }
    }
    unique
}

impl Entity for Video {
    type Id = VideoId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl AggregateRoot for Video {
    fn validate(&self, handler: &mut Notification) {
        check_text_field("title", self.title(), 1, TITLE_MAX_LENGTH, handler);

        match self.description() {
            None => {
                handler.append(ValidationError::new("'description' should not be null"));
            }
            Some(description) if description.trim().chars().count() > DESCRIPTION_MAX_LENGTH => {
                handler.append(ValidationError::new(format!(
                    "'description' must be between 0 and {} characters",
                    DESCRIPTION_MAX_LENGTH
                )));
            }
            Some(_) => {}
        }

        if self.launched_at().is_none() {
            handler.append(ValidationError::new("'launchedAt' should not be null"));
        }

        if self.rating().is_none() {
            handler.append(ValidationError::new("'rating' should not be null"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;
    use std::time::Duration;

    fn details() -> VideoDetails {
        VideoDetails {
            title: Some("System Design Interviews".to_string()),
            description: Some("A conversation about distributed systems".to_string()),
            launched_at: Some(2022),
            duration: 120.10,
            opened: false,
            published: false,
            rating: Some(Rating::L),
        }
    }

    fn validate(video: &Video) -> Notification {
        let mut notification = Notification::new();
        video.validate(&mut notification);
        notification
    }

    #[test]
    fn test_new_video() {
        let relations = VideoRelations {
            categories: vec![CategoryId::from("c1"), CategoryId::from("c1")],
            genres: vec![GenreId::from("g1")],
            cast_members: vec![CastMemberId::from("m1")],
        };
        let video = Video::new_video(details(), relations);

        assert_eq!(video.title(), Some("System Design Interviews"));
        assert_eq!(video.launched_at(), Some(2022));
        assert_eq!(video.rating(), Some(Rating::L));
        assert_eq!(video.categories(), &[CategoryId::from("c1")]);
        assert_eq!(video.genres().len(), 1);
        assert_eq!(video.cast_members().len(), 1);
        assert!(video.video().is_none());
        assert!(video.domain_events().is_empty());
        assert_eq!(video.created_at(), video.updated_at());
        assert!(!validate(&video).has_error());
    }

    #[test]
    fn test_validation_reports_every_missing_field() {
        let video = Video::new_video(VideoDetails::default(), VideoRelations::default());

        let notification = validate(&video);
        let messages: Vec<&str> = notification.errors().iter().map(|e| e.message()).collect();
        assert_eq!(
            messages,
            vec![
                "'title' should not be null",
                "'description' should not be null",
                "'launchedAt' should not be null",
                "'rating' should not be null",
            ]
        );
    }

    #[test]
    fn test_validation_length_limits() {
        let mut invalid = details();
        invalid.title = Some("t".repeat(256));
        invalid.description = Some("d".repeat(4001));
        let video = Video::new_video(invalid, VideoRelations::default());

        let notification = validate(&video);
        let messages: Vec<&str> = notification.errors().iter().map(|e| e.message()).collect();
        assert_eq!(
            messages,
            vec![
                "'title' must be between 1 and 255 characters",
                "'description' must be between 0 and 4000 characters",
            ]
        );
    }

    #[test]
    fn test_empty_description_is_allowed() {
        let mut data = details();
        data.description = Some(String::new());
        let video = Video::new_video(data, VideoRelations::default());

        assert!(!validate(&video).has_error());
    }

    #[test]
    fn test_update_keeps_media() {
        let mut video = Video::new_video(details(), VideoRelations::default());
        video.set_banner(ImageMedia::new("abc", "banner.png", "videoId-x/type-BANNER"));
        sleep(Duration::from_millis(1));

        let mut changed = details();
        changed.title = Some("Another title".to_string());
        video.update(changed, VideoRelations::default());

        assert_eq!(video.title(), Some("Another title"));
        assert!(video.banner().is_some());
        assert!(video.updated_at() > video.created_at());
    }

    #[test]
    fn test_set_video_registers_event() {
        let mut video = Video::new_video(details(), VideoRelations::default());
        let media = AudioVideoMedia::new("abc", "video.mp4", "videoId-1/type-VIDEO");
        let media_id = media.id().clone();

        video.set_video(media);

        assert_eq!(video.domain_events().len(), 1);
        let events = video.take_events();
        assert_eq!(events[0].resource_id, media_id.as_str());
        assert_eq!(events[0].file_path, "videoId-1/type-VIDEO");
        assert!(video.domain_events().is_empty());
    }

    #[test]
    fn test_images_do_not_register_events() {
        let mut video = Video::new_video(details(), VideoRelations::default());
        video.set_thumbnail(ImageMedia::new("abc", "thumb.png", "t"));
        video.set_thumbnail_half(ImageMedia::new("abc", "half.png", "h"));

        assert!(video.domain_events().is_empty());
        assert!(video.thumbnail().is_some());
        assert!(video.thumbnail_half().is_some());
    }

    #[test]
    fn test_audio_video_slot_lookup() {
        let mut video = Video::new_video(details(), VideoRelations::default());
        let main = AudioVideoMedia::new("a", "video.mp4", "v");
        let trailer = AudioVideoMedia::new("b", "trailer.mp4", "t");
        let main_id = main.id().clone();
        let trailer_id = trailer.id().clone();
        video.set_video(main).set_trailer(trailer);

        assert_eq!(video.audio_video_slot(&main_id), Some(VideoMediaType::Video));
        assert_eq!(video.audio_video_slot(&trailer_id), Some(VideoMediaType::Trailer));
        assert_eq!(video.audio_video_slot(&MediaId::from("other")), None);
    }

    #[test]
    fn test_apply_media_status_transitions() {
        let mut video = Video::new_video(details(), VideoRelations::default());
        video.set_trailer(AudioVideoMedia::new("b", "trailer.mp4", "t"));

        let changed = video
            .apply_media_status(VideoMediaType::Trailer, MediaStatus::Pending, "")
            .unwrap();
        assert!(!changed);

        video
            .apply_media_status(VideoMediaType::Trailer, MediaStatus::Processing, "")
            .unwrap();
        assert_eq!(video.trailer().unwrap().status(), MediaStatus::Processing);

        video
            .apply_media_status(VideoMediaType::Trailer, MediaStatus::Completed, "enc/trailer.mp4")
            .unwrap();
        let trailer = video.trailer().unwrap();
        assert_eq!(trailer.status(), MediaStatus::Completed);
        assert_eq!(trailer.encoded_location(), Some("enc/trailer.mp4"));
    }

    #[test]
    fn test_rejected_transition_keeps_media() {
        let mut video = Video::new_video(details(), VideoRelations::default());
        video.set_video(AudioVideoMedia::new("a", "video.mp4", "v"));
        video
            .apply_media_status(VideoMediaType::Video, MediaStatus::Completed, "enc/video.mp4")
            .unwrap();

        let result = video.apply_media_status(VideoMediaType::Video, MediaStatus::Processing, "");

        assert!(result.is_err());
        let media = video.video().unwrap();
        assert_eq!(media.status(), MediaStatus::Completed);
        assert_eq!(media.encoded_location(), Some("enc/video.mp4"));
    }

    #[test]
    fn test_apply_media_status_without_media_is_noop() {
        let mut video = Video::new_video(details(), VideoRelations::default());
        let changed = video
            .apply_media_status(VideoMediaType::Video, MediaStatus::Completed, "x/y")
            .unwrap();

        assert!(!changed);
        assert!(video.video().is_none());
    }
}
