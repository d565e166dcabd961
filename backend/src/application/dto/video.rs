use crate::domain::{
    base::Entity, AudioVideoMedia, ImageMedia, MediaStatus, Resource, Video, VideoMediaType,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Optional uploads carried alongside a create/update command
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VideoResources {
    pub video: Option<Resource>,
    pub trailer: Option<Resource>,
    pub banner: Option<Resource>,
    pub thumbnail: Option<Resource>,
    pub thumbnail_half: Option<Resource>,
}

impl VideoResources {
    /// Present resources paired with their slot, in slot order
    pub fn into_slots(self) -> Vec<(VideoMediaType, Resource)> {
        [
            (VideoMediaType::Video, self.video),
            (VideoMediaType::Trailer, self.trailer),
            (VideoMediaType::Banner, self.banner),
            (VideoMediaType::Thumbnail, self.thumbnail),
            (VideoMediaType::ThumbnailHalf, self.thumbnail_half),
        ]
        .into_iter()
        .filter_map(|(media_type, resource)| resource.map(|r| (media_type, r)))
        .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CreateVideoCommand {
    pub title: Option<String>,
    pub description: Option<String>,
    pub launched_at: Option<i32>,
    pub duration: f64,
    pub opened: bool,
    pub published: bool,
    pub rating: Option<String>,
    pub categories: Vec<String>,
    pub genres: Vec<String>,
    pub cast_members: Vec<String>,
    pub resources: VideoResources,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateVideoOutput {
    pub id: String,
}

impl From<&Video> for CreateVideoOutput {
    fn from(video: &Video) -> Self {
        CreateVideoOutput {
            id: video.id().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct UpdateVideoCommand {
    pub id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub launched_at: Option<i32>,
    pub duration: f64,
    pub opened: bool,
    pub published: bool,
    pub rating: Option<String>,
    pub categories: Vec<String>,
    pub genres: Vec<String>,
    pub cast_members: Vec<String>,
    pub resources: VideoResources,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateVideoOutput {
    pub id: String,
}

impl From<&Video> for UpdateVideoOutput {
    fn from(video: &Video) -> Self {
        UpdateVideoOutput {
            id: video.id().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AudioVideoMediaOutput {
    pub id: String,
    pub checksum: String,
    pub name: String,
    pub location: String,
    pub encoded_location: Option<String>,
    pub status: MediaStatus,
}

impl From<&AudioVideoMedia> for AudioVideoMediaOutput {
    fn from(media: &AudioVideoMedia) -> Self {
        AudioVideoMediaOutput {
            id: media.id().to_string(),
            checksum: media.checksum().to_string(),
            name: media.name().to_string(),
            location: media.raw_location().to_string(),
            encoded_location: media.encoded_location().map(str::to_string),
            status: media.status(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageMediaOutput {
    pub id: String,
    pub checksum: String,
    pub name: String,
    pub location: String,
}

impl From<&ImageMedia> for ImageMediaOutput {
    fn from(media: &ImageMedia) -> Self {
        ImageMediaOutput {
            id: media.id().to_string(),
            checksum: media.checksum().to_string(),
            name: media.name().to_string(),
            location: media.location().to_string(),
        }
    }
}

/// Full projection of a video
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoOutput {
    pub id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub launched_at: Option<i32>,
    pub duration: f64,
    pub opened: bool,
    pub published: bool,
    pub rating: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub video: Option<AudioVideoMediaOutput>,
    pub trailer: Option<AudioVideoMediaOutput>,
    pub banner: Option<ImageMediaOutput>,
    pub thumbnail: Option<ImageMediaOutput>,
    pub thumbnail_half: Option<ImageMediaOutput>,
    pub categories: Vec<String>,
    pub genres: Vec<String>,
    pub cast_members: Vec<String>,
}

impl From<&Video> for VideoOutput {
    fn from(video: &Video) -> Self {
        VideoOutput {
            id: video.id().to_string(),
            title: video.title().map(str::to_string),
            description: video.description().map(str::to_string),
            launched_at: video.launched_at(),
            duration: video.duration(),
            opened: video.opened(),
            published: video.published(),
            rating: video.rating().map(|r| r.name().to_string()),
            created_at: video.created_at(),
            updated_at: video.updated_at(),
            video: video.video().map(AudioVideoMediaOutput::from),
            trailer: video.trailer().map(AudioVideoMediaOutput::from),
            banner: video.banner().map(ImageMediaOutput::from),
            thumbnail: video.thumbnail().map(ImageMediaOutput::from),
            thumbnail_half: video.thumbnail_half().map(ImageMediaOutput::from),
            categories: video.categories().iter().map(|id| id.to_string()).collect(),
            genres: video.genres().iter().map(|id| id.to_string()).collect(),
            cast_members: video.cast_members().iter().map(|id| id.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VideoListOutput {
    pub id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Video> for VideoListOutput {
    fn from(video: &Video) -> Self {
        VideoListOutput {
            id: video.id().to_string(),
            title: video.title().map(str::to_string),
            description: video.description().map(str::to_string),
            created_at: video.created_at(),
            updated_at: video.updated_at(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadMediaCommand {
    pub video_id: String,
    pub resource: Resource,
    pub media_type: VideoMediaType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadMediaOutput {
    pub video_id: String,
    pub media_type: VideoMediaType,
}

/// Encoder callback for one audio/video asset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateMediaStatusCommand {
    pub status: MediaStatus,
    pub video_id: String,
    pub resource_id: String,
    pub folder: String,
    pub filename: String,
}

impl UpdateMediaStatusCommand {
    pub fn with(
        status: MediaStatus,
        video_id: &str,
        resource_id: &str,
        folder: &str,
        filename: &str,
    ) -> Self {
        UpdateMediaStatusCommand {
            status,
            video_id: video_id.to_string(),
            resource_id: resource_id.to_string(),
            folder: folder.to_string(),
            filename: filename.to_string(),
        }
    }

    /// Where the encoder wrote its output: `<folder>/<filename>`
    pub fn encoded_location(&self) -> String {
        format!("{}/{}", self.folder, self.filename)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetMediaCommand {
    pub video_id: String,
    pub media_type: String,
}

#[derive(Clone, PartialEq, Eq)]
pub struct MediaOutput {
    pub content: Vec<u8>,
    pub content_type: String,
    pub name: String,
}

impl std::fmt::Debug for MediaOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MediaOutput")
            .field("content_len", &self.content.len())
            .field("content_type", &self.content_type)
            .field("name", &self.name)
            .finish()
    }
}

impl From<Resource> for MediaOutput {
    fn from(resource: Resource) -> Self {
        MediaOutput {
            content: resource.content().to_vec(),
            content_type: resource.content_type().to_string(),
            name: resource.name().to_string(),
        }
    }
}
