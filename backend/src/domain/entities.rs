/// Domain entities: media assets owned by a Video
use super::base::{DomainError, DomainResult, Entity, ValueObject};
use super::value_objects::unique_id;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Identifier of a stored media asset
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MediaId(String);

impl MediaId {
    pub fn unique() -> Self {
        MediaId(unique_id())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for MediaId {
    fn from(id: &str) -> Self {
        MediaId(id.to_string())
    }
}

impl From<String> for MediaId {
    fn from(id: String) -> Self {
        MediaId(id)
    }
}

impl ValueObject for MediaId {}

impl fmt::Display for MediaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Encoding status as reported by the encoder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MediaStatus {
    Pending,
    Processing,
    Completed,
}

impl MediaStatus {
    pub fn of(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "PENDING" => Some(MediaStatus::Pending),
            "PROCESSING" => Some(MediaStatus::Processing),
            "COMPLETED" => Some(MediaStatus::Completed),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MediaStatus::Pending => "PENDING",
            MediaStatus::Processing => "PROCESSING",
            MediaStatus::Completed => "COMPLETED",
        }
    }
}

impl fmt::Display for MediaStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Encoding state of an audio/video asset. Only ever moves forward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodingState {
    Pending,
    Processing,
    Completed { encoded_location: String },
}

impl EncodingState {
    pub fn status(&self) -> MediaStatus {
        match self {
            EncodingState::Pending => MediaStatus::Pending,
            EncodingState::Processing => MediaStatus::Processing,
            EncodingState::Completed { .. } => MediaStatus::Completed,
        }
    }
}

/// Raw audio/video asset plus its encoding progress
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioVideoMedia {
    id: MediaId,
    checksum: String,
    name: String,
    raw_location: String,
    state: EncodingState,
}

impl AudioVideoMedia {
    /// A freshly stored asset, waiting for the encoder
    pub fn new(
        checksum: impl Into<String>,
        name: impl Into<String>,
        raw_location: impl Into<String>,
    ) -> Self {
        AudioVideoMedia {
            id: MediaId::unique(),
            checksum: checksum.into(),
            name: name.into(),
            raw_location: raw_location.into(),
            state: EncodingState::Pending,
        }
    }

    /// Rebuild a stored asset
    pub fn with(
        id: MediaId,
        checksum: impl Into<String>,
        name: impl Into<String>,
        raw_location: impl Into<String>,
        encoded_location: Option<String>,
        status: MediaStatus,
    ) -> DomainResult<Self> {
        let state = match (status, encoded_location) {
            (MediaStatus::Pending, _) => EncodingState::Pending,
            (MediaStatus::Processing, _) => EncodingState::Processing,
            (MediaStatus::Completed, Some(encoded_location)) => {
                EncodingState::Completed { encoded_location }
            }
            (MediaStatus::Completed, None) => {
                return Err(DomainError::InvalidValue(format!(
                    "completed media {} requires an encoded location",
                    id
                )))
            }
        };

        Ok(AudioVideoMedia {
            id,
            checksum: checksum.into(),
            name: name.into(),
            raw_location: raw_location.into(),
            state,
        })
    }

    /// Mark the asset as being encoded. Repeating it is a no-op.
    pub fn processing(self) -> DomainResult<Self> {
        match self.state {
            EncodingState::Pending | EncodingState::Processing => Ok(AudioVideoMedia {
                state: EncodingState::Processing,
                ..self
            }),
            EncodingState::Completed { .. } => Err(DomainError::InvalidOperation(format!(
                "media {} is already completed and cannot go back to processing",
                self.id
            ))),
        }
    }

    /// Record the encoded output. Completing twice with the same location is a no-op.
    pub fn completed(self, encoded_location: impl Into<String>) -> DomainResult<Self> {
        let encoded_location = encoded_location.into();
        if let EncodingState::Completed {
            encoded_location: current,
        } = &self.state
        {
            if *current != encoded_location {
                return Err(DomainError::InvalidOperation(format!(
                    "media {} is already completed at {}",
                    self.id, current
                )));
            }
        }

        Ok(AudioVideoMedia {
            state: EncodingState::Completed { encoded_location },
            ..self
        })
    }

    pub fn checksum(&self) -> &str {
        &self.checksum
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn raw_location(&self) -> &str {
        &self.raw_location
    }

    pub fn encoded_location(&self) -> Option<&str> {
        match &self.state {
            EncodingState::Completed { encoded_location } => Some(encoded_location),
            _ => None,
        }
    }

    pub fn state(&self) -> &EncodingState {
        &self.state
    }

    pub fn status(&self) -> MediaStatus {
        self.state.status()
    }
}

impl Entity for AudioVideoMedia {
    type Id = MediaId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Stored image; images are served as uploaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageMedia {
    id: MediaId,
    checksum: String,
    name: String,
    location: String,
}

impl ImageMedia {
    pub fn new(
        checksum: impl Into<String>,
        name: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        ImageMedia::with(MediaId::unique(), checksum, name, location)
    }

    pub fn with(
        id: MediaId,
        checksum: impl Into<String>,
        name: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        ImageMedia {
            id,
            checksum: checksum.into(),
            name: name.into(),
            location: location.into(),
        }
    }

    pub fn checksum(&self) -> &str {
        &self.checksum
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> &str {
        &self.location
    }
}

impl Entity for ImageMedia {
    type Id = MediaId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Slot of a video a media asset is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VideoMediaType {
    Video,
    Trailer,
    Banner,
    Thumbnail,
    ThumbnailHalf,
}

impl VideoMediaType {
    pub const ALL: [VideoMediaType; 5] = [
        VideoMediaType::Video,
        VideoMediaType::Trailer,
        VideoMediaType::Banner,
        VideoMediaType::Thumbnail,
        VideoMediaType::ThumbnailHalf,
    ];

    pub fn of(value: &str) -> Option<Self> {
        VideoMediaType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(value.trim()))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            VideoMediaType::Video => "VIDEO",
            VideoMediaType::Trailer => "TRAILER",
            VideoMediaType::Banner => "BANNER",
            VideoMediaType::Thumbnail => "THUMBNAIL",
            VideoMediaType::ThumbnailHalf => "THUMBNAIL_HALF",
        }
    }

    /// Whether this slot holds an encodable audio/video asset
    pub fn is_audio_video(&self) -> bool {
        matches!(self, VideoMediaType::Video | VideoMediaType::Trailer)
    }
}

impl fmt::Display for VideoMediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Raw binary payload submitted for storage
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    checksum: String,
    content: Vec<u8>,
    content_type: String,
    name: String,
}

impl Resource {
    /// Build a resource, computing the SHA-256 checksum of its content
    pub fn new(content: Vec<u8>, content_type: impl Into<String>, name: impl Into<String>) -> Self {
        let checksum = format!("{:x}", Sha256::digest(&content));
        Resource::with(checksum, content, content_type, name)
    }

    pub fn with(
        checksum: impl Into<String>,
        content: Vec<u8>,
        content_type: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Resource {
            checksum: checksum.into(),
            content,
            content_type: content_type.into(),
            name: name.into(),
        }
    }

    pub fn checksum(&self) -> &str {
        &self.checksum
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resource")
            .field("checksum", &self.checksum)
            .field("content_len", &self.content.len())
            .field("content_type", &self.content_type)
            .field("name", &self.name)
            .finish()
    }
}

/// A resource addressed to one of a video's media slots
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoResource {
    pub resource: Resource,
    pub media_type: VideoMediaType,
}

impl VideoResource {
    pub fn new(resource: Resource, media_type: VideoMediaType) -> Self {
        VideoResource {
            resource,
            media_type,
        }
    }
}
