/// Domain events
use super::base::{now, DomainEvent};
use super::value_objects::VideoId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Event emitted when a raw audio/video asset is attached to a video and
/// must be picked up by the encoder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoMediaCreated {
    pub video_id: VideoId,
    pub resource_id: String,
    pub file_path: String,
    pub occurred_on: DateTime<Utc>,
}

impl VideoMediaCreated {
    pub fn new(
        video_id: VideoId,
        resource_id: impl Into<String>,
        file_path: impl Into<String>,
    ) -> Self {
        VideoMediaCreated {
            video_id,
            resource_id: resource_id.into(),
            file_path: file_path.into(),
            occurred_on: now(),
        }
    }
}

impl DomainEvent for VideoMediaCreated {
    fn event_type(&self) -> &'static str {
        "VideoMediaCreated"
    }

    fn aggregate_id(&self) -> String {
        self.video_id.as_str().to_string()
    }

    fn occurred_on(&self) -> DateTime<Utc> {
        self.occurred_on
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_video_media_created_event() {
        let event = VideoMediaCreated::new(
            VideoId::from("video-1"),
            "media-1",
            "videoId-video-1/type-VIDEO",
        );

        assert_eq!(event.event_type(), "VideoMediaCreated");
        assert_eq!(event.aggregate_id(), "video-1");
        assert_eq!(event.resource_id, "media-1");
        assert_eq!(event.file_path, "videoId-video-1/type-VIDEO");
    }

    #[test]
    fn test_video_media_created_serializes_resource_fields() {
        let event = VideoMediaCreated::new(VideoId::from("video-1"), "media-1", "raw/path");
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["resource_id"], "media-1");
        assert_eq!(json["file_path"], "raw/path");
        assert_eq!(json["video_id"], "video-1");
    }
}
