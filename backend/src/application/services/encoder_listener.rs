/// Intake of encoder result messages
use crate::application::dto::UpdateMediaStatusCommand;
use crate::application::gateways::VideoGateway;
use crate::application::use_cases::UpdateMediaStatus;
use crate::domain::MediaStatus;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{mpsc, Mutex};

#[derive(Error, Debug)]
pub enum ListenerError {
    #[error("Malformed encoder message: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("Domain error: {0}")]
    Domain(#[from] crate::domain::base::DomainError),
}

pub type ListenerResult<T> = Result<T, ListenerError>;

/// Output location reported for a finished encoding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedVideoMetadata {
    pub encoded_video_folder: String,
    pub resource_id: String,
    pub file_path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncoderErrorDetail {
    pub message: String,
}

/// Message published by the encoder once it is done with a resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EncoderResult {
    Completed {
        id: String,
        video: EncodedVideoMetadata,
    },
    Error {
        error: EncoderErrorDetail,
        #[serde(default)]
        message: Option<serde_json::Value>,
    },
}

impl EncoderResult {
    pub fn parse(payload: &str) -> ListenerResult<Self> {
        Ok(serde_json::from_str(payload)?)
    }
}

impl EncodedVideoMetadata {
    /// Completion of the resource this metadata describes
    pub fn status_command(&self, video_id: &str) -> UpdateMediaStatusCommand {
        UpdateMediaStatusCommand::with(
            MediaStatus::Completed,
            video_id,
            &self.resource_id,
            &self.encoded_video_folder,
            &self.file_path,
        )
    }
}

/// Callback type for listener events
pub type ListenerCallback = Arc<dyn Fn(ListenerEvent) + Send + Sync>;

#[derive(Debug, Clone, PartialEq)]
pub enum ListenerEvent {
    MediaCompleted { video_id: String, resource_id: String },
    /// The result changed nothing: unknown resource or already applied
    Ignored { video_id: String, resource_id: String },
    EncoderFailed { message: String },
    Rejected { error: String },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListenerStats {
    pub completed: usize,
    pub ignored: usize,
    pub encoder_errors: usize,
    pub rejected: usize,
}

/// Applies encoder results to the videos they refer to
pub struct EncoderResultListener<V: VideoGateway> {
    videos: Arc<Mutex<V>>,
    callback: Option<ListenerCallback>,
}

impl<V: VideoGateway + Send + 'static> EncoderResultListener<V> {
    pub fn new(videos: Arc<Mutex<V>>, callback: Option<ListenerCallback>) -> Self {
        EncoderResultListener { videos, callback }
    }

    /// Handle one raw message
    pub async fn handle(&self, payload: &str) -> ListenerResult<ListenerEvent> {
        let (video_id, metadata) = match EncoderResult::parse(payload)? {
            EncoderResult::Completed { id, video } => (id, video),
            EncoderResult::Error { error, message } => {
                tracing::error!(
                    "Encoder reported an error: {} (message: {})",
                    error.message,
                    message.map(|m| m.to_string()).unwrap_or_default()
                );
                return Ok(ListenerEvent::EncoderFailed {
                    message: error.message,
                });
            }
        };

        let command = metadata.status_command(&video_id);
        let mut videos = self.videos.lock().await;
        let changed = UpdateMediaStatus::new(&mut *videos).execute(command)?;

        let resource_id = metadata.resource_id;
        if changed {
            Ok(ListenerEvent::MediaCompleted {
                video_id,
                resource_id,
            })
        } else {
            Ok(ListenerEvent::Ignored {
                video_id,
                resource_id,
            })
        }
    }

    /// Drain the channel until every sender is dropped.
    ///
    /// A failing message is logged and counted; it never stops the loop.
    pub async fn listen(&self, mut receiver: mpsc::Receiver<String>) -> ListenerStats {
        tracing::info!("Listening for encoder results");
        let mut stats = ListenerStats::default();

        while let Some(payload) = receiver.recv().await {
            let event = match self.handle(&payload).await {
                Ok(event) => event,
                Err(e) => {
                    tracing::error!("Failed to apply encoder result: {}", e);
                    ListenerEvent::Rejected {
                        error: e.to_string(),
                    }
                }
            };

            match &event {
                ListenerEvent::MediaCompleted { .. } => stats.completed += 1,
                ListenerEvent::Ignored { .. } => stats.ignored += 1,
                ListenerEvent::EncoderFailed { .. } => stats.encoder_errors += 1,
                ListenerEvent::Rejected { .. } => stats.rejected += 1,
            }

            if let Some(ref cb) = self.callback {
                cb(event);
            }
        }

        tracing::info!(
            "Encoder result channel closed: {} completed, {} ignored, {} failed, {} rejected",
            stats.completed,
            stats.ignored,
            stats.encoder_errors,
            stats.rejected
        );
        stats
    }
}
