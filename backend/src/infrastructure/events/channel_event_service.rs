use crate::application::gateways::EventService;
use crate::domain::{DomainError, DomainEvent, DomainResult};
use serde::Serialize;
use tokio::sync::mpsc;

/// Publishes events as JSON onto a bounded channel consumed by the encoder
#[derive(Clone)]
pub struct ChannelEventService {
    sender: mpsc::Sender<String>,
}

impl ChannelEventService {
    pub fn new(sender: mpsc::Sender<String>) -> Self {
        ChannelEventService { sender }
    }

    /// Service plus the receiving end of a channel holding up to `buffer` events
    pub fn channel(buffer: usize) -> (Self, mpsc::Receiver<String>) {
        let (sender, receiver) = mpsc::channel(buffer.max(1));
        (ChannelEventService::new(sender), receiver)
    }
}

impl EventService for ChannelEventService {
    fn send<E>(&mut self, event: &E) -> DomainResult<()>
    where
        E: DomainEvent + Serialize,
    {
        let payload = serde_json::to_string(event)
            .map_err(|e| DomainError::Messaging(format!("cannot serialize event: {}", e)))?;

        self.sender.try_send(payload).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => {
                DomainError::Messaging("event channel is full".to_string())
            }
            mpsc::error::TrySendError::Closed(_) => {
                DomainError::Messaging("event channel is closed".to_string())
            }
        })?;

        tracing::debug!(
            event_type = event.event_type(),
            aggregate_id = %event.aggregate_id(),
            "Published event"
        );
        Ok(())
    }
}
