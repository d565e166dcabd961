use crate::domain::{DomainEvent, DomainResult};
use serde::Serialize;

/// Outbound port for domain events (the encoder queue).
pub trait EventService {
    fn send<E>(&mut self, event: &E) -> DomainResult<()>
    where
        E: DomainEvent + Serialize;
}
