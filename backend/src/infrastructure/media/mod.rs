/// Media storage infrastructure
mod media_resource_gateway;
mod storage;

pub use media_resource_gateway::DefaultMediaResourceGateway;
pub use storage::{InMemoryStorage, LocalFileStorage, StorageService};
