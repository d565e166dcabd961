// Infrastructure layer module
pub mod events;
pub mod media;
pub mod persistence;
