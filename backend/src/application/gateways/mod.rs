mod cast_member_gateway;
mod category_gateway;
mod event_service;
mod genre_gateway;
mod media_resource_gateway;
mod video_gateway;

pub use cast_member_gateway::CastMemberGateway;
pub use category_gateway::CategoryGateway;
pub use event_service::EventService;
pub use genre_gateway::GenreGateway;
pub use media_resource_gateway::MediaResourceGateway;
pub use video_gateway::VideoGateway;
