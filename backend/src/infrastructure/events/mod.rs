/// Event publishing infrastructure
mod channel_event_service;

pub use channel_event_service::ChannelEventService;
