pub mod dto;
pub mod gateways;
pub mod services;
pub mod use_cases;

#[cfg(test)]
pub(crate) mod fakes;

pub use gateways::{
    CastMemberGateway, CategoryGateway, EventService, GenreGateway, MediaResourceGateway,
    VideoGateway,
};
pub use services::{
    EncoderResult, EncoderResultListener, ListenerCallback, ListenerError, ListenerEvent,
    ListenerResult, ListenerStats,
};
