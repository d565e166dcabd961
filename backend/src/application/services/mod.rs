pub mod encoder_listener;

pub use encoder_listener::{
    EncodedVideoMetadata, EncoderErrorDetail, EncoderResult, EncoderResultListener,
    ListenerCallback, ListenerError, ListenerEvent, ListenerResult, ListenerStats,
};
