// Domain aggregates
pub mod cast_member;
pub mod category;
pub mod genre;
pub mod video;

pub use cast_member::CastMember;
pub use category::Category;
pub use genre::Genre;
pub use video::{Video, VideoDetails, VideoMedias, VideoRelations};
