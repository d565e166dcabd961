pub mod cast_member;
pub mod category;
pub mod genre;
pub mod video;

pub use cast_member::*;
pub use category::*;
pub use genre::*;
pub use video::*;
