// Domain layer module
pub mod aggregates;
pub mod base;
pub mod entities;
pub mod events;
pub mod pagination;
pub mod validation;
pub mod value_objects;

pub use aggregates::*;
pub use base::*;
pub use entities::*;
pub use events::*;
pub use pagination::*;
pub use validation::*;
pub use value_objects::*;
