pub mod entities;
pub mod policies;
pub mod ports;
pub mod prompts;
pub mod services;
pub mod sponsors;
pub mod validation;
pub mod value_objects;

pub use entities::*;
pub use ports::*;
pub use value_objects::*;

/// Number of items every digest must contain.
pub const DIGEST_ITEM_COUNT: usize = 10;
