#![deny(unsafe_code)]

pub mod aliases;
pub mod engine;
pub mod error;
pub mod suggest;
pub mod utils;

pub use aliases::HeaderAliases;
pub use engine::{ColumnMapper, HeaderCollision, MappingResult};
pub use error::MappingError;
pub use suggest::{AliasSuggestion, closest_alias};
pub use utils::normalize_header;
