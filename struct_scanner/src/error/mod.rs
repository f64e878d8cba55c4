//! Error types produced by the tag parser, conversions and the decode engine.

mod chain;
mod path;
mod types;

pub use path::FieldPath;
pub use types::{ConvertError, ScanError, TagError};
