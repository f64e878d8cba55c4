//! Populate struct fields from a pluggable, tag-aware decoding strategy.
//!
//! The crate walks the fields of a `#[derive(Scan)]` struct, hands each
//! [`Field`] descriptor to a caller supplied [`TagDecoder`], and assigns
//! whatever the decoder produces after coercing it into the field's declared
//! type. A decoder may also skip a field or return another decoder that is
//! applied to the members of a nested struct.
//!
//! ```rust
//! use struct_scanner::{Decoded, Scan, decode, decoder_fn};
//!
//! #[derive(Debug, Scan)]
//! struct Config {
//!     #[scan(tag = r#"env:"PORT""#)]
//!     pub port: u16,
//!     #[scan(tag = r#"env:"HOST""#)]
//!     pub host: String,
//!     pub untagged: String,
//! }
//!
//! let decoder = decoder_fn(|field| {
//!     Ok(match field.tag("env") {
//!         Some("PORT") => Decoded::value(8080_i64),
//!         Some("HOST") => Decoded::value("localhost"),
//!         _ => Decoded::Skip,
//!     })
//! });
//!
//! let mut config = Config { port: 0, host: String::new(), untagged: "kept".into() };
//! decode(&mut config, &decoder)?;
//! assert_eq!(config.port, 8080);
//! assert_eq!(config.host, "localhost");
//! assert_eq!(config.untagged, "kept");
//! # Ok::<(), struct_scanner::ScanError>(())
//! ```

// Lets `#[derive(Scan)]` output resolve `::struct_scanner` inside this crate.
extern crate self as struct_scanner;

pub use struct_scanner_macros::Scan;

mod convert;
mod decode;
mod decoder;
mod error;
mod info;
mod reflect;
mod tag;
mod value;

pub use convert::convert;
pub use decode::{DEFAULT_MAX_DEPTH, DecodeOptions, decode, decode_dyn, decode_with};
pub use decoder::{
    BoxError, DecodeResult, Decoded, FuncTagDecoder, IntoValue, NestedDecoder, TagDecoder,
    decoder_fn,
};
pub use error::{ConvertError, FieldPath, ScanError, TagError};
pub use info::{Field, StructInfo, Subject, get_struct_info};
pub use reflect::{FieldDef, Kind, NameFn, Reflect, Scan, Type, TypeInfo, type_info};
pub use tag::Tags;
pub use value::{Ptr, Seq, StructValue, Value};

/// Support items referenced by `#[derive(Scan)]` output.
#[doc(hidden)]
pub mod __private {
    pub use crate::convert::structure;
}
