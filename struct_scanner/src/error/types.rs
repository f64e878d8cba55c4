//! Error enums surfaced by the tag parser, the conversion subsystem and the
//! decode engine.

use thiserror::Error;

use super::FieldPath;
use crate::{BoxError, Type};

/// Malformed raw tag text.
///
/// Every variant carries the raw tag verbatim so callers can locate the
/// defect in the field declaration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum TagError {
    /// A `:` appeared with no tag name before it.
    #[error("malformed tag `{tag}`: missing tag name at byte {offset}")]
    MissingName {
        /// Raw tag text.
        tag: String,
        /// Byte offset of the empty name.
        offset: usize,
    },

    /// A tag name was not followed by `:"value"`.
    #[error("malformed tag `{tag}`: tag `{name}` has no value")]
    MissingValue {
        /// Raw tag text.
        tag: String,
        /// Tag name lacking a value.
        name: String,
    },

    /// A control character appeared outside a quoted value.
    #[error("malformed tag `{tag}`: invalid character with code {code} at byte {offset}")]
    ControlCharacter {
        /// Raw tag text.
        tag: String,
        /// Unicode code point of the offending character.
        code: u32,
        /// Byte offset of the offending character.
        offset: usize,
    },

    /// The value after `name:` did not start with `"`.
    #[error("malformed tag `{tag}`: missing quotes around the value of `{name}`")]
    MissingQuotes {
        /// Raw tag text.
        tag: String,
        /// Tag name whose value is unquoted.
        name: String,
    },

    /// A quoted value ran to the end of the tag.
    #[error("malformed tag `{tag}`: missing end quote for the value of `{name}`")]
    MissingEndQuote {
        /// Raw tag text.
        tag: String,
        /// Tag name whose value is unterminated.
        name: String,
    },

    /// A quoted value contained an unsupported escape sequence.
    #[error("malformed tag `{tag}`: invalid escape `\\{escape}` in the value of `{name}`")]
    InvalidEscape {
        /// Raw tag text.
        tag: String,
        /// Tag name whose value holds the escape.
        name: String,
        /// Character following the backslash.
        escape: char,
    },
}

/// Failure coercing a value into a destination type.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum ConvertError {
    /// No conversion exists between the two types.
    #[error("cannot convert \"{from}\" to \"{to}\"")]
    Mismatch {
        /// Observed source type.
        from: Type,
        /// Declared destination type.
        to: Type,
    },

    /// A sequence destination received something that is not a sequence.
    #[error("expected slice for \"{to}\", got \"{from}\": {value}")]
    ExpectedSlice {
        /// Observed source type.
        from: Type,
        /// Declared sequence type.
        to: Type,
        /// Rendered source value.
        value: String,
    },

    /// A nil pointer was converted into a type that cannot be nil.
    #[error("cannot convert nil \"{from}\" to \"{to}\"")]
    NilPointer {
        /// Observed pointer type.
        from: Type,
        /// Declared destination type.
        to: Type,
    },

    /// Converting one sequence element failed.
    #[error("element {index}: {source}")]
    Element {
        /// Zero-based element index.
        index: usize,
        /// Failure for that element.
        #[source]
        source: Box<ConvertError>,
    },
}

/// Errors returned by [`decode`](crate::decode) and
/// [`get_struct_info`](crate::get_struct_info).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ScanError {
    /// A field's raw tag text is malformed.
    #[error("invalid tag on field {field} of \"{ty}\": {source}")]
    Tag {
        /// Struct declaring the field.
        ty: Type,
        /// Field carrying the tag.
        field: String,
        /// Parse failure.
        #[source]
        source: TagError,
    },

    /// Struct info was requested for something other than a struct.
    #[error("{}can only get struct info from structs, got \"{ty}\"", field_prefix(.field.as_deref()))]
    NotAStruct {
        /// Field whose nested decoder targeted the type, if any.
        field: Option<String>,
        /// Offending type.
        ty: Type,
    },

    /// Struct info was requested for a struct value instead of a pointer.
    #[error("expected struct pointer, got \"{ty}\"")]
    ExpectedStructPointer {
        /// Offending type.
        ty: Type,
    },

    /// The decode destination is a nil pointer.
    #[error("expected non-nil pointer, got nil \"{ty}\"")]
    NilPointer {
        /// Pointer type of the destination.
        ty: Type,
    },

    /// A struct's [`Scan`](crate::Scan) implementation does not expose a
    /// field its descriptor declares.
    #[error("struct \"{ty}\" does not expose field {field}")]
    MissingField {
        /// Struct type.
        ty: Type,
        /// Declared field name.
        field: String,
    },

    /// The decoding strategy failed; the error is kept unchanged.
    #[error("error decoding field {field}: {source}")]
    Decoder {
        /// Field being decoded.
        field: String,
        /// Error returned by the strategy.
        #[source]
        source: BoxError,
    },

    /// Converting a decoded value into the field type failed.
    #[error("error converting {path}: {}", .source.innermost())]
    Convert {
        /// Field, plus element indices for sequence failures.
        path: FieldPath,
        /// Conversion failure.
        #[source]
        source: ConvertError,
    },

    /// Decoding the members of a nested struct failed.
    #[error("error decoding nested field {field}: {source}")]
    Nested {
        /// Nested struct field.
        field: String,
        /// Failure inside the nested struct.
        #[source]
        source: Box<ScanError>,
    },

    /// Nested decoding went deeper than
    /// [`DecodeOptions::max_depth`](crate::DecodeOptions::max_depth).
    #[error("error decoding nested field {field}: maximum nesting depth {max_depth} exceeded")]
    DepthExceeded {
        /// Field that would have exceeded the limit.
        field: String,
        /// Configured limit.
        max_depth: usize,
    },
}

fn field_prefix(field: Option<&str>) -> String {
    field.map_or_else(String::new, |field| format!("field {field}: "))
}
