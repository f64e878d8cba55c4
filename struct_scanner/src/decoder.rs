//! The decoding strategy extension point.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::{Field, Scan, Value};

/// Error type returned by decoding strategies.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Result of asking a strategy about one field.
pub type DecodeResult<'s> = Result<Decoded<'s>, BoxError>;

/// A decoding strategy: decides, per field, what the engine should do.
///
/// Strategies inspect the [`Field`] descriptor (usually its tags) and return
/// a value to assign, [`Decoded::Skip`], or another strategy to apply to the
/// members of a nested struct. Returned strategies may borrow from `self`,
/// which lets a strategy recurse with itself via [`Decoded::nested_ref`].
pub trait TagDecoder {
    /// Decodes one field.
    ///
    /// # Errors
    ///
    /// Any error is returned unchanged inside
    /// [`ScanError::Decoder`](crate::ScanError::Decoder).
    fn decode_field(&self, field: &Field) -> DecodeResult<'_>;
}

impl<T: TagDecoder + ?Sized> TagDecoder for &T {
    fn decode_field(&self, field: &Field) -> DecodeResult<'_> {
        (**self).decode_field(field)
    }
}

impl<T: TagDecoder + ?Sized> TagDecoder for Box<T> {
    fn decode_field(&self, field: &Field) -> DecodeResult<'_> {
        (**self).decode_field(field)
    }
}

impl<T: TagDecoder + ?Sized> TagDecoder for Arc<T> {
    fn decode_field(&self, field: &Field) -> DecodeResult<'_> {
        (**self).decode_field(field)
    }
}

/// What a strategy produced for a field.
#[derive(Debug)]
pub enum Decoded<'s> {
    /// Convert this value into the field type and assign it.
    Value(Value),
    /// Leave the field untouched.
    Skip,
    /// Decode the members of the nested struct with this strategy.
    Nested(NestedDecoder<'s>),
}

impl<'s> Decoded<'s> {
    /// Assigns `value`.
    #[must_use]
    pub fn value(value: impl IntoValue) -> Self {
        Self::Value(value.lift())
    }

    /// Recurses with an owned strategy.
    #[must_use]
    pub fn nested(decoder: impl TagDecoder + 's) -> Self {
        Self::Nested(NestedDecoder::Owned(Box::new(decoder)))
    }

    /// Recurses with a borrowed strategy, typically `self`.
    #[must_use]
    pub fn nested_ref(decoder: &'s dyn TagDecoder) -> Self {
        Self::Nested(NestedDecoder::Borrowed(decoder))
    }
}

impl From<Value> for Decoded<'_> {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

/// Strategy returned for a nested struct field.
pub enum NestedDecoder<'s> {
    /// Borrowed strategy.
    Borrowed(&'s dyn TagDecoder),
    /// Owned strategy.
    Owned(Box<dyn TagDecoder + 's>),
}

impl NestedDecoder<'_> {
    /// The strategy as a trait object.
    #[must_use]
    pub fn as_decoder(&self) -> &dyn TagDecoder {
        match self {
            Self::Borrowed(decoder) => *decoder,
            Self::Owned(decoder) => decoder.as_ref(),
        }
    }
}

impl fmt::Debug for NestedDecoder<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Borrowed(_) => f.write_str("NestedDecoder::Borrowed(..)"),
            Self::Owned(_) => f.write_str("NestedDecoder::Owned(..)"),
        }
    }
}

/// Values a strategy can hand to [`Decoded::value`].
pub trait IntoValue {
    /// Lifts `self` into a [`Value`].
    fn lift(self) -> Value;
}

impl<T: Scan> IntoValue for T {
    fn lift(self) -> Value {
        self.into_value()
    }
}

impl IntoValue for &str {
    fn lift(self) -> Value {
        Value::String(self.to_owned())
    }
}

/// Adapts a closure into a [`TagDecoder`]; see [`decoder_fn`].
pub struct FuncTagDecoder<'s, F> {
    func: F,
    _nested: PhantomData<fn() -> Decoded<'s>>,
}

impl<'s, F> TagDecoder for FuncTagDecoder<'s, F>
where
    F: Fn(&Field) -> DecodeResult<'s>,
{
    fn decode_field(&self, field: &Field) -> DecodeResult<'_> {
        (self.func)(field)
    }
}

impl<F> fmt::Debug for FuncTagDecoder<'_, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FuncTagDecoder").finish_non_exhaustive()
    }
}

/// Builds a strategy from a closure.
///
/// Strategies returned by the closure for nested structs may borrow anything
/// that outlives `'s`.
///
/// # Examples
///
/// ```rust
/// use struct_scanner::{Decoded, Kind, decoder_fn};
///
/// let inner = decoder_fn(|_| Ok(Decoded::value(42_i64)));
/// let outer = decoder_fn(|field| {
///     Ok(if field.kind == Kind::Struct {
///         Decoded::nested_ref(&inner)
///     } else {
///         Decoded::value(64_i64)
///     })
/// });
/// # let _ = outer;
/// ```
pub const fn decoder_fn<'s, F>(func: F) -> FuncTagDecoder<'s, F>
where
    F: Fn(&Field) -> DecodeResult<'s>,
{
    FuncTagDecoder {
        func,
        _nested: PhantomData,
    }
}
