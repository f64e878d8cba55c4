//! Coercion of dynamic [`Value`]s into statically typed destinations.
//!
//! Every [`Scan`] implementation routes `from_value` through one of the
//! helpers below. Non-pointer destinations first follow source pointers,
//! pointer destinations wrap a converted target, numbers convert across
//! widths with `as` semantics, and sequences convert element by element.

use crate::{ConvertError, Scan, Type, Value};

/// Runs the conversion subsystem against a runtime type.
///
/// The returned value has exactly the type `to`.
///
/// # Errors
///
/// Returns a [`ConvertError`] when `value` has no conversion into `to`.
///
/// # Examples
///
/// ```rust
/// use struct_scanner::{Type, Value, convert};
///
/// let value = convert(Value::of(vec![1_u64, 2]), Type::of::<Vec<f32>>())?;
/// assert_eq!(value.type_of(), Type::of::<Vec<f32>>());
/// # Ok::<(), struct_scanner::ConvertError>(())
/// ```
pub fn convert(value: Value, to: Type) -> Result<Value, ConvertError> {
    to.convert(value)
}

/// Widest representation of a numeric source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Number {
    Signed(i64),
    Unsigned(u64),
    Float(f64),
}

/// Numeric destination types.
pub(crate) trait Numeric: Scan {
    fn from_number(number: Number) -> Self;
}

fn number(value: &Value) -> Option<Number> {
    let number = match *value {
        Value::I8(v) => Number::Signed(i64::from(v)),
        Value::I16(v) => Number::Signed(i64::from(v)),
        Value::I32(v) => Number::Signed(i64::from(v)),
        Value::I64(v) => Number::Signed(v),
        Value::Isize(v) => Number::Signed(i64::try_from(v).ok()?),
        Value::U8(v) => Number::Unsigned(u64::from(v)),
        Value::U16(v) => Number::Unsigned(u64::from(v)),
        Value::U32(v) => Number::Unsigned(u64::from(v)),
        Value::U64(v) => Number::Unsigned(v),
        Value::Usize(v) => Number::Unsigned(u64::try_from(v).ok()?),
        Value::F32(v) => Number::Float(f64::from(v)),
        Value::F64(v) => Number::Float(v),
        _ => return None,
    };
    Some(number)
}

fn mismatch(value: &Value, to: Type) -> ConvertError {
    ConvertError::Mismatch {
        from: value.type_of(),
        to,
    }
}

/// Follows pointers until a non-pointer value is reached.
fn deref(value: Value, to: Type) -> Result<Value, ConvertError> {
    let mut current = value;
    loop {
        current = match current {
            Value::Ptr(ptr) => {
                let from = ptr.ty();
                ptr.into_target()
                    .ok_or(ConvertError::NilPointer { from, to })?
            }
            Value::Nil => {
                return Err(ConvertError::NilPointer {
                    from: Type::of::<Value>(),
                    to,
                });
            }
            other => return Ok(other),
        };
    }
}

pub(crate) fn numeric<T: Numeric>(value: Value) -> Result<T, ConvertError> {
    let to = Type::of::<T>();
    let target = deref(value, to)?;
    number(&target)
        .map(T::from_number)
        .ok_or_else(|| mismatch(&target, to))
}

/// Converts non-numeric scalars; `extract` hands back values it rejects.
pub(crate) fn scalar<T: Scan>(
    value: Value,
    extract: impl FnOnce(Value) -> Result<T, Value>,
) -> Result<T, ConvertError> {
    let to = Type::of::<T>();
    extract(deref(value, to)?).map_err(|rejected| mismatch(&rejected, to))
}

pub(crate) fn sequence<T: Scan>(value: Value) -> Result<Vec<T>, ConvertError> {
    let to = Type::of::<Vec<T>>();
    match deref(value, to)? {
        Value::Seq(seq) => seq
            .into_items()
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                T::from_value(item).map_err(|source| ConvertError::Element {
                    index,
                    source: Box::new(source),
                })
            })
            .collect(),
        other => Err(ConvertError::ExpectedSlice {
            from: other.type_of(),
            to,
            value: other.to_string(),
        }),
    }
}

pub(crate) fn optional<T: Scan>(value: Value) -> Result<Option<T>, ConvertError> {
    if value.type_of() == Type::of::<T>() && !matches!(value, Value::Nil) {
        return T::from_value(value).map(Some);
    }
    match value {
        Value::Nil => Ok(None),
        Value::Ptr(ptr) => ptr.into_target().map(T::from_value).transpose(),
        other => T::from_value(other).map(Some),
    }
}

pub(crate) fn boxed<T: Scan>(value: Value) -> Result<Box<T>, ConvertError> {
    if value.type_of() == Type::of::<T>() {
        return T::from_value(value).map(Box::new);
    }
    let to = Type::of::<Box<T>>();
    let target = match value {
        Value::Ptr(ptr) => {
            let from = ptr.ty();
            ptr.into_target()
                .ok_or(ConvertError::NilPointer { from, to })?
        }
        Value::Nil => {
            return Err(ConvertError::NilPointer {
                from: Type::of::<Value>(),
                to,
            });
        }
        other => other,
    };
    T::from_value(target).map(Box::new)
}

/// Recovers a `#[derive(Scan)]` struct from a dynamic value.
///
/// # Errors
///
/// Returns [`ConvertError::Mismatch`] when the value holds another type and
/// [`ConvertError::NilPointer`] when it is a nil pointer.
pub fn structure<T: Scan>(value: Value) -> Result<T, ConvertError> {
    let to = Type::of::<T>();
    match deref(value, to)? {
        Value::Struct(held) => held.downcast::<T>().map_err(|rejected| ConvertError::Mismatch {
            from: rejected.ty(),
            to,
        }),
        other => Err(mismatch(&other, to)),
    }
}
