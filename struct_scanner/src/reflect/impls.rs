//! Built-in [`Scan`] implementations.

use std::fmt;

use super::{Kind, Reflect, Scan, Type, TypeInfo, type_info};
use crate::convert::{self, Number, Numeric};
use crate::{ConvertError, Ptr, Seq, Value};

macro_rules! impl_numeric {
    ($($ty:ident => $kind:ident),* $(,)?) => {$(
        impl Scan for $ty {
            const TYPE: &'static TypeInfo =
                &const { TypeInfo::scalar::<$ty>(Kind::$kind, stringify!($ty)) };

            fn zero() -> Self {
                <$ty>::default()
            }

            fn into_value(self) -> Value {
                Value::$kind(self)
            }

            fn from_value(value: Value) -> Result<Self, ConvertError> {
                convert::numeric::<$ty>(value)
            }
        }

        impl Numeric for $ty {
            #[expect(
                clippy::cast_possible_truncation,
                clippy::cast_possible_wrap,
                clippy::cast_sign_loss,
                clippy::cast_precision_loss,
                reason = "numeric coercion follows `as` semantics"
            )]
            fn from_number(number: Number) -> Self {
                match number {
                    Number::Signed(v) => v as $ty,
                    Number::Unsigned(v) => v as $ty,
                    Number::Float(v) => v as $ty,
                }
            }
        }
    )*};
}

impl_numeric! {
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    usize => Usize,
    f32 => F32,
    f64 => F64,
}

impl Scan for bool {
    const TYPE: &'static TypeInfo = &const { TypeInfo::scalar::<Self>(Kind::Bool, "bool") };

    fn zero() -> Self {
        false
    }

    fn into_value(self) -> Value {
        Value::Bool(self)
    }

    fn from_value(value: Value) -> Result<Self, ConvertError> {
        convert::scalar(value, |value| match value {
            Value::Bool(flag) => Ok(flag),
            other => Err(other),
        })
    }
}

impl Scan for String {
    const TYPE: &'static TypeInfo = &const { TypeInfo::scalar::<Self>(Kind::String, "String") };

    fn zero() -> Self {
        Self::new()
    }

    fn into_value(self) -> Value {
        Value::String(self)
    }

    fn from_value(value: Value) -> Result<Self, ConvertError> {
        convert::scalar(value, |value| match value {
            Value::String(text) => Ok(text),
            other => Err(other),
        })
    }
}

impl Scan for Value {
    const TYPE: &'static TypeInfo = &const { TypeInfo::scalar::<Self>(Kind::Interface, "Value") };

    fn zero() -> Self {
        Self::Nil
    }

    fn into_value(self) -> Self {
        self
    }

    fn from_value(value: Self) -> Result<Self, ConvertError> {
        Ok(value)
    }
}

fn vec_name<T: Scan>(f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Vec<{}>", Type::of::<T>())
}

fn option_name<T: Scan>(f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Option<{}>", Type::of::<T>())
}

fn box_name<T: Scan>(f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Box<{}>", Type::of::<T>())
}

impl<T: Scan> Scan for Vec<T> {
    const TYPE: &'static TypeInfo =
        &const { TypeInfo::slice::<Self>(vec_name::<T>, type_info::<T>) };

    fn zero() -> Self {
        Self::new()
    }

    fn into_value(self) -> Value {
        let items = self.into_iter().map(Scan::into_value).collect();
        Value::Seq(Seq::new(Type::of::<Self>(), items))
    }

    fn from_value(value: Value) -> Result<Self, ConvertError> {
        convert::sequence::<T>(value)
    }
}

impl<T: Scan> Scan for Option<T> {
    const TYPE: &'static TypeInfo =
        &const { TypeInfo::pointer::<Self>(option_name::<T>, type_info::<T>) };

    fn zero() -> Self {
        None
    }

    fn into_value(self) -> Value {
        let target = self.map(|inner| Box::new(inner.into_value()));
        Value::Ptr(Ptr::new(Type::of::<Self>(), target))
    }

    fn from_value(value: Value) -> Result<Self, ConvertError> {
        convert::optional::<T>(value)
    }

    fn reflect_pointee(&mut self, allocate: bool) -> Option<&mut dyn Reflect> {
        if allocate && self.is_none() {
            *self = Some(T::zero());
        }
        self.as_mut().map(|inner| inner as &mut dyn Reflect)
    }
}

impl<T: Scan> Scan for Box<T> {
    const TYPE: &'static TypeInfo =
        &const { TypeInfo::pointer::<Self>(box_name::<T>, type_info::<T>) };

    fn zero() -> Self {
        Self::new(T::zero())
    }

    fn into_value(self) -> Value {
        let target = Box::new((*self).into_value());
        Value::Ptr(Ptr::new(Type::of::<Self>(), Some(target)))
    }

    fn from_value(value: Value) -> Result<Self, ConvertError> {
        convert::boxed::<T>(value)
    }

    fn reflect_pointee(&mut self, _allocate: bool) -> Option<&mut dyn Reflect> {
        Some(&mut **self as &mut dyn Reflect)
    }
}
