//! Dynamically typed values produced by decoders.
//!
//! [`Value`] is what a [`TagDecoder`](crate::TagDecoder) hands back for a
//! field. It keeps enough type information (numeric width, pointer and
//! sequence types, the concrete struct type) for the conversion layer to
//! coerce it into the field's declared type.

use std::any::Any;
use std::fmt;

use crate::{Scan, Type};

/// An owned value of any [`Scan`] type.
#[derive(Debug)]
#[non_exhaustive]
pub enum Value {
    /// The empty interface value.
    Nil,
    /// A `bool`.
    Bool(bool),
    /// An `i8`.
    I8(i8),
    /// An `i16`.
    I16(i16),
    /// An `i32`.
    I32(i32),
    /// An `i64`.
    I64(i64),
    /// An `isize`.
    Isize(isize),
    /// A `u8`.
    U8(u8),
    /// A `u16`.
    U16(u16),
    /// A `u32`.
    U32(u32),
    /// A `u64`.
    U64(u64),
    /// A `usize`.
    Usize(usize),
    /// An `f32`.
    F32(f32),
    /// An `f64`.
    F64(f64),
    /// A `String`.
    String(String),
    /// A `Vec<T>`.
    Seq(Seq),
    /// An `Option<T>` or `Box<T>`.
    Ptr(Ptr),
    /// A `#[derive(Scan)]` struct, held by value.
    Struct(StructValue),
}

impl Value {
    /// Lifts any [`Scan`] value.
    #[must_use]
    pub fn of<T: Scan>(value: T) -> Self {
        value.into_value()
    }

    /// Wraps `items` as a `Vec<Value>`, the heterogeneous sequence type.
    #[must_use]
    pub fn seq(items: Vec<Self>) -> Self {
        Self::Seq(Seq::new(Type::of::<Vec<Self>>(), items))
    }

    /// Dynamic type of the value.
    #[must_use]
    pub fn type_of(&self) -> Type {
        match self {
            Self::Nil => Type::of::<Self>(),
            Self::Bool(_) => Type::of::<bool>(),
            Self::I8(_) => Type::of::<i8>(),
            Self::I16(_) => Type::of::<i16>(),
            Self::I32(_) => Type::of::<i32>(),
            Self::I64(_) => Type::of::<i64>(),
            Self::Isize(_) => Type::of::<isize>(),
            Self::U8(_) => Type::of::<u8>(),
            Self::U16(_) => Type::of::<u16>(),
            Self::U32(_) => Type::of::<u32>(),
            Self::U64(_) => Type::of::<u64>(),
            Self::Usize(_) => Type::of::<usize>(),
            Self::F32(_) => Type::of::<f32>(),
            Self::F64(_) => Type::of::<f64>(),
            Self::String(_) => Type::of::<String>(),
            Self::Seq(seq) => seq.ty(),
            Self::Ptr(ptr) => ptr.ty(),
            Self::Struct(value) => value.ty(),
        }
    }

    /// Returns `true` for [`Value::Nil`] and for nil pointers.
    #[must_use]
    pub const fn is_nil(&self) -> bool {
        match self {
            Self::Nil => true,
            Self::Ptr(ptr) => ptr.is_nil(),
            _ => false,
        }
    }

    /// Converts the value into `T`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConvertError`](crate::ConvertError) when no conversion
    /// exists.
    pub fn into_typed<T: Scan>(self) -> Result<T, crate::ConvertError> {
        T::from_value(self)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil => f.write_str("nil"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::I8(v) => write!(f, "{v}"),
            Self::I16(v) => write!(f, "{v}"),
            Self::I32(v) => write!(f, "{v}"),
            Self::I64(v) => write!(f, "{v}"),
            Self::Isize(v) => write!(f, "{v}"),
            Self::U8(v) => write!(f, "{v}"),
            Self::U16(v) => write!(f, "{v}"),
            Self::U32(v) => write!(f, "{v}"),
            Self::U64(v) => write!(f, "{v}"),
            Self::Usize(v) => write!(f, "{v}"),
            Self::F32(v) => write!(f, "{v}"),
            Self::F64(v) => write!(f, "{v}"),
            Self::String(v) => write!(f, "{v:?}"),
            Self::Seq(seq) => {
                f.write_str("[")?;
                for (index, item) in seq.items().iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Self::Ptr(ptr) => match ptr.target() {
                Some(target) => write!(f, "&{target}"),
                None => f.write_str("nil"),
            },
            Self::Struct(value) => write!(f, "{} {{..}}", value.ty()),
        }
    }
}

/// Sequence value together with its sequence type.
#[derive(Debug)]
pub struct Seq {
    ty: Type,
    items: Vec<Value>,
}

impl Seq {
    /// Builds a sequence of type `ty` from already lifted items.
    #[must_use]
    pub const fn new(ty: Type, items: Vec<Value>) -> Self {
        Self { ty, items }
    }

    /// Sequence type, e.g. `Vec<i64>`.
    #[must_use]
    pub const fn ty(&self) -> Type {
        self.ty
    }

    /// Items in order.
    #[must_use]
    pub fn items(&self) -> &[Value] {
        &self.items
    }

    /// Consumes the sequence, returning its items.
    #[must_use]
    pub fn into_items(self) -> Vec<Value> {
        self.items
    }
}

/// Pointer value: the pointer type plus its target, `None` when nil.
#[derive(Debug)]
pub struct Ptr {
    ty: Type,
    target: Option<Box<Value>>,
}

impl Ptr {
    /// Builds a pointer of type `ty`.
    #[must_use]
    pub const fn new(ty: Type, target: Option<Box<Value>>) -> Self {
        Self { ty, target }
    }

    /// Pointer type, e.g. `Option<i64>`.
    #[must_use]
    pub const fn ty(&self) -> Type {
        self.ty
    }

    /// Returns `true` when the pointer has no target.
    #[must_use]
    pub const fn is_nil(&self) -> bool {
        self.target.is_none()
    }

    /// Borrowed target.
    #[must_use]
    pub fn target(&self) -> Option<&Value> {
        self.target.as_deref()
    }

    /// Consumes the pointer, returning its target.
    #[must_use]
    pub fn into_target(self) -> Option<Value> {
        self.target.map(|target| *target)
    }
}

/// Type-erased struct held by value.
pub struct StructValue {
    ty: Type,
    data: Box<dyn Any>,
}

impl StructValue {
    /// Erases `value`, remembering its type.
    #[must_use]
    pub fn new<T: Scan>(value: T) -> Self {
        Self {
            ty: Type::of::<T>(),
            data: Box::new(value),
        }
    }

    /// Concrete struct type.
    #[must_use]
    pub const fn ty(&self) -> Type {
        self.ty
    }

    /// Recovers the concrete value.
    ///
    /// # Errors
    ///
    /// Returns `self` unchanged when the held value is not a `T`.
    pub fn downcast<T: Scan>(self) -> Result<T, Self> {
        let Self { ty, data } = self;
        data.downcast::<T>()
            .map(|value| *value)
            .map_err(|rejected| Self { ty, data: rejected })
    }
}

impl fmt::Debug for StructValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StructValue")
            .field("ty", &self.ty)
            .finish_non_exhaustive()
    }
}
