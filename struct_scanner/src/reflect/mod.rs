//! Compile-time reflection used by the decode engine.
//!
//! [`Scan`] is the typed contract every decodable type fulfils and
//! [`Reflect`] is its object-safe face, which lets the engine recurse through
//! `&mut dyn Reflect` without knowing concrete types.

mod impls;
mod kind;
mod type_info;

use std::any::Any;

pub use kind::Kind;
pub use type_info::{FieldDef, NameFn, Type, TypeInfo, type_info};

use crate::{ConvertError, Value};

/// A type the engine can describe, convert into, and traverse.
///
/// Implemented for `bool`, the primitive numbers, `String`, `Vec<T>`,
/// `Option<T>`, `Box<T>` and [`Value`]; structs get it from
/// `#[derive(Scan)]`.
pub trait Scan: Sized + 'static {
    /// Static descriptor of the type.
    const TYPE: &'static TypeInfo;

    /// Zero value stored when the engine allocates a nil pointer target.
    fn zero() -> Self;

    /// Lifts `self` into the dynamic value model.
    fn into_value(self) -> Value;

    /// Coerces a dynamic value into `Self`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConvertError`] when the value has no conversion into
    /// `Self`.
    fn from_value(value: Value) -> Result<Self, ConvertError>;

    /// Mutable access to the exported field at `index`; structs only.
    fn reflect_field(&mut self, index: usize) -> Option<&mut dyn Reflect> {
        let _ = index;
        None
    }

    /// Mutable access to a pointer's target; pointers only.
    ///
    /// With `allocate` set, a nil pointer is first pointed at a fresh
    /// [`Scan::zero`] value.
    fn reflect_pointee(&mut self, allocate: bool) -> Option<&mut dyn Reflect> {
        let _ = allocate;
        None
    }
}

/// Object-safe view over any [`Scan`] value.
pub trait Reflect: Any {
    /// Dynamic type of the value.
    fn reflect_type(&self) -> Type;

    /// Converts `value` into this type and overwrites `self` with it.
    ///
    /// # Errors
    ///
    /// Returns a [`ConvertError`] when the conversion fails; `self` is left
    /// untouched in that case.
    fn assign(&mut self, value: Value) -> Result<(), ConvertError>;

    /// See [`Scan::reflect_field`].
    fn field_mut(&mut self, index: usize) -> Option<&mut dyn Reflect>;

    /// See [`Scan::reflect_pointee`].
    fn pointee_mut(&mut self, allocate: bool) -> Option<&mut dyn Reflect>;
}

impl<T: Scan> Reflect for T {
    fn reflect_type(&self) -> Type {
        Type::of::<T>()
    }

    fn assign(&mut self, value: Value) -> Result<(), ConvertError> {
        *self = T::from_value(value)?;
        Ok(())
    }

    fn field_mut(&mut self, index: usize) -> Option<&mut dyn Reflect> {
        self.reflect_field(index)
    }

    fn pointee_mut(&mut self, allocate: bool) -> Option<&mut dyn Reflect> {
        self.reflect_pointee(allocate)
    }
}
