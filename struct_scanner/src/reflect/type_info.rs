//! Static type descriptors emitted once per [`Scan`] implementation.

use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};

use super::{Kind, Scan};
use crate::{ConvertError, Value};

/// Writes a composed type name such as `Vec<i64>`.
pub type NameFn = fn(&mut fmt::Formatter<'_>) -> fmt::Result;

#[derive(Clone, Copy)]
enum TypeName {
    Static(&'static str),
    Composed(NameFn),
}

/// Compile-time description of a [`Scan`] type.
///
/// Instances live in `Scan::TYPE` and are built by the `const fn`
/// constructors below, either by the built-in implementations or by
/// `#[derive(Scan)]`.
pub struct TypeInfo {
    kind: Kind,
    name: TypeName,
    id: fn() -> TypeId,
    elem: Option<fn() -> &'static TypeInfo>,
    fields: &'static [FieldDef],
    convert: fn(Value) -> Result<Value, ConvertError>,
}

impl TypeInfo {
    /// Describes a type without inner structure: booleans, numbers, strings
    /// and the interface type.
    #[must_use]
    pub const fn scalar<T: Scan>(kind: Kind, name: &'static str) -> Self {
        Self {
            kind,
            name: TypeName::Static(name),
            id: type_id_of::<T>,
            elem: None,
            fields: &[],
            convert: convert_into::<T>,
        }
    }

    /// Describes a pointer-like type whose target is `elem`.
    #[must_use]
    pub const fn pointer<T: Scan>(name: NameFn, elem: fn() -> &'static Self) -> Self {
        Self {
            kind: Kind::Ptr,
            name: TypeName::Composed(name),
            id: type_id_of::<T>,
            elem: Some(elem),
            fields: &[],
            convert: convert_into::<T>,
        }
    }

    /// Describes a sequence type whose items are `elem`.
    #[must_use]
    pub const fn slice<T: Scan>(name: NameFn, elem: fn() -> &'static Self) -> Self {
        Self {
            kind: Kind::Slice,
            name: TypeName::Composed(name),
            id: type_id_of::<T>,
            elem: Some(elem),
            fields: &[],
            convert: convert_into::<T>,
        }
    }

    /// Describes a struct exposing `fields` in declaration order.
    #[must_use]
    pub const fn structure<T: Scan>(name: &'static str, fields: &'static [FieldDef]) -> Self {
        Self {
            kind: Kind::Struct,
            name: TypeName::Static(name),
            id: type_id_of::<T>,
            elem: None,
            fields,
            convert: convert_into::<T>,
        }
    }
}

fn type_id_of<T: 'static>() -> TypeId {
    TypeId::of::<T>()
}

fn convert_into<T: Scan>(value: Value) -> Result<Value, ConvertError> {
    T::from_value(value).map(Scan::into_value)
}

/// Returns the descriptor of `T`; used as a lazy `fn` pointer so recursive
/// types never evaluate their own descriptor while building it.
#[must_use]
pub fn type_info<T: Scan>() -> &'static TypeInfo {
    T::TYPE
}

/// Copyable handle over a [`TypeInfo`], compared by type identity.
#[derive(Clone, Copy)]
pub struct Type(&'static TypeInfo);

impl Type {
    /// Handle for `T`.
    #[must_use]
    pub const fn of<T: Scan>() -> Self {
        Self(T::TYPE)
    }

    /// Wraps a raw descriptor.
    #[must_use]
    pub const fn from_info(info: &'static TypeInfo) -> Self {
        Self(info)
    }

    /// Structural kind.
    #[must_use]
    pub const fn kind(self) -> Kind {
        self.0.kind
    }

    /// Rendered type name, e.g. `Option<Vec<i64>>`.
    #[must_use]
    pub fn name(self) -> String {
        self.to_string()
    }

    /// Identity of the described Rust type.
    #[must_use]
    pub fn id(self) -> TypeId {
        (self.0.id)()
    }

    /// Target of a pointer or item type of a slice.
    #[must_use]
    pub fn elem(self) -> Option<Self> {
        self.0.elem.map(|elem| Self(elem()))
    }

    /// Field definitions of a struct, empty for every other kind.
    #[must_use]
    pub const fn field_defs(self) -> &'static [FieldDef] {
        self.0.fields
    }

    /// Type reached by following pointer targets; `self` for non-pointers.
    #[must_use]
    pub fn deref_type(self) -> Self {
        let mut current = self;
        while let (Kind::Ptr, Some(elem)) = (current.kind(), current.elem()) {
            current = elem;
        }
        current
    }

    /// Coerces `value` into this type.
    ///
    /// # Errors
    ///
    /// Returns a [`ConvertError`] when the value cannot represent this type.
    pub fn convert(self, value: Value) -> Result<Value, ConvertError> {
        (self.0.convert)(value)
    }
}

impl PartialEq for Type {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for Type {}

impl Hash for Type {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id().hash(state);
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.name {
            TypeName::Static(name) => f.write_str(name),
            TypeName::Composed(write) => write(f),
        }
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Type({self})")
    }
}

/// Declaration of one exported struct field, emitted by `#[derive(Scan)]`.
#[derive(Debug, Clone, Copy)]
pub struct FieldDef {
    name: &'static str,
    tag: &'static str,
    embedded: bool,
    ty: fn() -> &'static TypeInfo,
}

impl FieldDef {
    /// Declares a field named `name` of the type described by `ty`.
    #[must_use]
    pub const fn new(name: &'static str, ty: fn() -> &'static TypeInfo) -> Self {
        Self {
            name,
            tag: "",
            embedded: false,
            ty,
        }
    }

    /// Attaches the raw, unparsed tag string.
    #[must_use]
    pub const fn with_tag(mut self, tag: &'static str) -> Self {
        self.tag = tag;
        self
    }

    /// Marks the field as embedded.
    #[must_use]
    pub const fn embedded(mut self) -> Self {
        self.embedded = true;
        self
    }

    /// Declared field name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Raw tag string exactly as declared.
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        self.tag
    }

    /// Whether the field was declared `#[scan(embedded)]`.
    #[must_use]
    pub const fn is_embedded(&self) -> bool {
        self.embedded
    }

    /// Declared type of the field.
    #[must_use]
    pub fn ty(&self) -> Type {
        Type((self.ty)())
    }
}
