//! Struct introspection: field descriptors with parsed tags.

mod cache;

use std::sync::Arc;

use crate::{Kind, Scan, ScanError, Tags, Type, Value};

/// Descriptor of one exported struct field.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct Field {
    /// Declared field name.
    pub name: &'static str,
    /// Structural kind of the declared type.
    pub kind: Kind,
    /// Declared type.
    pub ty: Type,
    /// Tags parsed from the field's raw tag text.
    pub tags: Tags,
    /// Whether the field was declared `#[scan(embedded)]`.
    pub is_embedded: bool,
    /// Position among the struct's exported fields.
    pub index: usize,
}

impl Field {
    /// Value of the tag `name`, if declared.
    #[must_use]
    pub fn tag(&self, name: &str) -> Option<&str> {
        self.tags.get(name)
    }
}

/// Exported fields of one struct type, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructInfo {
    ty: Type,
    fields: Vec<Field>,
}

impl StructInfo {
    /// Struct info for `T`.
    ///
    /// # Errors
    ///
    /// Fails like [`get_struct_info`] does for `Type::of::<T>()`.
    pub fn of<T: Scan>() -> Result<Arc<Self>, ScanError> {
        get_struct_info(Type::of::<T>())
    }

    /// Struct type described.
    #[must_use]
    pub const fn ty(&self) -> Type {
        self.ty
    }

    /// Exported fields in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Field named `name`.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }
}

/// Input accepted by [`get_struct_info`].
#[derive(Debug, Clone, Copy)]
pub enum Subject<'a> {
    /// A struct type or a pointer-to-struct type.
    Type(Type),
    /// A pointer value; struct values held directly are rejected.
    Value(&'a Value),
}

impl From<Type> for Subject<'_> {
    fn from(ty: Type) -> Self {
        Self::Type(ty)
    }
}

impl<'a> From<&'a Value> for Subject<'a> {
    fn from(value: &'a Value) -> Self {
        Self::Value(value)
    }
}

/// Returns the exported fields of a struct, parsing their tags.
///
/// Accepts a struct [`Type`], a pointer-to-struct type such as `Option<S>`
/// or `Option<Box<S>>`, or a [`Value::Ptr`] whose type is one. A nil pointer
/// value is fine since only type information is read. Results are cached
/// per type.
///
/// # Errors
///
/// - [`ScanError::ExpectedStructPointer`] for a struct value held directly.
/// - [`ScanError::NotAStruct`] for a non-struct type or value, or a pointer to
///   one; the pointed-to type is quoted.
/// - [`ScanError::Tag`] when a field's tag text is malformed.
///
/// # Examples
///
/// ```rust
/// use struct_scanner::{Scan, Type, get_struct_info};
///
/// #[derive(Scan)]
/// struct Config {
///     #[scan(tag = r#"env:"PORT""#)]
///     pub port: u16,
///     secret: String,
/// }
///
/// let info = get_struct_info(Type::of::<Option<Config>>())?;
/// assert_eq!(info.fields().len(), 1);
/// assert_eq!(info.field("port").and_then(|field| field.tag("env")), Some("PORT"));
/// # Ok::<(), struct_scanner::ScanError>(())
/// ```
pub fn get_struct_info<'a>(subject: impl Into<Subject<'a>>) -> Result<Arc<StructInfo>, ScanError> {
    let subject_ty = match subject.into() {
        Subject::Type(ty) => ty,
        Subject::Value(Value::Ptr(ptr)) => ptr.ty(),
        Subject::Value(Value::Struct(value)) => {
            return Err(ScanError::ExpectedStructPointer { ty: value.ty() });
        }
        Subject::Value(value) => value.type_of(),
    };
    cache::get_or_build(struct_type(subject_ty)?, build)
}

/// Resolves a struct type, looking through pointers.
fn struct_type(ty: Type) -> Result<Type, ScanError> {
    let target = ty.deref_type();
    if target.kind() == Kind::Struct {
        Ok(target)
    } else {
        Err(ScanError::NotAStruct {
            field: None,
            ty: target,
        })
    }
}

fn build(ty: Type) -> Result<StructInfo, ScanError> {
    let fields = ty
        .field_defs()
        .iter()
        .enumerate()
        .map(|(index, def)| {
            let tags = Tags::parse(def.tag()).map_err(|source| ScanError::Tag {
                ty,
                field: def.name().to_owned(),
                source,
            })?;
            let field_ty = def.ty();
            Ok(Field {
                name: def.name(),
                kind: field_ty.kind(),
                ty: field_ty,
                tags,
                is_embedded: def.is_embedded(),
                index,
            })
        })
        .collect::<Result<_, ScanError>>()?;
    Ok(StructInfo { ty, fields })
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Result, anyhow, ensure};
    use rstest::rstest;

    #[derive(Scan)]
    struct Inner {
        pub a: i64,
    }

    #[derive(Scan)]
    struct Sample {
        #[scan(tag = r#"env:"first" map:"1""#)]
        pub first: String,
        hidden: bool,
        #[scan(embedded)]
        pub inner: Inner,
        #[scan(skip)]
        pub skipped: u8,
        pub(crate) last: Option<Vec<u16>>,
    }

    #[derive(Scan)]
    struct BadTag {
        #[scan(tag = r#"env:"unterminated"#)]
        pub field: String,
    }

    #[test]
    fn lists_exported_fields_in_order() -> Result<()> {
        let info = StructInfo::of::<Sample>()?;
        let names: Vec<_> = info.fields().iter().map(|field| field.name).collect();
        ensure!(names == ["first", "inner", "last"], "got {names:?}");

        let first = info.field("first").ok_or_else(|| anyhow!("first missing"))?;
        ensure!(first.kind == Kind::String);
        ensure!(first.tag("env") == Some("first"));
        ensure!(first.tags.len() == 2);

        let inner = info.field("inner").ok_or_else(|| anyhow!("inner missing"))?;
        ensure!(inner.is_embedded && inner.kind == Kind::Struct && inner.index == 1);
        ensure!(inner.tags.is_empty());

        let last = info.field("last").ok_or_else(|| anyhow!("last missing"))?;
        ensure!(last.kind == Kind::Ptr);
        ensure!(last.ty.name() == "Option<Vec<u16>>");
        Ok(())
    }

    #[rstest]
    #[case(Type::of::<Sample>())]
    #[case(Type::of::<Option<Sample>>())]
    #[case(Type::of::<Box<Sample>>())]
    #[case(Type::of::<Option<Box<Sample>>>())]
    fn accepts_struct_and_pointer_types(#[case] ty: Type) -> Result<()> {
        let info = get_struct_info(ty)?;
        ensure!(info.ty() == Type::of::<Sample>());
        Ok(())
    }

    #[test]
    fn zero_values_default_hidden_fields() {
        let zero = Sample::zero();
        assert!(!zero.hidden);
        assert_eq!(zero.skipped, 0);
        assert!(zero.first.is_empty() && zero.last.is_none());
    }

    #[test]
    fn caches_per_type() -> Result<()> {
        let first = StructInfo::of::<Inner>()?;
        let second = get_struct_info(Type::of::<Option<Inner>>())?;
        ensure!(Arc::ptr_eq(&first, &second));

        let from_thread = std::thread::spawn(|| StructInfo::of::<Inner>().ok())
            .join()
            .map_err(|_| anyhow!("thread panicked"))?
            .ok_or_else(|| anyhow!("lookup failed"))?;
        ensure!(Arc::ptr_eq(&first, &from_thread));
        Ok(())
    }

    #[rstest]
    #[case(Type::of::<i64>(), "\"i64\"")]
    #[case(Type::of::<Option<i64>>(), "\"i64\"")]
    #[case(Type::of::<Vec<Sample>>(), "\"Vec<Sample>\"")]
    fn rejects_non_struct_types(#[case] ty: Type, #[case] quoted: &str) {
        let message = get_struct_info(ty)
            .err()
            .map(|err| err.to_string())
            .unwrap_or_default();
        assert!(
            message.contains("can only get struct info from structs"),
            "{message}"
        );
        assert!(message.contains(quoted), "{message}");
    }

    #[test]
    fn accepts_pointer_values_even_when_nil() -> Result<()> {
        let value = Value::of(None::<Sample>);
        let info = get_struct_info(&value)?;
        ensure!(info.fields().len() == 3);
        Ok(())
    }

    #[test]
    fn rejects_struct_values() {
        let value = Value::of(Inner { a: 1 });
        let err = get_struct_info(&value).err().map(|err| err.to_string());
        assert_eq!(
            err.as_deref(),
            Some(r#"expected struct pointer, got "Inner""#)
        );
    }

    #[rstest]
    #[case(Value::of(5_i64), "\"i64\"")]
    #[case(Value::of(String::from("x")), "\"String\"")]
    #[case(Value::of(vec![1_u8]), "\"Vec<u8>\"")]
    fn rejects_non_struct_values(#[case] value: Value, #[case] quoted: &str) {
        let err = get_struct_info(&value).err();
        assert!(
            matches!(err, Some(ScanError::NotAStruct { field: None, .. })),
            "{err:?}"
        );
        let message = err.map(|err| err.to_string()).unwrap_or_default();
        assert!(
            message.contains("can only get struct info from structs"),
            "{message}"
        );
        assert!(message.contains(quoted), "{message}");
    }

    #[test]
    fn reports_malformed_tags_with_the_field() {
        match StructInfo::of::<BadTag>() {
            Err(ScanError::Tag { field, source, .. }) => {
                assert_eq!(field, "field");
                assert!(matches!(source, crate::TagError::MissingEndQuote { .. }));
            }
            other => panic!("expected a tag error, got {other:?}"),
        }
        // failures are not cached
        assert!(StructInfo::of::<BadTag>().is_err());
    }
}
