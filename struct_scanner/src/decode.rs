//! The decode engine.
//!
//! Walks the exported fields of a struct in declaration order, asks the
//! strategy about each one and either skips it, assigns a converted value, or
//! recurses into a nested struct with the strategy it returned. The first
//! error aborts the whole call.

use crate::{
    Decoded, Field, FieldPath, Kind, Reflect, Scan, ScanError, StructInfo, TagDecoder,
    get_struct_info,
};

/// Nesting depth allowed by [`DecodeOptions::default`].
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Runtime settings for [`decode_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    max_depth: usize,
}

impl DecodeOptions {
    /// Options with the default depth limit.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Limits how many nested structs may be entered below the target.
    ///
    /// A limit of zero rejects every nested strategy.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Configured depth limit.
    #[must_use]
    pub const fn max_depth(&self) -> usize {
        self.max_depth
    }
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Populates `target` using `decoder` and the default options.
///
/// `target` is a struct, or a pointer (`Option`/`Box`) to one.
///
/// # Errors
///
/// Returns the first [`ScanError`] met; fields decoded before it keep their
/// new values.
pub fn decode<T, D>(target: &mut T, decoder: &D) -> Result<(), ScanError>
where
    T: Scan,
    D: TagDecoder + ?Sized,
{
    decode_with(target, decoder, &DecodeOptions::default())
}

/// Populates `target` using `decoder` and explicit `options`.
///
/// # Errors
///
/// See [`decode`].
pub fn decode_with<T, D>(
    target: &mut T,
    decoder: &D,
    options: &DecodeOptions,
) -> Result<(), ScanError>
where
    T: Scan,
    D: TagDecoder + ?Sized,
{
    decode_dyn(target, &decoder, options)
}

/// Object-safe form of [`decode_with`].
///
/// # Errors
///
/// - [`ScanError::NilPointer`] when `target` is a nil `Option`.
/// - [`ScanError::NotAStruct`] when `target` does not lead to a struct.
/// - Any field-level error; see [`decode`].
pub fn decode_dyn(
    target: &mut dyn Reflect,
    decoder: &dyn TagDecoder,
    options: &DecodeOptions,
) -> Result<(), ScanError> {
    let mut current = target;
    while current.reflect_type().kind() == Kind::Ptr {
        let ty = current.reflect_type();
        current = current
            .pointee_mut(false)
            .ok_or(ScanError::NilPointer { ty })?;
    }
    decode_struct(current, decoder, options, 0)
}

fn decode_struct(
    target: &mut dyn Reflect,
    decoder: &dyn TagDecoder,
    options: &DecodeOptions,
    depth: usize,
) -> Result<(), ScanError> {
    let ty = target.reflect_type();
    if ty.kind() != Kind::Struct {
        return Err(ScanError::NotAStruct { field: None, ty });
    }
    let info = get_struct_info(ty)?;
    tracing::trace!(ty = %ty, depth, fields = info.fields().len(), "decoding struct");

    for field in info.fields() {
        let decoded = decoder
            .decode_field(field)
            .map_err(|source| ScanError::Decoder {
                field: field.name.to_owned(),
                source,
            })?;
        match decoded {
            Decoded::Skip => {
                tracing::trace!(field = field.name, kind = %field.kind, "skipping field");
            }
            Decoded::Nested(nested) => {
                tracing::trace!(field = field.name, kind = %field.kind, "decoding nested field");
                let slot = field_slot(target, &info, field)?;
                decode_nested(slot, field, nested.as_decoder(), options, depth)?;
            }
            Decoded::Value(value) => {
                tracing::trace!(
                    field = field.name,
                    kind = %field.kind,
                    from = %value.type_of(),
                    "assigning field"
                );
                field_slot(target, &info, field)?
                    .assign(value)
                    .map_err(|source| ScanError::Convert {
                        path: FieldPath::new(field.name, &source),
                        source,
                    })?;
            }
        }
    }
    Ok(())
}

fn field_slot<'t>(
    target: &'t mut dyn Reflect,
    info: &StructInfo,
    field: &Field,
) -> Result<&'t mut dyn Reflect, ScanError> {
    target
        .field_mut(field.index)
        .ok_or_else(|| ScanError::MissingField {
            ty: info.ty(),
            field: field.name.to_owned(),
        })
}

/// Recurses into a struct field, allocating nil pointers on the way.
fn decode_nested(
    slot: &mut dyn Reflect,
    field: &Field,
    decoder: &dyn TagDecoder,
    options: &DecodeOptions,
    depth: usize,
) -> Result<(), ScanError> {
    let not_a_struct = || ScanError::NotAStruct {
        field: Some(field.name.to_owned()),
        ty: field.ty,
    };
    if field.ty.deref_type().kind() != Kind::Struct {
        return Err(not_a_struct());
    }
    if depth >= options.max_depth() {
        return Err(ScanError::DepthExceeded {
            field: field.name.to_owned(),
            max_depth: options.max_depth(),
        });
    }

    let mut current = slot;
    while current.reflect_type().kind() == Kind::Ptr {
        current = current.pointee_mut(true).ok_or_else(not_a_struct)?;
    }
    decode_struct(current, decoder, options, depth + 1).map_err(|source| ScanError::Nested {
        field: field.name.to_owned(),
        source: Box::new(source),
    })
}
