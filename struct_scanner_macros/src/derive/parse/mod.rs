//! Parsing utilities for the `Scan` derive macro.

use syn::meta::ParseNestedMeta;
use syn::{Attribute, LitStr};

mod input;
mod literals;

pub(crate) use input::parse_input;
use literals::{lit_path, lit_str};

/// Struct-level `#[scan(...)]` attributes.
#[derive(Default, Clone)]
pub(crate) struct StructAttrs {
    /// Overrides the generated crate path for dependency aliasing.
    pub crate_path: Option<syn::Path>,
    /// Type name reported in diagnostics instead of the identifier.
    pub rename: Option<LitStr>,
}

/// Field-level `#[scan(...)]` attributes.
///
/// - `tag` holds the raw tag text exactly as written.
/// - `embedded` marks the field as embedded.
/// - `skip` hides an exported field from the engine.
#[derive(Default, Clone)]
pub(crate) struct FieldAttrs {
    pub tag: Option<LitStr>,
    pub embedded: bool,
    pub skip: bool,
}

/// One named field of the input struct.
pub(crate) struct ScanField {
    pub ident: syn::Ident,
    pub ty: syn::Type,
    /// Declared with an explicit visibility.
    pub exported: bool,
    pub attrs: FieldAttrs,
}

impl ScanField {
    /// Whether the engine sees this field.
    pub(crate) const fn is_visible(&self) -> bool {
        self.exported && !self.attrs.skip
    }
}

/// Everything generation needs from the input struct.
pub(crate) struct ScanInput {
    pub ident: syn::Ident,
    pub generics: syn::Generics,
    pub attrs: StructAttrs,
    pub fields: Vec<ScanField>,
}

/// Iterate all `#[scan(...)]` attributes once and apply a callback.
fn parse_scan<F>(attrs: &[Attribute], mut f: F) -> syn::Result<()>
where
    F: FnMut(&ParseNestedMeta) -> syn::Result<()>,
{
    for attr in attrs.iter().filter(|a| a.path().is_ident("scan")) {
        attr.parse_nested_meta(|meta| f(&meta))?;
    }
    Ok(())
}

/// Parses struct-level attributes; unknown keys are rejected.
pub(crate) fn parse_struct_attrs(attrs: &[Attribute]) -> Result<StructAttrs, syn::Error> {
    let mut out = StructAttrs::default();
    parse_scan(attrs, |meta| {
        if meta.path.is_ident("crate") {
            out.crate_path = Some(lit_path(meta, "crate")?);
        } else if meta.path.is_ident("rename") {
            out.rename = Some(lit_str(meta, "rename")?);
        } else {
            return Err(meta.error("unsupported scan option on struct; expected `crate` or `rename`"));
        }
        Ok(())
    })?;
    Ok(out)
}

/// Parses field-level attributes; unknown keys are rejected.
pub(crate) fn parse_field_attrs(attrs: &[Attribute]) -> Result<FieldAttrs, syn::Error> {
    let mut out = FieldAttrs::default();
    parse_scan(attrs, |meta| {
        if meta.path.is_ident("tag") {
            out.tag = Some(lit_str(meta, "tag")?);
        } else if meta.path.is_ident("embedded") {
            out.embedded = true;
        } else if meta.path.is_ident("skip") {
            out.skip = true;
        } else {
            return Err(meta.error(
                "unsupported scan option on field; expected `tag`, `embedded` or `skip`",
            ));
        }
        Ok(())
    })?;
    Ok(out)
}
