//! Input parsing for the `Scan` derive macro.
//!
//! Collects the struct identifier, generics, and per-field metadata in one
//! pass so expansion fails fast with spanned errors.

use syn::{Data, DeriveInput, Fields, Visibility};

use super::{ScanField, ScanInput, parse_field_attrs, parse_struct_attrs};

/// Validates `input` and gathers everything generation needs.
pub(crate) fn parse_input(input: &DeriveInput) -> Result<ScanInput, syn::Error> {
    let attrs = parse_struct_attrs(&input.attrs)?;
    let named = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            Fields::Unnamed(_) | Fields::Unit => {
                return Err(syn::Error::new_spanned(
                    data.struct_token,
                    "Scan requires named fields",
                ));
            }
        },
        Data::Enum(_) | Data::Union(_) => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "Scan can only be derived for structs",
            ));
        }
    };

    let mut fields = Vec::with_capacity(named.len());
    for field in named {
        let ident = field
            .ident
            .clone()
            .ok_or_else(|| syn::Error::new_spanned(field, "Scan requires named fields"))?;
        fields.push(ScanField {
            ident,
            ty: field.ty.clone(),
            exported: !matches!(field.vis, Visibility::Inherited),
            attrs: parse_field_attrs(&field.attrs)?,
        });
    }

    Ok(ScanInput {
        ident: input.ident.clone(),
        generics: input.generics.clone(),
        attrs,
        fields,
    })
}
