//! Code generation for the `Scan` derive macro.

use proc_macro2::TokenStream;
use quote::quote;

use super::crate_path;
use super::parse::{ScanField, ScanInput};

/// Builds the `FieldDef` expression for an exposed field.
fn field_def(krate: &TokenStream, field: &ScanField) -> TokenStream {
    let name = field.ident.to_string();
    let ty = &field.ty;
    let tag = field
        .attrs
        .tag
        .as_ref()
        .map(|tag| quote! { .with_tag(#tag) });
    let embedded = field.attrs.embedded.then(|| quote! { .embedded() });
    quote! {
        #krate::FieldDef::new(#name, #krate::type_info::<#ty>) #tag #embedded
    }
}

/// Initialiser used by `Scan::zero`.
///
/// Fields hidden from the engine fall back to `Default`.
fn zero_init(krate: &TokenStream, field: &ScanField) -> TokenStream {
    let ident = &field.ident;
    let ty = &field.ty;
    if field.is_visible() {
        quote! { #ident: <#ty as #krate::Scan>::zero() }
    } else {
        quote! { #ident: ::core::default::Default::default() }
    }
}

/// Generates the `Scan` implementation for a parsed struct.
pub(crate) fn scan_impl(input: &ScanInput) -> TokenStream {
    let krate = crate_path::resolve(input.attrs.crate_path.as_ref());
    let ident = &input.ident;
    let name = input
        .attrs
        .rename
        .as_ref()
        .map_or_else(|| ident.to_string(), syn::LitStr::value);

    let mut generics = input.generics.clone();
    let params: Vec<_> = generics
        .type_params()
        .map(|param| param.ident.clone())
        .collect();
    let bounds = generics.make_where_clause();
    for param in params {
        bounds
            .predicates
            .push(syn::parse_quote! { #param: #krate::Scan });
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let visible: Vec<&ScanField> = input.fields.iter().filter(|f| f.is_visible()).collect();
    let defs = visible.iter().map(|field| field_def(&krate, field));
    let arms = visible.iter().enumerate().map(|(index, field)| {
        let field_ident = &field.ident;
        quote! { #index => ::core::option::Option::Some(&mut self.#field_ident as &mut dyn #krate::Reflect) }
    });
    let inits = input.fields.iter().map(|field| zero_init(&krate, field));

    quote! {
        #[automatically_derived]
        impl #impl_generics #krate::Scan for #ident #ty_generics #where_clause {
            const TYPE: &'static #krate::TypeInfo = &const {
                #krate::TypeInfo::structure::<Self>(#name, &const { [ #( #defs ),* ] })
            };

            fn zero() -> Self {
                Self { #( #inits ),* }
            }

            fn into_value(self) -> #krate::Value {
                #krate::Value::Struct(#krate::StructValue::new(self))
            }

            fn from_value(
                value: #krate::Value,
            ) -> ::core::result::Result<Self, #krate::ConvertError> {
                #krate::__private::structure::<Self>(value)
            }

            fn reflect_field(
                &mut self,
                index: usize,
            ) -> ::core::option::Option<&mut dyn #krate::Reflect> {
                match index {
                    #( #arms, )*
                    _ => ::core::option::Option::None,
                }
            }
        }
    }
}
