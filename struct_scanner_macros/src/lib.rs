//! Procedural macros for `struct_scanner`.
//!
//! `#[derive(Scan)]` emits the static type descriptor and the field access
//! glue the decode engine needs. Only fields with an explicit visibility are
//! exposed to the engine; private fields keep their values across decodes.
//!
//! Supported attributes:
//!
//! - `#[scan(crate = "path")]` on the struct: path used by generated code.
//! - `#[scan(rename = "Name")]` on the struct: type name used in messages.
//! - `#[scan(tag = "...")]` on a field: raw tag text, parsed at runtime.
//! - `#[scan(embedded)]` on a field: marks it as embedded.
//! - `#[scan(skip)]` on a field: hides an exported field from the engine.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod derive;

/// Derive macro for `struct_scanner::Scan`.
#[proc_macro_derive(Scan, attributes(scan))]
pub fn derive_scan(input: TokenStream) -> TokenStream {
    let derive_input = parse_macro_input!(input as DeriveInput);
    derive::expand(&derive_input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
