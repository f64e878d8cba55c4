//! Literal parsing helpers for derive attributes.

use syn::{Lit, LitStr};

/// Parses a literal following `key =` using `extractor`.
fn parse_lit<T, F>(
    meta: &syn::meta::ParseNestedMeta,
    key: &str,
    expected: &str,
    extractor: F,
) -> Result<T, syn::Error>
where
    F: FnOnce(Lit) -> Option<T>,
{
    let literal = meta.value()?.parse::<Lit>()?;
    let span = literal.span();
    extractor(literal).ok_or_else(|| syn::Error::new(span, format!("{key} must be a {expected}")))
}

/// Parses a string literal from a `#[scan(...)]` attribute.
pub(crate) fn lit_str(meta: &syn::meta::ParseNestedMeta, key: &str) -> Result<LitStr, syn::Error> {
    parse_lit(meta, key, "string", |lit| match lit {
        Lit::Str(s) => Some(s),
        _ => None,
    })
}

/// Parses a string literal holding a path, e.g. `crate = "my_alias"`.
pub(crate) fn lit_path(
    meta: &syn::meta::ParseNestedMeta,
    key: &str,
) -> Result<syn::Path, syn::Error> {
    let lit = lit_str(meta, key)?;
    lit.parse::<syn::Path>()
        .map_err(|err| syn::Error::new(lit.span(), format!("{key} must be a path: {err}")))
}
