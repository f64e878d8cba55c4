//! Inspection of the wrap chain built while decoding nested structs.

use std::error::Error as StdError;

use super::ScanError;

impl ScanError {
    /// Dotted path of the field that failed, e.g. `Outer.inner.items[2]`.
    ///
    /// Returns `None` for shape errors raised before any field was visited.
    #[must_use]
    pub fn field_path(&self) -> Option<String> {
        let mut segments = Vec::new();
        let mut current = self;
        loop {
            match current {
                Self::Nested { field, source } => {
                    segments.push(field.clone());
                    current = source.as_ref();
                }
                Self::Convert { path, .. } => {
                    segments.push(path.to_string());
                    break;
                }
                Self::Tag { field, .. }
                | Self::MissingField { field, .. }
                | Self::Decoder { field, .. }
                | Self::DepthExceeded { field, .. }
                | Self::NotAStruct {
                    field: Some(field), ..
                } => {
                    segments.push(field.clone());
                    break;
                }
                Self::NotAStruct { field: None, .. }
                | Self::ExpectedStructPointer { .. }
                | Self::NilPointer { .. } => break,
            }
        }
        (!segments.is_empty()).then(|| segments.join("."))
    }

    /// First error of type `E` in the `source()` chain, starting at `self`.
    ///
    /// Recovers typed errors returned by a decoding strategy from anywhere in
    /// the chain.
    #[must_use]
    pub fn find_source<E: StdError + 'static>(&self) -> Option<&E> {
        let mut current: Option<&(dyn StdError + 'static)> = Some(self);
        while let Some(err) = current {
            if let Some(found) = err.downcast_ref::<E>() {
                return Some(found);
            }
            current = err.source();
        }
        None
    }
}
