//! Field path attached to conversion failures.

use std::fmt;

use super::ConvertError;

/// Field name plus the element indices leading to a conversion failure.
///
/// Renders as `Attr1` for a scalar field and `Attr1[0][2]` for nested
/// sequence elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath {
    field: String,
    indices: Vec<usize>,
}

impl FieldPath {
    /// Builds the path for `field`, collecting the indices of every
    /// [`ConvertError::Element`] layer in `error`.
    #[must_use]
    pub fn new(field: impl Into<String>, error: &ConvertError) -> Self {
        let mut indices = Vec::new();
        let mut current = error;
        while let ConvertError::Element { index, source } = current {
            indices.push(*index);
            current = source.as_ref();
        }
        Self {
            field: field.into(),
            indices,
        }
    }

    /// Field name.
    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Element indices, outermost first.
    #[must_use]
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.field)?;
        for index in &self.indices {
            write!(f, "[{index}]")?;
        }
        Ok(())
    }
}

impl ConvertError {
    /// Innermost failure below any [`ConvertError::Element`] layers.
    #[must_use]
    pub fn innermost(&self) -> &Self {
        let mut current = self;
        while let Self::Element { source, .. } = current {
            current = source.as_ref();
        }
        current
    }
}
