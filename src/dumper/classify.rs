//! Value classification
//!
//! Decides how a value is rendered. Precedence, first match wins:
//!
//! 1. null
//! 2. scalar (inline, never numbered)
//! 3. opaque: the type name matches a configured pattern, or the value
//!    describes itself as opaque
//! 4. error (message plus cause chain)
//! 5. delegate (target and method only)
//! 6. collection (elements or map entries)
//! 7. composite (named fields)
//!
//! Transparent wrappers are looked through before any of this applies.

use super::describe::{Describe, Shape};
use super::options::DumpOptions;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    Null,
    Scalar,
    Opaque,
    Error,
    Delegate,
    Collection,
    Composite,
}

impl Classification {
    /// Whether values of this class take a sequence number.
    pub fn is_tracked(self) -> bool {
        !matches!(self, Classification::Null | Classification::Scalar)
    }
}

/// Classify `value`, looking through transparent wrappers. A wrapper whose
/// contents cannot be read (a mutably borrowed cell, a held lock) counts as
/// opaque.
pub fn classify(value: &dyn Describe, options: &DumpOptions) -> Classification {
    match value.shape() {
        Shape::Transparent(slot) => slot
            .get()
            .map_or(Classification::Opaque, |inner| classify(inner, options)),
        shape => classify_shape(&shape, &value.type_name(), options),
    }
}

/// Classify an already obtained shape. Transparent shapes count as opaque
/// here; unwrap them first (as [`classify`] does) to classify the contents.
pub fn classify_shape(
    shape: &Shape<'_>,
    type_name: &str,
    options: &DumpOptions,
) -> Classification {
    match shape {
        Shape::Null => Classification::Null,
        Shape::Scalar(_) => Classification::Scalar,
        _ if options.is_opaque_type(type_name) => Classification::Opaque,
        Shape::Opaque | Shape::Transparent(_) => Classification::Opaque,
        Shape::Error { .. } => Classification::Error,
        Shape::Delegate { .. } => Classification::Delegate,
        Shape::Collection(_) => Classification::Collection,
        Shape::Composite(_) => Classification::Composite,
    }
}
