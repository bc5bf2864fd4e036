//! Public entry points
//!
//! Every dump starts by validating its label, then walks the value from depth
//! 0 with a fresh identity registry. Only [`dump`] and [`dump_with`] touch
//! the diagnostic sinks; everything else just returns the rendering.

use super::describe::Describe;
use super::error::{DumpError, Result};
use super::formats::{to_text, FormatRegistry};
use super::node::DumpNode;
use super::options::DumpOptions;
use super::sink;
use super::walker::walk;
use once_cell::sync::Lazy;

static FORMATS: Lazy<FormatRegistry> = Lazy::new(FormatRegistry::with_defaults);

/// Labels must contain something besides whitespace.
pub fn validate_label(label: &str) -> Result<&str> {
    if label.trim().is_empty() {
        return Err(DumpError::InvalidLabel(label.to_string()));
    }
    Ok(label)
}

/// Render `value` to every registered sink and hand it back unchanged.
///
/// ```rust
/// let config = load_config()?;
/// let config = graph_dump::dump(config, "config")?;
/// ```
pub fn dump<T: Describe>(value: T, label: &str) -> Result<T> {
    dump_with(value, label, &DumpOptions::default())
}

pub fn dump_with<T: Describe>(value: T, label: &str, options: &DumpOptions) -> Result<T> {
    let text = dump_to_string_with(&value, label, options)?;
    sink::emit(&text);
    Ok(value)
}

/// Render `value` as text without writing it anywhere.
pub fn dump_to_string<T: Describe + ?Sized>(value: &T, label: &str) -> Result<String> {
    dump_to_string_with(value, label, &DumpOptions::default())
}

pub fn dump_to_string_with<T: Describe + ?Sized>(
    value: &T,
    label: &str,
    options: &DumpOptions,
) -> Result<String> {
    dump_tree(value, label, options).map(|root| to_text(&root))
}

/// The node tree behind a rendering.
pub fn dump_tree<T: Describe + ?Sized>(
    value: &T,
    label: &str,
    options: &DumpOptions,
) -> Result<DumpNode> {
    let label = validate_label(label)?;
    // `&T` is sized and forwards shape and identity to `T`.
    Ok(walk(&value, label, options))
}

/// Render `value` through a named format (`text`, `json`, `yaml`).
pub fn dump_as<T: Describe + ?Sized>(
    value: &T,
    label: &str,
    options: &DumpOptions,
    format: &str,
) -> Result<String> {
    let root = dump_tree(value, label, options)?;
    Ok(FORMATS.serialize(&root, format)?)
}

/// Method-call form of the dump functions, available on every
/// [`Describe`] type.
pub trait DumpExt: Describe {
    fn dump(&self, label: &str) -> Result<&Self> {
        dump(self, label)
    }

    fn dump_with(&self, label: &str, options: &DumpOptions) -> Result<&Self> {
        dump_with(self, label, options)
    }

    fn dump_to_string(&self, label: &str) -> Result<String> {
        dump_to_string(self, label)
    }

    fn dump_to_string_with(&self, label: &str, options: &DumpOptions) -> Result<String> {
        dump_to_string_with(self, label, options)
    }
}

impl<T: Describe + ?Sized> DumpExt for T {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dumper::formats::LINE_ENDING;
    use rstest::rstest;

    #[rstest(label, case(""), case(" "), case(" \t\r\n "))]
    fn blank_labels_are_rejected(label: &str) {
        let err = dump_to_string(&1u8, label).expect_err("blank label");
        assert!(err.is_invalid_label());
    }

    #[test]
    fn scalar_roots_render_inline() {
        let text = dump_to_string(&42u32, "answer").expect("valid label");
        assert_eq!(text, format!("answer: 42{LINE_ENDING}"));
    }

    #[test]
    fn unsized_values_can_be_dumped() {
        let items: &[u8] = &[1, 2];
        let text = dump_to_string(items, "items").expect("valid label");
        assert!(text.starts_with("#1: items [[u8]]"));
    }

    #[test]
    fn dump_returns_the_same_reference() {
        let value = vec![1, 2, 3];
        let returned = dump(&value, "value").expect("valid label");
        assert!(std::ptr::eq(returned, &value));
        let returned = value.dump("value").expect("valid label");
        assert!(std::ptr::eq(returned, &value));
    }

    #[test]
    fn dump_as_uses_the_format_registry() {
        let json = dump_as(&vec![1], "v", &DumpOptions::default(), "json").expect("json");
        assert!(json.contains("\"name\": \"v\""));
        let err = dump_as(&vec![1], "v", &DumpOptions::default(), "xml").expect_err("unknown");
        assert!(err.is_format());
    }
}
