//! Named output formats
//!
//! A dump is walked once into a [`DumpNode`] tree; each [`NodeFormatter`]
//! turns that tree into one textual representation. The facade keeps a
//! process-wide [`FormatRegistry`] holding `text`, `json` and `yaml`.

use crate::dumper::node::DumpNode;
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("unknown format '{name}' (available: {})", .available.join(", "))]
    Unknown {
        name: String,
        available: Vec<String>,
    },
    #[error("cannot render dump as {format}: {reason}")]
    Render { format: String, reason: String },
}

impl FormatError {
    pub(crate) fn render(format: &str, reason: impl ToString) -> Self {
        FormatError::Render {
            format: format.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Renders a dump node tree.
pub trait NodeFormatter: Send + Sync {
    /// Key the formatter is registered under, as passed to `--format`.
    fn name(&self) -> &str;

    fn serialize(&self, node: &DumpNode) -> Result<String, FormatError>;

    fn description(&self) -> &str {
        ""
    }
}

/// Formatters by name. Iteration is in name order.
#[derive(Default)]
pub struct FormatRegistry {
    formatters: BTreeMap<String, Box<dyn NodeFormatter>>,
}

impl FormatRegistry {
    /// A registry with no formats at all.
    pub fn new() -> Self {
        Self::default()
    }

    /// `text`, `json` and `yaml`.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(super::TextFormatter);
        registry.register(super::JsonFormatter);
        registry.register(super::YamlFormatter);
        registry
    }

    /// Adds `formatter`; a later registration under the same name wins.
    pub fn register<F: NodeFormatter + 'static>(&mut self, formatter: F) {
        let name = formatter.name().to_string();
        self.formatters.insert(name, Box::new(formatter));
    }

    pub fn get(&self, name: &str) -> Option<&dyn NodeFormatter> {
        self.formatters.get(name).map(Box::as_ref)
    }

    pub fn has(&self, name: &str) -> bool {
        self.formatters.contains_key(name)
    }

    pub fn serialize(&self, node: &DumpNode, format: &str) -> Result<String, FormatError> {
        match self.get(format) {
            Some(formatter) => formatter.serialize(node),
            None => Err(FormatError::Unknown {
                name: format.to_string(),
                available: self.list_formats(),
            }),
        }
    }

    pub fn list_formats(&self) -> Vec<String> {
        self.formatters.keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dumper::node::NodeKind;

    struct CountFormatter;

    impl NodeFormatter for CountFormatter {
        fn name(&self) -> &str {
            "count"
        }

        fn serialize(&self, node: &DumpNode) -> Result<String, FormatError> {
            Ok(node.count().to_string())
        }
    }

    fn sample() -> DumpNode {
        let mut root = DumpNode::header("root", 1, "Root", NodeKind::Composite);
        root.children.push(DumpNode::scalar("size", "2"));
        root
    }

    #[test]
    fn registered_formats_are_found() {
        let mut registry = FormatRegistry::new();
        registry.register(CountFormatter);

        assert!(registry.has("count"));
        assert_eq!(registry.serialize(&sample(), "count"), Ok("2".to_string()));
    }

    #[test]
    fn unknown_formats_are_reported() {
        let registry = FormatRegistry::new();
        assert_eq!(
            registry.serialize(&sample(), "xml"),
            Err(FormatError::Unknown {
                name: "xml".to_string(),
                available: Vec::new(),
            })
        );
        let registry = FormatRegistry::with_defaults();
        let err = registry.serialize(&sample(), "xml").expect_err("unknown format");
        assert_eq!(
            err.to_string(),
            "unknown format 'xml' (available: json, text, yaml)"
        );
    }

    #[test]
    fn defaults_list_sorted() {
        let registry = FormatRegistry::with_defaults();
        assert_eq!(registry.list_formats(), vec!["json", "text", "yaml"]);
        assert_eq!(
            registry.get("text").map(|f| f.description()),
            Some("Indented #N: name [Type] rendering")
        );
    }
}
