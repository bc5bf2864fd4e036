//! JSON and YAML renderings of the node tree
//!
//! These expose the walker's output as data, for tools that post-process
//! dumps instead of reading them.

use super::registry::{FormatError, NodeFormatter};
use crate::dumper::node::DumpNode;

pub struct JsonFormatter;

impl NodeFormatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn serialize(&self, node: &DumpNode) -> Result<String, FormatError> {
        serde_json::to_string_pretty(node).map_err(|err| FormatError::render("json", err))
    }

    fn description(&self) -> &str {
        "Node tree as pretty-printed JSON"
    }
}

pub struct YamlFormatter;

impl NodeFormatter for YamlFormatter {
    fn name(&self) -> &str {
        "yaml"
    }

    fn serialize(&self, node: &DumpNode) -> Result<String, FormatError> {
        serde_yaml::to_string(node).map_err(|err| FormatError::render("yaml", err))
    }

    fn description(&self) -> &str {
        "Node tree as YAML"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dumper::node::NodeKind;

    fn sample() -> DumpNode {
        let mut root = DumpNode::header("root", 1, "Root", NodeKind::Composite);
        root.children.push(DumpNode::scalar("size", "2"));
        root.children
            .push(DumpNode::back_reference("me", 1, "Root", NodeKind::Composite));
        root
    }

    #[test]
    fn json_keeps_the_tree() {
        let json = JsonFormatter.serialize(&sample()).expect("serializable");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        assert_eq!(value["id"], 1);
        assert_eq!(value["children"][0]["text"], "2");
        assert_eq!(value["children"][1]["back_reference"], true);
    }

    #[test]
    fn yaml_keeps_the_tree() {
        let yaml = YamlFormatter.serialize(&sample()).expect("serializable");
        let parsed: DumpNode = serde_yaml::from_str(&yaml).expect("valid yaml");
        assert_eq!(parsed, sample());
    }
}
